//! GPIO / ADC assignments for the proofing-box controller board.
//!
//! Single source of truth: the binary and the ADC driver reference this
//! module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Heater relay (SSR or coil via transistor, active HIGH)
// ---------------------------------------------------------------------------

/// Digital output driving the heater relay.
pub const RELAY_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Probes: NTC thermistors on ADC1 (10 kOhm divider each)
// ---------------------------------------------------------------------------

/// Box air probe, ADC1 channel 6 (GPIO 34 on ESP32).
pub const BOX_PROBE_ADC_CHANNEL: u32 = 6;
/// Dough probe, ADC1 channel 7 (GPIO 35 on ESP32).
pub const DOUGH_PROBE_ADC_CHANNEL: u32 = 7;
