//! NTC thermistor conversion (10 kOhm @ 25 C, B = 3950).
//!
//! Each probe sits on the low side of a divider with a fixed 10 kOhm
//! resistor, read by a 12-bit ADC.  The simplified Beta (Steinhart-Hart)
//! equation converts resistance to temperature.
//!
//! An unplugged probe pulls the divider to the supply rail and a shorted
//! one pulls it to ground; both read as [`Conversion::Disconnected`].

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const KELVIN: f32 = 273.15;
const R_DIVIDER: f32 = 10_000.0;
pub const ADC_MAX: u16 = 4095;
const V_REF: f32 = 3.3;
/// Readings within this many volts of either rail are treated as open/short.
const RAIL_MARGIN_V: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    Celsius(f32),
    Disconnected,
}

/// Convert a raw 12-bit code to Celsius.
pub fn adc_to_celsius(raw: u16) -> Conversion {
    let voltage = (f32::from(raw.min(ADC_MAX)) / f32::from(ADC_MAX)) * V_REF;
    if voltage <= RAIL_MARGIN_V || voltage >= (V_REF - RAIL_MARGIN_V) {
        return Conversion::Disconnected;
    }
    let r_ntc = R_DIVIDER * voltage / (V_REF - voltage);
    let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
    if inv_t <= 0.0 {
        return Conversion::Disconnected;
    }
    Conversion::Celsius((1.0 / inv_t) - KELVIN)
}

/// Inverse of [`adc_to_celsius`]; used by the simulated ADC.
pub fn celsius_to_adc(celsius: f32) -> u16 {
    let t_k = celsius + KELVIN;
    let r_ntc = R25 * (BETA * (1.0 / t_k - 1.0 / T25_K)).exp();
    let voltage = V_REF * r_ntc / (R_DIVIDER + r_ntc);
    let raw = (voltage / V_REF * f32::from(ADC_MAX)).round();
    raw.clamp(0.0, f32::from(ADC_MAX)) as u16
}
