//! Port traits, the hexagonal boundary between the controller and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ProofingService (domain)
//! ```
//!
//! Driven adapters (probes, relay, event sinks) implement these traits.
//! The [`ProofingService`](super::service::ProofingService) consumes them
//! via generics, so the domain core never touches hardware directly.

use crate::drivers::relay::RelayState;
use crate::error::{ActuatorError, SensorError};
use crate::temperature::TemperatureSample;

use super::events::ControllerEvent;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per control tick.
pub trait SensorPort {
    /// Read box air and dough together.  An error means neither value
    /// may be acted on.
    fn read_temperatures(&mut self) -> Result<TemperatureSample, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the heater relay.
pub trait RelayPort {
    /// Energise (`true`) or release (`false`) the heater.
    fn set_energized(&mut self, on: bool) -> Result<(), ActuatorError>;

    /// Force the heater off and refuse to energise until
    /// [`enable_relay`](Self::enable_relay).
    fn disable_relay(&mut self) -> Result<(), ActuatorError>;

    fn enable_relay(&mut self);

    /// Physical output state as read back from the hardware.
    fn relay_state(&mut self) -> Result<RelayState, ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / front end)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`ControllerEvent`]s through this port.
/// Adapters decide where they go (serial log, HTTP status page, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &ControllerEvent);
}
