//! Outbound application events.
//!
//! The [`ProofingService`](super::service::ProofingService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them: log to serial, serve over HTTP,
//! and so on.

use serde::Serialize;

use crate::drivers::relay::RelayState;
use crate::error::Fault;
use crate::fsm::{ControllerState, RelayCommand};
use crate::temperature::TemperatureSample;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    /// The controller changed state (also emitted once at start-up).
    StateChanged {
        relay: RelayCommand,
        state: ControllerState,
    },

    /// The controller entered `Error`.
    Fault(Fault),

    /// The safety net tripped and the controller is resting in `Detention`.
    SafetyTrip(Fault),

    /// Periodic or requested status document.
    Status(ControllerStatus),
}

/// Status document served to the front end.
///
/// ```json
/// { "state": "HOLD_ON",
///   "config": { "targetTemperature": 28.0 },
///   "sensors": { "relay": "ON", "temperatures": { "box": 31.0, "dough": 27.5 } } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerStatus {
    pub state: &'static str,
    pub config: StatusConfig,
    pub sensors: StatusSensors,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusConfig {
    pub target_temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSensors {
    pub relay: RelayState,
    pub temperatures: TemperatureSample,
}

impl ControllerStatus {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
