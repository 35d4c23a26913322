//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing controller events to the logger
//! (UART / USB-CDC in production).  Status documents are printed as the
//! same JSON the front end consumes.

use log::{error, info, warn};

use crate::app::events::ControllerEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ControllerEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ControllerEvent) {
        match event {
            ControllerEvent::StateChanged { relay, state } => {
                info!("STATE | {state} | relay={relay:?}");
            }
            ControllerEvent::Fault(fault) => {
                error!("FAULT | {fault}");
            }
            ControllerEvent::SafetyTrip(fault) => {
                warn!("TRIP  | {fault} | resting in DETENTION");
            }
            ControllerEvent::Status(status) => match status.to_json() {
                Ok(json) => info!("STATUS | {json}"),
                Err(e) => warn!("STATUS | serialise failed: {e}"),
            },
        }
    }
}
