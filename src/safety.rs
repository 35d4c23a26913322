//! Safety supervisor.
//!
//! Runs **every tick before the state table**, but only while the relay is
//! commanded on.  Two conditions trip it:
//!
//! 1. Box air above `max_box_temp_c` (overheat).
//! 2. The current heating phase has lasted longer than
//!    `phase_timeout_secs` (stuck relay, open lid, dead element).
//!
//! The supervisor only classifies.  What a trip *does* (rest in
//! `Detention` or latch `Error`) is the state machine's job, selected by
//! [`SafetyAction`](crate::config::SafetyAction).

use log::error;

use crate::config::ControllerConfig;
use crate::error::Fault;
use crate::fsm::RelayCommand;
use crate::temperature::Temperature;

/// Safety supervisor.
pub struct SafetySupervisor {
    max_box_c: f32,
    phase_timeout_ms: u32,
}

impl SafetySupervisor {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            max_box_c: config.max_box_temp_c,
            phase_timeout_ms: config.phase_timeout_ms(),
        }
    }

    /// Evaluate the safety net for one tick.  Overheat wins over timeout
    /// when both hold.
    pub fn evaluate(
        &self,
        relay: RelayCommand,
        box_air: Temperature,
        phase_elapsed_ms: u32,
    ) -> Option<Fault> {
        if relay != RelayCommand::On {
            return None;
        }

        let fault = if box_air.is_above(self.max_box_c) {
            Fault::Overheat {
                box_c: box_air.celsius(),
            }
        } else if phase_elapsed_ms > self.phase_timeout_ms {
            Fault::StuckHeating {
                elapsed_ms: phase_elapsed_ms,
            }
        } else {
            return None;
        };

        error!("SAFETY TRIP: {fault}");
        Some(fault)
    }

    pub fn max_box_c(&self) -> f32 {
        self.max_box_c
    }

    pub fn phase_timeout_ms(&self) -> u32 {
        self.phase_timeout_ms
    }
}
