//! Mock hardware adapter for integration tests.
//!
//! Records every relay call so tests can assert on the full command
//! history, and plays back scripted probe readings.

use std::collections::VecDeque;

use proofer::app::events::ControllerEvent;
use proofer::app::ports::{EventSink, RelayPort, SensorPort};
use proofer::drivers::relay::RelayState;
use proofer::error::{ActuatorError, Fault, SensorError};
use proofer::fsm::ControllerState;
use proofer::temperature::TemperatureSample;

// ── Relay call record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelayCall {
    Energize(bool),
    Disable,
    Enable,
}

// ── MockHardware ──────────────────────────────────────────────

/// Probe readings are taken from `script` first; once it runs dry the
/// last `current` reading repeats.
pub struct MockHardware {
    pub calls: Vec<RelayCall>,
    pub current: Result<TemperatureSample, SensorError>,
    pub script: VecDeque<Result<TemperatureSample, SensorError>>,
    pub enabled: bool,
    pub output_on: bool,
    pub fail_writes: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(box_c: f32, dough_c: f32) -> Self {
        Self {
            calls: Vec::new(),
            current: Ok(TemperatureSample::new(box_c, dough_c)),
            script: VecDeque::new(),
            enabled: true,
            output_on: false,
            fail_writes: false,
        }
    }

    pub fn set(&mut self, box_c: f32, dough_c: f32) {
        self.current = Ok(TemperatureSample::new(box_c, dough_c));
    }

    pub fn fail_with(&mut self, err: SensorError) {
        self.current = Err(err);
    }

    pub fn push(&mut self, box_c: f32, dough_c: f32) {
        self.script
            .push_back(Ok(TemperatureSample::new(box_c, dough_c)));
    }

    pub fn last_energize(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            RelayCall::Energize(on) => Some(*on),
            _ => None,
        })
    }
}

impl SensorPort for MockHardware {
    fn read_temperatures(&mut self) -> Result<TemperatureSample, SensorError> {
        if let Some(next) = self.script.pop_front() {
            self.current = next;
        }
        self.current
    }
}

impl RelayPort for MockHardware {
    fn set_energized(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.calls.push(RelayCall::Energize(on));
        if self.fail_writes {
            return Err(ActuatorError::GpioWriteFailed);
        }
        self.output_on = on && self.enabled;
        Ok(())
    }

    fn disable_relay(&mut self) -> Result<(), ActuatorError> {
        self.calls.push(RelayCall::Disable);
        self.enabled = false;
        self.output_on = false;
        Ok(())
    }

    fn enable_relay(&mut self) {
        self.calls.push(RelayCall::Enable);
        self.enabled = true;
    }

    fn relay_state(&mut self) -> Result<RelayState, ActuatorError> {
        Ok(if self.output_on {
            RelayState::On
        } else {
            RelayState::Off
        })
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<ControllerEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states(&self) -> Vec<ControllerState> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ControllerEvent::StateChanged { state, .. } => Some(*state),
                _ => None,
            })
            .collect()
    }

    pub fn faults(&self) -> Vec<Fault> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ControllerEvent::Fault(f) => Some(*f),
                _ => None,
            })
            .collect()
    }

    pub fn trips(&self) -> Vec<Fault> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ControllerEvent::SafetyTrip(f) => Some(*f),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &ControllerEvent) {
        self.events.push(event.clone());
    }
}
