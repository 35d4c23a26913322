//! Thermal state machine: the proofing controller's heating policy.
//!
//! Table-driven FSM in the classic embedded style:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │  StateTable                                            │
//! │  ┌────────────┬──────────────┬───────┬──────────────┐  │
//! │  │ State      │ name         │ relay │ on_update    │  │
//! │  ├────────────┼──────────────┼───────┼──────────────┤  │
//! │  │ Paused     │ "PAUSED"     │ Off   │ stay         │  │
//! │  │ Start      │ "START"      │ Off   │ fn(ctx)->Opt │  │
//! │  │ ...        │              │       │              │  │
//! │  │ HoldOn     │ "HOLD_ON"    │ On    │ fn(ctx)->Opt │  │
//! │  │ BoostOn    │ "BOOST_ON"   │ On    │ fn(ctx)->Opt │  │
//! │  │ Error      │ "ERROR"      │ Off   │ stay         │  │
//! │  └────────────┴──────────────┴───────┴──────────────┘  │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! Each `process()` call runs the [`SafetySupervisor`] first, and only if it
//! stays quiet consults the current row's `on_update`.  A transition fires
//! the observer exactly once; a tick that re-selects the current state
//! fires nothing and leaves the phase timer alone.
//!
//! The current state and the time it was entered live together in one
//! [`Phase`] value, so "time in phase" and "time in detention" cannot
//! drift apart.

pub mod context;
pub mod states;

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, elapsed_ms};
use crate::config::{ControllerConfig, SafetyAction};
use crate::error::Fault;
use crate::safety::SafetySupervisor;
use crate::temperature::{Range, Setpoint, TemperatureSample};
use context::TickContext;
use states::{StateDescriptor, build_state_table};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Operating modes of the controller.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ControllerState {
    Paused = 0,
    Start = 1,
    Cooldown = 2,
    HoldOn = 3,
    HoldOff = 4,
    BoostOn = 5,
    BoostOff = 6,
    Detention = 7,
    Error = 8,
}

impl ControllerState {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 9;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Paused,
        Self::Start,
        Self::Cooldown,
        Self::HoldOn,
        Self::HoldOff,
        Self::BoostOn,
        Self::BoostOff,
        Self::Detention,
        Self::Error,
    ];

    /// Convert a raw index back to a state.
    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    /// Wire name reported to observers and the status document.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Paused => "PAUSED",
            Self::Start => "START",
            Self::Cooldown => "COOLDOWN",
            Self::HoldOn => "HOLD_ON",
            Self::HoldOff => "HOLD_OFF",
            Self::BoostOn => "BOOST_ON",
            Self::BoostOff => "BOOST_OFF",
            Self::Detention => "DETENTION",
            Self::Error => "ERROR",
        }
    }

    /// Relay command implied by this state.
    pub const fn relay(self) -> RelayCommand {
        match self {
            Self::HoldOn | Self::BoostOn => RelayCommand::On,
            _ => RelayCommand::Off,
        }
    }
}

impl core::fmt::Display for ControllerState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Heater relay command.  Derived from the state, never stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayCommand {
    #[serde(rename = "ON")]
    On,
    #[serde(rename = "OFF")]
    Off,
}

impl RelayCommand {
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

/// The active state together with the moment it was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub state: ControllerState,
    pub entered_ms: u32,
}

// ---------------------------------------------------------------------------
// Observer
// ---------------------------------------------------------------------------

/// Receives the state machine's notifications.
///
/// Called synchronously from inside `process()`, `pause()`, `restart()` and
/// `set_error_state()`; implementations must not block.
pub trait ControllerObserver {
    /// A transition happened (or the machine was just constructed).
    fn on_state_change(&mut self, relay: RelayCommand, state: ControllerState);

    /// The machine entered `Error` for `fault`.
    fn on_error(&mut self, fault: Fault);

    /// The safety net tripped and the machine is resting in `Detention`.
    fn on_safety_trip(&mut self, _fault: Fault) {}
}

/// Adapts a pair of closures to [`ControllerObserver`].
pub struct Callbacks<S, E>
where
    S: FnMut(RelayCommand, &str),
    E: FnMut(&str),
{
    pub on_state_change: S,
    pub on_error: E,
}

impl<S, E> ControllerObserver for Callbacks<S, E>
where
    S: FnMut(RelayCommand, &str),
    E: FnMut(&str),
{
    fn on_state_change(&mut self, relay: RelayCommand, state: ControllerState) {
        (self.on_state_change)(relay, state.name());
    }

    fn on_error(&mut self, fault: Fault) {
        let reason = fault.to_string();
        (self.on_error)(&reason);
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Closed-loop on/off controller for the proofing box.
///
/// Single owner, single writer: the tick loop and operator commands must be
/// serialised onto the same thread.
pub struct ThermalStateMachine<C: Clock> {
    table: [StateDescriptor; ControllerState::COUNT],
    phase: Phase,
    setpoint: Setpoint,
    sample: TemperatureSample,
    safety: SafetySupervisor,
    safety_action: SafetyAction,
    max_dough_c: f32,
    detention_ms: u32,
    clock: C,
}

impl<C: Clock> ThermalStateMachine<C> {
    /// Build the machine and announce the initial state (relay off) to
    /// `observer` once.
    pub fn new(
        config: &ControllerConfig,
        clock: C,
        observer: &mut impl ControllerObserver,
    ) -> Self {
        let initial = if config.start_paused {
            ControllerState::Paused
        } else {
            ControllerState::Start
        };
        let machine = Self {
            table: build_state_table(),
            phase: Phase {
                state: initial,
                entered_ms: clock.now_ms(),
            },
            setpoint: Setpoint::new(config.initial_setpoint_c, config.max_dough_temp_c),
            sample: TemperatureSample::default(),
            safety: SafetySupervisor::new(config),
            safety_action: config.safety_action,
            max_dough_c: config.max_dough_temp_c,
            detention_ms: config.detention_ms(),
            clock,
        };

        info!(
            "FSM starting in state: {} (setpoint {})",
            machine.state_name(),
            machine.setpoint
        );
        observer.on_state_change(machine.relay(), machine.phase.state);
        machine
    }

    /// Consume one sample and advance at most one transition.
    pub fn process(&mut self, sample: TemperatureSample, observer: &mut impl ControllerObserver) {
        if self.phase.state == ControllerState::Paused {
            return;
        }
        self.sample = sample;

        let phase_elapsed_ms = self.time_in_phase_ms();

        // Safety net runs before any mode logic.
        if let Some(fault) = self
            .safety
            .evaluate(self.relay(), sample.box_air, phase_elapsed_ms)
        {
            match self.safety_action {
                SafetyAction::Detain => {
                    self.detent(observer);
                    observer.on_safety_trip(fault);
                }
                SafetyAction::Halt => self.set_error_state(fault, observer),
            }
            return;
        }

        let idx = self.phase.state as u8;
        let Some(row) = self
            .table
            .get(idx as usize)
            .filter(|row| row.id == self.phase.state)
        else {
            self.set_error_state(Fault::UnknownState(idx), observer);
            return;
        };

        let ctx = TickContext {
            dough: sample.dough,
            box_air: sample.box_air,
            setpoint_c: self.setpoint.celsius(),
            hold: self.hold_range(),
            boost: self.boost_range(),
            phase_elapsed_ms,
            detention_ms: self.detention_ms,
        };

        if let Some(next) = (row.on_update)(&ctx) {
            self.transition_to(next, observer);
        }
    }

    /// Operator stop.  Allowed from every state, including `Error`.
    pub fn pause(&mut self, observer: &mut impl ControllerObserver) {
        self.transition_to(ControllerState::Paused, observer);
    }

    /// Operator (re)start.  Allowed from every state, including `Error`.
    pub fn restart(&mut self, observer: &mut impl ControllerObserver) {
        self.transition_to(ControllerState::Start, observer);
    }

    /// Enter `Error` and report `fault`.  Ignored while paused: a pause
    /// always wins over a late fault.
    pub fn set_error_state(&mut self, fault: Fault, observer: &mut impl ControllerObserver) {
        if self.phase.state == ControllerState::Paused {
            return;
        }
        error!("FSM error: {fault}");
        self.transition_to(ControllerState::Error, observer);
        observer.on_error(fault);
    }

    /// Rest in `Detention`; the rest period is measured from now.
    pub fn detent(&mut self, observer: &mut impl ControllerObserver) {
        warn!("FSM detention for {}s", self.detention_ms / 1000);
        self.transition_to(ControllerState::Detention, observer);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn state(&self) -> ControllerState {
        self.phase.state
    }

    pub fn state_name(&self) -> &'static str {
        self.phase.state.name()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn relay(&self) -> RelayCommand {
        self.phase.state.relay()
    }

    /// Milliseconds since the last transition.
    pub fn time_in_phase_ms(&self) -> u32 {
        elapsed_ms(self.clock.now_ms(), self.phase.entered_ms)
    }

    /// Last sample passed to `process()` (zeros before the first one).
    pub fn temperatures(&self) -> TemperatureSample {
        self.sample
    }

    pub fn setpoint(&self) -> Setpoint {
        self.setpoint
    }

    /// Replace the setpoint, re-applying the `max_dough_temp_c` clamp.
    pub fn set_desired_dough_temperature(&mut self, celsius: f32) {
        self.setpoint = Setpoint::new(celsius, self.max_dough_c);
        info!("FSM setpoint now {}", self.setpoint);
    }

    /// `[S - 0.5, S + 2.0]`, recomputed from the current setpoint.
    pub fn hold_range(&self) -> Range {
        context::hold_range(self.setpoint.celsius(), self.max_dough_c)
    }

    /// `[S + 4.0, S + 6.0]`, recomputed from the current setpoint.
    pub fn boost_range(&self) -> Range {
        context::boost_range(self.setpoint.celsius(), self.max_dough_c)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition_to(&mut self, next: ControllerState, observer: &mut impl ControllerObserver) {
        if next == self.phase.state {
            return;
        }

        info!("FSM transition: {} -> {}", self.phase.state, next);

        self.phase = Phase {
            state: next,
            entered_ms: self.clock.now_ms(),
        };
        observer.on_state_change(next.relay(), next);
    }
}
