//! Application service, the hexagonal core.
//!
//! [`ProofingService`] owns the state machine and runs the control tick.
//! All I/O flows through port traits passed in at call sites, making the
//! whole service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!                 │     ProofingService     │
//!   RelayPort ◀── │  Safety · FSM · Status  │
//!                 └─────────────────────────┘
//! ```

use log::{error, info, warn};

use crate::clock::Clock;
use crate::config::ControllerConfig;
use crate::drivers::relay::RelayState;
use crate::error::{ActuatorError, Fault};
use crate::fsm::{ControllerObserver, ControllerState, RelayCommand, ThermalStateMachine};

use super::commands::AppCommand;
use super::events::{ControllerEvent, ControllerStatus, StatusConfig, StatusSensors};
use super::ports::{EventSink, RelayPort, SensorPort};

// ───────────────────────────────────────────────────────────────
// Observer bridge
// ───────────────────────────────────────────────────────────────

/// Turns state machine notifications into relay writes and events.
///
/// Lives for one call into the state machine.  A failed relay write is
/// latched in `relay_error` and routed back into the machine by the
/// service once the call returns.
struct RelayBridge<'a, H, S> {
    hw: &'a mut H,
    sink: &'a mut S,
    relay_error: Option<ActuatorError>,
}

impl<'a, H: RelayPort, S: EventSink> RelayBridge<'a, H, S> {
    fn new(hw: &'a mut H, sink: &'a mut S) -> Self {
        Self {
            hw,
            sink,
            relay_error: None,
        }
    }

    fn take_relay_error(&mut self) -> Option<ActuatorError> {
        self.relay_error.take()
    }
}

impl<H: RelayPort, S: EventSink> ControllerObserver for RelayBridge<'_, H, S> {
    fn on_state_change(&mut self, relay: RelayCommand, state: ControllerState) {
        if let Err(e) = self.hw.set_energized(relay.is_on()) {
            error!("relay write failed entering {state}: {e}");
            if self.relay_error.is_none() {
                self.relay_error = Some(e);
            }
        }
        self.sink
            .emit(&ControllerEvent::StateChanged { relay, state });
    }

    fn on_error(&mut self, fault: Fault) {
        if let Err(e) = self.hw.disable_relay() {
            error!("relay disable failed: {e}");
        }
        self.sink.emit(&ControllerEvent::Fault(fault));
    }

    fn on_safety_trip(&mut self, fault: Fault) {
        self.sink.emit(&ControllerEvent::SafetyTrip(fault));
    }
}

// ───────────────────────────────────────────────────────────────
// ProofingService
// ───────────────────────────────────────────────────────────────

/// Runs the proofing controller against injected hardware.
pub struct ProofingService<C: Clock> {
    fsm: ThermalStateMachine<C>,
    tick_count: u64,
    status_interval_ticks: u32,
}

impl<C: Clock> ProofingService<C> {
    /// Build the state machine and drive the relay to the initial state.
    ///
    /// `config` should already have passed [`ControllerConfig::validate`].
    pub fn new<H, S>(config: &ControllerConfig, clock: C, hw: &mut H, sink: &mut S) -> Self
    where
        H: RelayPort,
        S: EventSink,
    {
        let mut bridge = RelayBridge::new(hw, sink);
        let mut fsm = ThermalStateMachine::new(config, clock, &mut bridge);
        if let Some(e) = bridge.take_relay_error() {
            fsm.set_error_state(Fault::RelayFault(e), &mut bridge);
        }
        info!(
            "ProofingService ready (status every {} ticks)",
            config.status_interval_ticks
        );
        Self {
            fsm,
            tick_count: 0,
            status_interval_ticks: config.status_interval_ticks,
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: read probes, then safety and FSM, then relay.
    ///
    /// `hw` satisfies **both** [`SensorPort`] and [`RelayPort`]; this
    /// avoids a double mutable borrow while keeping the port boundary
    /// explicit.
    pub fn tick<H, S>(&mut self, hw: &mut H, sink: &mut S)
    where
        H: SensorPort + RelayPort,
        S: EventSink,
    {
        self.tick_count += 1;

        let reading = hw.read_temperatures();
        {
            let mut bridge = RelayBridge::new(hw, sink);
            match reading {
                Ok(sample) => self.fsm.process(sample, &mut bridge),
                // Already halted; don't re-report the same fault every tick.
                Err(_) if self.fsm.state() == ControllerState::Error => {}
                Err(e) => self
                    .fsm
                    .set_error_state(Fault::SensorFault(e), &mut bridge),
            }
            self.settle(&mut bridge);
        }

        if self.status_interval_ticks != 0
            && self.tick_count % u64::from(self.status_interval_ticks) == 0
        {
            self.emit_status(hw, sink);
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an operator command (web UI, console, button).
    pub fn handle_command<H, S>(&mut self, cmd: AppCommand, hw: &mut H, sink: &mut S)
    where
        H: RelayPort,
        S: EventSink,
    {
        match cmd {
            AppCommand::TurnOn => {
                hw.enable_relay();
                let mut bridge = RelayBridge::new(hw, sink);
                self.fsm.restart(&mut bridge);
                self.settle(&mut bridge);
            }
            AppCommand::TurnOff => {
                let mut bridge = RelayBridge::new(hw, sink);
                self.fsm.pause(&mut bridge);
                self.settle(&mut bridge);
            }
            AppCommand::SetTargetTemperature(celsius) => {
                if celsius.is_finite() {
                    self.fsm.set_desired_dough_temperature(celsius);
                } else {
                    warn!("ignoring non-finite setpoint {celsius}");
                }
            }
            AppCommand::ReportStatus => self.emit_status(hw, sink),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Snapshot for the front end.  `relay` is what the hardware reports,
    /// not what the state table commands.
    pub fn build_status(&self, relay: RelayState) -> ControllerStatus {
        ControllerStatus {
            state: self.fsm.state_name(),
            config: StatusConfig {
                target_temperature: self.fsm.setpoint().celsius(),
            },
            sensors: StatusSensors {
                relay,
                temperatures: self.fsm.temperatures(),
            },
        }
    }

    pub fn state(&self) -> ControllerState {
        self.fsm.state()
    }

    pub fn fsm(&self) -> &ThermalStateMachine<C> {
        &self.fsm
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Route a latched relay failure into `Error`.  Entering `Error` only
    /// writes the output low, so a second failure is logged and dropped.
    fn settle<H: RelayPort, S: EventSink>(&mut self, bridge: &mut RelayBridge<'_, H, S>) {
        if let Some(e) = bridge.take_relay_error() {
            self.fsm.set_error_state(Fault::RelayFault(e), bridge);
            bridge.take_relay_error();
        }
    }

    fn emit_status<H: RelayPort, S: EventSink>(&self, hw: &mut H, sink: &mut S) {
        let relay = match hw.relay_state() {
            Ok(state) => state,
            Err(e) => {
                warn!("relay read-back failed: {e}");
                if self.fsm.relay().is_on() {
                    RelayState::On
                } else {
                    RelayState::Off
                }
            }
        };
        sink.emit(&ControllerEvent::Status(self.build_status(relay)));
    }
}
