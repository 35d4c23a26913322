//! Integration tests for the ProofingService → FSM → relay pipeline.
//!
//! These run on the host (x86_64) and drive the full tick loop from a
//! scripted probe reading down to the relay call, with a manual clock.

use crate::mock_hw::{MockHardware, RecordingSink, RelayCall};

use proofer::app::commands::AppCommand;
use proofer::app::events::ControllerEvent;
use proofer::app::service::ProofingService;
use proofer::clock::ManualClock;
use proofer::config::{ControllerConfig, SafetyAction};
use proofer::error::{Fault, Probe, SensorError};
use proofer::fsm::ControllerState;

fn make_service<'a>(
    config: &ControllerConfig,
    clock: &'a ManualClock,
    hw: &mut MockHardware,
    sink: &mut RecordingSink,
) -> ProofingService<&'a ManualClock> {
    ProofingService::new(config, clock, hw, sink)
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn startup_announces_start_with_relay_off() {
    let clock = ManualClock::new(0);
    let mut hw = MockHardware::new(25.0, 20.0);
    let mut sink = RecordingSink::new();
    let svc = make_service(&ControllerConfig::default(), &clock, &mut hw, &mut sink);

    assert_eq!(svc.state(), ControllerState::Start);
    assert_eq!(hw.calls, vec![RelayCall::Energize(false)]);
    assert_eq!(sink.states(), vec![ControllerState::Start]);
}

#[test]
fn start_paused_ignores_ticks() {
    let clock = ManualClock::new(0);
    let config = ControllerConfig {
        start_paused: true,
        ..ControllerConfig::default()
    };
    let mut hw = MockHardware::new(25.0, 20.0);
    let mut sink = RecordingSink::new();
    let mut svc = make_service(&config, &clock, &mut hw, &mut sink);

    for _ in 0..5 {
        svc.tick(&mut hw, &mut sink);
    }
    assert_eq!(svc.state(), ControllerState::Paused);
    assert_eq!(sink.states(), vec![ControllerState::Paused]);
}

// ── Regulation ────────────────────────────────────────────────

#[test]
fn cold_dough_boosts_then_holds() {
    let clock = ManualClock::new(0);
    let mut hw = MockHardware::new(25.0, 20.0);
    let mut sink = RecordingSink::new();
    let mut svc = make_service(&ControllerConfig::default(), &clock, &mut hw, &mut sink);

    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::BoostOn);
    assert!(hw.output_on);

    hw.set(25.0, 28.1);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::HoldOff);
    assert!(!hw.output_on);

    // Box cools below the hold band: heat again.
    hw.set(27.0, 28.1);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::HoldOn);
    assert_eq!(hw.last_energize(), Some(true));

    assert_eq!(
        sink.states(),
        vec![
            ControllerState::Start,
            ControllerState::BoostOn,
            ControllerState::HoldOff,
            ControllerState::HoldOn,
        ]
    );
}

#[test]
fn boost_cycles_on_box_band() {
    let clock = ManualClock::new(0);
    let mut hw = MockHardware::new(25.0, 20.0);
    let mut sink = RecordingSink::new();
    let mut svc = make_service(&ControllerConfig::default(), &clock, &mut hw, &mut sink);

    hw.push(25.0, 20.0); // Start -> BoostOn
    hw.push(34.5, 21.0); // box above S+6 -> BoostOff
    hw.push(33.0, 21.5); // inside band: stay
    hw.push(31.5, 22.0); // below S+4 -> BoostOn
    for _ in 0..4 {
        svc.tick(&mut hw, &mut sink);
    }
    assert_eq!(
        sink.states(),
        vec![
            ControllerState::Start,
            ControllerState::BoostOn,
            ControllerState::BoostOff,
            ControllerState::BoostOn,
        ]
    );
}

#[test]
fn warm_dough_cools_down_first() {
    let clock = ManualClock::new(0);
    let mut hw = MockHardware::new(30.0, 29.0);
    let mut sink = RecordingSink::new();
    let mut svc = make_service(&ControllerConfig::default(), &clock, &mut hw, &mut sink);

    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::Cooldown);
    assert!(!hw.output_on);

    hw.set(26.0, 27.9);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::HoldOn);
    assert!(hw.output_on);
}

#[test]
fn setpoint_change_moves_the_bands() {
    let clock = ManualClock::new(0);
    let mut hw = MockHardware::new(25.0, 27.8);
    let mut sink = RecordingSink::new();
    let mut svc = make_service(&ControllerConfig::default(), &clock, &mut hw, &mut sink);

    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::HoldOff);

    svc.handle_command(AppCommand::SetTargetTemperature(24.0), &mut hw, &mut sink);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::Cooldown);

    svc.handle_command(AppCommand::SetTargetTemperature(80.0), &mut hw, &mut sink);
    assert_eq!(svc.fsm().setpoint().celsius(), 35.0);
}

// ── Safety ────────────────────────────────────────────────────

#[test]
fn overheat_while_heating_detains_then_restarts() {
    let clock = ManualClock::new(0);
    let mut hw = MockHardware::new(25.0, 20.0);
    let mut sink = RecordingSink::new();
    let mut svc = make_service(&ControllerConfig::default(), &clock, &mut hw, &mut sink);

    svc.tick(&mut hw, &mut sink);
    assert!(hw.output_on);

    hw.set(51.0, 20.0);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::Detention);
    assert!(!hw.output_on);
    assert_eq!(sink.trips(), vec![Fault::Overheat { box_c: 51.0 }]);
    assert!(sink.faults().is_empty());

    hw.set(25.0, 20.0);
    clock.advance_secs(300);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::Detention);

    clock.advance_secs(301);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::Start);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::BoostOn);
}

#[test]
fn stuck_heating_trips_after_phase_timeout() {
    let clock = ManualClock::new(0);
    let mut hw = MockHardware::new(25.0, 20.0);
    let mut sink = RecordingSink::new();
    let mut svc = make_service(&ControllerConfig::default(), &clock, &mut hw, &mut sink);

    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::BoostOn);

    clock.advance_secs(600);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::BoostOn);

    clock.advance_ms(1);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::Detention);
    assert!(matches!(
        sink.trips().as_slice(),
        [Fault::StuckHeating { elapsed_ms: 600_001 }]
    ));
}

#[test]
fn halt_policy_latches_error_until_turn_on() {
    let clock = ManualClock::new(0);
    let config = ControllerConfig {
        safety_action: SafetyAction::Halt,
        ..ControllerConfig::default()
    };
    let mut hw = MockHardware::new(25.0, 20.0);
    let mut sink = RecordingSink::new();
    let mut svc = make_service(&config, &clock, &mut hw, &mut sink);

    svc.tick(&mut hw, &mut sink);
    hw.set(55.0, 20.0);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::Error);
    assert_eq!(sink.faults(), vec![Fault::Overheat { box_c: 55.0 }]);
    assert!(hw.calls.contains(&RelayCall::Disable));
    assert!(!hw.enabled);

    hw.set(25.0, 20.0);
    clock.advance_secs(3600);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::Error);

    svc.handle_command(AppCommand::TurnOn, &mut hw, &mut sink);
    assert!(hw.enabled);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::BoostOn);
    assert!(hw.output_on);
}

#[test]
fn disconnected_probe_routes_to_error() {
    let clock = ManualClock::new(0);
    let mut hw = MockHardware::new(25.0, 20.0);
    let mut sink = RecordingSink::new();
    let mut svc = make_service(&ControllerConfig::default(), &clock, &mut hw, &mut sink);

    svc.tick(&mut hw, &mut sink);
    hw.fail_with(SensorError::Disconnected(Probe::Box));
    svc.tick(&mut hw, &mut sink);

    assert_eq!(svc.state(), ControllerState::Error);
    assert!(!hw.output_on);
    assert_eq!(
        sink.faults(),
        vec![Fault::SensorFault(SensorError::Disconnected(Probe::Box))]
    );
}

#[test]
fn relay_failure_routes_to_error() {
    let clock = ManualClock::new(0);
    let mut hw = MockHardware::new(25.0, 20.0);
    let mut sink = RecordingSink::new();
    let mut svc = make_service(&ControllerConfig::default(), &clock, &mut hw, &mut sink);

    hw.fail_writes = true;
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::Error);
    assert_eq!(sink.faults().len(), 1);
    assert!(matches!(sink.faults()[0], Fault::RelayFault(_)));
}

// ── Operator commands ─────────────────────────────────────────

#[test]
fn turn_off_pauses_and_sensor_faults_are_ignored() {
    let clock = ManualClock::new(0);
    let mut hw = MockHardware::new(25.0, 20.0);
    let mut sink = RecordingSink::new();
    let mut svc = make_service(&ControllerConfig::default(), &clock, &mut hw, &mut sink);

    svc.tick(&mut hw, &mut sink);
    svc.handle_command(AppCommand::TurnOff, &mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::Paused);
    assert!(!hw.output_on);

    hw.fail_with(SensorError::Disconnected(Probe::Dough));
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::Paused);
    assert!(sink.faults().is_empty());
}

#[test]
fn report_status_emits_front_end_json() {
    let clock = ManualClock::new(0);
    let mut hw = MockHardware::new(31.0, 27.5);
    let mut sink = RecordingSink::new();
    let mut svc = make_service(&ControllerConfig::default(), &clock, &mut hw, &mut sink);

    svc.tick(&mut hw, &mut sink);
    sink.clear();
    svc.handle_command(AppCommand::ReportStatus, &mut hw, &mut sink);

    let [ControllerEvent::Status(status)] = sink.events.as_slice() else {
        panic!("expected one status event, got {:?}", sink.events);
    };
    assert_eq!(
        status.to_json().unwrap(),
        r#"{"state":"HOLD_OFF","config":{"targetTemperature":28.0},"sensors":{"relay":"OFF","temperatures":{"box":31.0,"dough":27.5}}}"#
    );
}
