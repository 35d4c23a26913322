//! Integration tests for the HardwareAdapter: simulated thermistor ADC and
//! a mock relay pin wired through the real drivers into the service.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

use crate::mock_hw::RecordingSink;

use proofer::adapters::hardware::HardwareAdapter;
use proofer::app::commands::AppCommand;
use proofer::app::ports::{RelayPort, SensorPort};
use proofer::app::service::ProofingService;
use proofer::clock::ManualClock;
use proofer::config::ControllerConfig;
use proofer::drivers::relay::RelayState;
use proofer::error::{Fault, Probe, SensorError};
use proofer::fsm::ControllerState;
use proofer::sensors::SimAdc;

#[derive(Default)]
struct PinLatch {
    high: bool,
}

impl ErrorType for PinLatch {
    type Error = Infallible;
}

impl OutputPin for PinLatch {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

impl StatefulOutputPin for PinLatch {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

fn adapter(box_c: f32, dough_c: f32) -> HardwareAdapter<PinLatch, SimAdc> {
    HardwareAdapter::new(PinLatch { high: true }, SimAdc::from_celsius(box_c, dough_c)).unwrap()
}

#[test]
fn adapter_reads_probes_through_thermistor_curve() {
    let mut hw = adapter(30.0, 24.0);
    let sample = hw.read_temperatures().unwrap();
    assert!((sample.box_air.celsius() - 30.0).abs() < 0.2);
    assert!((sample.dough.celsius() - 24.0).abs() < 0.2);
    assert_eq!(hw.relay_state().unwrap(), RelayState::Off);
}

#[test]
fn disabled_relay_stays_off() {
    let mut hw = adapter(25.0, 25.0);
    hw.disable_relay().unwrap();
    hw.set_energized(true).unwrap();
    assert_eq!(hw.relay_state().unwrap(), RelayState::Off);
    assert!(!hw.relay_enabled());

    hw.enable_relay();
    hw.set_energized(true).unwrap();
    assert_eq!(hw.relay_state().unwrap(), RelayState::On);
}

#[test]
fn unplugged_dough_probe_halts_heating() {
    let clock = ManualClock::new(0);
    let mut hw = adapter(25.0, 20.0);
    let mut sink = RecordingSink::new();
    let mut svc = ProofingService::new(&ControllerConfig::default(), &clock, &mut hw, &mut sink);

    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::BoostOn);
    assert_eq!(hw.relay_state().unwrap(), RelayState::On);

    hw.adc_mut().unplug(Probe::Dough);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::Error);
    assert_eq!(hw.relay_state().unwrap(), RelayState::Off);
    assert_eq!(
        sink.faults(),
        vec![Fault::SensorFault(SensorError::Disconnected(Probe::Dough))]
    );

    // Plug it back in; only the operator can leave Error.
    hw.adc_mut().set_celsius(25.0, 20.0);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::Error);

    svc.handle_command(AppCommand::TurnOn, &mut hw, &mut sink);
    svc.tick(&mut hw, &mut sink);
    assert_eq!(svc.state(), ControllerState::BoostOn);
    assert_eq!(hw.relay_state().unwrap(), RelayState::On);
}
