//! Hardware adapter: bridges the real probes and relay to the domain
//! port traits.
//!
//! Owns the [`TemperatureReader`] and [`RelayDriver`], exposing them
//! through [`SensorPort`] and [`RelayPort`].  This is the only module in
//! the system that touches actual hardware.  The pin and ADC types are
//! generic, so host builds plug in [`SimAdc`](crate::sensors::SimAdc) and
//! a mock pin.

use embedded_hal::digital::{OutputPin, StatefulOutputPin};

use crate::app::ports::{RelayPort, SensorPort};
use crate::drivers::relay::{RelayDriver, RelayState};
use crate::error::{ActuatorError, SensorError};
use crate::sensors::{AdcSource, TemperatureReader};
use crate::temperature::TemperatureSample;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P, A> {
    relay: RelayDriver<P>,
    reader: TemperatureReader<A>,
}

impl<P, A> HardwareAdapter<P, A>
where
    P: OutputPin + StatefulOutputPin,
    A: AdcSource,
{
    /// Take the relay pin (driven low immediately) and the probe ADC.
    pub fn new(relay_pin: P, adc: A) -> crate::error::Result<Self> {
        Ok(Self {
            relay: RelayDriver::new(relay_pin)?,
            reader: TemperatureReader::new(adc),
        })
    }

    pub fn adc_mut(&mut self) -> &mut A {
        self.reader.adc_mut()
    }

    pub fn relay_enabled(&self) -> bool {
        self.relay.is_enabled()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P, A> SensorPort for HardwareAdapter<P, A>
where
    P: OutputPin + StatefulOutputPin,
    A: AdcSource,
{
    fn read_temperatures(&mut self) -> Result<TemperatureSample, SensorError> {
        self.reader.read()
    }
}

// ── RelayPort implementation ──────────────────────────────────

impl<P, A> RelayPort for HardwareAdapter<P, A>
where
    P: OutputPin + StatefulOutputPin,
    A: AdcSource,
{
    fn set_energized(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.relay.set_energized(on)
    }

    fn disable_relay(&mut self) -> Result<(), ActuatorError> {
        self.relay.disable()
    }

    fn enable_relay(&mut self) {
        self.relay.enable();
    }

    fn relay_state(&mut self) -> Result<RelayState, ActuatorError> {
        self.relay.state()
    }
}
