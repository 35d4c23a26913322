//! Probe reader: the two thermistors and the [`TemperatureReader`] that
//! turns them into a [`TemperatureSample`] each tick.
//!
//! The ADC is an explicit handle owned by the reader, so on host/test a
//! [`SimAdc`] can be injected in place of the ESP-IDF oneshot driver.

pub mod thermistor;

use crate::error::{Probe, SensorError};
use crate::temperature::TemperatureSample;
use thermistor::Conversion;

/// Raw ADC access for the two probe channels.
pub trait AdcSource {
    /// One conversion on the channel wired to `probe`.
    fn read_raw(&mut self, probe: Probe) -> Result<u16, SensorError>;
}

/// Reads box air and dough probes as one sample.
pub struct TemperatureReader<A> {
    adc: A,
}

impl<A: AdcSource> TemperatureReader<A> {
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    /// Read both probes.  Either probe failing fails the whole sample;
    /// the caller must not act on a half-valid pair.
    pub fn read(&mut self) -> Result<TemperatureSample, SensorError> {
        let box_c = self.read_probe(Probe::Box)?;
        let dough_c = self.read_probe(Probe::Dough)?;
        Ok(TemperatureSample::new(box_c, dough_c))
    }

    fn read_probe(&mut self, probe: Probe) -> Result<f32, SensorError> {
        let raw = self.adc.read_raw(probe)?;
        match thermistor::adc_to_celsius(raw) {
            Conversion::Celsius(c) => Ok(c),
            Conversion::Disconnected => Err(SensorError::Disconnected(probe)),
        }
    }

    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }
}

/// In-memory ADC for host builds: holds the raw code each probe returns.
#[derive(Debug, Clone, Copy)]
pub struct SimAdc {
    pub box_raw: u16,
    pub dough_raw: u16,
}

impl SimAdc {
    pub fn from_celsius(box_c: f32, dough_c: f32) -> Self {
        Self {
            box_raw: thermistor::celsius_to_adc(box_c),
            dough_raw: thermistor::celsius_to_adc(dough_c),
        }
    }

    pub fn set_celsius(&mut self, box_c: f32, dough_c: f32) {
        *self = Self::from_celsius(box_c, dough_c);
    }

    /// Simulate an unplugged probe (divider pulled to the rail).
    pub fn unplug(&mut self, probe: Probe) {
        match probe {
            Probe::Box => self.box_raw = thermistor::ADC_MAX,
            Probe::Dough => self.dough_raw = thermistor::ADC_MAX,
        }
    }
}

impl AdcSource for SimAdc {
    fn read_raw(&mut self, probe: Probe) -> Result<u16, SensorError> {
        Ok(match probe {
            Probe::Box => self.box_raw,
            Probe::Dough => self.dough_raw,
        })
    }
}
