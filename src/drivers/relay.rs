//! Heater relay driver (single GPIO, active-high coil driver).
//!
//! The driver owns the output pin handed to it at construction and is a
//! dumb actuator apart from one latch: while *disabled* every `turn_on()`
//! is refused and the output is held low.  The control loop disables the
//! relay on a fault and re-enables it on an operator restart.
//!
//! ## Dual-target design
//!
//! Generic over `embedded-hal` 1.0 pins: on ESP-IDF the binary passes an
//! `esp_idf_hal::gpio::PinDriver`, on host/test a mock pin.

use embedded_hal::digital::{OutputPin, StatefulOutputPin};
use log::{info, warn};
use serde::Serialize;

use crate::error::ActuatorError;

/// Physical output state, read back from the pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RelayState {
    On,
    Off,
}

pub struct RelayDriver<P> {
    pin: P,
    enabled: bool,
}

impl<P: OutputPin + StatefulOutputPin> RelayDriver<P> {
    /// Take ownership of `pin` and drive it low.
    pub fn new(mut pin: P) -> Result<Self, ActuatorError> {
        pin.set_low().map_err(|_| ActuatorError::GpioWriteFailed)?;
        Ok(Self { pin, enabled: true })
    }

    /// Energise the coil.  A no-op while disabled.
    pub fn turn_on(&mut self) -> Result<(), ActuatorError> {
        if !self.enabled {
            warn!("relay: turn_on ignored, output disabled");
            return Ok(());
        }
        self.pin
            .set_high()
            .map_err(|_| ActuatorError::GpioWriteFailed)
    }

    pub fn turn_off(&mut self) -> Result<(), ActuatorError> {
        self.pin
            .set_low()
            .map_err(|_| ActuatorError::GpioWriteFailed)
    }

    /// Drive the coil to match `on`.
    pub fn set_energized(&mut self, on: bool) -> Result<(), ActuatorError> {
        if on { self.turn_on() } else { self.turn_off() }
    }

    /// Force the output off and ignore `turn_on()` until [`enable`](Self::enable).
    pub fn disable(&mut self) -> Result<(), ActuatorError> {
        if self.enabled {
            info!("relay: disabled");
        }
        self.enabled = false;
        self.turn_off()
    }

    /// Accept `turn_on()` again.  Does not change the output.
    pub fn enable(&mut self) {
        if !self.enabled {
            info!("relay: enabled");
        }
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Read the output latch back from the pin.
    pub fn state(&mut self) -> Result<RelayState, ActuatorError> {
        let high = self
            .pin
            .is_set_high()
            .map_err(|_| ActuatorError::GpioReadFailed)?;
        Ok(if high { RelayState::On } else { RelayState::Off })
    }
}
