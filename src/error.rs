//! Unified error types for the proofer firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! control loop's error handling uniform.  All variants are `Copy` so they
//! can be passed through the state machine and event sinks without
//! allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// A probe could not be read or reported a disconnect.
    Sensor(SensorError),
    /// The relay output could not be driven or read back.
    Actuator(ActuatorError),
    /// Configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Which of the two probes a sensor error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Box,
    Dough,
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Box => write!(f, "box"),
            Self::Dough => write!(f, "dough"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// ADC conversion failed or timed out.
    AdcReadFailed(Probe),
    /// Reading pinned to a rail: probe unplugged or shorted.
    Disconnected(Probe),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed(p) => write!(f, "{p} probe ADC read failed"),
            Self::Disconnected(p) => write!(f, "{p} probe disconnected"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// GPIO set failed.
    GpioWriteFailed,
    /// GPIO output state could not be read back.
    GpioReadFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::GpioReadFailed => write!(f, "GPIO read-back failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` names the field and the rule.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Controller faults
// ---------------------------------------------------------------------------

/// Reasons the controller stops heating.
///
/// Overheat and stuck-heating are raised by the safety supervisor; the rest
/// come from the control loop.  `Display` is the human-readable reason
/// handed to the error sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fault {
    /// Box air above the hard maximum while the relay was on.
    Overheat { box_c: f32 },
    /// Relay held on for longer than the phase timeout.
    StuckHeating { elapsed_ms: u32 },
    /// A probe read failed; the sample must not be acted on.
    SensorFault(SensorError),
    /// The relay could not be driven.
    RelayFault(ActuatorError),
    /// State index had no entry in the state table.
    UnknownState(u8),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overheat { box_c } => write!(f, "box overheated ({box_c:.1}\u{00b0}C)"),
            Self::StuckHeating { elapsed_ms } => {
                write!(f, "heating on too long ({}s)", elapsed_ms / 1000)
            }
            Self::SensorFault(e) => write!(f, "{e}"),
            Self::RelayFault(e) => write!(f, "relay: {e}"),
            Self::UnknownState(idx) => write!(f, "Unknown state {idx}"),
        }
    }
}

impl From<SensorError> for Fault {
    fn from(e: SensorError) -> Self {
        Self::SensorFault(e)
    }
}

impl From<ActuatorError> for Fault {
    fn from(e: ActuatorError) -> Self {
        Self::RelayFault(e)
    }
}

impl std::error::Error for Error {}
impl std::error::Error for SensorError {}
impl std::error::Error for ActuatorError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for Fault {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
