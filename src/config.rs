//! Deployment configuration
//!
//! All tunable parameters for the proofing controller.  These are fixed per
//! deployment; the only value that changes at runtime is the setpoint, and
//! that one is clamped to `max_dough_temp_c` whenever it is replaced.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What the safety net does when the box overheats or the relay has been
/// on for longer than the phase timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyAction {
    /// Rest in `Detention` for `detention_secs`, then restart.
    Detain,
    /// Latch `Error` until an operator pauses or restarts.
    Halt,
}

/// Core controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Setpoint ---
    /// Setpoint used at power-on (Celsius)
    pub initial_setpoint_c: f32,
    /// Hard ceiling for the dough setpoint (Celsius)
    pub max_dough_temp_c: f32,
    /// Power on in `Paused` and wait for an operator start
    pub start_paused: bool,

    // --- Safety ---
    /// Box air temperature that trips the safety net while heating (Celsius)
    pub max_box_temp_c: f32,
    /// Longest a single heating phase may last (seconds)
    pub phase_timeout_secs: u32,
    /// Rest period after a safety trip (seconds)
    pub detention_secs: u32,
    /// Trip response for this deployment
    pub safety_action: SafetyAction,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Status report interval (control ticks)
    pub status_interval_ticks: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Setpoint
            initial_setpoint_c: 28.0,
            max_dough_temp_c: 35.0,
            start_paused: false,

            // Safety
            max_box_temp_c: 50.0,
            phase_timeout_secs: 10 * 60,
            detention_secs: 10 * 60,
            safety_action: SafetyAction::Detain,

            // Timing
            control_loop_interval_ms: 1000, // 1 Hz
            status_interval_ticks: 10,
        }
    }
}

impl ControllerConfig {
    /// Reject values that would disable a safety check or stall the loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_setpoint_c.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "initial_setpoint_c must be finite",
            ));
        }
        if !self.max_dough_temp_c.is_finite() || !self.max_box_temp_c.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "temperature limits must be finite",
            ));
        }
        if self.max_box_temp_c <= self.max_dough_temp_c {
            return Err(ConfigError::ValidationFailed(
                "max_box_temp_c must exceed max_dough_temp_c",
            ));
        }
        if self.phase_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "phase_timeout_secs must be non-zero",
            ));
        }
        if self.safety_action == SafetyAction::Detain && self.detention_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "detention_secs must be non-zero",
            ));
        }
        // Both timeouts are compared against a wrapping u32 ms counter.
        let limit = u32::MAX / 2 / 1000;
        if self.phase_timeout_secs > limit || self.detention_secs > limit {
            return Err(ConfigError::ValidationFailed(
                "timeouts must fit in half the clock range",
            ));
        }
        if self.control_loop_interval_ms == 0 || self.status_interval_ticks == 0 {
            return Err(ConfigError::ValidationFailed(
                "intervals must be non-zero",
            ));
        }
        Ok(())
    }

    pub fn phase_timeout_ms(&self) -> u32 {
        self.phase_timeout_secs.saturating_mul(1000)
    }

    pub fn detention_ms(&self) -> u32 {
        self.detention_secs.saturating_mul(1000)
    }
}
