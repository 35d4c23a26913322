//! Inbound commands to the application service.
//!
//! These are the operator's controls (web UI, serial console, button) that
//! the [`ProofingService`](super::service::ProofingService) interprets.

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppCommand {
    /// Re-enable the relay and restart control from `Start`.
    /// This is also the only way out of `Error`.
    TurnOn,

    /// Pause control; the relay is switched off.
    TurnOff,

    /// Replace the dough setpoint (clamped to the configured maximum).
    SetTargetTemperature(f32),

    /// Emit a status document immediately.
    ReportStatus,
}
