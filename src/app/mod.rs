//! Application core: pure domain orchestration, zero direct I/O.
//!
//! Runs the control tick and interprets operator commands.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
