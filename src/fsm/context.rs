//! Per-tick inputs handed to every state handler.
//!
//! `TickContext` is built fresh by the state machine on each `process()`
//! call: the latest sample, the setpoint, both hysteresis bands recomputed
//! from that setpoint, and phase timing.  Handlers only read it.

use crate::temperature::{Range, Temperature};

/// Dough must exceed the setpoint by this much before cooling down, and
/// fall below it by this much before boosting.
pub const DOUGH_DEADBAND_C: f32 = 0.2;

/// Hold band: `[setpoint - 0.5, setpoint + 2.0]`.
pub const HOLD_BELOW_C: f32 = 0.5;
pub const HOLD_ABOVE_C: f32 = 2.0;

/// Boost band: `[setpoint + 4.0, setpoint + 6.0]`.
pub const BOOST_LOW_C: f32 = 4.0;
pub const BOOST_HIGH_C: f32 = 6.0;

/// Read-only view of one control tick.
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    pub dough: Temperature,
    pub box_air: Temperature,
    pub setpoint_c: f32,
    pub hold: Range,
    pub boost: Range,
    /// Milliseconds since the current state was entered.
    pub phase_elapsed_ms: u32,
    /// Rest period required before leaving `Detention`.
    pub detention_ms: u32,
}

impl TickContext {
    pub fn dough_needs_cooldown(&self) -> bool {
        self.dough.is_above(self.setpoint_c + DOUGH_DEADBAND_C)
    }

    pub fn dough_needs_boost(&self) -> bool {
        self.dough.is_below(self.setpoint_c - DOUGH_DEADBAND_C)
    }
}

/// Hold band for `setpoint_c`, never reaching past `max_dough_c + 2.0`.
pub fn hold_range(setpoint_c: f32, max_dough_c: f32) -> Range {
    Range::around(
        setpoint_c,
        HOLD_BELOW_C,
        HOLD_ABOVE_C,
        max_dough_c + HOLD_ABOVE_C,
    )
}

/// Boost band for `setpoint_c`, never reaching past `max_dough_c + 6.0`.
pub fn boost_range(setpoint_c: f32, max_dough_c: f32) -> Range {
    Range::around(
        setpoint_c + BOOST_LOW_C,
        0.0,
        BOOST_HIGH_C - BOOST_LOW_C,
        max_dough_c + BOOST_HIGH_C,
    )
}
