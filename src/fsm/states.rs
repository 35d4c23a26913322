//! Concrete state handler functions and table builder.
//!
//! Each state is a row of plain data plus one `fn` pointer: no closures, no
//! dynamic dispatch, no heap.  Handlers see the tick through
//! [`TickContext`] and return the next state, or `None` to stay.
//!
//! ```text
//!              ┌──[dough > S+0.2]──▶ COOLDOWN ──[dough < S]──▶ HOLD_ON
//!   START ─────┼──[dough in hold]──▶ HOLD_OFF
//!              └──[dough < S]──────▶ BOOST_ON
//!
//!   HOLD_ON  ◀──[box < hold.min]── HOLD_OFF
//!   HOLD_ON  ───[box > hold.max]─▶ HOLD_OFF
//!   BOOST_ON ◀─[box < boost.min]── BOOST_OFF
//!   BOOST_ON ──[box > boost.max]─▶ BOOST_OFF
//!   BOOST_ON ──[dough > S]───────▶ HOLD_OFF
//!   HOLD_*   ──[dough < S-0.2]───▶ BOOST_ON
//!   any heating/holding state ──[dough > S+0.2]──▶ COOLDOWN
//!
//!   DETENTION ──[rest elapsed]──▶ START        ERROR, PAUSED: no exit
//! ```

use super::context::TickContext;
use super::{ControllerState, RelayCommand};

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to request a transition, or `None` to stay.
pub type StateUpdateFn = fn(&TickContext) -> Option<ControllerState>;

/// Static descriptor for a single controller state.
pub struct StateDescriptor {
    pub id: ControllerState,
    pub name: &'static str,
    pub relay: RelayCommand,
    pub on_update: StateUpdateFn,
}

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the state table, indexed by `ControllerState as usize`.
pub fn build_state_table() -> [StateDescriptor; ControllerState::COUNT] {
    [
        // Index 0: Paused
        StateDescriptor {
            id: ControllerState::Paused,
            name: "PAUSED",
            relay: RelayCommand::Off,
            on_update: stay,
        },
        // Index 1: Start
        StateDescriptor {
            id: ControllerState::Start,
            name: "START",
            relay: RelayCommand::Off,
            on_update: start_update,
        },
        // Index 2: Cooldown
        StateDescriptor {
            id: ControllerState::Cooldown,
            name: "COOLDOWN",
            relay: RelayCommand::Off,
            on_update: cooldown_update,
        },
        // Index 3: HoldOn
        StateDescriptor {
            id: ControllerState::HoldOn,
            name: "HOLD_ON",
            relay: RelayCommand::On,
            on_update: hold_on_update,
        },
        // Index 4: HoldOff
        StateDescriptor {
            id: ControllerState::HoldOff,
            name: "HOLD_OFF",
            relay: RelayCommand::Off,
            on_update: hold_off_update,
        },
        // Index 5: BoostOn
        StateDescriptor {
            id: ControllerState::BoostOn,
            name: "BOOST_ON",
            relay: RelayCommand::On,
            on_update: boost_on_update,
        },
        // Index 6: BoostOff
        StateDescriptor {
            id: ControllerState::BoostOff,
            name: "BOOST_OFF",
            relay: RelayCommand::Off,
            on_update: boost_off_update,
        },
        // Index 7: Detention
        StateDescriptor {
            id: ControllerState::Detention,
            name: "DETENTION",
            relay: RelayCommand::Off,
            on_update: detention_update,
        },
        // Index 8: Error
        StateDescriptor {
            id: ControllerState::Error,
            name: "ERROR",
            relay: RelayCommand::Off,
            on_update: stay,
        },
    ]
}

/// Terminal or externally driven states: only pause/restart leave them.
fn stay(_ctx: &TickContext) -> Option<ControllerState> {
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  START: pick the initial regime from the dough temperature
// ═══════════════════════════════════════════════════════════════════════════

fn start_update(ctx: &TickContext) -> Option<ControllerState> {
    if ctx.dough_needs_cooldown() {
        return Some(ControllerState::Cooldown);
    }
    if ctx.dough.is_within(ctx.hold) {
        return Some(ControllerState::HoldOff);
    }
    if ctx.dough.is_below(ctx.setpoint_c) {
        return Some(ControllerState::BoostOn);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  COOLDOWN: relay off until the dough drops under the setpoint
// ═══════════════════════════════════════════════════════════════════════════

fn cooldown_update(ctx: &TickContext) -> Option<ControllerState> {
    if ctx.dough.is_below(ctx.setpoint_c) {
        return Some(ControllerState::HoldOn);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  HOLD: keep the box air inside the hold band
// ═══════════════════════════════════════════════════════════════════════════

fn hold_on_update(ctx: &TickContext) -> Option<ControllerState> {
    if ctx.dough_needs_cooldown() {
        return Some(ControllerState::Cooldown);
    }
    if ctx.dough_needs_boost() {
        return Some(ControllerState::BoostOn);
    }
    if ctx.box_air.is_above_range(ctx.hold) {
        return Some(ControllerState::HoldOff);
    }
    None
}

fn hold_off_update(ctx: &TickContext) -> Option<ControllerState> {
    if ctx.dough_needs_cooldown() {
        return Some(ControllerState::Cooldown);
    }
    if ctx.dough_needs_boost() {
        return Some(ControllerState::BoostOn);
    }
    if ctx.box_air.is_below_range(ctx.hold) {
        return Some(ControllerState::HoldOn);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  BOOST: drive the box air inside the higher boost band
// ═══════════════════════════════════════════════════════════════════════════

fn boost_on_update(ctx: &TickContext) -> Option<ControllerState> {
    if ctx.dough_needs_cooldown() {
        return Some(ControllerState::Cooldown);
    }
    if ctx.dough.is_above(ctx.setpoint_c) {
        return Some(ControllerState::HoldOff);
    }
    if ctx.box_air.is_above_range(ctx.boost) {
        return Some(ControllerState::BoostOff);
    }
    None
}

fn boost_off_update(ctx: &TickContext) -> Option<ControllerState> {
    if ctx.dough_needs_cooldown() {
        return Some(ControllerState::Cooldown);
    }
    if ctx.box_air.is_below_range(ctx.boost) {
        return Some(ControllerState::BoostOn);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  DETENTION: forced rest after a safety trip
// ═══════════════════════════════════════════════════════════════════════════

fn detention_update(ctx: &TickContext) -> Option<ControllerState> {
    if ctx.phase_elapsed_ms > ctx.detention_ms {
        return Some(ControllerState::Start);
    }
    None
}
