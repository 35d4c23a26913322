//! Monotonic millisecond time.
//!
//! The controller only ever asks "how long since X?", so time is a wrapping
//! `u32` millisecond counter and every duration is computed with
//! [`elapsed_ms`].  A counter overflow (every ~49.7 days) is therefore
//! harmless as long as no single interval exceeds the counter width.
//!
//! - **`target_os = "espidf"`**: wraps `esp_timer_get_time()`.
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant`.

use core::cell::Cell;

/// Source of monotonic time for the state machine.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch, wrapping at `u32::MAX`.
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds from `since` to `now`, tolerant of counter wraparound.
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

// ---------------------------------------------------------------------------
// Hardware / host clock
// ---------------------------------------------------------------------------

/// System monotonic clock.
pub struct MonotonicClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    #[cfg(target_os = "espidf")]
    fn now_ms(&self) -> u32 {
        // SAFETY: esp_timer_get_time has no preconditions once the system
        // timer is running, which the IDF guarantees before app_main.
        let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() } as u64;
        (us / 1000) as u32
    }

    #[cfg(not(target_os = "espidf"))]
    fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }
}

// ---------------------------------------------------------------------------
// Manual clock (tests and simulation)
// ---------------------------------------------------------------------------

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    pub fn new(start_ms: u32) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance_ms(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    pub fn advance_secs(&self, secs: u32) {
        self.advance_ms(secs.wrapping_mul(1000));
    }

    pub fn set_ms(&self, ms: u32) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}
