//! Temperature value types shared by the sensors and the state machine.
//!
//! All values are degrees Celsius stored as `f32`.  Comparisons are exposed
//! as named predicates rather than operator overloads so that every
//! hysteresis check in the state table reads as a sentence.

use core::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Single reading
// ---------------------------------------------------------------------------

/// One scalar temperature reading.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Temperature(f32);

impl Temperature {
    pub const fn new(celsius: f32) -> Self {
        Self(celsius)
    }

    pub const fn celsius(self) -> f32 {
        self.0
    }

    /// Strictly above a scalar threshold.
    pub fn is_above(self, threshold: f32) -> bool {
        self.0 > threshold
    }

    /// Strictly below a scalar threshold.
    pub fn is_below(self, threshold: f32) -> bool {
        self.0 < threshold
    }

    /// Inside the closed interval `[min, max]`.
    pub fn is_within(self, range: Range) -> bool {
        self.0 >= range.min && self.0 <= range.max
    }

    /// Above the upper edge of a band.
    pub fn is_above_range(self, range: Range) -> bool {
        self.0 > range.max
    }

    /// Below the lower edge of a band.
    pub fn is_below_range(self, range: Range) -> bool {
        self.0 < range.min
    }
}

impl From<f32> for Temperature {
    fn from(celsius: f32) -> Self {
        Self(celsius)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}\u{00b0}C", self.0)
    }
}

// ---------------------------------------------------------------------------
// Hysteresis band
// ---------------------------------------------------------------------------

/// Closed interval `[min, max]`.
///
/// Bands are only ever derived from the setpoint with fixed offsets, so the
/// constructor normalises rather than failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub fn new(a: f32, b: f32) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Build a band around `centre` with the given offsets, capping the
    /// upper edge at `ceiling`.
    pub fn around(centre: f32, below: f32, above: f32, ceiling: f32) -> Self {
        let max = (centre + above).min(ceiling);
        let min = (centre - below).min(max);
        Self { min, max }
    }
}

// ---------------------------------------------------------------------------
// Paired reading
// ---------------------------------------------------------------------------

/// Box air and dough probe, sampled together once per control tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TemperatureSample {
    #[serde(rename = "box")]
    pub box_air: Temperature,
    pub dough: Temperature,
}

impl TemperatureSample {
    pub fn new(box_c: f32, dough_c: f32) -> Self {
        Self {
            box_air: Temperature::new(box_c),
            dough: Temperature::new(dough_c),
        }
    }
}

// ---------------------------------------------------------------------------
// Setpoint
// ---------------------------------------------------------------------------

/// Desired dough temperature, clamped to the deployment maximum whenever it
/// is created or replaced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Setpoint {
    celsius: f32,
}

impl Setpoint {
    pub fn new(requested_c: f32, max_dough_c: f32) -> Self {
        Self {
            celsius: requested_c.min(max_dough_c),
        }
    }

    pub fn celsius(self) -> f32 {
        self.celsius
    }
}

impl fmt::Display for Setpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.celsius)
    }
}
