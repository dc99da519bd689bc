//! Confidence score module

use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence score in the closed range [0, 100]
///
/// Every constructor clamps, so a value of this type can never be outside
/// the range no matter what an upstream model or heuristic produced.
/// Deserialization goes through the same clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    /// Lowest possible score
    pub const MIN: Confidence = Confidence(0);

    /// Highest possible score
    pub const MAX: Confidence = Confidence(100);

    /// Create a confidence score from a raw value, rounding and clamping it
    ///
    /// Non-finite input (NaN) maps to 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use coherent_domain::Confidence;
    ///
    /// assert_eq!(Confidence::from_raw(85.6).value(), 86);
    /// assert_eq!(Confidence::from_raw(-12.0).value(), 0);
    /// assert_eq!(Confidence::from_raw(250.0).value(), 100);
    /// ```
    pub fn from_raw(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::MIN;
        }
        Self(raw.round().clamp(0.0, 100.0) as u8)
    }

    /// Create a confidence score from an integer, clamping it
    pub fn from_int(raw: i64) -> Self {
        Self(raw.clamp(0, 100) as u8)
    }

    /// Get the score as an integer in [0, 100]
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl From<f64> for Confidence {
    fn from(raw: f64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Confidence> for u8 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
