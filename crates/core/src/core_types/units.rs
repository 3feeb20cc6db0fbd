//! Semantic unit types for the fire-behavior quantities
//!
//! The remote fire-behavior service reports in US customary units
//! (feet, Btu, miles per hour). These newtype wrappers keep the units
//! attached to the numbers so a flame length can't be fed where a heat
//! release is expected.
//!
//! Negative magnitudes are invalid for every quantity here; `new`
//! asserts it. Untrusted input must go through
//! [`FireBehaviorSample`](crate::FireBehaviorSample), which rejects bad
//! values with an error instead of panicking.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Length in international feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Feet(f64);

impl Feet {
    /// Create a new length. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Feet::new: negative length is invalid");
        Feet(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Deref for Feet {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl From<Feet> for f64 {
    fn from(v: Feet) -> f64 {
        v.0
    }
}

impl fmt::Display for Feet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} ft", self.0)
    }
}

/// Rate of spread in feet per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct FeetPerMinute(f64);

impl FeetPerMinute {
    /// Create a new spread rate. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= 0.0,
            "FeetPerMinute::new: negative spread rate is invalid"
        );
        FeetPerMinute(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to chains per hour (1 chain = 66 ft), the haul-chart axis unit
    #[inline]
    #[must_use]
    pub fn to_chains_per_hour(self) -> f64 {
        self.0 * 60.0 / 66.0
    }
}

impl Deref for FeetPerMinute {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for FeetPerMinute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} ft/min", self.0)
    }
}

/// Wind speed in miles per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MilesPerHour(f64);

impl MilesPerHour {
    /// mph to ft/s conversion factor (5280 ft / 3600 s)
    const TO_FT_PER_SEC: f64 = 1.46667;

    /// Create a new wind speed. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= 0.0,
            "MilesPerHour::new: negative wind speed is invalid"
        );
        MilesPerHour(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to feet per second
    #[inline]
    #[must_use]
    pub fn to_feet_per_second(self) -> f64 {
        self.0 * Self::TO_FT_PER_SEC
    }
}

impl Deref for MilesPerHour {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for MilesPerHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} mph", self.0)
    }
}

/// Byram's fireline intensity in Btu/ft/s
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BtuPerFtSec(f64);

impl BtuPerFtSec {
    /// Create a new fireline intensity. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= 0.0,
            "BtuPerFtSec::new: negative intensity is invalid"
        );
        BtuPerFtSec(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Deref for BtuPerFtSec {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for BtuPerFtSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} Btu/ft/s", self.0)
    }
}

/// Fuel-bed heat release per unit area in Btu/ft²
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BtuPerSqFt(f64);

impl BtuPerSqFt {
    /// Create a new heat release. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= 0.0,
            "BtuPerSqFt::new: negative heat release is invalid"
        );
        BtuPerSqFt(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Deref for BtuPerSqFt {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for BtuPerSqFt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} Btu/ft²", self.0)
    }
}

/// Surface-area-to-volume ratio in 1/ft
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct PerFoot(f64);

impl PerFoot {
    /// Create a new SAV ratio. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "PerFoot::new: negative ratio is invalid");
        PerFoot(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Deref for PerFoot {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for PerFoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} 1/ft", self.0)
    }
}

/// Reaction velocity in 1/min
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct PerMinute(f64);

impl PerMinute {
    /// Create a new reaction velocity. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "PerMinute::new: negative rate is invalid");
        PerMinute(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Deref for PerMinute {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for PerMinute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} 1/min", self.0)
    }
}

/// Flame residence time in minutes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Minutes(f64);

impl Minutes {
    /// Create a new duration. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Minutes::new: negative duration is invalid");
        Minutes(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to seconds
    #[inline]
    #[must_use]
    pub fn to_seconds(self) -> f64 {
        self.0 * 60.0
    }
}

impl Deref for Minutes {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} min", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mph_to_feet_per_second() {
        let wind = MilesPerHour::new(10.0);
        assert_relative_eq!(wind.to_feet_per_second(), 14.6667, epsilon = 1e-4);
    }

    #[test]
    fn test_ros_to_chains_per_hour() {
        // 66 ft/min is exactly one chain per minute
        let ros = FeetPerMinute::new(66.0);
        assert_relative_eq!(ros.to_chains_per_hour(), 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_residence_to_seconds() {
        assert_relative_eq!(Minutes::new(0.25).to_seconds(), 15.0);
    }

    #[test]
    #[should_panic(expected = "negative length")]
    fn test_negative_feet_panics() {
        let _ = Feet::new(-1.0);
    }
}
