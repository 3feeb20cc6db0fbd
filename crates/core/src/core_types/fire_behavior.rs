//! Validated snapshot of one remote fire-behavior calculation
//!
//! The REST layer deserializes the service response into
//! [`RawFireBehavior`] (plain named numbers, matching the wire fields)
//! and converts it here. Conversion is the validation boundary required
//! by the simulation: every magnitude must be finite and non-negative,
//! and the flame residence time must be strictly positive because it
//! feeds the particle expiry divisor. A sample that fails validation
//! never exists as a [`FireBehaviorSample`], so the emitter keeps
//! animating with its last-known-good configuration.

use crate::core_types::units::{
    BtuPerFtSec, BtuPerSqFt, Feet, FeetPerMinute, MilesPerHour, Minutes, PerFoot, PerMinute,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unvalidated fire-behavior numbers as reported by the calculation
/// service. Field names mirror the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawFireBehavior {
    /// Flame length [ft]
    pub flame_length: f64,
    /// Byram's fireline intensity [Btu/ft/s]
    pub fireline_intensity: f64,
    /// Maximum rate of spread [ft/min]
    pub rate_of_spread_max: f64,
    /// Flanking rate of spread [ft/min]
    pub rate_of_spread_flanking: f64,
    /// Effective wind speed [mph]
    pub effective_wind_speed: f64,
    /// Fuel-bed heat release [Btu/ft²]
    pub heat_release: f64,
    /// Fuel-bed depth [ft]
    pub fuel_bed_depth: f64,
    /// Characteristic surface-area-to-volume ratio [1/ft]
    pub characteristic_sav: f64,
    /// Flame residence time [min]
    pub flame_residence_time: f64,
    /// Reaction velocity [1/min]
    pub reaction_velocity: f64,
}

/// Immutable, validated fire-behavior snapshot.
///
/// Read-only to the simulation; a new calculation result produces a new
/// sample rather than mutating an old one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireBehaviorSample {
    flame_length: Feet,
    fireline_intensity: BtuPerFtSec,
    rate_of_spread_max: FeetPerMinute,
    rate_of_spread_flanking: FeetPerMinute,
    effective_wind_speed: MilesPerHour,
    heat_release: BtuPerSqFt,
    fuel_bed_depth: Feet,
    characteristic_sav: PerFoot,
    flame_residence_time: Minutes,
    reaction_velocity: PerMinute,
}

impl FireBehaviorSample {
    /// Validate a raw service response.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError`] if any field is NaN, infinite, or
    /// negative, or if the flame residence time is not strictly
    /// positive.
    pub fn from_raw(raw: RawFireBehavior) -> Result<Self, SampleError> {
        let fields = [
            ("flame_length", raw.flame_length),
            ("fireline_intensity", raw.fireline_intensity),
            ("rate_of_spread_max", raw.rate_of_spread_max),
            ("rate_of_spread_flanking", raw.rate_of_spread_flanking),
            ("effective_wind_speed", raw.effective_wind_speed),
            ("heat_release", raw.heat_release),
            ("fuel_bed_depth", raw.fuel_bed_depth),
            ("characteristic_sav", raw.characteristic_sav),
            ("flame_residence_time", raw.flame_residence_time),
            ("reaction_velocity", raw.reaction_velocity),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SampleError::NotFinite { field });
            }
            if value < 0.0 {
                return Err(SampleError::Negative { field, value });
            }
        }
        if raw.flame_residence_time <= 0.0 {
            return Err(SampleError::NonPositiveResidenceTime {
                value: raw.flame_residence_time,
            });
        }

        Ok(FireBehaviorSample {
            flame_length: Feet::new(raw.flame_length),
            fireline_intensity: BtuPerFtSec::new(raw.fireline_intensity),
            rate_of_spread_max: FeetPerMinute::new(raw.rate_of_spread_max),
            rate_of_spread_flanking: FeetPerMinute::new(raw.rate_of_spread_flanking),
            effective_wind_speed: MilesPerHour::new(raw.effective_wind_speed),
            heat_release: BtuPerSqFt::new(raw.heat_release),
            fuel_bed_depth: Feet::new(raw.fuel_bed_depth),
            characteristic_sav: PerFoot::new(raw.characteristic_sav),
            flame_residence_time: Minutes::new(raw.flame_residence_time),
            reaction_velocity: PerMinute::new(raw.reaction_velocity),
        })
    }

    /// Flame length [ft]
    pub fn flame_length(&self) -> Feet {
        self.flame_length
    }

    /// Byram's fireline intensity [Btu/ft/s]
    pub fn fireline_intensity(&self) -> BtuPerFtSec {
        self.fireline_intensity
    }

    /// Maximum rate of spread [ft/min]
    pub fn rate_of_spread_max(&self) -> FeetPerMinute {
        self.rate_of_spread_max
    }

    /// Flanking rate of spread [ft/min]
    pub fn rate_of_spread_flanking(&self) -> FeetPerMinute {
        self.rate_of_spread_flanking
    }

    /// Effective wind speed [mph]
    pub fn effective_wind_speed(&self) -> MilesPerHour {
        self.effective_wind_speed
    }

    /// Fuel-bed heat release [Btu/ft²]
    pub fn heat_release(&self) -> BtuPerSqFt {
        self.heat_release
    }

    /// Fuel-bed depth [ft]
    pub fn fuel_bed_depth(&self) -> Feet {
        self.fuel_bed_depth
    }

    /// Characteristic surface-area-to-volume ratio [1/ft]
    pub fn characteristic_sav(&self) -> PerFoot {
        self.characteristic_sav
    }

    /// Flame residence time [min], strictly positive
    pub fn flame_residence_time(&self) -> Minutes {
        self.flame_residence_time
    }

    /// Reaction velocity [1/min]
    pub fn reaction_velocity(&self) -> PerMinute {
        self.reaction_velocity
    }
}

impl TryFrom<RawFireBehavior> for FireBehaviorSample {
    type Error = SampleError;

    fn try_from(raw: RawFireBehavior) -> Result<Self, Self::Error> {
        FireBehaviorSample::from_raw(raw)
    }
}

/// Validation failures for incoming fire-behavior data
#[derive(Debug, Clone, PartialEq)]
pub enum SampleError {
    /// A field is NaN or infinite
    NotFinite { field: &'static str },
    /// A field carries a negative magnitude
    Negative { field: &'static str, value: f64 },
    /// Residence time must be > 0 because it scales particle expiry
    NonPositiveResidenceTime { value: f64 },
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::NotFinite { field } => {
                write!(f, "fire behavior field '{field}' is not finite")
            }
            SampleError::Negative { field, value } => {
                write!(f, "fire behavior field '{field}' is negative: {value}")
            }
            SampleError::NonPositiveResidenceTime { value } => {
                write!(f, "flame residence time must be > 0, got {value}")
            }
        }
    }
}

impl std::error::Error for SampleError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawFireBehavior {
        RawFireBehavior {
            flame_length: 23.138498817644386,
            fireline_intensity: 5246.0434298657,
            rate_of_spread_max: 114.64958478903517,
            rate_of_spread_flanking: 11.246842087522502,
            effective_wind_speed: 5.260550905405299,
            heat_release: 1261.0,
            fuel_bed_depth: 2.0,
            characteristic_sav: 1672.0,
            flame_residence_time: 0.23,
            reaction_velocity: 13.5,
        }
    }

    #[test]
    fn test_valid_sample_accepted() {
        let sample = FireBehaviorSample::from_raw(raw()).unwrap();
        assert_eq!(*sample.flame_length(), 23.138498817644386);
        assert_eq!(*sample.effective_wind_speed(), 5.260550905405299);
    }

    #[test]
    fn test_nan_rejected() {
        let mut bad = raw();
        bad.heat_release = f64::NAN;
        let err = FireBehaviorSample::from_raw(bad).unwrap_err();
        assert_eq!(
            err,
            SampleError::NotFinite {
                field: "heat_release"
            }
        );
    }

    #[test]
    fn test_infinite_rejected() {
        let mut bad = raw();
        bad.flame_length = f64::INFINITY;
        assert!(matches!(
            FireBehaviorSample::from_raw(bad),
            Err(SampleError::NotFinite {
                field: "flame_length"
            })
        ));
    }

    #[test]
    fn test_negative_rejected() {
        let mut bad = raw();
        bad.fuel_bed_depth = -0.5;
        assert!(matches!(
            FireBehaviorSample::from_raw(bad),
            Err(SampleError::Negative {
                field: "fuel_bed_depth",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_residence_time_rejected() {
        let mut bad = raw();
        bad.flame_residence_time = 0.0;
        assert!(matches!(
            FireBehaviorSample::from_raw(bad),
            Err(SampleError::NonPositiveResidenceTime { .. })
        ));
    }
}
