//! Semantic unit types for type-safe physical quantity handling
//!
//! Newtype wrappers for the scalar inputs of the wake model so that a hub
//! height cannot be passed where a wind speed is expected.
//!
//! # Design Philosophy
//! - All quantities are `f64`; the wake arrays are `f64` and the scalars feed
//!   straight into them
//! - `Deref` to the inner value for arithmetic in formulas
//! - Serde support, serializing as the bare number
//! - Total ordering via `Ord` (NaN sorts greater than all values)
//!
//! # Usage
//! ```
//! use wake_sim_core::core_types::units::{Degrees, Meters};
//!
//! let diameter = Meters::new(126.0);
//! assert_eq!(*diameter / 2.0, 63.0);
//!
//! let yaw = Degrees::new(60.0);
//! assert!((yaw.cos() - 0.5).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Div, Mul, Sub};

/// Shared trait plumbing for the `f64` newtypes in this module.
macro_rules! scalar_unit {
    ($name:ident) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                $name(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;
            fn mul(self, rhs: f64) -> $name {
                $name(self.0 * rhs)
            }
        }

        impl Div<f64> for $name {
            type Output = $name;
            fn div(self, rhs: f64) -> $name {
                $name(self.0 / rhs)
            }
        }
    };
}

// ============================================================================
// LENGTH
// ============================================================================

/// Distance in meters (coordinates, diameters, heights)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(f64);

scalar_unit!(Meters);

impl Meters {
    /// Create a new Meters value. Coordinates may be negative.
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Meters(value)
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} m", self.0)
    }
}

// ============================================================================
// VELOCITY
// ============================================================================

/// Wind speed in meters per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MetersPerSecond(f64);

scalar_unit!(MetersPerSecond);

impl MetersPerSecond {
    /// Create a new wind speed. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(
            value >= 0.0,
            "MetersPerSecond::new: negative wind speed is invalid"
        );
        MetersPerSecond(value)
    }
}

impl fmt::Display for MetersPerSecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} m/s", self.0)
    }
}

// ============================================================================
// ANGLE
// ============================================================================

/// Angle in degrees (yaw, wind direction)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(f64);

scalar_unit!(Degrees);

impl Degrees {
    /// Create a new angle in degrees
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Degrees(value)
    }

    /// Convert to radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Cosine of the angle
    #[inline]
    #[must_use]
    pub fn cos(self) -> f64 {
        self.to_radians().cos()
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

// ============================================================================
// DENSITY & POWER
// ============================================================================

/// Air density in kg/m³
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct KgPerCubicMeter(f64);

scalar_unit!(KgPerCubicMeter);

impl KgPerCubicMeter {
    /// Standard sea-level air density, the reference density of power curves
    pub const STANDARD_AIR: KgPerCubicMeter = KgPerCubicMeter(1.225);

    /// Create a new density. Asserts value > 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(value > 0.0, "KgPerCubicMeter::new: density must be positive");
        KgPerCubicMeter(value)
    }
}

impl fmt::Display for KgPerCubicMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} kg/m³", self.0)
    }
}

/// Power in watts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Watts(f64);

scalar_unit!(Watts);

impl Watts {
    /// Create a new power value
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Watts(value)
    }

    /// Convert to kilowatts
    #[inline]
    #[must_use]
    pub fn to_kilowatts(self) -> f64 {
        self.0 / 1000.0
    }
}

impl fmt::Display for Watts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} W", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_meters_arithmetic() {
        let d = Meters::new(126.0);
        assert_eq!(*(d / 2.0), 63.0);
        assert_eq!(d + Meters::new(4.0), Meters::new(130.0));
        assert_eq!(d * 5.0, Meters::new(630.0));
    }

    #[test]
    fn test_degrees_cos() {
        assert_relative_eq!(Degrees::new(0.0).cos(), 1.0);
        assert_relative_eq!(Degrees::new(60.0).cos(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_total_ordering() {
        let a = MetersPerSecond::new(6.0);
        let b = MetersPerSecond::new(8.0);
        assert_eq!(a.max(b), b);
        assert!(Meters::new(f64::NAN) > Meters::new(1.0e9));
    }

    #[test]
    #[should_panic(expected = "negative wind speed")]
    fn test_negative_wind_speed_panics() {
        let _ = MetersPerSecond::new(-1.0);
    }

    #[test]
    fn test_serde_as_bare_number() {
        #[derive(Deserialize)]
        struct Wrapper {
            d: Meters,
        }
        let w: Wrapper = toml::from_str("d = 126.0").unwrap();
        assert_eq!(*w.d, 126.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Meters::new(90.0)), "90.00 m");
        assert_eq!(format!("{}", Watts::new(1500.0).to_kilowatts()), "1.5");
    }
}
