//! Turbine performance from rotor-averaged velocities
//!
//! The wake solver only needs the reference rotor diameter. Once the
//! velocity field is solved, these functions turn each turbine's grid
//! velocities into thrust, axial induction and power:
//!
//! ```text
//! v̄      = cbrt(mean(u³))
//! Ct     = clip(Ct_table(v̄), 0.0001, 0.9999) · cos(γ)
//! a      = 0.5 / cos(γ) · (1 − sqrt(1 − Ct · cos(γ)))
//! v_eff  = (ρ / ρ₀)^(1/3) · v̄ · cos(γ)^(pP/3)
//! P      = ρ₀ · P̂(v_eff),   P̂(ws) = ½ · A · Cp(ws) · η · ws³
//! ```
//!
//! where γ is the yaw angle and ρ₀ the standard air density of the table.

use crate::config::TurbineConfig;
use crate::core_types::{Degrees, KgPerCubicMeter, Meters, Watts};
use crate::error::{Result, WakeError};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Lower clip applied to interpolated thrust coefficients
const CT_MIN: f64 = 0.0001;
/// Upper clip applied to interpolated thrust coefficients
const CT_MAX: f64 = 0.9999;

/// Cp and Ct curves sampled at increasing wind speeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PowerThrustTable {
    /// Wind speeds (m/s), strictly increasing
    pub wind_speed: Vec<f64>,
    /// Power coefficient Cp at each wind speed
    pub power: Vec<f64>,
    /// Thrust coefficient Ct at each wind speed
    pub thrust: Vec<f64>,
}

impl PowerThrustTable {
    /// Check the curves are usable for interpolation
    ///
    /// # Errors
    ///
    /// Returns an `InvalidConfig` error for mismatched lengths, fewer than two
    /// samples, non-finite values or wind speeds that are not strictly
    /// increasing.
    pub fn validate(&self) -> Result<()> {
        let n = self.wind_speed.len();
        if self.power.len() != n || self.thrust.len() != n {
            return Err(WakeError::invalid_config(
                "turbine.power_thrust_table",
                &format!(
                    "wind_speed, power and thrust must have equal length, got {n}, {}, {}",
                    self.power.len(),
                    self.thrust.len()
                ),
            ));
        }
        if n < 2 {
            return Err(WakeError::invalid_config(
                "turbine.power_thrust_table",
                "needs at least two samples",
            ));
        }
        let mut all = self.wind_speed.iter().chain(&self.power).chain(&self.thrust);
        if all.any(|v| !v.is_finite()) {
            return Err(WakeError::invalid_config(
                "turbine.power_thrust_table",
                "values must be finite",
            ));
        }
        if self.wind_speed.windows(2).any(|w| w[1] <= w[0]) {
            return Err(WakeError::invalid_config(
                "turbine.power_thrust_table.wind_speed",
                "must be strictly increasing",
            ));
        }
        Ok(())
    }
}

/// A turbine model shared by every position in the farm
#[derive(Debug, Clone, PartialEq)]
pub struct Turbine {
    /// Rotor diameter
    pub rotor_diameter: Meters,
    /// Hub height above ground
    pub hub_height: Meters,
    /// Cosine exponent for yaw power loss
    pub p_p: f64,
    /// Generator efficiency
    pub generator_efficiency: f64,
    /// Yaw angle relative to the wind
    pub yaw_angle: Degrees,
    power_thrust_table: Option<PowerThrustTable>,
    /// `½ · A · Cp · η · ws³` at each table wind speed
    inner_power: Vec<f64>,
}

impl Turbine {
    /// Build a turbine from its configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the power/thrust table is unusable.
    pub fn new(config: &TurbineConfig) -> Result<Self> {
        let mut turbine = Self {
            rotor_diameter: config.rotor_diameter,
            hub_height: config.hub_height,
            p_p: config.p_p,
            generator_efficiency: config.generator_efficiency,
            yaw_angle: config.yaw_angle,
            power_thrust_table: None,
            inner_power: Vec::new(),
        };
        if let Some(table) = &config.power_thrust_table {
            turbine.set_power_thrust_table(table.clone())?;
        }
        Ok(turbine)
    }

    /// Replace the performance curves
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` as [`PowerThrustTable::validate`]; the current
    /// curves are kept on error.
    pub fn set_power_thrust_table(&mut self, table: PowerThrustTable) -> Result<()> {
        table.validate()?;
        let area = self.rotor_area();
        self.inner_power = table
            .wind_speed
            .iter()
            .zip(&table.power)
            .map(|(ws, cp)| 0.5 * area * cp * self.generator_efficiency * ws.powi(3))
            .collect();
        self.power_thrust_table = Some(table);
        Ok(())
    }

    /// Performance curves, if any
    #[must_use]
    pub fn power_thrust_table(&self) -> Option<&PowerThrustTable> {
        self.power_thrust_table.as_ref()
    }

    /// Rotor swept area (m²)
    #[must_use]
    pub fn rotor_area(&self) -> f64 {
        let r = *self.rotor_diameter / 2.0;
        PI * r * r
    }

    /// Thrust coefficient for the given rotor-grid velocities
    ///
    /// # Errors
    ///
    /// Returns `MissingPerformanceTable` if the turbine has no curves.
    pub fn thrust_coefficient(&self, velocities: &[f64]) -> Result<f64> {
        let table = self
            .power_thrust_table
            .as_ref()
            .ok_or_else(|| WakeError::missing_performance_table("thrust coefficient"))?;
        let ct = interpolate(
            &table.wind_speed,
            &table.thrust,
            average_velocity(velocities),
        );
        Ok(ct.clamp(CT_MIN, CT_MAX) * self.yaw_angle.cos())
    }

    /// Axial induction for the given rotor-grid velocities
    ///
    /// # Errors
    ///
    /// Returns `MissingPerformanceTable` if the turbine has no curves.
    pub fn axial_induction(&self, velocities: &[f64]) -> Result<f64> {
        let ct = self.thrust_coefficient(velocities)?;
        Ok(axial_induction(ct, self.yaw_angle))
    }

    /// Electrical power for the given rotor-grid velocities
    ///
    /// # Errors
    ///
    /// Returns `MissingPerformanceTable` if the turbine has no curves.
    pub fn power(&self, air_density: KgPerCubicMeter, velocities: &[f64]) -> Result<Watts> {
        let table = self
            .power_thrust_table
            .as_ref()
            .ok_or_else(|| WakeError::missing_performance_table("power"))?;
        let reference = *KgPerCubicMeter::STANDARD_AIR;
        let v_eff = (*air_density / reference).cbrt()
            * average_velocity(velocities)
            * self.yaw_angle.cos().powf(self.p_p / 3.0);
        Ok(Watts::new(
            reference * interpolate(&table.wind_speed, &self.inner_power, v_eff),
        ))
    }
}

/// Rotor-averaged velocity: cube root of the mean cubed velocity
///
/// Returns 0 for an empty slice.
#[must_use]
pub fn average_velocity(velocities: &[f64]) -> f64 {
    if velocities.is_empty() {
        return 0.0;
    }
    let mean_cube = velocities.iter().map(|u| u.powi(3)).sum::<f64>() / velocities.len() as f64;
    mean_cube.cbrt()
}

/// Axial induction from a thrust coefficient and yaw angle
#[must_use]
pub fn axial_induction(thrust_coefficient: f64, yaw_angle: Degrees) -> f64 {
    let cos_yaw = yaw_angle.cos();
    0.5 / cos_yaw * (1.0 - (1.0 - thrust_coefficient * cos_yaw).sqrt())
}

/// Linear interpolation, clamped to the end values outside the table
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }
    // xs is strictly increasing, so the partition point is in 1..=last
    let hi = xs.partition_point(|&v| v <= x);
    let lo = hi - 1;
    let t = (x - xs[lo]) / (xs[hi] - xs[lo]);
    ys[lo] + t * (ys[hi] - ys[lo])
}

/// Reject yaw angles at or beyond ±90°, where the cosine corrections break down
pub(crate) fn validate_yaw(yaw: Degrees) -> Result<()> {
    if yaw.is_finite() && yaw.abs() < 90.0 {
        Ok(())
    } else {
        Err(WakeError::invalid_config(
            "turbine.yaw_angle",
            &format!("must be within (-90, 90) degrees, got {}", *yaw),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_table() -> PowerThrustTable {
        PowerThrustTable {
            wind_speed: vec![0.0, 10.0, 20.0],
            power: vec![0.4, 0.4, 0.4],
            thrust: vec![0.8, 0.6, 0.2],
        }
    }

    fn turbine_with_table() -> Turbine {
        let config = TurbineConfig {
            power_thrust_table: Some(flat_table()),
            ..TurbineConfig::default()
        };
        Turbine::new(&config).unwrap()
    }

    #[test]
    fn test_average_velocity_uniform() {
        assert_relative_eq!(average_velocity(&[8.0; 25]), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_average_velocity_is_cubic_mean() {
        // cbrt((1 + 8) / 2) = cbrt(4.5)
        assert_relative_eq!(average_velocity(&[1.0, 2.0]), 4.5_f64.cbrt());
        assert_eq!(average_velocity(&[]), 0.0);
    }

    #[test]
    fn test_axial_induction_matches_reference_constant() {
        // Ct of the upstream turbine in the three-turbine reference case
        let a = axial_induction(0.7655527, Degrees::new(0.0));
        assert_relative_eq!(a, 0.25790121826746754, epsilon = 1e-7);
    }

    #[test]
    fn test_thrust_interpolation_and_yaw() {
        let mut turbine = turbine_with_table();
        let ct = turbine.thrust_coefficient(&[5.0; 4]).unwrap();
        assert_relative_eq!(ct, 0.7, epsilon = 1e-12);

        turbine.yaw_angle = Degrees::new(60.0);
        let ct = turbine.thrust_coefficient(&[5.0; 4]).unwrap();
        assert_relative_eq!(ct, 0.35, epsilon = 1e-12);
    }

    #[test]
    fn test_thrust_clamped_outside_table() {
        let turbine = turbine_with_table();
        assert_relative_eq!(turbine.thrust_coefficient(&[30.0]).unwrap(), 0.2);
    }

    #[test]
    fn test_power_interpolates_inner_power_curve() {
        let turbine = turbine_with_table();
        let inner_at_10 = 0.5 * turbine.rotor_area() * 0.4 * 1000.0;
        let p = turbine
            .power(KgPerCubicMeter::STANDARD_AIR, &[8.0; 9])
            .unwrap();
        assert_relative_eq!(*p, 1.225 * 0.8 * inner_at_10, max_relative = 1e-12);
    }

    #[test]
    fn test_power_drops_with_yaw() {
        let mut turbine = turbine_with_table();
        let aligned = turbine.power(KgPerCubicMeter::STANDARD_AIR, &[8.0]).unwrap();
        turbine.yaw_angle = Degrees::new(20.0);
        let yawed = turbine.power(KgPerCubicMeter::STANDARD_AIR, &[8.0]).unwrap();
        assert!(yawed < aligned);
    }

    #[test]
    fn test_missing_table() {
        let turbine = Turbine::new(&TurbineConfig::default()).unwrap();
        let err = turbine.power(KgPerCubicMeter::STANDARD_AIR, &[8.0]).unwrap_err();
        assert_eq!(
            err.code(),
            crate::error::WakeErrorCode::MissingPerformanceTable
        );
        assert!(turbine.axial_induction(&[8.0]).is_err());
    }

    #[test]
    fn test_table_validation() {
        let mut table = flat_table();
        assert!(table.validate().is_ok());
        table.wind_speed = vec![0.0, 10.0, 10.0];
        assert!(table.validate().is_err());
        table.wind_speed = vec![0.0, 10.0];
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_set_table_rejects_empty_curves() {
        let mut turbine = turbine_with_table();
        let empty = PowerThrustTable {
            wind_speed: vec![],
            power: vec![],
            thrust: vec![],
        };
        let err = turbine.set_power_thrust_table(empty).unwrap_err();
        assert_eq!(err.code(), crate::error::WakeErrorCode::InvalidConfig);
        // Previous curves still answer queries
        assert_eq!(turbine.power_thrust_table(), Some(&flat_table()));
        assert!(turbine.thrust_coefficient(&[5.0]).is_ok());
    }

    #[test]
    fn test_new_rejects_invalid_table() {
        let config = TurbineConfig {
            power_thrust_table: Some(PowerThrustTable {
                wind_speed: vec![0.0, 10.0],
                power: vec![0.4],
                thrust: vec![0.8, 0.6],
            }),
            ..TurbineConfig::default()
        };
        assert!(Turbine::new(&config).is_err());
    }

    #[test]
    fn test_yaw_validation() {
        assert!(validate_yaw(Degrees::new(25.0)).is_ok());
        assert!(validate_yaw(Degrees::new(90.0)).is_err());
        assert!(validate_yaw(Degrees::new(f64::NAN)).is_err());
    }

    #[test]
    fn test_rotor_area() {
        let turbine = Turbine::new(&TurbineConfig::default()).unwrap();
        assert_relative_eq!(turbine.rotor_area(), PI * 63.0 * 63.0);
    }
}
