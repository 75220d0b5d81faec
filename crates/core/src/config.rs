//! Simulation input configuration
//!
//! The input file is TOML with one table per concern:
//!
//! ```toml
//! [logging.console]
//! enable = true
//! level = "info"
//!
//! [turbine]
//! rotor_diameter = 126.0
//! hub_height = 90.0
//! pP = 1.88
//! pT = 1.88
//! generator_efficiency = 1.0
//!
//! [farm]
//! layout_x = [0.0, 630.0, 1260.0]
//! layout_y = [0.0, 0.0, 0.0]
//! wind_speed = 8.0
//! wind_shear = 0.12
//! air_density = 1.225
//!
//! [wake]
//! velocity_model = "jensen"
//!
//! [wake.parameters.jensen]
//! we = 0.05
//!
//! [solver]
//! grid_resolution = 5
//! ```
//!
//! Every table except `[turbine]` and `[farm]` may be omitted.

use crate::core_types::{Degrees, KgPerCubicMeter, Meters, MetersPerSecond};
use crate::error::{Result, WakeError};
use crate::solver::SolverConfig;
use crate::turbine::{validate_yaw, PowerThrustTable};
use crate::wake_velocity::JensenParameters;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete simulation input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlorisConfig {
    /// Console logging settings, consumed by binaries
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Turbine model shared by every position in the farm
    pub turbine: TurbineConfig,
    /// Layout and ambient conditions
    pub farm: FarmConfig,
    /// Wake model selection and parameters
    #[serde(default)]
    pub wake: WakeConfig,
    /// Solver constants
    #[serde(default)]
    pub solver: SolverConfig,
}

impl FlorisConfig {
    /// Parse and validate a TOML input string
    ///
    /// # Errors
    ///
    /// Returns a `Parse` error for malformed TOML or unknown keys and an
    /// `InvalidConfig` error when a value fails validation.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: FlorisConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML input file
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file cannot be read, otherwise as
    /// [`FlorisConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .map_err(|e| WakeError::io(&path.display().to_string(), e))?;
        Self::from_toml_str(&input)
    }

    /// Check every value against its physical constraints
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint as an `InvalidConfig` error, or a
    /// `LayoutMismatch` error when the layout lists differ in length.
    pub fn validate(&self) -> Result<()> {
        self.turbine.validate()?;
        self.farm.validate()?;
        self.wake.parameters.jensen.validate()?;
        self.solver.validate()?;

        // Lowest rotor-grid point must stay above ground for the shear profile
        let half_extent = self.solver.disc_ratio * *self.reference_turbine_diameter() / 2.0;
        if *self.turbine.hub_height - half_extent <= 0.0 {
            return Err(WakeError::invalid_config(
                "turbine.hub_height",
                &format!(
                    "rotor grid reaches z <= 0: hub height {} with half-extent {half_extent}",
                    *self.turbine.hub_height
                ),
            ));
        }
        Ok(())
    }

    /// Reference rotor diameter, falling back to the turbine's
    #[must_use]
    pub fn reference_turbine_diameter(&self) -> Meters {
        self.farm
            .reference_turbine_diameter
            .unwrap_or(self.turbine.rotor_diameter)
    }

    /// Reference wind height, falling back to the turbine hub height
    #[must_use]
    pub fn reference_wind_height(&self) -> Meters {
        self.farm
            .reference_wind_height
            .unwrap_or(self.turbine.hub_height)
    }
}

/// Console logging settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Console sink
    #[serde(default)]
    pub console: ConsoleLogConfig,
}

/// Console sink settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleLogConfig {
    /// Whether log events are written to stderr
    pub enable: bool,
    /// Minimum level (`trace`, `debug`, `info`, `warn`, `error`)
    pub level: String,
}

impl Default for ConsoleLogConfig {
    fn default() -> Self {
        Self {
            enable: true,
            level: "info".to_string(),
        }
    }
}

/// Turbine model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TurbineConfig {
    /// Rotor diameter (m)
    pub rotor_diameter: Meters,
    /// Hub height above ground (m)
    pub hub_height: Meters,
    /// Cosine exponent relating yaw to power loss
    #[serde(rename = "pP", default = "default_cosine_exponent")]
    pub p_p: f64,
    /// Cosine exponent relating tilt to power loss
    ///
    /// Accepted for input compatibility only; tilt is not modelled.
    #[serde(rename = "pT", default = "default_cosine_exponent")]
    pub p_t: f64,
    /// Generator efficiency (0, 1]
    #[serde(default = "default_generator_efficiency")]
    pub generator_efficiency: f64,
    /// Initial yaw angle relative to the wind
    #[serde(default)]
    pub yaw_angle: Degrees,
    /// Cp/Ct curves; needed only for power and thrust queries
    #[serde(default)]
    pub power_thrust_table: Option<PowerThrustTable>,
}

fn default_cosine_exponent() -> f64 {
    1.88
}

fn default_generator_efficiency() -> f64 {
    1.0
}

impl Default for TurbineConfig {
    fn default() -> Self {
        Self {
            rotor_diameter: Meters::new(126.0),
            hub_height: Meters::new(90.0),
            p_p: default_cosine_exponent(),
            p_t: default_cosine_exponent(),
            generator_efficiency: default_generator_efficiency(),
            yaw_angle: Degrees::new(0.0),
            power_thrust_table: None,
        }
    }
}

impl TurbineConfig {
    fn validate(&self) -> Result<()> {
        require_positive("turbine.rotor_diameter", *self.rotor_diameter)?;
        require_positive("turbine.hub_height", *self.hub_height)?;
        require_positive("turbine.pP", self.p_p)?;
        require_positive("turbine.pT", self.p_t)?;
        if !(self.generator_efficiency > 0.0 && self.generator_efficiency <= 1.0) {
            return Err(WakeError::invalid_config(
                "turbine.generator_efficiency",
                &format!("must be in (0, 1], got {}", self.generator_efficiency),
            ));
        }
        validate_yaw(self.yaw_angle)?;
        if let Some(table) = &self.power_thrust_table {
            table.validate()?;
        }
        Ok(())
    }
}

/// Farm layout and ambient conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FarmConfig {
    /// Streamwise turbine coordinates (m), increasing downstream
    pub layout_x: Vec<f64>,
    /// Lateral turbine coordinates (m)
    pub layout_y: Vec<f64>,
    /// Free-stream wind speed at the reference height
    pub wind_speed: MetersPerSecond,
    /// Power-law shear exponent
    #[serde(default)]
    pub wind_shear: f64,
    /// Air density
    #[serde(default = "default_air_density")]
    pub air_density: KgPerCubicMeter,
    /// Height of the `wind_speed` measurement; defaults to the hub height
    #[serde(default)]
    pub reference_wind_height: Option<Meters>,
    /// Rotor diameter used by the wake model; defaults to the turbine's
    #[serde(default)]
    pub reference_turbine_diameter: Option<Meters>,
}

fn default_air_density() -> KgPerCubicMeter {
    KgPerCubicMeter::STANDARD_AIR
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            layout_x: vec![0.0],
            layout_y: vec![0.0],
            wind_speed: MetersPerSecond::new(8.0),
            wind_shear: 0.12,
            air_density: default_air_density(),
            reference_wind_height: None,
            reference_turbine_diameter: None,
        }
    }
}

impl FarmConfig {
    fn validate(&self) -> Result<()> {
        if self.layout_x.len() != self.layout_y.len() {
            return Err(WakeError::layout_mismatch(
                self.layout_x.len(),
                self.layout_y.len(),
            ));
        }
        if self.layout_x.is_empty() {
            return Err(WakeError::invalid_config(
                "farm.layout_x",
                "must contain at least one turbine",
            ));
        }
        if let Some(bad) = self
            .layout_x
            .iter()
            .chain(&self.layout_y)
            .find(|v| !v.is_finite())
        {
            return Err(WakeError::invalid_config(
                "farm.layout",
                &format!("coordinates must be finite, got {bad}"),
            ));
        }
        if !(self.wind_speed.is_finite() && *self.wind_speed >= 0.0) {
            return Err(WakeError::invalid_config(
                "farm.wind_speed",
                &format!("must be finite and non-negative, got {}", *self.wind_speed),
            ));
        }
        if !self.wind_shear.is_finite() {
            return Err(WakeError::invalid_config(
                "farm.wind_shear",
                &format!("must be finite, got {}", self.wind_shear),
            ));
        }
        require_positive("farm.air_density", *self.air_density)?;
        if let Some(h) = self.reference_wind_height {
            require_positive("farm.reference_wind_height", *h)?;
        }
        if let Some(d) = self.reference_turbine_diameter {
            require_positive("farm.reference_turbine_diameter", *d)?;
        }
        Ok(())
    }
}

/// Wake model selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WakeConfig {
    /// Velocity deficit model name
    pub velocity_model: String,
    /// Per-model parameters
    pub parameters: WakeParameters,
}

impl Default for WakeConfig {
    fn default() -> Self {
        Self {
            velocity_model: "jensen".to_string(),
            parameters: WakeParameters::default(),
        }
    }
}

/// Per-model parameter tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WakeParameters {
    /// Jensen model parameters
    pub jensen: JensenParameters,
}

/// Reject values that are not finite and strictly positive
pub(crate) fn require_positive(param_name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(WakeError::non_positive(param_name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WakeErrorCode;

    const TANDEM: &str = r#"
        [turbine]
        rotor_diameter = 126.0
        hub_height = 90.0

        [farm]
        layout_x = [0.0, 630.0, 1260.0]
        layout_y = [0.0, 0.0, 0.0]
        wind_speed = 8.0
        wind_shear = 0.12
    "#;

    #[test]
    fn test_minimal_input_uses_defaults() {
        let config = FlorisConfig::from_toml_str(TANDEM).unwrap();
        assert_eq!(config.wake.velocity_model, "jensen");
        assert_eq!(config.wake.parameters.jensen.we, 0.05);
        assert_eq!(config.solver.grid_resolution, 5);
        assert_eq!(config.turbine.p_p, 1.88);
        assert_eq!(*config.farm.air_density, 1.225);
        assert!(config.logging.console.enable);
        assert_eq!(*config.reference_turbine_diameter(), 126.0);
        assert_eq!(*config.reference_wind_height(), 90.0);
    }

    #[test]
    fn test_full_input() {
        let input = format!(
            "{TANDEM}
            [logging.console]
            enable = false
            level = \"debug\"

            [wake]
            velocity_model = \"jensen\"

            [wake.parameters.jensen]
            we = 0.075

            [solver]
            grid_resolution = 3
            axial_induction = 0.3
            "
        );
        let config = FlorisConfig::from_toml_str(&input).unwrap();
        assert!(!config.logging.console.enable);
        assert_eq!(config.logging.console.level, "debug");
        assert_eq!(config.wake.parameters.jensen.we, 0.075);
        assert_eq!(config.solver.grid_resolution, 3);
        assert_eq!(config.solver.axial_induction, 0.3);
    }

    #[test]
    fn test_layout_mismatch() {
        let input = TANDEM.replace("layout_y = [0.0, 0.0, 0.0]", "layout_y = [0.0, 0.0]");
        let err = FlorisConfig::from_toml_str(&input).unwrap_err();
        assert_eq!(err.code(), WakeErrorCode::LayoutMismatch);
    }

    #[test]
    fn test_negative_diameter_rejected() {
        let input = TANDEM.replace("rotor_diameter = 126.0", "rotor_diameter = -126.0");
        let err = FlorisConfig::from_toml_str(&input).unwrap_err();
        assert_eq!(err.code(), WakeErrorCode::InvalidConfig);
        assert!(err.msg().contains("turbine.rotor_diameter"));
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        let input = format!("{TANDEM}\n[solver]\nresolution = 5\n");
        let err = FlorisConfig::from_toml_str(&input).unwrap_err();
        assert_eq!(err.code(), WakeErrorCode::Parse);
    }

    #[test]
    fn test_missing_file() {
        let err = FlorisConfig::from_file("/nonexistent/input.toml").unwrap_err();
        assert_eq!(err.code(), WakeErrorCode::Io);
    }

    #[test]
    fn test_yaw_at_ninety_degrees_rejected() {
        let input = TANDEM.replace(
            "hub_height = 90.0",
            "hub_height = 90.0\n        yaw_angle = 90.0",
        );
        let err = FlorisConfig::from_toml_str(&input).unwrap_err();
        assert_eq!(err.code(), WakeErrorCode::InvalidConfig);
        assert!(err.msg().contains("turbine.yaw_angle"));

        let input = TANDEM.replace(
            "hub_height = 90.0",
            "hub_height = 90.0\n        yaw_angle = 25.0",
        );
        assert!(FlorisConfig::from_toml_str(&input).is_ok());
    }

    #[test]
    fn test_rotor_grid_below_ground_rejected() {
        // Half-extent is 0.5 * 126 / 2 = 31.5 m
        let input = TANDEM.replace("hub_height = 90.0", "hub_height = 20.0");
        let err = FlorisConfig::from_toml_str(&input).unwrap_err();
        assert_eq!(err.code(), WakeErrorCode::InvalidConfig);
        assert!(err.msg().contains("turbine.hub_height"));

        let input = TANDEM.replace("hub_height = 90.0", "hub_height = 31.5");
        assert!(FlorisConfig::from_toml_str(&input).is_err());

        // A smaller sampling disc lifts the grid clear of the ground
        let input = format!(
            "{}\n[solver]\ndisc_ratio = 0.25\n",
            TANDEM.replace("hub_height = 90.0", "hub_height = 20.0")
        );
        assert!(FlorisConfig::from_toml_str(&input).is_ok());
    }

    #[test]
    fn test_empty_layout_rejected() {
        let input = TANDEM
            .replace("layout_x = [0.0, 630.0, 1260.0]", "layout_x = []")
            .replace("layout_y = [0.0, 0.0, 0.0]", "layout_y = []");
        let err = FlorisConfig::from_toml_str(&input).unwrap_err();
        assert_eq!(err.code(), WakeErrorCode::InvalidConfig);
    }
}
