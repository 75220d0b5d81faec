//! Top-level wind farm simulation
//!
//! `Floris` wires the input configuration to the farm, flow field, wake model
//! and solver, and turns the solved velocities into per-turbine results.

use crate::config::FlorisConfig;
use crate::core_types::{Degrees, Watts};
use crate::error::{Result, WakeError};
use crate::farm::Farm;
use crate::flow_field::FlowField;
use crate::solver::SequentialWakeSolver;
use crate::turbine::{self, average_velocity, Turbine};
use crate::wake_velocity::{create_velocity_model, VelocityDeficit, WakeModel};
use std::path::Path;
use tracing::info;

/// A configured wind farm simulation
pub struct Floris {
    config: FlorisConfig,
    /// Turbine layout and per-position turbine state
    pub farm: Farm,
    /// Velocity state; ambient until [`Floris::go`] runs
    pub flow_field: FlowField,
    solver: SequentialWakeSolver,
    wake_model: WakeModel,
    velocity_model: Box<dyn VelocityDeficit>,
}

impl Floris {
    /// Build a simulation from validated input
    ///
    /// The flow field starts at ambient conditions on the solver grid.
    ///
    /// # Errors
    ///
    /// Returns any validation error of `config`, `UnknownWakeModel` or
    /// `UnsupportedWakeModel` for the selected velocity model.
    pub fn new(config: FlorisConfig) -> Result<Self> {
        config.validate()?;

        let turbine = Turbine::new(&config.turbine)?;
        let farm = Farm::new(&config.farm.layout_x, &config.farm.layout_y, &turbine)?;
        let mut flow_field = FlowField::from_config(&config);
        let solver = SequentialWakeSolver::new(config.solver)?;
        let wake_model: WakeModel = config.wake.velocity_model.parse()?;
        let velocity_model = create_velocity_model(wake_model, &config.wake.parameters)?;

        let grid = solver.build_grid(&farm, &flow_field);
        flow_field.initialize_velocity_field(&grid);

        info!(
            "Created simulation: {} turbines, U={}, D={}, model={}",
            farm.n_turbines(),
            flow_field.wind_speed,
            flow_field.reference_turbine_diameter,
            wake_model
        );

        Ok(Self {
            config,
            farm,
            flow_field,
            solver,
            wake_model,
            velocity_model,
        })
    }

    /// Parse a TOML input string and build the simulation
    ///
    /// # Errors
    ///
    /// As [`FlorisConfig::from_toml_str`] and [`Floris::new`].
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Self::new(FlorisConfig::from_toml_str(input)?)
    }

    /// Read a TOML input file and build the simulation
    ///
    /// # Errors
    ///
    /// As [`FlorisConfig::from_file`] and [`Floris::new`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(FlorisConfig::from_file(path)?)
    }

    /// Input this simulation was built from
    #[must_use]
    pub fn config(&self) -> &FlorisConfig {
        &self.config
    }

    /// Selected velocity deficit model
    #[must_use]
    pub fn wake_model(&self) -> WakeModel {
        self.wake_model
    }

    /// Solve the wake field
    pub fn go(&mut self) {
        self.solver.solve(
            &self.farm,
            &mut self.flow_field,
            self.velocity_model.as_ref(),
        );
    }

    /// Switch the velocity deficit model by name
    ///
    /// The flow field is reset to ambient; call [`Floris::go`] to re-solve.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWakeModel` for names outside [`WakeModel::NAMES`] and
    /// `UnsupportedWakeModel` for models without an implementation. The
    /// current model is kept on error.
    pub fn set_wake_model(&mut self, name: &str) -> Result<()> {
        let wake_model: WakeModel = name.parse()?;
        self.velocity_model = create_velocity_model(wake_model, &self.config.wake.parameters)?;
        self.wake_model = wake_model;
        self.config.wake.velocity_model = wake_model.as_str().to_string();

        let grid = self.solver.build_grid(&self.farm, &self.flow_field);
        self.flow_field.initialize_velocity_field(&grid);
        info!("Wake model set to {}", wake_model);
        Ok(())
    }

    /// Set turbine yaw angles
    ///
    /// A single angle applies to every turbine; otherwise one angle per
    /// turbine is required. Yaw changes thrust and power only; wakes are not
    /// deflected.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a wrong number of angles or an angle
    /// outside (-90, 90) degrees. No turbine is changed on error.
    pub fn set_yaw_angles(&mut self, yaw_angles: &[Degrees]) -> Result<()> {
        let n = self.farm.n_turbines();
        if yaw_angles.len() != 1 && yaw_angles.len() != n {
            return Err(WakeError::invalid_config(
                "yaw_angles",
                &format!("expected 1 or {n} angles, got {}", yaw_angles.len()),
            ));
        }
        for &yaw in yaw_angles {
            turbine::validate_yaw(yaw)?;
        }

        for (i, t) in self.farm.turbines.iter_mut().enumerate() {
            t.yaw_angle = if yaw_angles.len() == 1 {
                yaw_angles[0]
            } else {
                yaw_angles[i]
            };
        }
        Ok(())
    }

    /// Rotor-averaged velocity of each turbine
    #[must_use]
    pub fn turbine_average_velocities(&self) -> Vec<f64> {
        self.flow_field.u.turbines().map(average_velocity).collect()
    }

    /// Thrust coefficient of each turbine
    ///
    /// # Errors
    ///
    /// Returns `MissingPerformanceTable` if the turbine has no curves.
    pub fn turbine_thrust_coefficients(&self) -> Result<Vec<f64>> {
        self.farm
            .turbines
            .iter()
            .zip(self.flow_field.u.turbines())
            .map(|(t, u)| t.thrust_coefficient(u))
            .collect()
    }

    /// Axial induction of each turbine, derived from its thrust coefficient
    ///
    /// # Errors
    ///
    /// Returns `MissingPerformanceTable` if the turbine has no curves.
    pub fn turbine_axial_inductions(&self) -> Result<Vec<f64>> {
        self.farm
            .turbines
            .iter()
            .zip(self.flow_field.u.turbines())
            .map(|(t, u)| t.axial_induction(u))
            .collect()
    }

    /// Power of each turbine
    ///
    /// # Errors
    ///
    /// Returns `MissingPerformanceTable` if the turbine has no curves.
    pub fn turbine_powers(&self) -> Result<Vec<Watts>> {
        self.farm
            .turbines
            .iter()
            .zip(self.flow_field.u.turbines())
            .map(|(t, u)| t.power(self.flow_field.air_density, u))
            .collect()
    }

    /// Total farm power
    ///
    /// # Errors
    ///
    /// Returns `MissingPerformanceTable` if the turbine has no curves.
    pub fn farm_power(&self) -> Result<Watts> {
        Ok(self
            .turbine_powers()?
            .into_iter()
            .fold(Watts::new(0.0), |acc, p| acc + p))
    }
}
