//! Ambient and waked velocity state
//!
//! The free stream follows a power-law shear profile:
//!
//! ```text
//! u_initial(z) = U_ref · (z / z_ref)^α
//! ```
//!
//! where `U_ref` is the wind speed measured at `z_ref` and `α` the shear
//! exponent. The solver then overwrites `u` turbine by turbine.

use crate::config::FlorisConfig;
use crate::core_types::{KgPerCubicMeter, Meters, MetersPerSecond};
use crate::grid::{TurbineField, TurbineGrid};
use rayon::prelude::*;
use tracing::debug;

/// Velocity fields on the turbine grid plus the scalars shared by all turbines
#[derive(Debug, Clone, PartialEq)]
pub struct FlowField {
    /// Free-stream wind speed at the reference height
    pub wind_speed: MetersPerSecond,
    /// Power-law shear exponent
    pub wind_shear: f64,
    /// Air density
    pub air_density: KgPerCubicMeter,
    /// Height of the `wind_speed` measurement; also the vertical centre of wake cones
    pub reference_wind_height: Meters,
    /// Rotor diameter used by the wake model for every turbine
    pub reference_turbine_diameter: Meters,
    /// Ambient streamwise velocity, unaffected by wakes
    pub u_initial: TurbineField,
    /// Streamwise velocity including wakes
    pub u: TurbineField,
    /// Lateral velocity
    pub v: TurbineField,
    /// Vertical velocity
    pub w: TurbineField,
}

impl FlowField {
    /// Create a flow field with empty velocity arrays
    ///
    /// Call [`FlowField::initialize_velocity_field`] before reading `u`.
    #[must_use]
    pub fn new(
        wind_speed: MetersPerSecond,
        wind_shear: f64,
        air_density: KgPerCubicMeter,
        reference_wind_height: Meters,
        reference_turbine_diameter: Meters,
    ) -> Self {
        Self {
            wind_speed,
            wind_shear,
            air_density,
            reference_wind_height,
            reference_turbine_diameter,
            u_initial: TurbineField::new(0, 0),
            u: TurbineField::new(0, 0),
            v: TurbineField::new(0, 0),
            w: TurbineField::new(0, 0),
        }
    }

    /// Create a flow field from the `[farm]` and `[turbine]` inputs
    #[must_use]
    pub fn from_config(config: &FlorisConfig) -> Self {
        Self::new(
            config.farm.wind_speed,
            config.farm.wind_shear,
            config.farm.air_density,
            config.reference_wind_height(),
            config.reference_turbine_diameter(),
        )
    }

    /// Set the ambient profile on `grid` and reset `u` to it
    ///
    /// `v` and `w` are zeroed.
    pub fn initialize_velocity_field(&mut self, grid: &TurbineGrid) {
        let n_turbines = grid.n_turbines;
        let points = grid.points_per_turbine();
        let wind_speed = *self.wind_speed;
        let z_ref = *self.reference_wind_height;
        let shear = self.wind_shear;

        let mut u_initial = TurbineField::new(n_turbines, points);
        u_initial
            .data
            .par_iter_mut()
            .zip(grid.z.data.par_iter())
            .for_each(|(u, &z)| *u = wind_speed * (z / z_ref).powf(shear));

        self.u = u_initial.clone();
        self.u_initial = u_initial;
        self.v = TurbineField::new(n_turbines, points);
        self.w = TurbineField::new(n_turbines, points);

        debug!(
            "Initialized velocity field: {} turbines x {} points, U_ref={}, shear={}",
            n_turbines, points, self.wind_speed, shear
        );
    }
}
