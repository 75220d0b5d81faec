//! Turbine-by-turbine wake propagation
//!
//! Turbines are visited in index order. Each turbine's inflow is the
//! already-waked velocity of the turbine before it:
//!
//! ```text
//! u[0] = u_initial[0]
//! u[i] = u[i-1] · (1 − 2·a·c_i)      for i = 1..n
//! ```
//!
//! so deficits compound down the row instead of superposing from every
//! upstream turbine. The dependency of `u[i]` on `u[i-1]` keeps the loop
//! sequential.

use super::params::SolverConfig;
use crate::error::Result;
use crate::farm::Farm;
use crate::flow_field::FlowField;
use crate::grid::TurbineGrid;
use crate::wake_velocity::VelocityDeficit;
use tracing::{debug, info, warn};

/// Sequential single-wake solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialWakeSolver {
    config: SolverConfig,
}

impl SequentialWakeSolver {
    /// Create a solver with validated constants
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `config` fails [`SolverConfig::validate`].
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Solver constants
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Build the rotor grid for `farm` at this solver's resolution
    #[must_use]
    pub fn build_grid(&self, farm: &Farm, flow_field: &FlowField) -> TurbineGrid {
        TurbineGrid::new(
            farm.coords(),
            flow_field.reference_turbine_diameter,
            self.config.grid_resolution,
            self.config.disc_ratio,
        )
    }

    /// Solve the farm's velocity field in place
    ///
    /// Builds the grid, resets `flow_field` to ambient conditions on it and
    /// propagates wakes with `model`. Turbine order is taken from the farm
    /// as-is; an unordered layout is logged and solved anyway.
    pub fn solve(&self, farm: &Farm, flow_field: &mut FlowField, model: &dyn VelocityDeficit) {
        if !farm.is_streamwise_ordered() {
            warn!(
                "Turbine layout is not in increasing streamwise order; wakes follow index order"
            );
        }

        let grid = self.build_grid(farm, flow_field);
        flow_field.initialize_velocity_field(&grid);

        info!(
            "Solving {} turbines with {} model ({}x{} grid, a = {})",
            grid.n_turbines,
            model.name(),
            grid.grid_resolution,
            grid.grid_resolution,
            self.config.axial_induction
        );
        self.solve_on_grid(&grid, flow_field, model);
    }

    /// Propagate wakes over an already-initialized flow field
    ///
    /// `flow_field.u` must hold the inflow of turbine 0 and match `grid` in
    /// shape. Turbine 0 is never modified.
    ///
    /// # Panics
    ///
    /// Panics if the deficit array and the velocity slices differ in length.
    pub fn solve_on_grid(
        &self,
        grid: &TurbineGrid,
        flow_field: &mut FlowField,
        model: &dyn VelocityDeficit,
    ) {
        let a = self.config.axial_induction;

        for i in 1..grid.n_turbines {
            let c = model.velocity_deficit(grid, flow_field, i);
            let (upstream, downstream) = flow_field.u.upstream_pair_mut(i);
            assert_eq!(
                c.len(),
                downstream.len(),
                "Deficit and velocity arrays differ in shape at turbine {i}"
            );

            for ((u, &u_up), &c) in downstream.iter_mut().zip(upstream).zip(&c) {
                *u = u_up * (1.0 - 2.0 * a * c);
            }

            debug!(
                "Turbine {}: peak deficit {:.4}",
                i,
                c.iter().copied().fold(0.0, f64::max)
            );
        }
    }
}
