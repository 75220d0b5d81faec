//! Solver constants exposed as configuration

use crate::config::require_positive;
use crate::error::{Result, WakeError};
use crate::grid::DEFAULT_DISC_RATIO;
use serde::{Deserialize, Serialize};

/// Axial induction applied to every turbine, from Ct ≈ 0.7656 at 8 m/s
pub const DEFAULT_AXIAL_INDUCTION: f64 = 0.25790121826746754;

/// Rotor-plane points along each axis
pub const DEFAULT_GRID_RESOLUTION: usize = 5;

/// Parameters of the sequential wake solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Points along each rotor-plane axis; each turbine gets `n × n` points
    pub grid_resolution: usize,
    /// Axial induction factor shared by all turbines
    pub axial_induction: f64,
    /// Fraction of the rotor radius covered by the sampling square
    pub disc_ratio: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            grid_resolution: DEFAULT_GRID_RESOLUTION,
            axial_induction: DEFAULT_AXIAL_INDUCTION,
            disc_ratio: DEFAULT_DISC_RATIO,
        }
    }
}

impl SolverConfig {
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a zero resolution, an axial induction
    /// outside [0, 0.5] or a disc ratio outside (0, 1].
    pub fn validate(&self) -> Result<()> {
        if self.grid_resolution == 0 {
            return Err(WakeError::invalid_config(
                "solver.grid_resolution",
                "must be at least 1",
            ));
        }
        if !(0.0..=0.5).contains(&self.axial_induction) {
            return Err(WakeError::invalid_config(
                "solver.axial_induction",
                &format!("must be in [0, 0.5], got {}", self.axial_induction),
            ));
        }
        require_positive("solver.disc_ratio", self.disc_ratio)?;
        if self.disc_ratio > 1.0 {
            return Err(WakeError::invalid_config(
                "solver.disc_ratio",
                &format!("must not exceed 1, got {}", self.disc_ratio),
            ));
        }
        Ok(())
    }
}
