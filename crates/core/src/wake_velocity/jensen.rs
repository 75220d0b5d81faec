//! Jensen/Park top-hat wake model
//!
//! Jensen, N.O. (1983). "A note on wind generator interaction."
//! Risø-M-2411, Risø National Laboratory.
//!
//! The wake behind a rotor of diameter `D` is a cone whose half-width grows
//! linearly with streamwise distance:
//!
//! ```text
//! boundary(x) = we·x + D/2
//! ```
//!
//! Inside the cone the fractional deficit is uniform and set by the ratio of
//! rotor to expanded wake diameter:
//!
//! ```text
//! c = (D / (2·we·Δx + D))²
//! ```
//!
//! with `Δx` the streamwise spacing to the immediately upstream turbine.
//! Outside the cone `c = 0`.
//!
//! The lateral bounds are centred on the downstream point's own `y` and the
//! vertical bounds on the reference wind height, not on the upstream wake
//! centreline. Without a deflection field the lateral test therefore only
//! masks points where the half-width is negative.

use super::VelocityDeficit;
use crate::config::require_positive;
use crate::error::Result;
use crate::flow_field::FlowField;
use crate::grid::TurbineGrid;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Jensen model parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JensenParameters {
    /// Wake expansion constant: slope of the cone boundary
    pub we: f64,
}

impl Default for JensenParameters {
    fn default() -> Self {
        Self { we: 0.05 }
    }
}

impl JensenParameters {
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless `we` is finite and positive.
    pub fn validate(&self) -> Result<()> {
        require_positive("wake.parameters.jensen.we", self.we)
    }
}

/// Jensen velocity deficit with a fixed wake expansion constant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JensenVelocityDeficit {
    we: f64,
}

impl JensenVelocityDeficit {
    /// Create the model from its parameters
    #[must_use]
    pub fn new(parameters: JensenParameters) -> Self {
        Self { we: parameters.we }
    }

    /// Wake expansion constant
    #[must_use]
    pub fn we(&self) -> f64 {
        self.we
    }

    /// Cone half-width at streamwise coordinate `x` for rotor diameter `diameter`
    #[inline]
    #[must_use]
    pub fn boundary(&self, x: f64, diameter: f64) -> f64 {
        self.we * x + diameter / 2.0
    }

    /// Deficit inside the cone at streamwise spacing `dx`
    #[inline]
    #[must_use]
    pub fn cone_deficit(&self, dx: f64, diameter: f64) -> f64 {
        (diameter / (2.0 * self.we * dx + diameter)).powi(2)
    }
}

impl Default for JensenVelocityDeficit {
    fn default() -> Self {
        Self::new(JensenParameters::default())
    }
}

impl VelocityDeficit for JensenVelocityDeficit {
    fn name(&self) -> &'static str {
        "jensen"
    }

    fn velocity_deficit(
        &self,
        grid: &TurbineGrid,
        flow_field: &FlowField,
        i_turbine: usize,
    ) -> Vec<f64> {
        let diameter = *flow_field.reference_turbine_diameter;
        let hub = *flow_field.reference_wind_height;

        let x = grid.x.turbine(i_turbine);
        let y = grid.y.turbine(i_turbine);
        let z = grid.z.turbine(i_turbine);
        let x_upstream = grid.x.turbine(i_turbine - 1);

        x.par_iter()
            .zip(y.par_iter())
            .zip(z.par_iter())
            .zip(x_upstream.par_iter())
            .map(|(((&x, &y), &z), &x_up)| {
                let boundary = self.boundary(x, diameter);
                let y_upper = boundary + y;
                let y_lower = -boundary + y;
                let z_upper = boundary + hub;
                let z_lower = -boundary + hub;

                // Points on a bound stay inside the cone
                if y > y_upper || y < y_lower || z > z_upper || z < z_lower {
                    0.0
                } else {
                    self.cone_deficit(x - x_up, diameter)
                }
            })
            .collect()
    }
}
