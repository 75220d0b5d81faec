//! Wind farm layout
//!
//! Holds the hub coordinates and the per-position turbine state. The wake
//! solver consumes the coordinates as-is: turbine 0 must be the most upstream
//! and indices must increase downstream.

use crate::core_types::{Degrees, Vec3};
use crate::error::{Result, WakeError};
use crate::turbine::Turbine;

/// Turbines and their hub coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Farm {
    coords: Vec<Vec3>,
    /// Turbine state per position, same order as the coordinates
    pub turbines: Vec<Turbine>,
}

impl Farm {
    /// Place a copy of `turbine` at each `(layout_x[i], layout_y[i])`
    ///
    /// Hub coordinates take `z` from the turbine hub height.
    ///
    /// # Errors
    ///
    /// Returns `LayoutMismatch` if the coordinate lists differ in length.
    pub fn new(layout_x: &[f64], layout_y: &[f64], turbine: &Turbine) -> Result<Self> {
        if layout_x.len() != layout_y.len() {
            return Err(WakeError::layout_mismatch(layout_x.len(), layout_y.len()));
        }
        let coords = layout_x
            .iter()
            .zip(layout_y)
            .map(|(&x, &y)| Vec3::new(x, y, *turbine.hub_height))
            .collect::<Vec<_>>();
        let turbines = vec![turbine.clone(); coords.len()];
        Ok(Self { coords, turbines })
    }

    /// Hub coordinates in index order
    #[must_use]
    pub fn coords(&self) -> &[Vec3] {
        &self.coords
    }

    /// Number of turbines
    #[must_use]
    pub fn n_turbines(&self) -> usize {
        self.coords.len()
    }

    /// True when streamwise coordinates strictly increase with index
    #[must_use]
    pub fn is_streamwise_ordered(&self) -> bool {
        self.coords.windows(2).all(|w| w[1].x > w[0].x)
    }

    /// Count the turbines waking each turbine for a wind direction
    ///
    /// Uses the disturbed-sector rule of IEC 61400-12-1:2017 Annex A
    /// (Figure A.1). For each pair, with `d` the distance in rotor diameters
    /// of the other turbine and `θ` its bearing (degrees clockwise from +y),
    /// the other turbine wakes this one when
    ///
    /// ```text
    /// d ≤ 2  or  (d ≤ 20 and |wrap_180(wd − θ)| ≤ ½·(1.3·atan(2.5/d + 0.15) + 10))
    /// ```
    #[must_use]
    pub fn number_of_wakes_iec(&self, wind_direction: Degrees) -> Vec<usize> {
        self.coords
            .iter()
            .enumerate()
            .map(|(i, c0)| {
                self.coords
                    .iter()
                    .zip(&self.turbines)
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .filter(|(_, (c, turbine))| {
                        let dx = c.x - c0.x;
                        let dy = c.y - c0.y;
                        let dist = dx.hypot(dy) / *turbine.rotor_diameter;
                        let bearing = dx.atan2(dy).to_degrees();
                        let sector =
                            0.5 * (1.3 * (2.5 / dist + 0.15).atan().to_degrees() + 10.0);
                        dist <= 2.0
                            || (dist <= 20.0 && wrap_180(*wind_direction - bearing).abs() <= sector)
                    })
                    .count()
            })
            .collect()
    }
}

/// Wrap an angle in degrees into (-180, 180]
#[must_use]
pub fn wrap_180(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
