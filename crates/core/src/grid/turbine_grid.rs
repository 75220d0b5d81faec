//! Rotor-plane sampling grid
//!
//! Each turbine is sampled on an `n × n` square of points in its rotor plane.
//! The square is centred on the hub and spans a fraction of the rotor radius:
//!
//! ```text
//! disc = linspace(-r, r, n),   r = disc_ratio * D / 2
//! x[i][j][k] = x_t
//! y[i][j][k] = y_t + disc[j]
//! z[i][j][k] = z_t + disc[k]
//! ```
//!
//! Points are stored lateral-major (`j * n + k`).

use super::fields::TurbineField;
use crate::core_types::{Meters, Vec3};

/// Default fraction of the rotor radius covered by the sampling square
pub const DEFAULT_DISC_RATIO: f64 = 0.5;

/// Per-turbine coordinate arrays in the farm frame
///
/// `x` is streamwise, `y` lateral and `z` vertical. Turbine index 0 is the most
/// upstream; the grid never reorders turbines.
#[derive(Debug, Clone, PartialEq)]
pub struct TurbineGrid {
    /// Streamwise coordinates
    pub x: TurbineField,
    /// Lateral coordinates
    pub y: TurbineField,
    /// Vertical coordinates
    pub z: TurbineField,
    /// Number of turbines
    pub n_turbines: usize,
    /// Points along each rotor-plane axis
    pub grid_resolution: usize,
}

impl TurbineGrid {
    /// Build the rotor grid for every turbine
    ///
    /// # Arguments
    ///
    /// * `coords` - Hub coordinates, index 0 most upstream
    /// * `reference_turbine_diameter` - Rotor diameter shared by all turbines
    /// * `grid_resolution` - Points along each rotor-plane axis (`n`)
    /// * `disc_ratio` - Fraction of the rotor radius covered by the square
    ///
    /// # Panics
    ///
    /// Panics if `grid_resolution` is zero
    #[must_use]
    pub fn new(
        coords: &[Vec3],
        reference_turbine_diameter: Meters,
        grid_resolution: usize,
        disc_ratio: f64,
    ) -> Self {
        assert!(grid_resolution > 0, "Grid resolution must be positive");

        let half_extent = *reference_turbine_diameter / 2.0 * disc_ratio;
        let disc = disc_offsets(half_extent, grid_resolution);
        let points = grid_resolution * grid_resolution;
        let n_turbines = coords.len();

        let mut x = TurbineField::new(n_turbines, points);
        let mut y = TurbineField::new(n_turbines, points);
        let mut z = TurbineField::new(n_turbines, points);

        for (i, coord) in coords.iter().enumerate() {
            x.turbine_mut(i).fill(coord.x);
            let (ys, zs) = (y.turbine_mut(i), z.turbine_mut(i));
            for (j, dy) in disc.iter().enumerate() {
                for (k, dz) in disc.iter().enumerate() {
                    ys[j * grid_resolution + k] = coord.y + dy;
                    zs[j * grid_resolution + k] = coord.z + dz;
                }
            }
        }

        Self {
            x,
            y,
            z,
            n_turbines,
            grid_resolution,
        }
    }

    /// Assemble a grid from existing coordinate fields
    ///
    /// Used when the sample points come from elsewhere than the rotor square.
    /// `grid_resolution` is reported as the square root of the point count,
    /// rounded down.
    ///
    /// # Panics
    ///
    /// Panics if the three fields differ in shape
    #[must_use]
    pub fn from_fields(x: TurbineField, y: TurbineField, z: TurbineField) -> Self {
        assert!(
            x.n_turbines == y.n_turbines
                && x.n_turbines == z.n_turbines
                && x.points_per_turbine == y.points_per_turbine
                && x.points_per_turbine == z.points_per_turbine,
            "Grid coordinate fields must have equal shape"
        );
        let n_turbines = x.n_turbines;
        let grid_resolution = (x.points_per_turbine as f64).sqrt() as usize;
        Self {
            x,
            y,
            z,
            n_turbines,
            grid_resolution,
        }
    }

    /// Number of grid points per turbine
    #[must_use]
    pub fn points_per_turbine(&self) -> usize {
        self.x.points_per_turbine
    }
}

/// Evenly spaced offsets from `-radius` to `radius`; a single point sits on the hub
fn disc_offsets(radius: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![0.0];
    }
    let step = 2.0 * radius / (n - 1) as f64;
    (0..n).map(|k| -radius + step * k as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tandem() -> Vec<Vec3> {
        vec![Vec3::new(0.0, 0.0, 90.0), Vec3::new(630.0, 0.0, 90.0)]
    }

    #[test]
    fn test_grid_shape() {
        let grid = TurbineGrid::new(&tandem(), Meters::new(126.0), 5, DEFAULT_DISC_RATIO);
        assert_eq!(grid.n_turbines, 2);
        assert_eq!(grid.grid_resolution, 5);
        assert_eq!(grid.points_per_turbine(), 25);
        assert_eq!(grid.x.data.len(), 50);
    }

    #[test]
    fn test_disc_spans_half_radius() {
        let grid = TurbineGrid::new(&tandem(), Meters::new(126.0), 5, DEFAULT_DISC_RATIO);
        let y = grid.y.turbine(1);
        let z = grid.z.turbine(1);

        // First lateral row, last vertical column
        assert_relative_eq!(y[0], -31.5);
        assert_relative_eq!(y[24], 31.5);
        assert_relative_eq!(z[0], 90.0 - 31.5);
        assert_relative_eq!(z[4], 90.0 + 31.5);
        // Centre point is the hub
        assert_relative_eq!(y[12], 0.0);
        assert_relative_eq!(z[12], 90.0);
        assert!(grid.x.turbine(1).iter().all(|&x| x == 630.0));
    }

    #[test]
    fn test_single_point_grid_is_hub() {
        let grid = TurbineGrid::new(&tandem(), Meters::new(126.0), 1, DEFAULT_DISC_RATIO);
        assert_eq!(grid.y.turbine(0), &[0.0]);
        assert_eq!(grid.z.turbine(1), &[90.0]);
    }

    #[test]
    fn test_from_fields() {
        let x = TurbineField::from_turbines(&[vec![0.0; 4], vec![500.0; 4]]);
        let y = TurbineField::new(2, 4);
        let z = TurbineField::with_value(2, 4, 90.0);
        let grid = TurbineGrid::from_fields(x, y, z);
        assert_eq!(grid.n_turbines, 2);
        assert_eq!(grid.grid_resolution, 2);
    }

    #[test]
    #[should_panic(expected = "Grid resolution must be positive")]
    fn test_zero_resolution_panics() {
        let _ = TurbineGrid::new(&tandem(), Meters::new(126.0), 0, DEFAULT_DISC_RATIO);
    }
}
