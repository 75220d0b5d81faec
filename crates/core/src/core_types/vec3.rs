//! Vector type alias for turbine positions.

use nalgebra::Vector3;

/// 3D vector type for turbine coordinates.
///
/// Alias for `nalgebra::Vector3<f64>`: `x` streamwise, `y` lateral, `z`
/// vertical, all in meters.
pub type Vec3 = Vector3<f64>;
