//! Per-turbine field storage
//!
//! Every array in the wake model (grid coordinates, velocities, deficits) is
//! sampled on the same rotor-plane points of each turbine. `TurbineField`
//! stores those values as one flat `Vec<f64>`, turbine-major.

/// Field data sampled on each turbine's rotor grid
///
/// Stores `n_turbines * points_per_turbine` values in turbine-major order
/// (`turbine * points_per_turbine + point`). Turbine `i`'s slice corresponds to
/// `x[i]`, `y[i]`, `u[i]` and so on.
#[derive(Debug, Clone, PartialEq)]
pub struct TurbineField {
    /// Field values in turbine-major order
    pub data: Vec<f64>,
    /// Number of turbines
    pub n_turbines: usize,
    /// Number of grid points per turbine
    pub points_per_turbine: usize,
}

impl TurbineField {
    /// Create a new field initialized to zero
    #[must_use]
    pub fn new(n_turbines: usize, points_per_turbine: usize) -> Self {
        Self::with_value(n_turbines, points_per_turbine, 0.0)
    }

    /// Create a new field with every point set to `value`
    #[must_use]
    pub fn with_value(n_turbines: usize, points_per_turbine: usize, value: f64) -> Self {
        Self {
            data: vec![value; n_turbines * points_per_turbine],
            n_turbines,
            points_per_turbine,
        }
    }

    /// Build a field from one slice per turbine
    ///
    /// # Panics
    ///
    /// Panics if the turbine slices have different lengths
    #[must_use]
    pub fn from_turbines(turbines: &[Vec<f64>]) -> Self {
        let points_per_turbine = turbines.first().map_or(0, Vec::len);
        assert!(
            turbines.iter().all(|t| t.len() == points_per_turbine),
            "Turbine slices must have equal length"
        );
        Self {
            data: turbines.concat(),
            n_turbines: turbines.len(),
            points_per_turbine,
        }
    }

    /// Get reference to all field data
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Values at turbine `i`'s grid points
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_turbines`
    #[must_use]
    pub fn turbine(&self, i: usize) -> &[f64] {
        assert!(i < self.n_turbines, "Turbine index out of bounds");
        let start = i * self.points_per_turbine;
        &self.data[start..start + self.points_per_turbine]
    }

    /// Mutable values at turbine `i`'s grid points
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_turbines`
    pub fn turbine_mut(&mut self, i: usize) -> &mut [f64] {
        assert!(i < self.n_turbines, "Turbine index out of bounds");
        let start = i * self.points_per_turbine;
        &mut self.data[start..start + self.points_per_turbine]
    }

    /// Borrow turbine `i - 1` immutably and turbine `i` mutably
    ///
    /// # Panics
    ///
    /// Panics if `i == 0` or `i >= n_turbines`
    pub fn upstream_pair_mut(&mut self, i: usize) -> (&[f64], &mut [f64]) {
        assert!((1..self.n_turbines).contains(&i), "Turbine index out of bounds");
        let n = self.points_per_turbine;
        let (head, tail) = self.data.split_at_mut(i * n);
        (&head[(i - 1) * n..], &mut tail[..n])
    }

    /// Iterate over turbine slices in index order
    pub fn turbines(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.points_per_turbine.max(1))
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_creation() {
        let field = TurbineField::new(3, 25);
        assert_eq!(field.n_turbines, 3);
        assert_eq!(field.points_per_turbine, 25);
        assert_eq!(field.data.len(), 75);
        assert!(field.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_turbine_major_indexing() {
        let mut field = TurbineField::new(2, 4);
        field.turbine_mut(1)[2] = 7.5;
        assert_eq!(field.data[4 + 2], 7.5);
        assert_eq!(field.turbine(1), &[0.0, 0.0, 7.5, 0.0]);
    }

    #[test]
    fn test_upstream_pair() {
        let mut field =
            TurbineField::from_turbines(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        let (up, down) = field.upstream_pair_mut(2);
        assert_eq!(up, &[3.0, 4.0]);
        down[0] = up[0] * 10.0;
        assert_eq!(field.turbine(2), &[30.0, 6.0]);
    }

    #[test]
    fn test_turbines_iterator() {
        let field = TurbineField::from_turbines(&[vec![1.0], vec![2.0]]);
        let sums: Vec<f64> = field.turbines().map(|t| t.iter().sum()).collect();
        assert_eq!(sums, vec![1.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "Turbine index out of bounds")]
    fn test_upstream_pair_rejects_turbine_zero() {
        let mut field = TurbineField::new(2, 1);
        let _ = field.upstream_pair_mut(0);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_ragged_turbines_rejected() {
        let _ = TurbineField::from_turbines(&[vec![1.0], vec![2.0, 3.0]]);
    }
}
