//! Rotor-plane grids and per-turbine field storage

pub mod fields;
pub mod turbine_grid;

pub use fields::TurbineField;
pub use turbine_grid::{TurbineGrid, DEFAULT_DISC_RATIO};
