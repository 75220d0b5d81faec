//! Wind Farm Wake Simulation Core Library
//!
//! Computes the steady-state wind speed at every turbine of a wind farm,
//! accounting for the wakes of upstream turbines with the Jensen/Park
//! wake-cone model.
//!
//! ## Model
//!
//! - Each turbine is sampled on a small square grid in its rotor plane
//! - The free stream follows a power-law shear profile
//! - A velocity deficit model computes the fractional speed loss at turbine
//!   `i` caused by turbine `i - 1`
//! - The sequential solver chains those deficits down the row,
//!   `u[i] = u[i-1] · (1 − 2·a·c)`
//! - Rotor-averaged velocities feed thrust, axial induction and power
//!
//! ## Example
//!
//! ```rust
//! use wake_sim_core::Floris;
//!
//! let input = r#"
//!     [turbine]
//!     rotor_diameter = 126.0
//!     hub_height = 90.0
//!
//!     [farm]
//!     layout_x = [0.0, 630.0]
//!     layout_y = [0.0, 0.0]
//!     wind_speed = 8.0
//! "#;
//!
//! let mut floris = Floris::from_toml_str(input).unwrap();
//! floris.go();
//! let velocities = floris.turbine_average_velocities();
//! assert!(velocities[1] < velocities[0]);
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Inputs and the objects built from them
pub mod config;
pub mod farm;
pub mod flow_field;
pub mod grid;
pub mod turbine;

// Wake physics and the farm solver
pub mod solver;
pub mod wake_velocity;

pub mod simulation;

// Re-export core types
pub use core_types::{Degrees, KgPerCubicMeter, Meters, MetersPerSecond, Vec3, Watts};
pub use error::{Result, WakeError, WakeErrorCode};

// Re-export simulation types
pub use config::FlorisConfig;
pub use farm::Farm;
pub use flow_field::FlowField;
pub use grid::{TurbineField, TurbineGrid};
pub use simulation::Floris;
pub use solver::{SequentialWakeSolver, SolverConfig};
pub use turbine::{PowerThrustTable, Turbine};
pub use wake_velocity::{JensenVelocityDeficit, VelocityDeficit, WakeModel};
