//! Farm-wide wake solver
//!
//! The solver composes single-turbine deficits into a velocity field for the
//! whole farm. The deficit itself comes from any [`VelocityDeficit`] model.
//!
//! # Example
//!
//! ```rust
//! use wake_sim_core::config::TurbineConfig;
//! use wake_sim_core::core_types::{KgPerCubicMeter, Meters, MetersPerSecond};
//! use wake_sim_core::solver::{SequentialWakeSolver, SolverConfig};
//! use wake_sim_core::wake_velocity::JensenVelocityDeficit;
//! use wake_sim_core::{Farm, FlowField, Turbine};
//!
//! let turbine = Turbine::new(&TurbineConfig::default()).unwrap();
//! let farm = Farm::new(&[0.0, 630.0], &[0.0, 0.0], &turbine).unwrap();
//! let mut flow_field = FlowField::new(
//!     MetersPerSecond::new(8.0),
//!     0.0,
//!     KgPerCubicMeter::STANDARD_AIR,
//!     Meters::new(90.0),
//!     Meters::new(126.0),
//! );
//!
//! let solver = SequentialWakeSolver::new(SolverConfig::default()).unwrap();
//! solver.solve(&farm, &mut flow_field, &JensenVelocityDeficit::default());
//! assert!(flow_field.u.turbine(1)[12] < 8.0);
//! ```
//!
//! [`VelocityDeficit`]: crate::wake_velocity::VelocityDeficit

mod params;
mod sequential;

pub use params::{SolverConfig, DEFAULT_AXIAL_INDUCTION, DEFAULT_GRID_RESOLUTION};
pub use sequential::SequentialWakeSolver;
