//! Jensen Wake Regression Suite
//!
//! Three turbines in tandem at five-diameter spacing under a sheared inflow.
//! The unwaked and first waked rotor-averaged velocities reproduce the
//! published FLORIS Jensen baseline; the third follows from chaining the fixed
//! axial induction through both upstream wakes.
//!
//! # Scenario
//! - NREL 5 MW geometry: D = 126 m, hub height 90 m
//! - U = 8 m/s at hub height, shear exponent 0.12
//! - `we` = 0.05, a = 0.25790121826746754, 5x5 rotor grid

use approx::assert_relative_eq;
use ctor::ctor;
use tracing_subscriber::EnvFilter;
use wake_sim_core::Floris;

#[ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const TANDEM_INPUT: &str = r#"
[turbine]
rotor_diameter = 126.0
hub_height = 90.0

[farm]
layout_x = [0.0, 630.0, 1260.0]
layout_y = [0.0, 0.0, 0.0]
wind_speed = 8.0
wind_shear = 0.12
air_density = 1.225

[wake]
velocity_model = "jensen"

[wake.parameters.jensen]
we = 0.05
"#;

/// Rotor-averaged velocity per turbine (m/s)
const BASELINE: [f64; 3] = [7.9803783, 6.1509123, 4.7408431];

#[test]
fn test_regression_tandem() {
    let mut floris = Floris::from_toml_str(TANDEM_INPUT).unwrap();
    floris.go();

    let velocities = floris.turbine_average_velocities();
    assert_eq!(velocities.len(), 3);
    for (actual, expected) in velocities.iter().zip(BASELINE) {
        assert_relative_eq!(*actual, expected, epsilon = 1e-6);
    }
}

#[test]
fn test_repeated_solve_is_stable() {
    // go() starts from ambient every time, so wakes do not accumulate
    let mut floris = Floris::from_toml_str(TANDEM_INPUT).unwrap();
    floris.go();
    let first = floris.turbine_average_velocities();
    floris.go();
    assert_eq!(first, floris.turbine_average_velocities());
}

#[test]
fn test_lateral_offset_not_masked() {
    // Cone bounds follow the downstream rotor, so a lateral offset alone does
    // not take a turbine out of the wake
    let input = TANDEM_INPUT.replace("layout_y = [0.0, 0.0, 0.0]", "layout_y = [0.0, 500.0, 0.0]");
    let mut floris = Floris::from_toml_str(&input).unwrap();
    floris.go();

    let velocities = floris.turbine_average_velocities();
    assert_relative_eq!(velocities[1], BASELINE[1], epsilon = 1e-6);
}

#[test]
fn test_iec_wake_count_matches_row() {
    let floris = Floris::from_toml_str(TANDEM_INPUT).unwrap();
    let counts = floris
        .farm
        .number_of_wakes_iec(wake_sim_core::Degrees::new(270.0));
    assert_eq!(counts, vec![0, 1, 2]);
}
