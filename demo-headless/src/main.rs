use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use wake_sim_core::config::LoggingConfig;
use wake_sim_core::{Degrees, Floris, FlorisConfig, Meters, MetersPerSecond};

/// Jensen wake demo: solve a farm and print per-turbine results
#[derive(Parser, Debug)]
#[command(name = "wake-sim-demo")]
#[command(about = "Steady-state wind farm wake solver", long_about = None)]
struct Args {
    /// TOML input file; overrides the built-in row layout
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of turbines in the built-in row
    #[arg(short = 'n', long, default_value_t = 3)]
    turbines: usize,

    /// Row spacing in rotor diameters
    #[arg(short, long, default_value_t = 5.0)]
    spacing: f64,

    /// Rotor diameter in meters
    #[arg(long, default_value_t = 126.0)]
    diameter: f64,

    /// Hub height in meters
    #[arg(long, default_value_t = 90.0)]
    hub_height: f64,

    /// Free-stream wind speed at hub height in m/s
    #[arg(short, long, default_value_t = 8.0)]
    wind_speed: f64,

    /// Power-law shear exponent
    #[arg(long, default_value_t = 0.12)]
    wind_shear: f64,

    /// Jensen wake expansion constant
    #[arg(long, default_value_t = 0.05)]
    we: f64,

    /// Yaw angle applied to every turbine, in degrees
    #[arg(long)]
    yaw: Option<f64>,

    /// Wind direction for the IEC waked-sector count, in degrees
    #[arg(long)]
    wind_direction: Option<f64>,
}

fn row_config(args: &Args) -> FlorisConfig {
    let mut config = FlorisConfig::default();
    config.turbine.rotor_diameter = Meters::new(args.diameter);
    config.turbine.hub_height = Meters::new(args.hub_height);
    config.farm.layout_x = (0..args.turbines)
        .map(|i| i as f64 * args.spacing * args.diameter)
        .collect();
    config.farm.layout_y = vec![0.0; args.turbines];
    config.farm.wind_speed = MetersPerSecond::from(args.wind_speed);
    config.farm.wind_shear = args.wind_shear;
    config.wake.parameters.jensen.we = args.we;
    config
}

fn init_logging(logging: &LoggingConfig) {
    if !logging.console.enable {
        return;
    }
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.console.level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match &args.input {
        Some(path) => match FlorisConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => row_config(&args),
    };
    init_logging(&config.logging);

    let mut floris = match Floris::new(config) {
        Ok(floris) => floris,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(yaw) = args.yaw {
        if let Err(e) = floris.set_yaw_angles(&[Degrees::new(yaw)]) {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }

    println!("=== Jensen Wake Demo ===\n");
    println!(
        "{} turbines, U = {}, D = {}, model = {}\n",
        floris.farm.n_turbines(),
        floris.flow_field.wind_speed,
        floris.flow_field.reference_turbine_diameter,
        floris.wake_model()
    );

    floris.go();

    let velocities = floris.turbine_average_velocities();
    let performance = match (
        floris.turbine_thrust_coefficients(),
        floris.turbine_axial_inductions(),
        floris.turbine_powers(),
    ) {
        (Ok(ct), Ok(ai), Ok(power)) => Some((ct, ai, power)),
        _ => {
            warn!("No power_thrust_table in input; reporting velocities only");
            None
        }
    };

    println!(
        "{:>4} {:>10} {:>10} {:>10} {:>8} {:>8} {:>12}",
        "#", "x (m)", "y (m)", "U (m/s)", "Ct", "a", "P (kW)"
    );
    for (i, (coord, u)) in floris.farm.coords().iter().zip(&velocities).enumerate() {
        match &performance {
            Some((ct, ai, power)) => println!(
                "{:>4} {:>10.1} {:>10.1} {:>10.4} {:>8.4} {:>8.4} {:>12.1}",
                i,
                coord.x,
                coord.y,
                u,
                ct[i],
                ai[i],
                power[i].to_kilowatts()
            ),
            None => println!(
                "{:>4} {:>10.1} {:>10.1} {:>10.4} {:>8} {:>8} {:>12}",
                i, coord.x, coord.y, u, "-", "-", "-"
            ),
        }
    }

    if let Some((_, _, power)) = &performance {
        let total: f64 = power.iter().map(|p| p.to_kilowatts()).sum();
        println!("\nFarm power: {total:.1} kW");
    }

    if let Some(wd) = args.wind_direction {
        let counts = floris.farm.number_of_wakes_iec(Degrees::new(wd));
        println!("\nIEC waked-sector count at {wd:.0}°: {counts:?}");
    }

    ExitCode::SUCCESS
}
