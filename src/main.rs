mod scenario;

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use car_sim::simulation::{Vehicle, VehicleConfig, Vec2};
use scenario::{Scenario, ScriptedDriver};

#[derive(Parser)]
#[command(name = "car_sim")]
#[command(about = "Headless planar car dynamics simulation")]
struct Cli {
    /// Number of simulation ticks to run
    #[arg(long, default_value = "600")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    delta: f32,

    /// Scripted driver to run
    #[arg(long, value_enum, default_value = "corner")]
    scenario: Scenario,

    /// Seed for the random driver
    #[arg(long, default_value = "42")]
    seed: u64,

    /// TOML file overriding the default vehicle configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Let the driver change gears by engine speed
    #[arg(long)]
    auto_shift: bool,

    /// Shift up above this engine speed when auto-shifting
    #[arg(long, default_value = "5500")]
    shift_up_rpm: f32,

    /// Shift down below this engine speed when auto-shifting
    #[arg(long, default_value = "2500")]
    shift_down_rpm: f32,

    /// Log a summary every N ticks
    #[arg(long, default_value = "60")]
    report_every: u32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn,car_sim=info"))
        .init();

    let cli = Cli::parse();
    run_headless(&cli)
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => VehicleConfig::load_from_file(path)?,
        None => VehicleConfig::default(),
    };

    info!("Running car simulation in headless mode...");
    info!(
        "Scenario: {:?}, Ticks: {}, Delta: {}s",
        cli.scenario, cli.ticks, cli.delta
    );

    let mut vehicle = Vehicle::new_at(config, Vec2::new(10.0, 10.0))?;
    let mut driver = ScriptedDriver::new(cli.scenario, cli.seed);

    for tick in 1..=cli.ticks {
        let inputs = driver.inputs(vehicle.state().time);
        vehicle.advance(cli.delta, inputs);

        if cli.auto_shift {
            auto_shift(&mut vehicle, cli.shift_up_rpm, cli.shift_down_rpm);
        }

        if cli.report_every > 0 && tick % cli.report_every == 0 {
            info!("--- After tick {} ---", tick);
            info!("{}", vehicle.summary());
        }
    }

    info!("=== SIMULATION COMPLETE ===");
    for line in vehicle.hud_lines() {
        info!("{}", line);
    }
    info!(
        "Final position: ({:.2}, {:.2})",
        vehicle.state().position.x,
        vehicle.state().position.y
    );
    info!("Tire track points: {}", vehicle.tire_tracks().len());

    Ok(())
}

/// Simple rpm-window gearbox policy
fn auto_shift(vehicle: &mut Vehicle, shift_up_rpm: f32, shift_down_rpm: f32) {
    let rpm = vehicle.engine_rpm();
    if rpm > shift_up_rpm {
        vehicle.shift_up();
    } else if rpm < shift_down_rpm {
        vehicle.shift_down();
    }
}
