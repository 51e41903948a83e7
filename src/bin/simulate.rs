use std::env;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use roadster::sensors::WheelSpeeds;
use roadster::utils::SimError;
use roadster::{Input, SimulationConfig, Simulator, State, VehicleModel};

/// One line of output per tick.
#[derive(Serialize)]
struct Record<'a> {
    time: f64,
    state: &'a State,
    observed: State,
    input: &'a Input,
    wheel_speeds: WheelSpeeds,
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();
}

fn run(path: &str) -> Result<(), SimError> {
    let config = SimulationConfig::from_file(path)?;
    let mut sim = Simulator::from_config(&config)?;
    let steps = config.steps();
    info!(steps, dt = config.timestep, "Running scenario {}", config.name);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for _ in 0..steps {
        let (longitudinal, delta) = config.command_at(sim.time());
        sim.set_command(longitudinal, delta);
        sim.tick(config.timestep)?;

        let observed = sim.observe();
        let record = Record {
            time: sim.time(),
            state: sim.state(),
            observed,
            input: sim.input(),
            wheel_speeds: sim.wheel_speeds(),
        };
        serde_json::to_writer(&mut out, &record)?;
        writeln!(out)?;
    }
    out.flush()?;

    let diagnostics = sim.vehicle().services().diagnostics();
    info!(
        clamped = diagnostics.inputs_clamped,
        repaired = diagnostics.values_repaired,
        "Scenario finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    setup_logging();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: roadster_sim <simulation.yaml>");
        return ExitCode::FAILURE;
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
