// ThreeBody - Headless runner
// Integrates a preset for a fixed span of simulated time and reports energy drift

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;

use threebody::{energy_drift, preset_ids, ParameterUpdate, SimulationEngine};

#[derive(Parser, Debug)]
#[command(about = "Integrate a three-body preset and report energy drift")]
struct Args {
    /// Preset id from the catalog
    #[arg(short, long, default_value = "figure8")]
    preset: String,

    /// Simulated time to integrate
    #[arg(short, long, default_value_t = 10.0)]
    seconds: f64,

    /// Fixed step size (clamped into [0.0001, 0.1])
    #[arg(short, long)]
    time_step: Option<f64>,

    /// Gravitational constant
    #[arg(short, long)]
    gravity: Option<f64>,

    /// Write the final snapshot as JSON
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// List preset ids and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.list {
        for id in preset_ids() {
            println!("{}", id);
        }
        return Ok(());
    }

    let mut engine = SimulationEngine::new();
    engine.set_parameters(ParameterUpdate {
        time_step: args.time_step,
        gravitational_constant: args.gravity,
        max_steps_per_frame: None,
    });
    engine
        .load_preset(&args.preset)
        .with_context(|| format!("loading preset {}", args.preset))?;

    let initial = engine.get_state().energy;
    let steps = (args.seconds / engine.time_step()).ceil() as usize;
    let report_every = (steps / 10).max(1);
    info!(
        "running {} for {} steps of {}",
        args.preset,
        steps,
        engine.time_step()
    );

    engine.start();
    for i in 1..=steps {
        engine.step().context("integration step failed")?;
        if i % report_every == 0 {
            let state = engine.get_state();
            info!(
                "t = {:8.3}  E = {:+.9}  drift = {:.3e}",
                state.time,
                state.energy.total,
                energy_drift(&initial, &state.energy)
            );
        }
    }

    if let Some(path) = args.export {
        let json = engine.export_json()?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        info!("snapshot written to {}", path.display());
    }

    Ok(())
}
