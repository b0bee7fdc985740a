use gravsim::{Scenario, ScenarioConfig};
use gravsim::{advance, angular_momentum, total_energy, total_momentum};
use gravsim::run_2d;
use gravsim::{bench_derivatives, bench_rk4_curve};

use clap::Parser;
use anyhow::{bail, Context, Result};
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Fixed-step RK4 N-body gravity simulator")]
struct Args {
    /// Built-in preset: figure-eight, pythagorean, binary or scatter
    #[arg(short, long, default_value = "figure-eight")]
    preset: String,

    /// YAML scenario file (overrides the preset); bare names resolve
    /// under scenarios/
    #[arg(short, long)]
    file: Option<String>,

    /// Run without a window and report energy drift
    #[arg(long)]
    headless: bool,

    /// Headless step count (default: run to t_end)
    #[arg(long)]
    steps: Option<usize>,

    /// Run the timing benchmarks and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let mut config_path = PathBuf::from(file_name);
    if config_path.is_relative() && !config_path.exists() {
        config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    }

    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario file {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing scenario file {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn build_scenario(args: &Args) -> Result<Scenario> {
    if let Some(file) = &args.file {
        let cfg = load_scenario_from_yaml(file)?;
        let scenario = Scenario::from_config(cfg)?;
        info!("loaded scenario from {} ({} bodies)", file, scenario.system.bodies.len());
        return Ok(scenario);
    }

    let scenario = match args.preset.as_str() {
        "figure-eight" => Scenario::figure_eight(),
        "pythagorean" => Scenario::pythagorean(),
        "binary" => Scenario::binary(),
        "scatter" => Scenario::random_scatter(24, 42),
        other => bail!("unknown preset '{other}' (expected figure-eight, pythagorean, binary or scatter)"),
    };
    info!("preset '{}' with {} bodies", args.preset, scenario.system.bodies.len());
    Ok(scenario)
}

/// Step to t_end (or `steps` if given) without a window, logging the
/// energy drift along the way
fn run_headless(mut scenario: Scenario, steps: Option<usize>) {
    let Scenario {
        system,
        parameters,
        forces,
    } = &mut scenario;

    let total_steps = steps.unwrap_or_else(|| (parameters.t_end / parameters.h0).ceil() as usize);
    let e0 = total_energy(system, parameters);
    info!("headless: {} steps of h0 = {}, E0 = {:.6}", total_steps, parameters.h0, e0);

    // Report roughly ten times over the run
    let chunk = (total_steps / 10).max(1);
    let mut done = 0;
    while done < total_steps {
        let n = chunk.min(total_steps - done);
        advance(system, forces, parameters, n);
        done += n;
        let e = total_energy(system, parameters);
        info!("t = {:8.3}  E = {:12.6}  |dE/E0| = {:.3e}", system.t, e, rel_drift(e0, e));
    }

    let e1 = total_energy(system, parameters);
    let p = total_momentum(system);
    println!("steps: {total_steps}");
    println!("t: {:.6}", system.t);
    println!("energy: initial {:.9}, final {:.9}", e0, e1);
    println!("relative drift: {:.3e}", rel_drift(e0, e1));
    println!("momentum: ({:.3e}, {:.3e})", p.x, p.y);
    println!("angular momentum: {:.6}", angular_momentum(system));
}

fn rel_drift(e0: f64, e1: f64) -> f64 {
    if e0 != 0.0 {
        (e1 - e0).abs() / e0.abs()
    } else {
        (e1 - e0).abs()
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    if args.bench {
        bench_derivatives();
        bench_rk4_curve();
        return Ok(());
    }

    let scenario = build_scenario(&args)?;

    if args.headless {
        run_headless(scenario, args.steps);
    } else {
        run_2d(scenario);
    }

    Ok(())
}
