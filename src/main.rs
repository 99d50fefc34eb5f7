use newtonsim::{load_scenario, save_scenario, write_report, bench_step};
use newtonsim::{RunReport, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, Level};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Toy Newtonian n-body simulator")]
struct Args {
    /// Scenario file; bare names are looked up in `scenarios/`
    #[arg(short, default_value = "two_body.yaml")]
    file_name: String,

    /// Run until this time instead of the scenario's t_end
    #[arg(long)]
    until: Option<f64>,

    /// Pace the run on the wall clock (one step per `step` seconds)
    /// `REAL_TIME=1` does the same; 0, false, no and off leave it off
    #[arg(
        long,
        env = "REAL_TIME",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    real_time: bool,

    /// Write trajectories and final clock to this YAML file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Save the final state as a new scenario
    #[arg(long)]
    save_final: Option<PathBuf>,

    /// Replay the trajectories in a 3D window after the run
    #[arg(long)]
    view: bool,

    /// Print step timings for increasing body counts and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    load_scenario(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_step();
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(until) = args.until {
        scenario_cfg.parameters.t_end = until;
    }
    if args.real_time {
        scenario_cfg.parameters.real_time = true;
    }

    let mut scenario = Scenario::build_scenario(&scenario_cfg).context("invalid scenario")?;
    scenario.run().context("simulation failed")?;

    info!("===== END =====");
    scenario.universe.log_state(Level::Info);

    if let Some(path) = &args.output {
        let report = RunReport::from_universe(&scenario.universe)?;
        write_report(path, &report)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        info!("wrote report to {}", path.display());
    }

    if let Some(path) = &args.save_final {
        let snapshot = scenario.snapshot();
        save_scenario(path, &snapshot)
            .with_context(|| format!("failed to save scenario {}", path.display()))?;
        info!("saved final state to {}", path.display());
    }

    if args.view {
        view(&scenario)?;
    }

    Ok(())
}

#[cfg(feature = "vis")]
fn view(scenario: &Scenario) -> Result<()> {
    newtonsim::run_3d(&scenario.universe)?;
    Ok(())
}

#[cfg(not(feature = "vis"))]
fn view(_scenario: &Scenario) -> Result<()> {
    anyhow::bail!("built without the `vis` feature; rebuild with --features vis to use --view")
}
