use balloons::{ScenarioConfig, Scenario};
use balloons::bench_step;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Headless balloons and static electricity simulation")]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, long, default_value = "default.yaml")]
    file_name: String,

    /// Logging verbosity: trace, debug, info, warn or error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Run the step benchmark instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let scenario_cfg = ScenarioConfig::from_yaml_file(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if args.bench {
        bench_step();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;
    info!(file = %args.file_name, steps = scenario.engine.steps, "running scenario");

    let summary = scenario.run();
    for (i, name) in ["yellow", "green"].iter().enumerate() {
        println!(
            "{name:>6}: charge {:3}, position ({:7.2}, {:7.2}){}",
            summary.charges[i],
            summary.positions[i].x,
            summary.positions[i].y,
            if summary.stuck_to_wall[i] { ", stuck to wall" } else { "" },
        );
    }
    println!("sweater: charge {:+}", summary.sweater_charge);

    Ok(())
}
