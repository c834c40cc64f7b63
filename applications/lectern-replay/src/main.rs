/// Lectern Replay - scripted audio player scenarios
use clap::Parser;
use lectern_replay::{AppConfig, Replay, Scenario};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lectern-replay")]
#[command(about = "Replay a scripted book audio player scenario", long_about = None)]
struct Cli {
    /// Scenario file (JSON)
    scenario: PathBuf,

    /// Configuration file path
    #[arg(short, long, env = "LECTERN_CONFIG")]
    config: Option<PathBuf>,

    /// Print the simulated element's command log after the run
    #[arg(long)]
    trace_primitive: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries one JSON report per step
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lectern_replay=info,lectern_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let scenario = Scenario::from_file(&cli.scenario)?;
    let mut replay = Replay::new(&config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for report in replay.run(&scenario) {
        serde_json::to_writer(&mut out, &report)?;
        writeln!(out)?;
    }

    if cli.trace_primitive {
        for command in replay.media_log() {
            serde_json::to_writer(&mut out, command)?;
            writeln!(out)?;
        }
    }

    tracing::info!("Scenario complete");
    Ok(())
}
