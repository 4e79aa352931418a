//! Run the synthetic stream through the scorer and write every step as CSV
//!
//! ```text
//! dema-stream [CONFIG] [OUTPUT]
//! ```
//!
//! CONFIG defaults to `config.json`; OUTPUT defaults to stdout. Logs go to
//! stderr and honour `RUST_LOG` (default `info`).

use anyhow::Context;
use clap::Parser;
use dema_stream::{CsvSink, RngSource, RunSummary, StepSink, StreamConfig, StreamPipeline};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dema-stream")]
#[command(about = "Score a synthetic stream for anomalies and write each step as CSV", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(default_value = "config.json")]
    config: PathBuf,

    /// CSV output file (stdout when omitted)
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(&cli)?;
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let config = StreamConfig::from_path(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    let source = match config.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };
    let mut pipeline =
        StreamPipeline::from_config(&config, source).context("building pipeline")?;

    let mut sink: Box<dyn StepSink> = match &cli.output {
        Some(path) => Box::new(
            CsvSink::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(CsvSink::new(std::io::stdout().lock())),
    };

    pipeline.run(sink.as_mut()).context("streaming")
}
