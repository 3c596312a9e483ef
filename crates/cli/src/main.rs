//! Solves a Specific Factors scenario and prints its comparative statics.
//!
//! Usage: `sfm [--scenario FILE] [--format text|json] [--log-level LEVEL]`

mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sfm_model::Scenario;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sfm")]
#[command(about = "Solve a two-country Specific Factors model and compare shocked equilibria")]
struct Cli {
    /// Scenario TOML file (defaults to the built-in reference economy)
    #[arg(long, short)]
    scenario: Option<PathBuf>,

    /// Report format
    #[arg(long, short, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("could not load scenario {}", path.display()))?,
        None => Scenario::reference().context("built-in reference scenario is invalid")?,
    };
    info!(shocks = scenario.shocks.len(), "running scenario");

    let report = scenario.run().context("could not solve the baseline equilibrium")?;

    let output = match cli.format {
        Format::Text => report::text(&report),
        Format::Json => report::json(&report).context("could not serialize the report")?,
    };
    println!("{output}");

    Ok(())
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`, or by
/// `default_filter` when the variable is unset.
fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
