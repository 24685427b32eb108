//! MIP - Multi-source integration pipeline entry point

use anyhow::Result;
use clap::Parser;
use mip_common::logging::{init_logging, LogConfig, LogLevel};
use mip_pipeline::{config::Config, Pipeline};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mip")]
#[command(author, version, about = "Multi-source integration pipeline")]
struct Cli {
    /// Path to the customer CSV file (overrides CUSTOMERS_FILE)
    #[arg(long)]
    customers_file: Option<PathBuf>,

    /// Base URL of the product API (overrides API_BASE_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence over CLI-derived defaults
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("mip".to_string())
        .build()
        .apply_env()?;

    init_logging(&log_config)?;

    let mut config = Config::load()?;
    if let Some(path) = cli.customers_file {
        config.customers_file = path;
    }
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    let report = Pipeline::new(config).run().await;

    if !report.success {
        std::process::exit(1);
    }

    info!("Pipeline finished in {:.2}s", report.duration.as_secs_f64());
    Ok(())
}
