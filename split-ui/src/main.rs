use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tokio::io::{self, BufReader};
use tracing::{debug, info};

use split_lookup_http::HttpTaxLookup;
use split_ui::{AppConfig, Session, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Bill-splitting calculator.
///
/// Add item costs, set or look up the sales tax for a city, pick a tip, and
/// get the total you owe.
#[derive(Debug, Parser)]
#[command(name = "MySplit", version)]
struct Cli {
    /// Configuration file. Defaults to `mysplit.toml` when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sales-tax lookup endpoint (overrides the config file).
    #[arg(long)]
    endpoint: Option<String>,

    /// Lookup timeout in seconds (overrides the config file).
    #[arg(long)]
    timeout: Option<u64>,

    /// Log level or filter directive (overrides the config file).
    #[arg(long)]
    log_level: Option<String>,

    /// Append log records to this file (overrides the config file).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not echo log records to the terminal.
    #[arg(long, short)]
    quiet: bool,
}

impl Cli {
    fn apply_overrides(
        self,
        mut config: AppConfig,
    ) -> AppConfig {
        if let Some(endpoint) = self.endpoint {
            config.lookup.endpoint = endpoint;
        }
        if let Some(timeout) = self.timeout {
            config.lookup.timeout_secs = Some(timeout);
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(file) = self.log_file {
            config.logging.file = Some(file);
        }
        if self.quiet {
            config.logging.console = false;
        }
        config
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    let config = cli.apply_overrides(config);

    logging::init_logging(&config.logging.level, config.logging.console);
    if let Some(path) = &config.logging.file {
        logging::enable_file_logging(path)?;
    }

    debug!(endpoint = %config.lookup.endpoint, "building sales tax lookup");
    let lookup = HttpTaxLookup::from_config(&config.lookup)
        .context("failed to set up sales tax lookup")?;

    info!("starting MySplit");
    let session = Session::new(config.tips.presets.clone());
    split_ui::run(
        session,
        Arc::new(lookup),
        BufReader::new(io::stdin()),
        io::stdout(),
    )
    .await?;

    Ok(())
}
