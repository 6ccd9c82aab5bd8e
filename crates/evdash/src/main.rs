//! Main entry point for evdash.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use evdash::{Args, DashboardApp};
use evdash_common::init_logging;
use evdash_config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    args.apply_overrides(&mut config);

    let logging = config
        .logging
        .to_logging_config()
        .context("invalid logging configuration")?;
    init_logging(&logging).context("failed to initialize logging")?;

    info!(data = %config.data.path.display(), "Starting EV dashboard aggregation");

    let filter = args.filter();
    let app = DashboardApp::new(config);
    if let Err(e) = app.run_json(&filter, args.pretty).await {
        error!("Dashboard run failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
