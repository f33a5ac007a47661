use anyhow::Result;
use clap::Parser;
use tracing::info;

use farm_stats::cli::{self, Cli};
use farm_stats::config::Config;
use farm_stats::logging::init_logging;

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    init_logging(&config.logging)?;

    info!("Starting farm-stats v{}", env!("CARGO_PKG_VERSION"));

    let output = cli::run(&cli, &config)?;
    println!("{output}");

    Ok(())
}
