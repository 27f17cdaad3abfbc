//! Rapport CLI entry point.

use clap::Parser;

use rapport::cli::{self, Cli};
use rapport::infrastructure::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli::load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err:#}");
            std::process::exit(1);
        }
    };

    if let Err(err) = logging::init(&config.logging) {
        eprintln!("logging error: {err:#}");
        std::process::exit(1);
    }

    if let Err(err) = cli::execute(cli, config).await {
        tracing::error!(error = %format!("{err:#}"), "command failed");
        std::process::exit(1);
    }
}
