//! sachet-cache - cache Sachet disaster alerts as GeoJSON
//!
//! Fetches the current alerts for Goa once, writes them to
//! `data/goa-sachet-alerts.geojson` and exits. Exit code 1 on any failure.

use std::process::ExitCode;

use clap::Parser;

use sachet_cache::cli::Cli;
use sachet_cache::logging;
use sachet_cache::pipeline;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Cli::parse().into_config();
    logging::init_console();

    match pipeline::run(&config).await {
        Ok(summary) => {
            tracing::info!(
                count = summary.count,
                path = %summary.path.display(),
                "Completed all operations successfully"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error in main execution: {}", e.chain().join(": "));
            ExitCode::FAILURE
        }
    }
}
