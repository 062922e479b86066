//! ClipGen CLI
//!
//! Splits a video into consecutive fixed-length clips.
//!
//! # Usage
//!
//! ```bash
//! clipgen split --url "https://www.youtube.com/watch?v=..." --output-dir clips
//! clipgen split --input talk.mp4 --output-dir clips -d 5 --format mp4
//! clipgen probe --input talk.mp4 -d 10
//! clipgen fetch --url "https://www.youtube.com/watch?v=..." --output-dir downloads
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use clipgen_cli::app::container::DefaultAppContainer;
use clipgen_cli::cli::{commands, Cli, Commands};
use clipgen_cli::config_initialization::initialize_configuration_hierarchy;
use clipgen_cli::utils::logging::init_tracing;

/// Main entry point for the ClipGen CLI application
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = initialize_configuration_hierarchy(&cli).await?;
    init_tracing(settings.log_level, cli.json_logs)?;

    info!("Starting ClipGen v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &settings.config_file {
        debug!("Loaded configuration from {}", path.display());
    }

    let container = DefaultAppContainer::new(&settings);

    match cli.command {
        Commands::Split(args) => commands::split(&container, &settings, args).await?,
        Commands::Fetch(args) => commands::fetch(&container, args).await?,
        Commands::Probe(args) => commands::probe(&container, args).await?,
    }

    info!("ClipGen completed successfully");
    Ok(())
}
