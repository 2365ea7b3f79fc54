//! Steward CLI binary.
//!
//! - Serve the HTTP API and Discord bot
//! - Provision a server from a stored or local configuration
//! - Validate and list configurations

use clap::Parser;
use steward::cli::{
    Cli, Commands, handle_provision, handle_serve, list_configurations, validate_file,
};
use steward::{App, Settings, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before settings so STEWARD_* and token variables apply
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::load(cli.settings.as_deref())?;
    init_tracing(&settings.logging, cli.verbose)?;

    match cli.command {
        Commands::Serve => {
            let app = App::open(&settings).await?;
            handle_serve(&settings, &app).await?;
        }

        Commands::Provision(args) => {
            let app = App::open(&settings).await?;
            handle_provision(&settings, &app, &args).await?;
        }

        Commands::Validate { file } => {
            validate_file(&file)?;
        }

        Commands::Configs => {
            let app = App::open(&settings).await?;
            list_configurations(&app).await?;
        }
    }

    Ok(())
}
