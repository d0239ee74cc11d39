// SPDX-License-Identifier: AGPL-3.0-or-later
//! Zettelkasten cards server and CLI
//!
//! Serves the card generator page and its storage API, and manages the
//! stored files from the command line.

mod api;
mod app;
mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zk_core::ZkResult;

use crate::app::App;
use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "zkcards")]
#[command(author, version, about = "Zettelkasten card generator backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on, overrides the configuration
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// List stored files
    Ls {
        /// Long format with details
        #[arg(short, long)]
        long: bool,

        /// Human-readable sizes
        #[arg(short = 'H', long)]
        human: bool,
    },

    /// Move files to the trash
    Rm {
        /// File id(s)
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show usage statistics
    Stats,

    /// Trash files older than the retention period
    Clean,

    /// Store a JSON file as a data export
    Export {
        /// JSON file to store
        path: PathBuf,
    },

    /// Print a stored data export
    Import {
        /// File id of the export
        id: String,
    },

    /// Show or reset user settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,

        /// User the settings belong to, defaults to the configured user
        #[arg(short, long, global = true)]
        user: Option<String>,
    },

    /// Generate a card identifier
    CardId,

    /// Show storage and converter information
    Info,
}

#[derive(Subcommand)]
enum SettingsAction {
    Show,
    Reset,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> ZkResult<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let app = App::open(config).await?;

    match cli.command {
        Commands::Serve { bind } => commands::serve(&app, bind.as_deref()).await,
        Commands::Ls { long, human } => commands::ls(&app, long, human, cli.verbose).await,
        Commands::Rm { ids } => commands::rm(&app, &ids, cli.verbose).await,
        Commands::Stats => commands::stats(&app).await,
        Commands::Clean => commands::clean(&app).await,
        Commands::Export { path } => commands::export(&app, &path).await,
        Commands::Import { id } => commands::import(&app, &id).await,
        Commands::Settings { action, user } => {
            let user = user.unwrap_or_else(|| app.config.server.default_user.clone());
            match action {
                SettingsAction::Show => commands::settings_show(&app, &user).await,
                SettingsAction::Reset => commands::settings_reset(&app, &user).await,
            }
        }
        Commands::CardId => commands::card_id(&app),
        Commands::Info => commands::info(&app).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
