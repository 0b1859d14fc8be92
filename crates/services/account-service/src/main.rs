//! Account Service - operator CLI.

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use account_service_lib::{
    config::AccountServiceConfig, messages::MessageCatalog, run_migrations, MigrateAction,
};

#[derive(Parser)]
#[command(name = "account-service")]
#[command(about = "Self-service account commands for the auth layer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Print the effective configuration and rendered messages
    CheckConfig,
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AccountServiceConfig::from_env();
    debug!("Configuration loaded");

    match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            run_migrations(&config, migrate_action).await?;
        }
        Commands::CheckConfig => {
            println!("{:#?}", config);
            for (name, message) in MessageCatalog::from_config(&config.strings).entries() {
                println!("{:<22} {}", name, message);
            }
        }
    }

    Ok(())
}

/// Initialize tracing subscriber (verbose mode forces debug level)
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
