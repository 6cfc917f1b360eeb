//! Onboarding API - HTTP server and database tooling.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_lib::config::GatewayConfig;
use onboarding_service_lib::MigrateAction as Migration;

#[derive(Parser)]
#[command(name = "onboarding")]
#[command(about = "Multi-step user onboarding API")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (applies pending migrations first)
    Serve {
        #[arg(long, env = "SERVER_HOST")]
        host: Option<String>,
        #[arg(long, env = "SERVER_PORT")]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

impl From<MigrateAction> for Migration {
    fn from(action: MigrateAction) -> Self {
        match action {
            MigrateAction::Up => Migration::Up,
            MigrateAction::Down => Migration::Down,
            MigrateAction::Status => Migration::Status,
            MigrateAction::Fresh => Migration::Fresh,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,tower_http=debug".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env();

    match cli.command {
        Commands::Serve { host, port } => {
            gateway_lib::run_server(config.with_bind(host, port)).await?;
        }
        Commands::Migrate { action } => {
            onboarding_service_lib::run_migrations(&config.database, action.into()).await?;
        }
    }

    Ok(())
}
