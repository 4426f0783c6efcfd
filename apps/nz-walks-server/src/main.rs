mod config;
mod logging;
mod signals;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use nz_walks::NzWalks;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::{AppConfig, CliOverrides, DatabaseConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// NZ Walks Server - regions, walks and trail images over REST
#[derive(Parser)]
#[command(name = "nz-walks-server")]
#[command(about = "NZ Walks Server - regions, walks and trail images over REST")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config
        && !path.is_file()
    {
        bail!("config file does not exist: {}", path.display());
    }

    // defaults -> YAML (if provided) -> env (NZ_WALKS__*) -> CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(&CliOverrides {
        port: cli.port,
        verbose: cli.verbose,
        mock: cli.mock,
    });

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    logging::init_logging(&config.logging)?;
    tracing::info!("NZ Walks Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    nz_walks::api::rest::auth::AuthState::from_config(&config.module.auth)?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(config.dsn.clone());
    opts.max_connections(config.max_connections)
        .sqlx_logging(false);
    if config.is_in_memory() {
        opts.max_connections(1).min_connections(1);
    }
    Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to database '{}'", config.dsn))
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing module...");

    let db = connect(&config.database).await?;
    let module = NzWalks::init(db, &config.module).await?;
    let router = module.router(&config.server.rest_options());

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(signals::shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("NZ Walks Server stopped");
    Ok(())
}
