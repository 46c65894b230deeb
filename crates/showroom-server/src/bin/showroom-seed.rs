//! Seed the catalog from a directory of car JSON documents

use anyhow::{Context, Result};
use clap::Parser;
use showroom_common::logging::{init_logging, LogConfig, LogLevel};
use std::path::PathBuf;
use tracing::info;

use showroom_server::{
    config::{DatabaseConfig, DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS},
    db::{self, Store},
    seed,
};

#[derive(Parser, Debug)]
#[command(name = "showroom-seed")]
#[command(author, version, about = "Import car documents into the showroom catalog")]
struct Cli {
    /// Directory containing one car document per *.json file
    #[arg(short, long, default_value = "./json")]
    dir: PathBuf,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose { LogLevel::Debug } else { LogLevel::Info };
    let log_config = LogConfig::builder()
        .level(level)
        .log_file_prefix("showroom-seed")
        .filter_directives("showroom_server=debug,sqlx=warn")
        .build();
    init_logging(&log_config)?;

    let database = DatabaseConfig {
        url: Some(cli.database_url.clone()),
        max_connections: 1,
        connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
    };

    let pool = db::connect_postgres(&database, &cli.database_url)
        .await
        .context("Failed to connect to the database")?;
    info!("Connected to the database");

    let store = Store::postgres(pool);
    let outcome = seed::seed_directory(store.cars.as_ref(), &cli.dir).await;
    store.close().await;

    let summary = outcome.with_context(|| format!("Failed to read {}", cli.dir.display()))?;
    if summary.failed > 0 {
        tracing::warn!("{} of {} files could not be imported", summary.failed, summary.found);
    }

    Ok(())
}
