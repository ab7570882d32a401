//! `promo-code-factory` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — run migrations, then start the API server.
//! - `migrate` — run pending database migrations and exit.

use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::AppState;
use db::PgStore;
use domain::SystemClock;

#[derive(Parser)]
#[command(
    name = "promo-code-factory",
    about = "Employees, customers, promo codes and partner limits over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct DatabaseArgs {
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    max_connections: u32,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
        bind: String,

        #[command(flatten)]
        database: DatabaseArgs,
    },
    /// Run pending database migrations.
    Migrate {
        #[command(flatten)]
        database: DatabaseArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, database } => {
            let pool = db::pool::create_pool(&database.database_url, database.max_connections)
                .await
                .context("failed to connect to database")?;
            db::pool::run_migrations(&pool).await.context("migration failed")?;

            let state = AppState::from_store(Arc::new(PgStore::new(pool)), Arc::new(SystemClock));
            info!("Starting API server on {bind}");
            api::serve(&bind, state).await.context("API server failed")?;
        }
        Command::Migrate { database } => {
            let pool = db::pool::create_pool(&database.database_url, database.max_connections.min(2))
                .await
                .context("failed to connect to database")?;
            db::pool::run_migrations(&pool).await.context("migration failed")?;
            info!("Migrations applied successfully");
        }
    }

    Ok(())
}
