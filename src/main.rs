use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use petclinic_owners::config;
use petclinic_owners::database::{DatabaseManager, MemoryOwnerStore, OwnerStore, PgOwnerStore};
use petclinic_owners::{app, AppState};

#[derive(Parser, Debug)]
#[command(name = "petclinic-owners", version, about = "Owner directory API server")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PETCLINIC_PORT", default_value_t = 8080)]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// Keep records in process memory instead of Postgres
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and friends
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("petclinic_owners=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let config = config::config();
    tracing::info!("Starting Petclinic Owners API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        tracing::warn!("SECURITY_JWT_SECRET is not set; every bearer token will be rejected");
    }

    let (store, database): (Arc<dyn OwnerStore>, Option<DatabaseManager>) = if args.memory {
        tracing::info!("Using in-memory owner store");
        (Arc::new(MemoryOwnerStore::new()), None)
    } else {
        let database = DatabaseManager::connect(&config.database)
            .await
            .context("failed to open database pool")?;
        (Arc::new(PgOwnerStore::new(database.pool())), Some(database))
    };

    let app = app(config, AppState::new(config, store));

    let bind_addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", args.bind, args.port))?;
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Petclinic Owners API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(database) = database {
        database.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
