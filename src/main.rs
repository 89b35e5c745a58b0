use anyhow::Context;
use axum::Router;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use events_server::config::{Config, StorageKind};
use events_server::routes::{create_routes, AppState};
use events_server::storage::{EventStore, PgEventStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("events_server=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env();

    let store = match config.storage {
        StorageKind::Postgres => {
            let db = PgEventStore::connect(&config.database_url, config.max_connections)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Successfully connected to database");

            db.migrate().await.context("Failed to run migrations")?;
            tracing::info!("Migrations run successfully");

            EventStore::from(db)
        }
        StorageKind::Memory => {
            tracing::warn!("Using in-memory storage; events are lost on restart");
            EventStore::in_memory()
        }
    };

    let app: Router = create_routes(AppState::new(store), &config.api_prefix);

    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("🚀 Server running at http://{}", addr);

    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
