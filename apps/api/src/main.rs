mod auth;
mod autosave;
mod config;
mod db;
mod editor;
mod errors;
mod export;
mod models;
mod preview;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::{AuthService, MemoryUserDirectory};
use crate::config::{Config, StorageBackend};
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::file::FileResumeStore;
use crate::store::memory::MemoryResumeStore;
use crate::store::postgres::PostgresResumeStore;
use crate::store::remote::RemoteResumeStore;
use crate::store::ResumeStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Select the persistence gateway backend
    let store = build_store(&config).await?;

    // Credential directory for the auth collaborator
    let auth = AuthService::new(Arc::new(MemoryUserDirectory::new()));

    let state = AppState {
        store,
        auth,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs whichever resume-store backend configuration selected. The
/// rest of the service only ever sees the trait object.
async fn build_store(config: &Config) -> Result<Arc<dyn ResumeStore>> {
    Ok(match &config.storage {
        StorageBackend::Memory => {
            info!("Resume store: in-memory (volatile)");
            Arc::new(MemoryResumeStore::new())
        }
        StorageBackend::File { dir } => {
            info!("Resume store: file-backed at {}", dir.display());
            Arc::new(FileResumeStore::new(dir.clone()))
        }
        StorageBackend::Postgres { database_url } => {
            let pool = create_pool(database_url).await?;
            info!("Resume store: PostgreSQL");
            Arc::new(PostgresResumeStore::new(pool))
        }
        StorageBackend::Remote { base_url } => {
            info!("Resume store: remote at {base_url}");
            Arc::new(RemoteResumeStore::new(base_url.clone())?)
        }
    })
}
