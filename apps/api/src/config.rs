use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if a selected backend is missing its variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub storage: StorageBackend,
}

/// Which Persistence Gateway implementation to run behind the trait.
/// All four satisfy the same contract; the choice is wiring, not semantics.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Volatile in-process map. The default, and what tests use.
    Memory,
    /// One JSON document per owner under `RESUME_DATA_DIR`.
    File { dir: PathBuf },
    /// PostgreSQL via `DATABASE_URL`.
    Postgres { database_url: String },
    /// Another instance of this service (or any implementor of the wire
    /// contract) at `REMOTE_STORE_URL`.
    Remote { base_url: String },
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let kind = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "memory".to_string());
        let storage = match kind.as_str() {
            "memory" => StorageBackend::Memory,
            "file" => StorageBackend::File {
                dir: PathBuf::from(require_env("RESUME_DATA_DIR")?),
            },
            "postgres" => StorageBackend::Postgres {
                database_url: require_env("DATABASE_URL")?,
            },
            "remote" => StorageBackend::Remote {
                base_url: require_env("REMOTE_STORE_URL")?,
            },
            other => bail!("Unknown STORAGE_BACKEND '{other}' (expected memory|file|postgres|remote)"),
        };

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            storage,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
