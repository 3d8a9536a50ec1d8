//! Users service
//!
//! A small HTTP service managing user accounts:
//! - Creation with payload validation and unique username/email
//! - Lookup by ID, where malformed and unknown IDs are both "not found"
//! - Listing and liveness/readiness probes
//! - PostgreSQL or in-memory storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::storage::{self, PostgresConfig, StorageType};
use infrastructure::user::{InMemoryUserRepository, PostgresUserRepository, UserService};
use tracing::info;

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let backend = StorageType::from_str(&config.storage.backend).ok_or_else(|| {
        anyhow::anyhow!("Unknown storage backend '{}'", config.storage.backend)
    })?;

    info!(backend = %backend, "Storage backend selected");

    match backend {
        StorageType::Postgres => {
            let pool = storage::connect(&PostgresConfig::from(&config.database)).await?;

            if config.database.run_migrations {
                info!("Running database migrations...");
                storage::run_migrations(&pool).await?;
            }

            let repository = Arc::new(PostgresUserRepository::new(pool));
            Ok(AppState::new(Arc::new(UserService::new(repository))))
        }
        StorageType::InMemory => Ok(create_in_memory_app_state()),
    }
}

/// Application state over a fresh in-memory store
pub fn create_in_memory_app_state() -> AppState {
    let repository = Arc::new(InMemoryUserRepository::new());
    AppState::new(Arc::new(UserService::new(repository)))
}
