//! Application state - shared across all handlers.

use std::sync::Arc;

use serde::Serialize;

use posts_core::PostService;
use posts_core::ports::{PostRepository, TokenService};
use posts_infra::{InMemoryPostRepository, JwtTokenService};

#[cfg(feature = "postgres")]
use posts_infra::PostgresPostRepository;

use crate::config::AppConfig;

/// Which store backs the post repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub tokens: Arc<dyn TokenService>,
    /// When false the auth gate admits every request as anonymous.
    pub auth_enabled: bool,
    pub storage: StorageBackend,
}

impl AppState {
    /// State over a fresh in-memory store.
    pub fn in_memory(tokens: Arc<dyn TokenService>, auth_enabled: bool) -> Self {
        let (repo, storage) = memory_store();
        Self {
            posts: PostService::new(repo),
            tokens,
            auth_enabled,
            storage,
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn from_config(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> =
            Arc::new(JwtTokenService::new(config.auth.jwt.clone()));

        if !config.auth.enabled {
            tracing::warn!("AUTH_ENABLED=false - post routes accept unauthenticated requests");
        }

        #[cfg(feature = "postgres")]
        let (repo, storage) = match &config.database {
            Some(db_config) => match posts_infra::database::connect(db_config).await {
                Ok(conn) => {
                    let repo: Arc<dyn PostRepository> =
                        Arc::new(PostgresPostRepository::new(conn));
                    (repo, StorageBackend::Postgres)
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    memory_store()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                memory_store()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (repo, storage) = {
            if config.database.is_some() {
                tracing::warn!("DATABASE_URL ignored - built without the postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory repository");
            memory_store()
        };

        tracing::info!(?storage, "Application state initialized");

        Self {
            posts: PostService::new(repo),
            tokens,
            auth_enabled: config.auth.enabled,
            storage,
        }
    }
}

fn memory_store() -> (Arc<dyn PostRepository>, StorageBackend) {
    (
        Arc::new(InMemoryPostRepository::new()),
        StorageBackend::Memory,
    )
}
