//! Application state - shared across all handlers.

use std::sync::Arc;

use rongdhonu_core::ports::{PasswordService, PostRepository, TokenService};
use rongdhonu_infra::{Argon2PasswordService, DatabaseConfig, InMemoryPostRepository, JwtTokenService};

#[cfg(feature = "postgres")]
use rongdhonu_infra::PostgresPostRepository;

use crate::config::{AdminCredentials, AppConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub admin: Option<AdminCredentials>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let posts = Self::post_repository(config.database.as_ref()).await;

        if config.admin.is_none() {
            tracing::warn!("ADMIN_USERNAME/ADMIN_PASSWORD_HASH not set. Login is disabled.");
        }

        tracing::info!("Application state initialized");

        Self {
            posts,
            tokens: Arc::new(JwtTokenService::from_env()),
            passwords: Arc::new(Argon2PasswordService::new()),
            admin: config.admin.clone(),
        }
    }

    #[cfg(feature = "postgres")]
    async fn post_repository(db_config: Option<&DatabaseConfig>) -> Arc<dyn PostRepository> {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Arc::new(InMemoryPostRepository::new());
        };

        match rongdhonu_infra::connect(config).await {
            Ok(db) => Arc::new(PostgresPostRepository::new(db)),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryPostRepository::new())
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn post_repository(_db_config: Option<&DatabaseConfig>) -> Arc<dyn PostRepository> {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Arc::new(InMemoryPostRepository::new())
    }
}
