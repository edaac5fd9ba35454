/*
 * Responsibility
 * - build the idea/comment repos for the configured backend
 * - own the store lifecycle: open on startup (connect + migrate), ping, close on shutdown
 * - handed to AppState once; no module-level handle anywhere
 */
use std::sync::Arc;

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::config::{Config, StoreBackend};
use crate::repos::comment_repo::{CommentRepo, PgCommentRepo};
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::idea_repo::{IdeaRepo, PgIdeaRepo};
use crate::repos::memory::MemoryStore;

#[derive(Clone)]
enum Backend {
    Postgres(PgPool),
    Memory,
}

#[derive(Clone)]
pub struct Store {
    pub ideas: Arc<dyn IdeaRepo>,
    pub comments: Arc<dyn CommentRepo>,
    backend: Backend,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("backend", &self.backend_name())
            .finish()
    }
}

impl Store {
    pub async fn open(config: &Config) -> RepoResult<Self> {
        match config.store_backend {
            StoreBackend::Memory => Ok(Self::memory()),
            StoreBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| RepoError::Unavailable("DATABASE_URL is not set".into()))?;

                let pool = PgPoolOptions::new()
                    .max_connections(config.database_max_connections)
                    .connect(database_url)
                    .await
                    .map_err(RepoError::from_sqlx)?;

                if config.database_run_migrations {
                    sqlx::migrate!("./migrations")
                        .run(&pool)
                        .await
                        .map_err(|e| RepoError::Db(e.into()))?;
                    tracing::info!("database migrations applied");
                }

                Ok(Self::postgres(pool))
            }
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            ideas: Arc::new(PgIdeaRepo::new(pool.clone())),
            comments: Arc::new(PgCommentRepo::new(pool.clone())),
            backend: Backend::Postgres(pool),
        }
    }

    pub fn memory() -> Self {
        let store = MemoryStore::new();
        Self {
            ideas: Arc::new(store.clone()),
            comments: Arc::new(store),
            backend: Backend::Memory,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    /// Round-trip to the backend; used by the `/test` endpoint.
    pub async fn ping(&self) -> RepoResult<()> {
        match &self.backend {
            Backend::Postgres(pool) => {
                sqlx::query("SELECT 1")
                    .execute(pool)
                    .await
                    .map_err(RepoError::from_sqlx)?;
                Ok(())
            }
            Backend::Memory => Ok(()),
        }
    }

    pub async fn close(&self) {
        if let Backend::Postgres(pool) = &self.backend {
            pool.close().await;
        }
    }
}
