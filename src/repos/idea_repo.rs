/*
 * Responsibility
 * - idea table operations (insert / list with time filter / exists / upvote)
 * - the IdeaRepo seam so handlers don't care which backend is behind it
 * - upvote is a single UPDATE ... RETURNING; never read-then-write
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct IdeaRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Already trimmed and length-checked input for a new idea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdea {
    pub title: String,
    pub description: Option<String>,
}

#[async_trait]
pub trait IdeaRepo: Send + Sync + 'static {
    /// Persist a new idea with votes = 0 and both timestamps set to `now`.
    async fn insert(&self, new: &NewIdea, now: DateTime<Utc>) -> RepoResult<IdeaRow>;

    /// All ideas, or only those created at or after `since`.
    async fn list_created_since(&self, since: Option<DateTime<Utc>>) -> RepoResult<Vec<IdeaRow>>;

    async fn exists(&self, id: i64) -> RepoResult<bool>;

    /// Atomically add one vote and touch `updated_at`.
    ///
    /// Returns `Ok(None)` when no idea has that id.
    async fn increment_votes(&self, id: i64, now: DateTime<Utc>) -> RepoResult<Option<IdeaRow>>;
}

#[derive(Clone, Debug)]
pub struct PgIdeaRepo {
    pool: PgPool,
}

impl PgIdeaRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdeaRepo for PgIdeaRepo {
    async fn insert(&self, new: &NewIdea, now: DateTime<Utc>) -> RepoResult<IdeaRow> {
        let row = sqlx::query_as::<_, IdeaRow>(
            r#"
            INSERT INTO idea (title, description, votes, created_at, updated_at)
            VALUES ($1, $2, 0, $3, $3)
            RETURNING id, title, description, votes, created_at, updated_at
            "#,
        )
        .bind(&new.title)
        .bind(new.description.as_deref())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn list_created_since(&self, since: Option<DateTime<Utc>>) -> RepoResult<Vec<IdeaRow>> {
        let rows = sqlx::query_as::<_, IdeaRow>(
            r#"
            SELECT id, title, description, votes, created_at, updated_at
            FROM idea
            WHERE $1::timestamptz IS NULL OR created_at >= $1
            ORDER BY id
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows)
    }

    async fn exists(&self, id: i64) -> RepoResult<bool> {
        let found = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM idea WHERE id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(found)
    }

    async fn increment_votes(&self, id: i64, now: DateTime<Utc>) -> RepoResult<Option<IdeaRow>> {
        let row = sqlx::query_as::<_, IdeaRow>(
            r#"
            UPDATE idea
            SET
                votes = votes + 1,
                updated_at = $2
            WHERE id = $1
            RETURNING id, title, description, votes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }
}
