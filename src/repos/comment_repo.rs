/*
 * Responsibility
 * - comment table operations (insert / list by idea / grouped count)
 * - idea_id is a plain lookup key, there is no FK behind it
 * - count_by_idea is the one grouped query used by the idea listing (no N+1)
 */
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CommentRow {
    pub id: i64,
    pub idea_id: i64,
    pub author: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Already trimmed and length-checked input for a new comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub idea_id: i64,
    pub author: Option<String>,
    pub content: String,
}

#[async_trait]
pub trait CommentRepo: Send + Sync + 'static {
    async fn insert(&self, new: &NewComment, now: DateTime<Utc>) -> RepoResult<CommentRow>;

    /// Newest first. Empty when the idea (or its comments) does not exist.
    async fn list_by_idea(&self, idea_id: i64) -> RepoResult<Vec<CommentRow>>;

    /// Comment count per idea in a single grouped pass.
    ///
    /// Ideas without comments are absent from the map.
    async fn count_by_idea(&self, idea_ids: &[i64]) -> RepoResult<HashMap<i64, i64>>;
}

#[derive(Clone, Debug)]
pub struct PgCommentRepo {
    pool: PgPool,
}

impl PgCommentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepo for PgCommentRepo {
    async fn insert(&self, new: &NewComment, now: DateTime<Utc>) -> RepoResult<CommentRow> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comment (idea_id, author, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, idea_id, author, content, created_at, updated_at
            "#,
        )
        .bind(new.idea_id)
        .bind(new.author.as_deref())
        .bind(&new.content)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn list_by_idea(&self, idea_id: i64) -> RepoResult<Vec<CommentRow>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, idea_id, author, content, created_at, updated_at
            FROM comment
            WHERE idea_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(idea_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows)
    }

    async fn count_by_idea(&self, idea_ids: &[i64]) -> RepoResult<HashMap<i64, i64>> {
        if idea_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT idea_id, COUNT(*) AS count
            FROM comment
            WHERE idea_id = ANY($1)
            GROUP BY idea_id
            "#,
        )
        .bind(idea_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows.into_iter().collect())
    }
}
