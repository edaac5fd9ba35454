/*
 * Responsibility
 * - idea request/response DTOs
 * - ids go out encoded (the store id is never exposed)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::ranking::{SortKey, TimeRange};

#[derive(Debug, Deserialize)]
pub struct CreateIdeaRequest {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListIdeasQuery {
    #[serde(default)]
    pub range: TimeRange,
    #[serde(default)]
    pub sort: SortKey,
}

#[derive(Debug, Serialize)]
pub struct IdeaResponse {
    pub id: String, // encoded
    pub title: String,
    pub description: Option<String>,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub comments_count: i64,
}
