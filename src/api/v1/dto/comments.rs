/*
 * Responsibility
 * - comment request/response DTOs
 * - both id and idea_id go out encoded
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub author: Option<String>,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: String,      // encoded
    pub idea_id: String, // encoded
    pub author: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
