/*
 * Responsibility
 * - comment use cases: create (idea must exist) / list by idea
 * - listing does not look the idea up; unknown ideas just have no comments
 */
use std::sync::Arc;

use chrono::Utc;

use crate::repos::{CommentRepo, CommentRow, IdeaRepo};
use crate::services::error::{ServiceError, ServiceResult};
use crate::services::validation;

#[derive(Clone)]
pub struct CommentService {
    ideas: Arc<dyn IdeaRepo>,
    comments: Arc<dyn CommentRepo>,
}

impl CommentService {
    pub fn new(ideas: Arc<dyn IdeaRepo>, comments: Arc<dyn CommentRepo>) -> Self {
        Self { ideas, comments }
    }

    pub async fn create(
        &self,
        idea_id: i64,
        author: Option<&str>,
        content: &str,
    ) -> ServiceResult<CommentRow> {
        if !self.ideas.exists(idea_id).await? {
            return Err(ServiceError::NotFound("idea"));
        }

        let new = validation::new_comment(idea_id, author, content)?;
        let comment = self.comments.insert(&new, Utc::now()).await?;
        tracing::debug!(idea_id, comment_id = comment.id, "comment created");

        Ok(comment)
    }

    pub async fn list_by_idea(&self, idea_id: i64) -> ServiceResult<Vec<CommentRow>> {
        Ok(self.comments.list_by_idea(idea_id).await?)
    }
}
