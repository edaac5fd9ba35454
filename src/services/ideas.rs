/*
 * Responsibility
 * - idea use cases: create / list (filter + grouped count + sort) / upvote
 * - the clock is read here; repos get `now` passed in
 */
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::repos::{CommentRepo, IdeaRepo};
use crate::services::error::{ServiceError, ServiceResult};
use crate::services::ranking::{self, RankedIdea, SortKey, TimeRange};
use crate::services::validation;

#[derive(Clone)]
pub struct IdeaService {
    ideas: Arc<dyn IdeaRepo>,
    comments: Arc<dyn CommentRepo>,
}

impl IdeaService {
    pub fn new(ideas: Arc<dyn IdeaRepo>, comments: Arc<dyn CommentRepo>) -> Self {
        Self { ideas, comments }
    }

    /// A fresh idea has no comments, so no count query is made.
    pub async fn create(&self, title: &str, description: Option<&str>) -> ServiceResult<RankedIdea> {
        let new = validation::new_idea(title, description)?;
        let idea = self.ideas.insert(&new, Utc::now()).await?;
        tracing::debug!(idea_id = idea.id, "idea created");

        Ok(RankedIdea {
            idea,
            comments_count: 0,
        })
    }

    pub async fn list(&self, range: TimeRange, sort: SortKey) -> ServiceResult<Vec<RankedIdea>> {
        self.list_at(range, sort, Utc::now()).await
    }

    pub async fn list_at(
        &self,
        range: TimeRange,
        sort: SortKey,
        now: DateTime<Utc>,
    ) -> ServiceResult<Vec<RankedIdea>> {
        let ideas = self.ideas.list_created_since(range.cutoff(now)).await?;

        let idea_ids: Vec<i64> = ideas.iter().map(|i| i.id).collect();
        let counts = self.comments.count_by_idea(&idea_ids).await?;

        Ok(ranking::rank(ideas, &counts, sort))
    }

    pub async fn upvote(&self, idea_id: i64) -> ServiceResult<RankedIdea> {
        let idea = self
            .ideas
            .increment_votes(idea_id, Utc::now())
            .await?
            .ok_or(ServiceError::NotFound("idea"))?;

        let counts = self.comments.count_by_idea(&[idea.id]).await?;
        let comments_count = counts.get(&idea.id).copied().unwrap_or(0);

        Ok(RankedIdea {
            idea,
            comments_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::repos::{NewComment, NewIdea, Store};

    fn service() -> (IdeaService, Store) {
        let store = Store::memory();
        (
            IdeaService::new(store.ideas.clone(), store.comments.clone()),
            store,
        )
    }

    #[tokio::test]
    async fn created_idea_starts_clean() {
        let (ideas, _) = service();
        let created = ideas
            .create("Dark mode", Some("Add a dark theme"))
            .await
            .unwrap();

        assert_eq!(created.idea.title, "Dark mode");
        assert_eq!(created.idea.description.as_deref(), Some("Add a dark theme"));
        assert_eq!(created.idea.votes, 0);
        assert_eq!(created.comments_count, 0);
        assert_eq!(created.idea.created_at, created.idea.updated_at);
    }

    #[tokio::test]
    async fn invalid_title_is_not_persisted() {
        let (ideas, _) = service();
        let err = ideas.create("  ", None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref v) if v.field == "title"));

        let listed = ideas.list(TimeRange::All, SortKey::Votes).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn upvote_bumps_votes_and_updated_at() {
        let (ideas, _) = service();
        let created = ideas.create("Dark mode", None).await.unwrap();

        let voted = ideas.upvote(created.idea.id).await.unwrap();
        assert_eq!(voted.idea.votes, 1);
        assert!(voted.idea.updated_at >= created.idea.updated_at);
        assert_eq!(voted.idea.created_at, created.idea.created_at);
    }

    #[tokio::test]
    async fn upvote_unknown_idea_is_not_found() {
        let (ideas, _) = service();
        let err = ideas.upvote(12345).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("idea")));
    }

    #[tokio::test]
    async fn concurrent_upvotes_all_count() {
        let (ideas, _) = service();
        let id = ideas.create("Popular", None).await.unwrap().idea.id;

        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let ideas = ideas.clone();
                tokio::spawn(async move { ideas.upvote(id).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let listed = ideas.list(TimeRange::All, SortKey::Votes).await.unwrap();
        assert_eq!(listed[0].idea.votes, 32);
    }

    #[tokio::test]
    async fn week_range_uses_created_at() {
        let (ideas, store) = service();
        let now = Utc::now();
        let new = |title: &str| NewIdea {
            title: title.to_string(),
            description: None,
        };
        store
            .ideas
            .insert(&new("eight days"), now - Duration::days(8))
            .await
            .unwrap();
        store
            .ideas
            .insert(&new("six days"), now - Duration::days(6))
            .await
            .unwrap();

        let week = ideas
            .list_at(TimeRange::Week, SortKey::Votes, now)
            .await
            .unwrap();
        let titles: Vec<_> = week.iter().map(|r| r.idea.title.as_str()).collect();
        assert_eq!(titles, ["six days"]);

        let month = ideas
            .list_at(TimeRange::Month, SortKey::Votes, now)
            .await
            .unwrap();
        assert_eq!(month.len(), 2);
    }

    #[tokio::test]
    async fn list_merges_comment_counts() {
        let (ideas, store) = service();
        let x = ideas.create("X", None).await.unwrap().idea;
        let y = ideas.create("Y", None).await.unwrap().idea;
        store
            .comments
            .insert(
                &NewComment {
                    idea_id: x.id,
                    author: None,
                    content: "+1".to_string(),
                },
                Utc::now(),
            )
            .await
            .unwrap();

        let listed = ideas.list(TimeRange::All, SortKey::Comments).await.unwrap();
        assert_eq!(listed[0].idea.id, x.id);
        assert_eq!(listed[0].comments_count, 1);
        assert_eq!(listed[1].idea.id, y.id);
        assert_eq!(listed[1].comments_count, 0);

        let voted = ideas.upvote(x.id).await.unwrap();
        assert_eq!(voted.comments_count, 1);
    }
}
