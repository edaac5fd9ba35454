//! In-memory store for single-process runs and tests.
//!
//! Both repos share one `RwLock` so that the idea existence check and the
//! comment insert see the same state. Every mutation happens inside a single
//! write-lock section with no `.await` in between, which is what makes the
//! vote increment atomic here.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::repos::comment_repo::{CommentRepo, CommentRow, NewComment};
use crate::repos::error::RepoResult;
use crate::repos::idea_repo::{IdeaRepo, IdeaRow, NewIdea};

#[derive(Debug, Default)]
struct Tables {
    ideas: BTreeMap<i64, IdeaRow>,
    comments: BTreeMap<i64, CommentRow>,
    next_idea_id: i64,
    next_comment_id: i64,
}

/// Cheap to clone; clones share the same tables.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdeaRepo for MemoryStore {
    async fn insert(&self, new: &NewIdea, now: DateTime<Utc>) -> RepoResult<IdeaRow> {
        let mut tables = self.tables.write().await;
        tables.next_idea_id += 1;
        let row = IdeaRow {
            id: tables.next_idea_id,
            title: new.title.clone(),
            description: new.description.clone(),
            votes: 0,
            created_at: now,
            updated_at: now,
        };
        tables.ideas.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_created_since(&self, since: Option<DateTime<Utc>>) -> RepoResult<Vec<IdeaRow>> {
        let tables = self.tables.read().await;
        let rows = tables
            .ideas
            .values()
            .filter(|idea| since.is_none_or(|cutoff| idea.created_at >= cutoff))
            .cloned()
            .collect();
        Ok(rows)
    }

    async fn exists(&self, id: i64) -> RepoResult<bool> {
        Ok(self.tables.read().await.ideas.contains_key(&id))
    }

    async fn increment_votes(&self, id: i64, now: DateTime<Utc>) -> RepoResult<Option<IdeaRow>> {
        let mut tables = self.tables.write().await;
        let Some(idea) = tables.ideas.get_mut(&id) else {
            return Ok(None);
        };
        idea.votes += 1;
        idea.updated_at = now;
        Ok(Some(idea.clone()))
    }
}

#[async_trait]
impl CommentRepo for MemoryStore {
    async fn insert(&self, new: &NewComment, now: DateTime<Utc>) -> RepoResult<CommentRow> {
        let mut tables = self.tables.write().await;
        tables.next_comment_id += 1;
        let row = CommentRow {
            id: tables.next_comment_id,
            idea_id: new.idea_id,
            author: new.author.clone(),
            content: new.content.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.comments.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_by_idea(&self, idea_id: i64) -> RepoResult<Vec<CommentRow>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<CommentRow> = tables
            .comments
            .values()
            .filter(|c| c.idea_id == idea_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn count_by_idea(&self, idea_ids: &[i64]) -> RepoResult<HashMap<i64, i64>> {
        let wanted: HashSet<i64> = idea_ids.iter().copied().collect();
        let tables = self.tables.read().await;
        let mut counts = HashMap::new();
        for comment in tables.comments.values() {
            if wanted.contains(&comment.idea_id) {
                *counts.entry(comment.idea_id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn idea(title: &str) -> NewIdea {
        NewIdea {
            title: title.to_string(),
            description: None,
        }
    }

    fn comment(idea_id: i64, content: &str) -> NewComment {
        NewComment {
            idea_id,
            author: None,
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids_and_equal_timestamps() {
        let store = MemoryStore::new();
        let now = Utc::now();

        let a = IdeaRepo::insert(&store, &idea("a"), now).await.unwrap();
        let b = IdeaRepo::insert(&store, &idea("b"), now).await.unwrap();

        assert!(b.id > a.id);
        assert_eq!(a.votes, 0);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[tokio::test]
    async fn list_created_since_applies_the_cutoff() {
        let store = MemoryStore::new();
        let now = Utc::now();
        IdeaRepo::insert(&store, &idea("old"), now - Duration::days(8))
            .await
            .unwrap();
        IdeaRepo::insert(&store, &idea("new"), now - Duration::days(6))
            .await
            .unwrap();

        let all = store.list_created_since(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let recent = store
            .list_created_since(Some(now - Duration::days(7)))
            .await
            .unwrap();
        let titles: Vec<_> = recent.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["new"]);
    }

    #[tokio::test]
    async fn increment_votes_on_missing_idea_returns_none() {
        let store = MemoryStore::new();
        assert!(store.increment_votes(42, Utc::now()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_increments_are_not_lost() {
        let store = MemoryStore::new();
        let row = IdeaRepo::insert(&store, &idea("hot"), Utc::now())
            .await
            .unwrap();
        let id = row.id;

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.increment_votes(id, Utc::now()).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let ideas = store.list_created_since(None).await.unwrap();
        assert_eq!(ideas[0].votes, 50);
    }

    #[tokio::test]
    async fn comments_are_listed_newest_first_and_counted_per_idea() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let x = IdeaRepo::insert(&store, &idea("x"), now).await.unwrap();
        let y = IdeaRepo::insert(&store, &idea("y"), now).await.unwrap();

        CommentRepo::insert(&store, &comment(x.id, "first"), now - Duration::minutes(2))
            .await
            .unwrap();
        CommentRepo::insert(&store, &comment(x.id, "second"), now - Duration::minutes(1))
            .await
            .unwrap();

        let listed = store.list_by_idea(x.id).await.unwrap();
        let contents: Vec<_> = listed.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, ["second", "first"]);

        let counts = store.count_by_idea(&[x.id, y.id]).await.unwrap();
        assert_eq!(counts.get(&x.id), Some(&2));
        assert_eq!(counts.get(&y.id), None);
    }

    #[tokio::test]
    async fn counts_cover_only_requested_ideas_with_duplicates_ignored() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let mut ids = Vec::new();
        for n in 0..5 {
            let row = IdeaRepo::insert(&store, &idea(&format!("idea {n}")), now)
                .await
                .unwrap();
            for _ in 0..=n {
                CommentRepo::insert(&store, &comment(row.id, "c"), now)
                    .await
                    .unwrap();
            }
            ids.push(row.id);
        }

        let counts = store
            .count_by_idea(&[ids[1], ids[3], ids[3], 9999])
            .await
            .unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get(&ids[1]), Some(&2));
        assert_eq!(counts.get(&ids[3]), Some(&4));
        assert!(store.count_by_idea(&[]).await.unwrap().is_empty());
    }
}
