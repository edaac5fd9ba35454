/*
 * Responsibility
 * - listing parameters (time range, sort key)
 * - merge per-idea comment counts into the idea rows and sort them
 * - pure functions, no store access
 */
use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::repos::IdeaRow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    All,
    Week,
    Month,
}

impl TimeRange {
    /// Earliest `created_at` still inside the range, `None` for `All`.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeRange::All => None,
            TimeRange::Week => Some(now - Duration::days(7)),
            TimeRange::Month => Some(now - Duration::days(30)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Votes,
    Comments,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedIdea {
    pub idea: IdeaRow,
    pub comments_count: i64,
}

impl RankedIdea {
    fn primary(&self, sort: SortKey) -> i64 {
        match sort {
            SortKey::Votes => self.idea.votes,
            SortKey::Comments => self.comments_count,
        }
    }
}

/// Attach comment counts (0 when absent) and order by `(primary, created_at)`, both descending.
///
/// Rows tied on both keys keep their input order.
pub fn rank(ideas: Vec<IdeaRow>, counts: &HashMap<i64, i64>, sort: SortKey) -> Vec<RankedIdea> {
    let mut ranked: Vec<RankedIdea> = ideas
        .into_iter()
        .map(|idea| RankedIdea {
            comments_count: counts.get(&idea.id).copied().unwrap_or(0),
            idea,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.primary(sort)
            .cmp(&a.primary(sort))
            .then_with(|| b.idea.created_at.cmp(&a.idea.created_at))
    });

    ranked
}
