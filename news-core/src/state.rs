use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_FILTER: &str = "ocean";

pub type StoryId = String;

/// Body of a successful story-list fetch, keyed by story id.
pub type StoryPayload = BTreeMap<StoryId, StorySummary>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorySummary {
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Story {
    pub title: String,
    pub author: String,
    pub seen: bool,
}

impl Story {
    pub fn unseen(summary: StorySummary) -> Self {
        Self {
            title: summary.title,
            author: summary.author,
            seen: false,
        }
    }
}

/// The single application state value. Every transition produces a new one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppState {
    pub filter: String,
    pub editing_filter: bool,
    pub fetching: bool,
    pub auto_update: bool,
    pub reading: Option<StoryId>,
    pub stories: BTreeMap<StoryId, Story>,
    /// Message of the last failed fetch, cleared once stories arrive.
    pub last_error: Option<String>,
}

impl AppState {
    pub fn seeded(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            editing_filter: false,
            fetching: false,
            auto_update: false,
            reading: None,
            stories: BTreeMap::new(),
            last_error: None,
        }
    }

    pub fn reading_story(&self) -> Option<&Story> {
        self.reading.as_ref().and_then(|id| self.stories.get(id))
    }

    pub fn unread_count(&self) -> usize {
        self.stories.values().filter(|story| !story.seen).count()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::seeded(DEFAULT_FILTER)
    }
}
