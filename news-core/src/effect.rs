//! Effects are descriptions of I/O returned by transitions.
//!
//! The reducer never performs I/O itself; the store hands each effect to its
//! runner, which eventually dispatches the follow-up action named here.

use url::Url;

use crate::action::Action;
use crate::error::FetchError;
use crate::state::StoryPayload;

#[derive(Debug, Clone)]
pub enum Effect {
    Fetch(FetchRequest),
}

#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Path segment appended to the configured base URL, e.g. `ocean.json`.
    pub resource: String,
    pub on_success: fn(StoryPayload) -> Action,
    pub on_failure: fn(String) -> Action,
}

impl FetchRequest {
    pub fn for_filter(filter: &str) -> Self {
        Self {
            resource: format!("{}.json", filter.to_lowercase()),
            on_success: Action::GotStories,
            on_failure: Action::FetchFailed,
        }
    }

    /// Resolves the resource against `base` as a single percent-encoded segment.
    pub fn url(&self, base: &Url) -> Result<Url, FetchError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidBase(base.to_string()))?
            .pop_if_empty()
            .push(&self.resource);
        Ok(url)
    }
}
