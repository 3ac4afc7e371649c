//! Pure projection of [`AppState`] into a description of what to draw.
//!
//! Nothing here holds state; the frontend rebuilds the [`View`] after every
//! transition and turns widget interactions back into the [`Action`]s carried
//! by the nodes.

use crate::action::Action;
use crate::state::{AppState, StoryId};

pub const PLACEHOLDER_BODY: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing \
elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad \
minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo \
consequat.";

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub filter: FilterView,
    pub stories: StoryListView,
    pub auto_update: AutoUpdateView,
    pub detail: Option<StoryDetailView>,
    pub status: Option<StatusView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterView {
    pub value: String,
    pub editing: bool,
    /// Dispatched when the input is clicked.
    pub on_focus: Action,
    /// Dispatched by the Go button.
    pub button: Action,
}

impl FilterView {
    pub fn on_input(&self, text: impl Into<String>) -> Action {
        Action::SetFilter(text.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoryListView {
    pub loading: bool,
    pub items: Vec<StoryThumbnail>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoryThumbnail {
    pub id: StoryId,
    pub title: Vec<Fragment>,
    pub author: String,
    pub unread: bool,
    pub reading: bool,
    pub on_select: Action,
}

/// One word of a title, with its trailing space, possibly emphasized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutoUpdateView {
    pub checked: bool,
    pub on_toggle: Action,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoryDetailView {
    pub title: String,
    pub body: &'static str,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub error: String,
}

pub fn view(state: &AppState) -> View {
    View {
        filter: filter_view(state),
        stories: story_list_view(state),
        auto_update: AutoUpdateView {
            checked: state.auto_update,
            on_toggle: Action::ToggleAutoUpdate,
        },
        detail: state.reading_story().map(|story| StoryDetailView {
            title: story.title.clone(),
            body: PLACEHOLDER_BODY,
            author: story.author.clone(),
        }),
        status: state.last_error.as_ref().map(|error| StatusView {
            error: error.clone(),
        }),
    }
}

fn filter_view(state: &AppState) -> FilterView {
    FilterView {
        value: state.filter.clone(),
        editing: state.editing_filter,
        on_focus: Action::StartEditingFilter,
        button: if state.editing_filter {
            Action::StopEditingFilter
        } else {
            Action::StartEditingFilter
        },
    }
}

fn story_list_view(state: &AppState) -> StoryListView {
    let items = state
        .stories
        .iter()
        .map(|(id, story)| StoryThumbnail {
            id: id.clone(),
            title: emphasize(&state.filter, &story.title),
            author: story.author.clone(),
            unread: !story.seen,
            reading: state.reading.as_deref() == Some(id.as_str()),
            on_select: Action::SelectStory(id.clone()),
        })
        .collect();

    StoryListView {
        loading: state.fetching,
        items,
    }
}

/// Splits `text` on spaces and marks every token equal to `word`, ignoring case.
pub fn emphasize(word: &str, text: &str) -> Vec<Fragment> {
    let needle = word.to_lowercase();
    text.split(' ')
        .map(|token| Fragment {
            text: format!("{token} "),
            emphasized: token.to_lowercase() == needle,
        })
        .collect()
}
