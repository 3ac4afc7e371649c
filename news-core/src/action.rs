use std::collections::BTreeMap;

use crate::effect::{Effect, FetchRequest};
use crate::state::{AppState, Story, StoryId, StoryPayload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FetchStories,
    StartEditingFilter,
    StopEditingFilter,
    SetFilter(String),
    SelectStory(StoryId),
    GotStories(StoryPayload),
    FetchFailed(String),
    ToggleAutoUpdate,
}

impl Action {
    /// Short name for logs; payloads can be large.
    pub fn label(&self) -> &'static str {
        match self {
            Action::FetchStories => "fetch_stories",
            Action::StartEditingFilter => "start_editing_filter",
            Action::StopEditingFilter => "stop_editing_filter",
            Action::SetFilter(_) => "set_filter",
            Action::SelectStory(_) => "select_story",
            Action::GotStories(_) => "got_stories",
            Action::FetchFailed(_) => "fetch_failed",
            Action::ToggleAutoUpdate => "toggle_auto_update",
        }
    }
}

/// Outcome of a transition: the next state and, optionally, an effect to run.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: AppState,
    pub effect: Option<Effect>,
}

impl Transition {
    pub fn to(state: AppState) -> Self {
        Self {
            state,
            effect: None,
        }
    }

    pub fn with_effect(state: AppState, effect: Effect) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }
}

pub fn update(state: AppState, action: Action) -> Transition {
    match action {
        Action::FetchStories => fetch_stories(state),
        Action::StartEditingFilter => Transition::to(AppState {
            editing_filter: true,
            ..state
        }),
        Action::StopEditingFilter => fetch_stories(AppState {
            editing_filter: false,
            ..state
        }),
        Action::SetFilter(filter) => Transition::to(AppState { filter, ..state }),
        Action::SelectStory(id) => Transition::to(select_story(state, id)),
        Action::GotStories(payload) => Transition::to(got_stories(state, payload)),
        Action::FetchFailed(message) => Transition::to(AppState {
            fetching: false,
            last_error: Some(message),
            ..state
        }),
        Action::ToggleAutoUpdate => Transition::to(AppState {
            auto_update: !state.auto_update,
            ..state
        }),
    }
}

fn fetch_stories(state: AppState) -> Transition {
    let request = FetchRequest::for_filter(&state.filter);
    Transition::with_effect(
        AppState {
            fetching: true,
            ..state
        },
        Effect::Fetch(request),
    )
}

fn select_story(state: AppState, id: StoryId) -> AppState {
    let mut stories = state.stories;
    if let Some(story) = stories.get_mut(&id) {
        story.seen = true;
    }
    AppState {
        reading: Some(id),
        stories,
        ..state
    }
}

fn got_stories(state: AppState, payload: StoryPayload) -> AppState {
    let stories: BTreeMap<StoryId, Story> = payload
        .into_iter()
        .map(|(id, summary)| {
            let seen = state.stories.get(&id).is_some_and(|old| old.seen);
            (id, Story { seen, ..Story::unseen(summary) })
        })
        .collect();
    let reading = state.reading.filter(|id| stories.contains_key(id));
    AppState {
        stories,
        reading,
        fetching: false,
        last_error: None,
        ..state
    }
}
