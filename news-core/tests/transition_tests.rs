use news_core::{update, Action, AppState, Effect, StoryPayload, StorySummary};

fn payload(entries: &[(&str, &str, &str)]) -> StoryPayload {
    entries
        .iter()
        .map(|(id, title, author)| {
            (
                id.to_string(),
                StorySummary {
                    title: title.to_string(),
                    author: author.to_string(),
                },
            )
        })
        .collect()
}

fn apply(state: AppState, action: Action) -> AppState {
    update(state, action).state
}

#[test]
fn fetch_marks_fetching_and_requests_lowercased_resource() {
    let state = AppState::seeded("Ocean");
    let transition = update(state.clone(), Action::FetchStories);

    assert!(transition.state.fetching);
    assert_eq!(transition.state.filter, "Ocean");
    match transition.effect {
        Some(Effect::Fetch(request)) => assert_eq!(request.resource, "ocean.json"),
        other => panic!("expected fetch effect, got {other:?}"),
    }
}

#[test]
fn fetch_request_maps_results_to_follow_up_actions() {
    let transition = update(AppState::default(), Action::FetchStories);
    let Some(Effect::Fetch(request)) = transition.effect else {
        panic!("expected fetch effect");
    };
    let body = payload(&[("1", "Ocean waves", "A")]);
    assert_eq!((request.on_success)(body.clone()), Action::GotStories(body));
    assert_eq!(
        (request.on_failure)("boom".into()),
        Action::FetchFailed("boom".into())
    );
}

#[test]
fn editing_filter_toggles_and_commit_refetches() {
    let editing = apply(AppState::default(), Action::StartEditingFilter);
    assert!(editing.editing_filter);
    assert!(!editing.fetching);

    let typed = apply(editing, Action::SetFilter("Space".into()));
    assert_eq!(typed.filter, "Space");

    let committed = update(typed, Action::StopEditingFilter);
    assert!(!committed.state.editing_filter);
    assert!(committed.state.fetching);
    match committed.effect {
        Some(Effect::Fetch(request)) => assert_eq!(request.resource, "space.json"),
        other => panic!("expected fetch effect, got {other:?}"),
    }
}

#[test]
fn set_filter_keeps_text_verbatim() {
    let state = apply(AppState::default(), Action::SetFilter("  Deep Sea ".into()));
    assert_eq!(state.filter, "  Deep Sea ");
}

#[test]
fn select_story_marks_seen_regardless_of_prior_flag() {
    let loaded = apply(
        AppState::default(),
        Action::GotStories(payload(&[("1", "Ocean waves", "A"), ("2", "Tides", "B")])),
    );
    let once = apply(loaded, Action::SelectStory("1".into()));
    assert_eq!(once.reading.as_deref(), Some("1"));
    assert!(once.stories["1"].seen);
    assert!(!once.stories["2"].seen);

    let twice = apply(once, Action::SelectStory("1".into()));
    assert_eq!(twice.reading.as_deref(), Some("1"));
    assert!(twice.stories["1"].seen);
}

#[test]
fn got_stories_clears_reading_when_story_disappears() {
    let loaded = apply(
        AppState::default(),
        Action::GotStories(payload(&[("1", "Ocean waves", "A"), ("2", "Tides", "B")])),
    );
    let reading = apply(loaded, Action::SelectStory("2".into()));

    let kept = apply(
        reading.clone(),
        Action::GotStories(payload(&[("2", "Tides", "B"), ("3", "Reefs", "C")])),
    );
    assert_eq!(kept.reading.as_deref(), Some("2"));

    let dropped = apply(reading, Action::GotStories(payload(&[("1", "Ocean waves", "A")])));
    assert_eq!(dropped.reading, None);
}

#[test]
fn got_stories_overwrites_title_and_author_but_keeps_seen() {
    let loaded = apply(
        AppState::default(),
        Action::GotStories(payload(&[("1", "Ocean waves", "A")])),
    );
    let seen = apply(loaded, Action::SelectStory("1".into()));
    let refreshed = apply(
        seen,
        Action::GotStories(payload(&[("1", "Ocean waves, updated", "A. Author")])),
    );

    let story = &refreshed.stories["1"];
    assert_eq!(story.title, "Ocean waves, updated");
    assert_eq!(story.author, "A. Author");
    assert!(story.seen);
}

#[test]
fn seen_flag_is_not_resurrected_after_story_leaves_the_list() {
    let loaded = apply(
        AppState::default(),
        Action::GotStories(payload(&[("1", "Ocean waves", "A")])),
    );
    let seen = apply(loaded, Action::SelectStory("1".into()));
    let gone = apply(seen, Action::GotStories(payload(&[("2", "Tides", "B")])));
    let back = apply(gone, Action::GotStories(payload(&[("1", "Ocean waves", "A")])));

    assert!(!back.stories["1"].seen);
}

#[test]
fn toggling_auto_update_twice_is_identity() {
    let state = AppState::default();
    let once = apply(state.clone(), Action::ToggleAutoUpdate);
    assert!(once.auto_update);
    let twice = apply(once, Action::ToggleAutoUpdate);
    assert_eq!(twice, state);
}

#[test]
fn fetch_failure_clears_fetching_and_keeps_stories() {
    let loaded = apply(
        AppState::default(),
        Action::GotStories(payload(&[("1", "Ocean waves", "A")])),
    );
    let fetching = apply(loaded.clone(), Action::FetchStories);
    let failed = apply(fetching, Action::FetchFailed("network error".into()));

    assert!(!failed.fetching);
    assert_eq!(failed.last_error.as_deref(), Some("network error"));
    assert_eq!(failed.stories, loaded.stories);

    let recovered = apply(failed, Action::GotStories(payload(&[("1", "Ocean waves", "A")])));
    assert_eq!(recovered.last_error, None);
}

#[test]
fn ocean_scenario_preserves_read_status_across_refresh() {
    let initial = AppState::seeded("ocean");
    assert!(!initial.fetching);

    let fetching = apply(initial, Action::FetchStories);
    assert!(fetching.fetching);

    let received = apply(
        fetching,
        Action::GotStories(payload(&[("1", "Ocean waves", "A")])),
    );
    assert!(!received.fetching);
    assert_eq!(received.reading, None);
    assert_eq!(received.stories.len(), 1);
    assert_eq!(received.stories["1"].title, "Ocean waves");
    assert_eq!(received.stories["1"].author, "A");
    assert!(!received.stories["1"].seen);

    let selected = apply(received, Action::SelectStory("1".into()));
    assert_eq!(selected.reading.as_deref(), Some("1"));
    assert!(selected.stories["1"].seen);

    let refetching = apply(selected, Action::FetchStories);
    let refreshed = apply(
        refetching,
        Action::GotStories(payload(&[("1", "Ocean waves", "A"), ("2", "Sea shanty", "B")])),
    );
    assert!(refreshed.stories["1"].seen);
    assert!(!refreshed.stories["2"].seen);
    assert_eq!(refreshed.reading.as_deref(), Some("1"));
    assert_eq!(refreshed.unread_count(), 1);
}
