use reqwest::Client;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use url::Url;

use crate::action::{update, Action, Transition};
use crate::effect::Effect;
use crate::error::StoreError;
use crate::fetch::{fetch_stories, FetchConfig};
use crate::state::AppState;
use crate::subscription::{spawn_interval, subscriptions, Subscription, TimerHandle};
use crate::view::{view, View};

/// Everything effects need to reach the outside world.
#[derive(Debug, Clone)]
pub struct StoreContext {
    pub runtime: Handle,
    pub client: Client,
    pub base_url: Url,
    pub fetch: FetchConfig,
}

/// Cloneable handle for feeding actions from outside the loop thread.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Dispatcher {
    pub fn dispatch(&self, action: Action) -> Result<(), StoreError> {
        self.action_tx
            .send(action)
            .map_err(|_| StoreError::ActionChannelClosed)
    }
}

/// Owns the current [`AppState`] and runs the transition loop.
///
/// Transitions are applied one at a time through `&mut self`. Effects and
/// timers run on the tokio runtime and report back by queueing actions, which
/// are applied when the owner calls [`Store::pump`] or [`Store::next`].
pub struct Store {
    state: AppState,
    context: StoreContext,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    timers: Vec<(Subscription, TimerHandle)>,
}

impl Store {
    pub fn new(state: AppState, context: StoreContext) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            state,
            context,
            action_tx,
            action_rx,
            timers: Vec::new(),
        }
    }

    /// Creates the store and immediately begins the first fetch.
    pub fn start(state: AppState, context: StoreContext) -> Self {
        let mut store = Self::new(state, context);
        store.dispatch(Action::FetchStories);
        store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> View {
        view(&self.state)
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher {
            action_tx: self.action_tx.clone(),
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(action = action.label(), "dispatch");
        let current = std::mem::take(&mut self.state);
        let Transition { state, effect } = update(current, action);
        self.state = state;

        if let Some(effect) = effect {
            self.run_effect(effect);
        }
        self.reconcile_subscriptions();
    }

    /// Applies every queued action without waiting. Returns how many ran.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        applied
    }

    /// Waits for the next queued action, applies it and returns it.
    pub async fn next(&mut self) -> Result<Action, StoreError> {
        let action = self
            .action_rx
            .recv()
            .await
            .ok_or(StoreError::ActionChannelClosed)?;
        self.dispatch(action.clone());
        Ok(action)
    }

    pub fn active_subscriptions(&self) -> Vec<&Subscription> {
        self.timers.iter().map(|(sub, _)| sub).collect()
    }

    /// Stops all running timers and waits for them to exit.
    pub async fn shutdown(&mut self) -> Result<(), StoreError> {
        for (_, timer) in self.timers.drain(..) {
            timer.stop().await?;
        }
        Ok(())
    }

    fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::Fetch(request) => {
                let client = self.context.client.clone();
                let base = self.context.base_url.clone();
                let config = self.context.fetch;
                let action_tx = self.action_tx.clone();
                self.context.runtime.spawn(async move {
                    let action = match fetch_stories(&client, &base, &request, &config).await {
                        Ok(payload) => (request.on_success)(payload),
                        Err(err) => {
                            warn!(resource = %request.resource, error = %err, "failed to fetch stories");
                            (request.on_failure)(err.to_string())
                        }
                    };
                    if action_tx.send(action).is_err() {
                        warn!("store dropped before fetch completed");
                    }
                });
            }
        }
    }

    fn reconcile_subscriptions(&mut self) {
        let desired = subscriptions(&self.state);

        self.timers.retain(|(sub, timer)| {
            let keep = desired.contains(sub);
            if !keep {
                timer.cancel();
            }
            keep
        });

        for sub in desired {
            if self.timers.iter().any(|(active, _)| *active == sub) {
                continue;
            }
            let timer = match &sub {
                Subscription::Interval { every, action } => {
                    debug!(?every, "starting interval subscription");
                    spawn_interval(
                        &self.context.runtime,
                        *every,
                        action.clone(),
                        self.action_tx.clone(),
                    )
                }
            };
            self.timers.push((sub, timer));
        }
    }
}
