use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::action::Action;
use crate::error::StoreError;
use crate::state::AppState;

pub const AUTO_UPDATE_INTERVAL: Duration = Duration::from_millis(5000);

/// An ambient effect source that should be running while the state asks for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subscription {
    Interval { every: Duration, action: Action },
}

pub fn subscriptions(state: &AppState) -> Vec<Subscription> {
    if state.auto_update {
        vec![Subscription::Interval {
            every: AUTO_UPDATE_INTERVAL,
            action: Action::FetchStories,
        }]
    } else {
        Vec::new()
    }
}

pub struct TimerHandle {
    cancel_tx: broadcast::Sender<()>,
    join: JoinHandle<()>,
}

impl TimerHandle {
    /// Signals the timer task to exit without waiting for it.
    pub fn cancel(&self) {
        let _ = self.cancel_tx.send(());
    }

    pub async fn stop(self) -> Result<(), StoreError> {
        self.cancel();
        self.join.await.map_err(StoreError::from)
    }
}

/// Dispatches `action` every `every`, first one period after the call.
pub fn spawn_interval(
    runtime: &Handle,
    every: Duration,
    action: Action,
    action_tx: mpsc::UnboundedSender<Action>,
) -> TimerHandle {
    let (cancel_tx, mut cancel_rx) = broadcast::channel(1);
    let join = runtime.spawn(async move {
        let start = tokio::time::Instant::now() + every;
        let mut ticker = tokio::time::interval_at(start, every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel_rx.recv() => {
                    debug!(?every, "interval subscription stopped");
                    break;
                }
                _ = ticker.tick() => {
                    if action_tx.send(action.clone()).is_err() {
                        warn!("action receiver dropped, stopping interval");
                        break;
                    }
                }
            }
        }
    });

    TimerHandle { cancel_tx, join }
}
