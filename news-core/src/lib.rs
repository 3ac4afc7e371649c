pub mod action;
pub mod config;
pub mod effect;
pub mod error;
pub mod fetch;
pub mod state;
pub mod store;
pub mod subscription;
pub mod view;

pub use action::{update, Action, Transition};
pub use config::AppConfig;
pub use effect::{Effect, FetchRequest};
pub use error::{ConfigError, FetchError, StoreError};
pub use fetch::{fetch_stories, FetchConfig};
pub use state::{AppState, Story, StoryId, StoryPayload, StorySummary};
pub use store::{Dispatcher, Store, StoreContext};
pub use subscription::{spawn_interval, subscriptions, Subscription, TimerHandle};
pub use view::{emphasize, view, View};
