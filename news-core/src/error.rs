use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("story list decoding error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("base url cannot take path segments: {0}")]
    InvalidBase(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("action channel closed unexpectedly")]
    ActionChannelClosed,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not locate the user configuration directory")]
    NoConfigDir,
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config format error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid base url: {0}")]
    Url(#[from] url::ParseError),
}
