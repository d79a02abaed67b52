use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("write rejected at {path}: {reason}")]
    Rejected { path: String, reason: String },

    #[error("event stream error: {0}")]
    Stream(String),

    #[error("subscription closed")]
    SubscriptionClosed,
}
