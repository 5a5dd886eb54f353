use thiserror::Error;

/// Custom error type for pc-emo
#[derive(Error, Debug)]
pub enum EmoError {
    #[error("Metric read failed: {0}")]
    MetricRead(String),
}

/// Result type alias for pc-emo
pub type Result<T> = std::result::Result<T, EmoError>;

impl EmoError {
    /// Create a metric read error
    pub fn metric_read<S: Into<String>>(msg: S) -> Self {
        EmoError::MetricRead(msg.into())
    }
}
