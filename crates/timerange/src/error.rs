//! Error types for time range operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeRangeError {
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Malformed interval: {0}")]
    MalformedInterval(String),
}

pub type Result<T> = std::result::Result<T, TimeRangeError>;
