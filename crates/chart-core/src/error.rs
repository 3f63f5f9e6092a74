//! Error types for chart-core

use thiserror::Error;

/// Result type alias for chart-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for data-model operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// String does not name a known signal category
    #[error("unknown signal: {0}")]
    UnknownSignal(String),

    /// String does not name a known trend
    #[error("unknown trend: {0}")]
    UnknownTrend(String),

    /// String does not name a known trade action
    #[error("unknown trade action: {0}")]
    UnknownAction(String),
}
