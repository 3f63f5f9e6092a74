//! Error types for the analysis engine
//!
//! Two tiers: anything wrong with upstream *content* is absorbed by the
//! aggregator and never appears here; only the provider call itself (and
//! local misconfiguration) can fail.

use thiserror::Error;

/// Engine-specific errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// The upstream provider call failed entirely (fatal tier)
    #[error("vision provider error: {0}")]
    Provider(#[from] chart_vision::VisionError),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Technical indicator calculation error
    #[error("technical indicator error: {0}")]
    IndicatorError(String),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
