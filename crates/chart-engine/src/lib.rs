//! Signal interpretation and aggregation engine
//!
//! This crate turns raw chart observations into one validated
//! [`ChartAnalysis`](chart_core::ChartAnalysis). It has two halves:
//!
//! - **Indicator interpreter** ([`interpret`]): pure functions mapping one
//!   indicator's numeric reading(s) into a typed signal with a deterministic
//!   rationale, using fixed thresholds per indicator kind.
//! - **Analysis aggregator** ([`extract`], [`normalize`]): takes the text an
//!   image-understanding model produced (which may or may not embed valid
//!   JSON) or direct numeric readings, and always assembles a complete,
//!   schema-valid result. Malformed upstream content degrades to documented
//!   defaults; it never becomes an error.
//!
//! The only failure the engine surfaces is the provider call itself
//! ([`analyzer::ChartAnalyzer`]), which is fatal for that request. Every
//! invocation is independent: no shared state, no locking, safe to run
//! concurrently.

pub mod analyzer;
pub mod compute;
pub mod config;
pub mod error;
pub mod extract;
pub mod interpret;
pub mod normalize;

// Re-export main types for convenience
pub use analyzer::ChartAnalyzer;
pub use compute::{SeriesBar, readings_from_series};
pub use config::{AnalyzerConfig, DEFAULT_MODEL};
pub use error::{EngineError, Result};
pub use extract::extract_json_object;
pub use interpret::{
    BollingerReading, Candle, MacdReading, MovingAverageReading, VolumeReading,
    detect_candlestick_patterns, interpret_bollinger, interpret_macd,
    interpret_moving_averages, interpret_rsi, interpret_volume,
};
pub use normalize::{
    AnalysisOverrides, IndicatorReadings, analysis_from_readings, analysis_from_text,
    default_analysis,
};

// Re-export the canonical result types and the provider surface
pub use chart_core::{
    ChartAnalysis, IndicatorValue, KeyLevels, Recommendation, Signal, TechnicalIndicator,
    TradeAction, Trend,
};
pub use chart_vision::{ChartVisionProvider, Language};
