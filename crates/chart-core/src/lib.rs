//! Canonical data model for chart analysis
//!
//! This crate defines the types shared by every layer of the analyzer:
//!
//! - Closed signal categories ([`Signal`], [`Trend`], [`TradeAction`])
//! - Per-indicator readings ([`TechnicalIndicator`], [`IndicatorValue`])
//! - Key price levels and the trading recommendation
//! - The [`ChartAnalysis`] result value produced once per request
//!
//! All wire-facing types serialize with the upstream camelCase/uppercase
//! field contract, so a `ChartAnalysis` round-trips through JSON unchanged.

pub mod analysis;
pub mod error;
pub mod signal;

pub use analysis::{
    ChartAnalysis, IndicatorValue, KeyLevels, Recommendation, TechnicalIndicator,
};
pub use error::{Error, Result};
pub use signal::{Signal, TradeAction, Trend};
