//! Analysis result types
//!
//! [`ChartAnalysis`] is the canonical output of one analysis request. It is
//! constructed exactly once per request, is never mutated after being
//! returned, and carries no shared state - the caller receives a plain value
//! it may persist, serialize, or discard.

use crate::signal::{Signal, TradeAction, Trend};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// An indicator reading: a bare number for most indicators, a formatted
/// string for composite ones (MACD, Bollinger Bands)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorValue {
    /// Numeric reading (RSI level, MA price, volume)
    Number(f64),
    /// Formatted composite reading (e.g. `"104.00 / 98.00 / 90.00"`)
    Text(String),
}

impl From<f64> for IndicatorValue {
    fn from(value: f64) -> Self {
        IndicatorValue::Number(value)
    }
}

impl From<String> for IndicatorValue {
    fn from(value: String) -> Self {
        IndicatorValue::Text(value)
    }
}

impl From<&str> for IndicatorValue {
    fn from(value: &str) -> Self {
        IndicatorValue::Text(value.to_string())
    }
}

impl fmt::Display for IndicatorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorValue::Number(n) => write!(f, "{n}"),
            IndicatorValue::Text(s) => f.write_str(s),
        }
    }
}

/// One evaluated technical indicator
///
/// The signal is fully determined by the indicator name and its raw inputs;
/// the description is the deterministic rationale for that signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIndicator {
    /// Indicator identifier (e.g. "RSI", "MACD", "MA20", "Bollinger Bands")
    pub name: String,
    /// Raw or formatted reading
    pub value: IndicatorValue,
    /// Interpreted signal
    pub signal: Signal,
    /// Human-readable rationale derived from name, value, and thresholds
    pub description: String,
}

impl TechnicalIndicator {
    /// Create an indicator reading
    pub fn new(
        name: impl Into<String>,
        value: impl Into<IndicatorValue>,
        signal: Signal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            signal,
            description: description.into(),
        }
    }
}

/// Support and resistance price levels, in order of discovery
///
/// No dedup or sort is imposed: levels appear exactly as extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct KeyLevels {
    /// Prices where downward moves have historically stalled
    pub support: Vec<f64>,
    /// Prices where upward moves have historically stalled
    pub resistance: Vec<f64>,
}

impl KeyLevels {
    /// Levels with no entries on either side
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when neither side has any levels
    pub fn is_empty(&self) -> bool {
        self.support.is_empty() && self.resistance.is_empty()
    }
}

/// Final trading recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// What to do
    pub action: TradeAction,
    /// Suggested entry price, when actionable and known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<f64>,
    /// Protective stop price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    /// Profit target price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,
    /// Non-empty justification for the action
    pub reasoning: String,
}

impl Recommendation {
    /// Create a recommendation without price levels
    pub fn new(action: TradeAction, reasoning: impl Into<String>) -> Self {
        Self {
            action,
            entry_point: None,
            stop_loss: None,
            take_profit: None,
            reasoning: reasoning.into(),
        }
    }

    /// Attach entry/stop/target levels
    pub fn with_levels(
        mut self,
        entry_point: Option<f64>,
        stop_loss: Option<f64>,
        take_profit: Option<f64>,
    ) -> Self {
        self.entry_point = entry_point;
        self.stop_loss = stop_loss;
        self.take_profit = take_profit;
        self
    }
}

impl Default for Recommendation {
    fn default() -> Self {
        Self::new(
            TradeAction::Hold,
            "No specific recommendation available",
        )
    }
}

/// The canonical output of one chart analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartAnalysis {
    /// Opaque unique identifier, generated fresh per analysis
    pub id: Uuid,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Pass-through reference to the source image, filled in by the caller
    pub image_url: String,
    /// Overall trend classification
    pub trend: Trend,
    /// Confidence in the trend call, 0-100
    pub confidence: u8,
    /// Key support/resistance levels
    pub key_levels: KeyLevels,
    /// Evaluated indicators, in order of evaluation/extraction
    pub indicators: Vec<TechnicalIndicator>,
    /// Final trading recommendation
    pub recommendation: Recommendation,
    /// Verbatim upstream text the result was derived from (audit trail)
    pub raw_analysis: String,
}

impl ChartAnalysis {
    /// Construct a new analysis with a fresh id and the current timestamp
    ///
    /// `image_url` starts empty; the boundary layer binds it after
    /// construction via [`ChartAnalysis::with_image_url`].
    pub fn new(
        trend: Trend,
        confidence: u8,
        key_levels: KeyLevels,
        indicators: Vec<TechnicalIndicator>,
        recommendation: Recommendation,
        raw_analysis: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            image_url: String::new(),
            trend,
            confidence,
            key_levels,
            indicators,
            recommendation,
            raw_analysis: raw_analysis.into(),
        }
    }

    /// Bind the source-image reference (late-bound, boundary responsibility)
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Indicators that resolved to the given signal
    pub fn indicators_with_signal(&self, signal: Signal) -> Vec<&TechnicalIndicator> {
        self.indicators
            .iter()
            .filter(|i| i.signal == signal)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_analysis() -> ChartAnalysis {
        ChartAnalysis::new(
            Trend::Bullish,
            85,
            KeyLevels {
                support: vec![42000.0, 41500.0],
                resistance: vec![45000.0, 46000.0],
            },
            vec![TechnicalIndicator::new(
                "RSI",
                45.0,
                Signal::Hold,
                "RSI at 45 shows a mild downward bias",
            )],
            Recommendation::new(TradeAction::Buy, "Momentum confirms the breakout")
                .with_levels(Some(43000.0), Some(41800.0), Some(46500.0)),
            "raw model output",
        )
    }

    #[test]
    fn test_fresh_identity_per_analysis() {
        let a = sample_analysis();
        let b = sample_analysis();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_image_url_late_binding() {
        let analysis = sample_analysis();
        assert!(analysis.image_url.is_empty());

        let bound = analysis.with_image_url("data:image/png;base64,AAAA");
        assert_eq!(bound.image_url, "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_serialized_field_contract() {
        let json = serde_json::to_value(sample_analysis()).unwrap();
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("keyLevels").is_some());
        assert!(json.get("rawAnalysis").is_some());
        assert_eq!(json["trend"], "BULLISH");
        assert_eq!(json["recommendation"]["action"], "BUY");
        assert_eq!(json["recommendation"]["entryPoint"], 43000.0);
    }

    #[test]
    fn test_optional_levels_omitted() {
        let json = serde_json::to_value(Recommendation::default()).unwrap();
        assert!(json.get("entryPoint").is_none());
        assert!(json.get("stopLoss").is_none());
        assert!(json.get("takeProfit").is_none());
        assert_eq!(json["reasoning"], "No specific recommendation available");
    }

    #[test]
    fn test_indicator_value_untagged() {
        let number: IndicatorValue = serde_json::from_str("42.5").unwrap();
        assert_eq!(number, IndicatorValue::Number(42.5));

        let text: IndicatorValue = serde_json::from_str("\"104.00 / 98.00 / 90.00\"").unwrap();
        assert_eq!(text, IndicatorValue::Text("104.00 / 98.00 / 90.00".into()));
    }

    #[test]
    fn test_indicators_with_signal() {
        let analysis = sample_analysis();
        assert_eq!(analysis.indicators_with_signal(Signal::Hold).len(), 1);
        assert!(analysis.indicators_with_signal(Signal::Sell).is_empty());
    }

    #[test]
    fn test_key_levels_empty() {
        assert!(KeyLevels::empty().is_empty());
        let levels = KeyLevels {
            support: vec![1.0],
            resistance: vec![],
        };
        assert!(!levels.is_empty());
    }
}
