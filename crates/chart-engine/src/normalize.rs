//! Candidate normalization and aggregation
//!
//! The upstream payload is untrusted: fields may be absent, mistyped, or
//! missing entirely. Everything here decodes into a permissive
//! `serde_json::Value` first and then runs an explicit per-field normalizer
//! that produces the canonical [`ChartAnalysis`] - the decoded object is
//! never trust-cast into the canonical type.
//!
//! Nothing in this module returns an error. Malformed content degrades to
//! the documented defaults, and the verbatim upstream text always survives
//! in `raw_analysis` for post-hoc diagnosis.

use crate::extract::extract_json_object;
use crate::interpret::{
    self, BollingerReading, Candle, MacdReading, MovingAverageReading, VolumeReading,
};
use chart_core::{
    ChartAnalysis, IndicatorValue, KeyLevels, Recommendation, TechnicalIndicator, TradeAction,
    Trend,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Confidence used when the candidate supplies nothing usable
pub const DEFAULT_CONFIDENCE: u8 = 50;

const FALLBACK_REASONING: &str = "Unable to parse detailed analysis";

/// The fixed, safe fallback used whenever structured extraction fails
///
/// `raw` is retained verbatim as the audit trail.
pub fn default_analysis(raw: impl Into<String>) -> ChartAnalysis {
    ChartAnalysis::new(
        Trend::Sideways,
        DEFAULT_CONFIDENCE,
        KeyLevels::empty(),
        Vec::new(),
        Recommendation::new(TradeAction::Hold, FALLBACK_REASONING),
        raw,
    )
}

/// Build a [`ChartAnalysis`] from raw upstream text (input mode A)
///
/// Locates the first balanced JSON object in the text, decodes it, and
/// normalizes field by field. Extraction or decode failure is not an
/// error: the result degrades to [`default_analysis`]. The returned
/// analysis always carries a fresh id, the construction timestamp, and an
/// empty `image_url` for the boundary layer to bind.
pub fn analysis_from_text(raw: &str) -> ChartAnalysis {
    let candidate = extract_json_object(raw)
        .and_then(|slice| serde_json::from_str::<Value>(slice).ok());

    match candidate {
        Some(Value::Object(map)) => normalize_candidate(&map, raw),
        _ => {
            debug!("no usable JSON object in upstream text, using default analysis");
            default_analysis(raw)
        }
    }
}

/// Caller-supplied fields for input mode B
///
/// Anything left `None` falls back to the same defaults mode A uses.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOverrides {
    pub trend: Option<Trend>,
    pub confidence: Option<u8>,
    pub key_levels: Option<KeyLevels>,
    pub recommendation: Option<Recommendation>,
}

/// Raw numeric readings per indicator kind (input mode B)
///
/// Every field is optional; only the supplied readings are evaluated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorReadings {
    pub rsi: Option<f64>,
    pub macd: Option<MacdReading>,
    pub moving_averages: Option<MovingAverageReading>,
    pub bollinger: Option<BollingerReading>,
    pub volume: Option<VolumeReading>,
    #[serde(default)]
    pub candles: Vec<Candle>,
}

/// Build a [`ChartAnalysis`] from direct numeric readings (input mode B)
///
/// Readings are forwarded to the interpreter in a fixed evaluation order:
/// RSI, MACD, moving averages, Bollinger Bands, volume, candlestick
/// patterns. The `indicators` sequence preserves that order.
pub fn analysis_from_readings(
    readings: &IndicatorReadings,
    overrides: AnalysisOverrides,
) -> ChartAnalysis {
    let mut indicators = Vec::new();

    if let Some(rsi) = readings.rsi {
        indicators.push(interpret::interpret_rsi(rsi));
    }
    if let Some(macd) = &readings.macd {
        indicators.push(interpret::interpret_macd(macd));
    }
    if let Some(mas) = &readings.moving_averages {
        indicators.extend(interpret::interpret_moving_averages(mas));
    }
    if let Some(bollinger) = &readings.bollinger {
        indicators.push(interpret::interpret_bollinger(bollinger));
    }
    if let Some(volume) = &readings.volume {
        indicators.push(interpret::interpret_volume(volume));
    }
    indicators.extend(interpret::detect_candlestick_patterns(&readings.candles));

    ChartAnalysis::new(
        overrides.trend.unwrap_or_default(),
        overrides.confidence.unwrap_or(DEFAULT_CONFIDENCE),
        overrides.key_levels.unwrap_or_default(),
        indicators,
        overrides.recommendation.unwrap_or_default(),
        String::new(),
    )
}

/// Normalize a decoded candidate object field by field
///
/// `id` and `timestamp` are never trusted from the candidate; they are
/// always engine-assigned at construction.
fn normalize_candidate(map: &Map<String, Value>, raw: &str) -> ChartAnalysis {
    let trend = map
        .get("trend")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<Trend>().ok())
        .unwrap_or_default();

    let confidence = normalize_confidence(map.get("confidence"));
    let key_levels = normalize_key_levels(map.get("keyLevels"));
    let indicators = normalize_indicators(map.get("indicators"));
    let recommendation = normalize_recommendation(map.get("recommendation"));

    ChartAnalysis::new(trend, confidence, key_levels, indicators, recommendation, raw)
}

/// Coerce a JSON value into a price/level number
///
/// Accepts numbers and numeric strings; everything else is `None`.
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Coerce confidence, clamped to `[0, 100]`
///
/// The upstream contract says 0-100 but the model is free to misbehave;
/// clamping keeps the published invariant true. Unusable values default
/// to [`DEFAULT_CONFIDENCE`].
fn normalize_confidence(value: Option<&Value>) -> u8 {
    match coerce_number(value) {
        Some(n) if n.is_finite() => n.round().clamp(0.0, 100.0) as u8,
        _ => DEFAULT_CONFIDENCE,
    }
}

/// Numbers survive in input order; non-numeric entries are dropped
fn normalize_level_list(value: Option<&Value>) -> Vec<f64> {
    value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| coerce_number(Some(entry)))
                .collect()
        })
        .unwrap_or_default()
}

fn normalize_key_levels(value: Option<&Value>) -> KeyLevels {
    match value.and_then(Value::as_object) {
        Some(levels) => KeyLevels {
            support: normalize_level_list(levels.get("support")),
            resistance: normalize_level_list(levels.get("resistance")),
        },
        None => KeyLevels::empty(),
    }
}

fn normalize_indicators(value: Option<&Value>) -> Vec<TechnicalIndicator> {
    value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(normalize_indicator_entry)
                .collect()
        })
        .unwrap_or_default()
}

/// An entry needs at least a name and a usable value to survive; an
/// unknown signal string degrades to NEUTRAL rather than killing the entry
fn normalize_indicator_entry(entry: &Value) -> Option<TechnicalIndicator> {
    let entry = entry.as_object()?;
    let name = entry.get("name")?.as_str()?;

    let value = match entry.get("value")? {
        Value::Number(n) => IndicatorValue::Number(n.as_f64()?),
        Value::String(s) => IndicatorValue::Text(s.clone()),
        _ => return None,
    };

    let signal = entry
        .get("signal")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();

    let description = entry
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Some(TechnicalIndicator::new(name, value, signal, description))
}

fn normalize_recommendation(value: Option<&Value>) -> Recommendation {
    let Some(rec) = value.and_then(Value::as_object) else {
        return Recommendation::default();
    };

    let action = rec
        .get("action")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<TradeAction>().ok())
        .unwrap_or_default();

    let reasoning = rec
        .get("reasoning")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("No specific recommendation available");

    Recommendation::new(action, reasoning).with_levels(
        coerce_number(rec.get("entryPoint")),
        coerce_number(rec.get("stopLoss")),
        coerce_number(rec.get("takeProfit")),
    )
}
