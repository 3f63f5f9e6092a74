//! Closed signal categories
//!
//! The upstream payload carries these as loosely-typed strings. They are
//! modeled as closed enums with exhaustive matching at every consumption
//! site, so a new category cannot silently fall through.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Per-indicator signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    /// Bullish reading, entry favored
    Buy,
    /// Bearish reading, exit favored
    Sell,
    /// Directional bias without an actionable edge
    Hold,
    /// No directional information
    #[default]
    Neutral,
}

impl Signal {
    /// Wire representation (`"BUY"`, `"SELL"`, `"HOLD"`, `"NEUTRAL"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
            Signal::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Signal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(Signal::Buy),
            "SELL" => Ok(Signal::Sell),
            "HOLD" => Ok(Signal::Hold),
            "NEUTRAL" => Ok(Signal::Neutral),
            other => Err(Error::UnknownSignal(other.to_string())),
        }
    }
}

/// Overall chart trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    /// Higher highs and higher lows
    Bullish,
    /// Lower highs and lower lows
    Bearish,
    /// No dominant direction
    #[default]
    Sideways,
}

impl Trend {
    /// Wire representation (`"BULLISH"`, `"BEARISH"`, `"SIDEWAYS"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Bullish => "BULLISH",
            Trend::Bearish => "BEARISH",
            Trend::Sideways => "SIDEWAYS",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BULLISH" => Ok(Trend::Bullish),
            "BEARISH" => Ok(Trend::Bearish),
            "SIDEWAYS" => Ok(Trend::Sideways),
            other => Err(Error::UnknownTrend(other.to_string())),
        }
    }
}

/// Final trading recommendation action
///
/// Unlike [`Signal`] there is no neutral variant: the recommendation always
/// resolves to something actionable, with `Hold` as the safe default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    /// Open or add to a long position
    Buy,
    /// Close or reduce the position
    Sell,
    /// Stay put
    #[default]
    Hold,
}

impl TradeAction {
    /// Wire representation (`"BUY"`, `"SELL"`, `"HOLD"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
            TradeAction::Hold => "HOLD",
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(TradeAction::Buy),
            "SELL" => Ok(TradeAction::Sell),
            "HOLD" => Ok(TradeAction::Hold),
            other => Err(Error::UnknownAction(other.to_string())),
        }
    }
}
