//! Indicator readings derived from an OHLCV series
//!
//! Mode B callers usually hold a candle series rather than pre-computed
//! indicator values. This module turns a caller-provided series into the
//! raw readings the interpreter consumes. The engine still acquires no
//! market data; the series arrives from outside.
//!
//! Indicators whose warm-up period exceeds the available history are
//! omitted from the readings rather than reported as errors.

use crate::error::{EngineError, Result};
use crate::interpret::{
    BollingerReading, Candle, MacdReading, MovingAverageReading, VolumeReading,
};
use crate::normalize::IndicatorReadings;
use serde::{Deserialize, Serialize};
use ta::{
    Next,
    indicators::{
        BollingerBands, MovingAverageConvergenceDivergence, RelativeStrengthIndex,
        SimpleMovingAverage,
    },
};

/// RSI warm-up period
pub const RSI_PERIOD: usize = 14;
/// Short moving average period
pub const MA_SHORT: usize = 20;
/// Medium moving average period
pub const MA_MEDIUM: usize = 50;
/// Long moving average period
pub const MA_LONG: usize = 200;
/// Bollinger Band period and width
pub const BB_PERIOD: usize = 20;
const BB_MULTIPLIER: f64 = 2.0;
/// MACD EMA periods (fast/slow/signal)
const MACD_FAST: usize = 12;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;
/// Bars averaged for the volume baseline
pub const VOLUME_LOOKBACK: usize = 20;

/// One OHLCV bar of a caller-provided series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesBar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl SeriesBar {
    /// The OHLC portion, for pattern detection
    pub fn candle(&self) -> Candle {
        Candle {
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
        }
    }
}

/// Derive indicator readings from an OHLCV series
///
/// The most recent bar is the "current" one. History requirements per
/// reading: RSI needs more than [`RSI_PERIOD`] bars, MACD at least the
/// slow EMA period, moving averages and Bollinger Bands at least
/// [`MA_SHORT`] bars (the longer averages are computed over whatever
/// history exists, matching how a charting window behaves). The volume
/// baseline averages the last [`VOLUME_LOOKBACK`] bars and is omitted
/// when it would be zero.
pub fn readings_from_series(bars: &[SeriesBar]) -> Result<IndicatorReadings> {
    let mut readings = IndicatorReadings {
        candles: bars.iter().map(SeriesBar::candle).collect(),
        ..IndicatorReadings::default()
    };

    let Some(latest) = bars.last() else {
        return Ok(readings);
    };
    let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();

    if closes.len() > RSI_PERIOD {
        let mut rsi = RelativeStrengthIndex::new(RSI_PERIOD)
            .map_err(|e| EngineError::IndicatorError(e.to_string()))?;
        let mut last = None;
        for &close in &closes {
            last = Some(rsi.next(close));
        }
        readings.rsi = last;
    }

    if closes.len() >= MACD_SLOW {
        let mut macd = MovingAverageConvergenceDivergence::new(MACD_FAST, MACD_SLOW, MACD_SIGNAL)
            .map_err(|e| EngineError::IndicatorError(e.to_string()))?;
        let mut last = None;
        for &close in &closes {
            last = Some(macd.next(close));
        }
        readings.macd = last.map(|out| MacdReading {
            macd_line: out.macd,
            signal_line: out.signal,
            histogram: out.histogram,
        });
    }

    if closes.len() >= MA_SHORT {
        let ma20 = last_sma(&closes, MA_SHORT)?;
        let ma50 = last_sma(&closes, MA_MEDIUM.min(closes.len()))?;
        let ma200 = last_sma(&closes, MA_LONG.min(closes.len()))?;
        readings.moving_averages = Some(MovingAverageReading {
            current_price: latest.close,
            ma20,
            ma50,
            ma200,
        });

        let mut bb = BollingerBands::new(BB_PERIOD, BB_MULTIPLIER)
            .map_err(|e| EngineError::IndicatorError(e.to_string()))?;
        let mut last = None;
        for &close in &closes {
            last = Some(bb.next(close));
        }
        readings.bollinger = last.map(|out| BollingerReading {
            current_price: latest.close,
            upper_band: out.upper,
            middle_band: out.average,
            lower_band: out.lower,
        });
    }

    let lookback = &bars[bars.len().saturating_sub(VOLUME_LOOKBACK)..];
    let average_volume =
        lookback.iter().map(|bar| bar.volume).sum::<f64>() / lookback.len() as f64;
    if average_volume > 0.0 {
        readings.volume = Some(VolumeReading {
            current_volume: latest.volume,
            average_volume,
        });
    }

    Ok(readings)
}

fn last_sma(closes: &[f64], period: usize) -> Result<f64> {
    let mut sma = SimpleMovingAverage::new(period)
        .map_err(|e| EngineError::IndicatorError(e.to_string()))?;
    let mut last = 0.0;
    for &close in closes {
        last = sma.next(close);
    }
    Ok(last)
}
