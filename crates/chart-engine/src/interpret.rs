//! Indicator interpretation
//!
//! Pure functions mapping one indicator's raw reading(s) into a
//! [`TechnicalIndicator`]. Every function here is total over its numeric
//! domain: no error path, no randomness, no external state. The signal is
//! fully determined by the inputs and the fixed thresholds below.

use chart_core::{Signal, TechnicalIndicator};
use serde::{Deserialize, Serialize};

/// RSI at or above this level is overbought
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// RSI at or below this level is oversold
pub const RSI_OVERSOLD: f64 = 30.0;

/// Volume ratio at or above this confirms the move
pub const VOLUME_SURGE_RATIO: f64 = 2.0;
/// Volume ratio at or above this shows rising interest
pub const VOLUME_ELEVATED_RATIO: f64 = 1.5;
/// Volume ratio at or below this shows lack of interest
pub const VOLUME_DRY_RATIO: f64 = 0.5;

/// Body-to-range ratio below which a candle counts as a Doji
pub const DOJI_BODY_RATIO: f64 = 0.1;
/// Lower shadow must exceed this multiple of the body for a Hammer
pub const HAMMER_LOWER_SHADOW_RATIO: f64 = 2.0;
/// Upper shadow must stay under this multiple of the body for a Hammer
pub const HAMMER_UPPER_SHADOW_RATIO: f64 = 0.5;

/// Minimum candles required before pattern detection runs
pub const MIN_PATTERN_CANDLES: usize = 3;

/// MACD line, signal line, and histogram readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdReading {
    pub macd_line: f64,
    pub signal_line: f64,
    pub histogram: f64,
}

/// Current price against the 20/50/200-period moving averages
///
/// `ma50` is accepted for interface completeness but carries no signal
/// weight; only MA20 and MA200 produce indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageReading {
    pub current_price: f64,
    pub ma20: f64,
    pub ma50: f64,
    pub ma200: f64,
}

/// Current price against the Bollinger Band envelope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerReading {
    pub current_price: f64,
    pub upper_band: f64,
    pub middle_band: f64,
    pub lower_band: f64,
}

/// Current volume against its recent average
///
/// `average_volume` must be nonzero; that is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeReading {
    pub current_volume: f64,
    pub average_volume: f64,
}

/// One OHLC candle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Interpret an RSI reading
///
/// Cut points are inclusive at 70 and 30: exactly 70 is overbought,
/// exactly 30 is oversold.
pub fn interpret_rsi(value: f64) -> TechnicalIndicator {
    let (signal, description) = if value >= RSI_OVERBOUGHT {
        (
            Signal::Sell,
            format!("RSI at {value} shows an overbought market, watch for a pullback"),
        )
    } else if value <= RSI_OVERSOLD {
        (
            Signal::Buy,
            format!("RSI at {value} shows an oversold market, a bounce is possible"),
        )
    } else if value >= 50.0 {
        (
            Signal::Hold,
            format!("RSI at {value} shows an upward bias"),
        )
    } else {
        (
            Signal::Hold,
            format!("RSI at {value} shows a downward bias"),
        )
    };

    TechnicalIndicator::new("RSI", value, signal, description)
}

/// Interpret a MACD reading
///
/// A crossover only becomes a buy/sell signal when the histogram confirms
/// it; an unconfirmed crossover is a hold with a directional bias.
pub fn interpret_macd(reading: &MacdReading) -> TechnicalIndicator {
    let (signal, description) = if reading.macd_line > reading.signal_line
        && reading.histogram > 0.0
    {
        (
            Signal::Buy,
            "MACD line crossed above the signal line with a positive histogram, bullish signal"
                .to_string(),
        )
    } else if reading.macd_line < reading.signal_line && reading.histogram < 0.0 {
        (
            Signal::Sell,
            "MACD line crossed below the signal line with a negative histogram, bearish signal"
                .to_string(),
        )
    } else if reading.macd_line > reading.signal_line {
        (
            Signal::Hold,
            "MACD line is above the signal line, upward bias".to_string(),
        )
    } else {
        (
            Signal::Hold,
            "MACD line is below the signal line, downward bias".to_string(),
        )
    };

    TechnicalIndicator::new(
        "MACD",
        format!("{:.4}", reading.macd_line),
        signal,
        description,
    )
}

/// Interpret price position against the moving averages
///
/// Produces two indicators, `MA20` (short-term trend) and `MA200` (primary
/// market direction), each judged independently.
pub fn interpret_moving_averages(reading: &MovingAverageReading) -> Vec<TechnicalIndicator> {
    let mut indicators = Vec::with_capacity(2);

    let (ma20_signal, ma20_description) = if reading.current_price > reading.ma20 {
        (
            Signal::Buy,
            format!(
                "Price is above MA20 ({:.2}), short-term uptrend",
                reading.ma20
            ),
        )
    } else {
        (
            Signal::Sell,
            format!(
                "Price is below MA20 ({:.2}), short-term downtrend",
                reading.ma20
            ),
        )
    };
    indicators.push(TechnicalIndicator::new(
        "MA20",
        format!("{:.2}", reading.ma20),
        ma20_signal,
        ma20_description,
    ));

    let (ma200_signal, ma200_description) = if reading.current_price > reading.ma200 {
        (
            Signal::Buy,
            format!(
                "Price is above MA200 ({:.2}), primary trend is up (bull market)",
                reading.ma200
            ),
        )
    } else {
        (
            Signal::Sell,
            format!(
                "Price is below MA200 ({:.2}), primary trend is down (bear market)",
                reading.ma200
            ),
        )
    };
    indicators.push(TechnicalIndicator::new(
        "MA200",
        format!("{:.2}", reading.ma200),
        ma200_signal,
        ma200_description,
    ));

    indicators
}

/// Interpret price position inside the Bollinger Band envelope
///
/// Band tags (at or beyond the outer bands) signal exhaustion; inside the
/// envelope the middle band splits buying from selling pressure.
pub fn interpret_bollinger(reading: &BollingerReading) -> TechnicalIndicator {
    let (signal, description) = if reading.current_price >= reading.upper_band {
        (
            Signal::Sell,
            format!(
                "Price tagged the upper Bollinger Band ({:.2}), possible overbought",
                reading.upper_band
            ),
        )
    } else if reading.current_price <= reading.lower_band {
        (
            Signal::Buy,
            format!(
                "Price tagged the lower Bollinger Band ({:.2}), possible oversold",
                reading.lower_band
            ),
        )
    } else if reading.current_price > reading.middle_band {
        (
            Signal::Hold,
            format!(
                "Price is above the middle band ({:.2}), buying pressure dominates",
                reading.middle_band
            ),
        )
    } else {
        (
            Signal::Hold,
            format!(
                "Price is below the middle band ({:.2}), selling pressure dominates",
                reading.middle_band
            ),
        )
    };

    TechnicalIndicator::new(
        "Bollinger Bands",
        format!(
            "{:.2} / {:.2} / {:.2}",
            reading.upper_band, reading.middle_band, reading.lower_band
        ),
        signal,
        description,
    )
}

/// Interpret current volume against its average
///
/// The gap between 0.5x and 1.5x average is deliberately neutral: ordinary
/// volume carries no signal.
pub fn interpret_volume(reading: &VolumeReading) -> TechnicalIndicator {
    let ratio = reading.current_volume / reading.average_volume;

    let (signal, description) = if ratio >= VOLUME_SURGE_RATIO {
        (
            Signal::Buy,
            format!("Volume is {ratio:.1}x the average, confirms the move"),
        )
    } else if ratio >= VOLUME_ELEVATED_RATIO {
        (
            Signal::Hold,
            format!("Volume is {ratio:.1}x the average, rising interest"),
        )
    } else if ratio <= VOLUME_DRY_RATIO {
        (
            Signal::Neutral,
            "Volume is below average, lack of interest".to_string(),
        )
    } else {
        (
            Signal::Neutral,
            "Volume is normal, no clear signal".to_string(),
        )
    };

    TechnicalIndicator::new("Volume", reading.current_volume, signal, description)
}

/// Detect candlestick patterns on the most recent candle
///
/// Needs at least [`MIN_PATTERN_CANDLES`] candles of context; with fewer,
/// no patterns are emitted. The Doji and Hammer checks are independent, so
/// zero, one, or two patterns can come back for one candle. A zero-range
/// candle (high == low) is never a Doji; the ratio is not computed for it.
pub fn detect_candlestick_patterns(candles: &[Candle]) -> Vec<TechnicalIndicator> {
    let mut patterns = Vec::new();

    if candles.len() < MIN_PATTERN_CANDLES {
        return patterns;
    }

    let latest = &candles[candles.len() - 1];
    let body_size = (latest.close - latest.open).abs();
    let range = latest.high - latest.low;

    if range > 0.0 && body_size / range < DOJI_BODY_RATIO {
        patterns.push(TechnicalIndicator::new(
            "Doji",
            "Detected",
            Signal::Neutral,
            "Doji candle found, the market is undecided and may reverse direction",
        ));
    }

    let lower_shadow = latest.open.min(latest.close) - latest.low;
    let upper_shadow = latest.high - latest.open.max(latest.close);

    if lower_shadow > body_size * HAMMER_LOWER_SHADOW_RATIO
        && upper_shadow < body_size * HAMMER_UPPER_SHADOW_RATIO
    {
        patterns.push(TechnicalIndicator::new(
            "Hammer",
            "Detected",
            Signal::Buy,
            "Hammer candle found, bounce signal",
        ));
    }

    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::IndicatorValue;

    #[test]
    fn test_rsi_overbought_inclusive() {
        assert_eq!(interpret_rsi(70.0).signal, Signal::Sell);
        assert_eq!(interpret_rsi(85.0).signal, Signal::Sell);
    }

    #[test]
    fn test_rsi_oversold_inclusive() {
        assert_eq!(interpret_rsi(30.0).signal, Signal::Buy);
        assert_eq!(interpret_rsi(12.5).signal, Signal::Buy);
    }

    #[test]
    fn test_rsi_middle_band_holds() {
        let upward = interpret_rsi(55.0);
        assert_eq!(upward.signal, Signal::Hold);
        assert!(upward.description.contains("upward"));

        let downward = interpret_rsi(45.0);
        assert_eq!(downward.signal, Signal::Hold);
        assert!(downward.description.contains("downward"));

        assert_eq!(interpret_rsi(50.0).signal, Signal::Hold);
        assert_eq!(interpret_rsi(69.9).signal, Signal::Hold);
        assert_eq!(interpret_rsi(30.1).signal, Signal::Hold);
    }

    #[test]
    fn test_rsi_signals_mutually_exclusive() {
        // Sweep the domain; every value maps to exactly one branch.
        let mut v = 0.0;
        while v <= 100.0 {
            let indicator = interpret_rsi(v);
            match indicator.signal {
                Signal::Sell => assert!(v >= 70.0),
                Signal::Buy => assert!(v <= 30.0),
                Signal::Hold => assert!(v > 30.0 && v < 70.0),
                Signal::Neutral => panic!("RSI never yields NEUTRAL, got it at {v}"),
            }
            v += 0.5;
        }
    }

    #[test]
    fn test_macd_confirmed_crossovers() {
        let buy = interpret_macd(&MacdReading {
            macd_line: 1.0,
            signal_line: 0.5,
            histogram: 0.2,
        });
        assert_eq!(buy.signal, Signal::Buy);

        let sell = interpret_macd(&MacdReading {
            macd_line: 0.2,
            signal_line: 0.5,
            histogram: -0.1,
        });
        assert_eq!(sell.signal, Signal::Sell);
    }

    #[test]
    fn test_macd_unconfirmed_crossover_holds() {
        let hold = interpret_macd(&MacdReading {
            macd_line: 0.6,
            signal_line: 0.5,
            histogram: -0.1,
        });
        assert_eq!(hold.signal, Signal::Hold);
        assert!(hold.description.contains("above"));

        let below = interpret_macd(&MacdReading {
            macd_line: 0.4,
            signal_line: 0.5,
            histogram: 0.1,
        });
        assert_eq!(below.signal, Signal::Hold);
        assert!(below.description.contains("below"));
    }

    #[test]
    fn test_macd_value_formatted_to_four_decimals() {
        let indicator = interpret_macd(&MacdReading {
            macd_line: 1.23456,
            signal_line: 0.5,
            histogram: 0.2,
        });
        assert_eq!(indicator.value, IndicatorValue::Text("1.2346".to_string()));
    }

    #[test]
    fn test_moving_averages_above_both() {
        let indicators = interpret_moving_averages(&MovingAverageReading {
            current_price: 105.0,
            ma20: 100.0,
            ma50: 95.0,
            ma200: 90.0,
        });
        assert_eq!(indicators.len(), 2);
        assert_eq!(indicators[0].name, "MA20");
        assert_eq!(indicators[0].signal, Signal::Buy);
        assert_eq!(indicators[1].name, "MA200");
        assert_eq!(indicators[1].signal, Signal::Buy);
    }

    #[test]
    fn test_moving_averages_below_both() {
        let indicators = interpret_moving_averages(&MovingAverageReading {
            current_price: 95.0,
            ma20: 100.0,
            ma50: 105.0,
            ma200: 110.0,
        });
        assert_eq!(indicators[0].signal, Signal::Sell);
        assert_eq!(indicators[1].signal, Signal::Sell);
    }

    #[test]
    fn test_moving_average_values_two_decimals() {
        let indicators = interpret_moving_averages(&MovingAverageReading {
            current_price: 105.0,
            ma20: 100.456,
            ma50: 95.0,
            ma200: 90.123,
        });
        assert_eq!(indicators[0].value, IndicatorValue::Text("100.46".to_string()));
        assert_eq!(indicators[1].value, IndicatorValue::Text("90.12".to_string()));
    }

    #[test]
    fn test_bollinger_band_tags() {
        let reading = BollingerReading {
            current_price: 105.0,
            upper_band: 104.0,
            middle_band: 98.0,
            lower_band: 90.0,
        };
        assert_eq!(interpret_bollinger(&reading).signal, Signal::Sell);

        let oversold = BollingerReading {
            current_price: 85.0,
            ..reading
        };
        assert_eq!(interpret_bollinger(&oversold).signal, Signal::Buy);
    }

    #[test]
    fn test_bollinger_inside_envelope_holds() {
        let reading = BollingerReading {
            current_price: 100.0,
            upper_band: 104.0,
            middle_band: 98.0,
            lower_band: 90.0,
        };
        let above_middle = interpret_bollinger(&reading);
        assert_eq!(above_middle.signal, Signal::Hold);
        assert!(above_middle.description.contains("buying"));

        let below_middle = interpret_bollinger(&BollingerReading {
            current_price: 95.0,
            ..reading
        });
        assert_eq!(below_middle.signal, Signal::Hold);
        assert!(below_middle.description.contains("selling"));
    }

    #[test]
    fn test_bollinger_value_format() {
        let indicator = interpret_bollinger(&BollingerReading {
            current_price: 100.0,
            upper_band: 104.0,
            middle_band: 98.0,
            lower_band: 90.0,
        });
        assert_eq!(
            indicator.value,
            IndicatorValue::Text("104.00 / 98.00 / 90.00".to_string())
        );
    }

    #[test]
    fn test_volume_thresholds() {
        let surge = interpret_volume(&VolumeReading {
            current_volume: 300.0,
            average_volume: 100.0,
        });
        assert_eq!(surge.signal, Signal::Buy);

        let elevated = interpret_volume(&VolumeReading {
            current_volume: 160.0,
            average_volume: 100.0,
        });
        assert_eq!(elevated.signal, Signal::Hold);

        let dry = interpret_volume(&VolumeReading {
            current_volume: 40.0,
            average_volume: 100.0,
        });
        assert_eq!(dry.signal, Signal::Neutral);
        assert!(dry.description.contains("lack of interest"));
    }

    #[test]
    fn test_volume_boundaries_exact() {
        // Inclusive on the documented sides: 2.0 buys, 1.5 holds, 0.5 is dry.
        let at_two = interpret_volume(&VolumeReading {
            current_volume: 200.0,
            average_volume: 100.0,
        });
        assert_eq!(at_two.signal, Signal::Buy);

        let at_one_five = interpret_volume(&VolumeReading {
            current_volume: 150.0,
            average_volume: 100.0,
        });
        assert_eq!(at_one_five.signal, Signal::Hold);

        let at_half = interpret_volume(&VolumeReading {
            current_volume: 50.0,
            average_volume: 100.0,
        });
        assert_eq!(at_half.signal, Signal::Neutral);
        assert!(at_half.description.contains("lack of interest"));

        let ordinary = interpret_volume(&VolumeReading {
            current_volume: 100.0,
            average_volume: 100.0,
        });
        assert_eq!(ordinary.signal, Signal::Neutral);
        assert!(ordinary.description.contains("no clear signal"));
    }

    fn padded(latest: Candle) -> Vec<Candle> {
        let filler = Candle {
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.5,
        };
        vec![filler, filler, latest]
    }

    #[test]
    fn test_doji_detection() {
        let patterns = detect_candlestick_patterns(&padded(Candle {
            open: 100.0,
            close: 100.02,
            high: 101.0,
            low: 99.0,
        }));
        assert!(patterns.iter().any(|p| p.name == "Doji"));
        let doji = patterns.iter().find(|p| p.name == "Doji").unwrap();
        assert_eq!(doji.signal, Signal::Neutral);
    }

    #[test]
    fn test_hammer_detection() {
        let patterns = detect_candlestick_patterns(&padded(Candle {
            open: 100.0,
            close: 102.0,
            high: 102.1,
            low: 95.0,
        }));
        assert!(patterns.iter().any(|p| p.name == "Hammer"));
        let hammer = patterns.iter().find(|p| p.name == "Hammer").unwrap();
        assert_eq!(hammer.signal, Signal::Buy);
    }

    #[test]
    fn test_zero_range_candle_is_not_a_doji() {
        let patterns = detect_candlestick_patterns(&padded(Candle {
            open: 100.0,
            close: 100.0,
            high: 100.0,
            low: 100.0,
        }));
        assert!(patterns.iter().all(|p| p.name != "Doji"));
    }

    #[test]
    fn test_too_few_candles_emits_nothing() {
        let doji = Candle {
            open: 100.0,
            close: 100.02,
            high: 101.0,
            low: 99.0,
        };
        assert!(detect_candlestick_patterns(&[doji, doji]).is_empty());
    }

    #[test]
    fn test_only_latest_candle_is_classified() {
        // A Doji earlier in the series must not fire.
        let doji = Candle {
            open: 100.0,
            close: 100.02,
            high: 101.0,
            low: 99.0,
        };
        let plain = Candle {
            open: 100.0,
            high: 110.0,
            low: 99.0,
            close: 109.0,
        };
        let patterns = detect_candlestick_patterns(&[doji, plain, plain]);
        assert!(patterns.iter().all(|p| p.name != "Doji"));
    }
}
