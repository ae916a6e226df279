// src/data/validation.rs
use crate::errors::ValidationError;
use crate::types::{Candle, PriceWindow};

/// Checks the invariants the analysis relies on. An empty table is valid.
pub fn validate_candles(candles: &[Candle]) -> Result<(), ValidationError> {
    for (row, candle) in candles.iter().enumerate() {
        for (field, value) in [
            ("open", candle.open),
            ("high", candle.high),
            ("low", candle.low),
            ("close", candle.close),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidPrice { row, field, value });
            }
        }

        if candle.high < candle.low {
            return Err(ValidationError::HighBelowLow {
                row,
                high: candle.high,
                low: candle.low,
            });
        }

        if row > 0 {
            let previous = candles[row - 1].time;
            if candle.time <= previous {
                return Err(ValidationError::NonChronological {
                    row,
                    previous,
                    current: candle.time,
                });
            }
        }
    }
    Ok(())
}

/// Highest high and lowest low of the last `lookback` candles.
pub fn recent_price_window(candles: &[Candle], lookback: usize) -> Option<PriceWindow> {
    let start = candles.len().saturating_sub(lookback.max(1));
    let recent = &candles[start..];
    let first = recent.first()?;

    Some(recent.iter().skip(1).fold(
        PriceWindow {
            high: first.high,
            low: first.low,
        },
        |window, c| PriceWindow {
            high: window.high.max(c.high),
            low: window.low.min(c.low),
        },
    ))
}
