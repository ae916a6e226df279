// tests/common/mod.rs
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use market_structure::types::Candle;

pub const HALF_RANGE: f64 = 0.0005;

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap()
}

/// Hourly candles whose mid price walks linearly between `pivots`,
/// `steps` candles per leg. Each pivot is a strict local extreme.
pub fn zigzag(pivots: &[f64], steps: usize) -> Vec<Candle> {
    let mut mids = Vec::new();
    for leg in pivots.windows(2) {
        let (from, to) = (leg[0], leg[1]);
        for k in 0..steps {
            mids.push(from + (to - from) * k as f64 / steps as f64);
        }
    }
    if let Some(last) = pivots.last() {
        mids.push(*last);
    }

    mids.iter()
        .enumerate()
        .map(|(i, &mid)| Candle {
            time: start_time() + Duration::hours(i as i64),
            open: mid,
            high: mid + HALF_RANGE,
            low: mid - HALF_RANGE,
            close: mid,
            volume: Some(100.0),
        })
        .collect()
}

pub fn uptrend() -> Vec<Candle> {
    zigzag(&[1.1050, 1.1000, 1.1100, 1.1040, 1.1150, 1.1090, 1.1200, 1.1160], 5)
}

pub fn downtrend() -> Vec<Candle> {
    zigzag(&[1.1150, 1.1200, 1.1100, 1.1160, 1.1050, 1.1110, 1.1000, 1.1040], 5)
}

/// A long oscillating series, `legs * 5 + 1` hourly candles.
pub fn long_zigzag(legs: usize) -> Vec<Candle> {
    let pivots: Vec<f64> = (0..=legs)
        .map(|i| {
            let drift = 0.00001 * i as f64;
            if i % 2 == 0 {
                1.1000 + drift
            } else {
                1.1100 + drift
            }
        })
        .collect();
    zigzag(&pivots, 5)
}

pub fn to_csv(candles: &[Candle]) -> String {
    let mut out = String::from("time,open,high,low,close,volume\n");
    for c in candles {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            c.time.to_rfc3339(),
            c.open,
            c.high,
            c.low,
            c.close,
            c.volume.unwrap_or_default()
        ));
    }
    out
}
