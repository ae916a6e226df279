// src/sessions/mod.rs
// Session fractals: swings found inside the Asian and New York trading windows,
// and the setups formed where today's Asian fractals revisit recent NY ones.

mod setups;

pub use setups::{find_setups, SetupKind, SetupPoint};

use crate::config::{SessionConfig, SessionWindow};
use crate::structure::SwingDetector;
use crate::types::{Candle, SwingSide};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionFractal {
    pub time: DateTime<Utc>,
    pub price: f64,
    pub side: SwingSide,
    /// Chart label, e.g. `F_H_AS` or `F_L_NY1`.
    pub label: String,
    pub session: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SessionAnalysis {
    pub fractals: Vec<SessionFractal>,
    pub setups: Vec<SetupPoint>,
}

/// Candles on `date` whose time of day falls inside `window` (bounds inclusive).
/// A window that wraps midnight keeps both ends of the same calendar day.
pub fn session_candles(
    candles: &[Candle],
    date: NaiveDate,
    window: &SessionWindow,
) -> Vec<Candle> {
    candles
        .iter()
        .filter(|c| c.time.date_naive() == date && window.contains(c.time.time()))
        .cloned()
        .collect()
}

pub fn session_fractals(
    candles: &[Candle],
    n: usize,
    session: &str,
    suffix: &str,
) -> Vec<SessionFractal> {
    let (highs, lows) = SwingDetector::new(n).detect(candles);
    highs
        .iter()
        .chain(lows.iter())
        .map(|swing| SessionFractal {
            time: swing.time,
            price: swing.price,
            side: swing.side,
            label: match swing.side {
                SwingSide::High => format!("F_H{}", suffix),
                SwingSide::Low => format!("F_L{}", suffix),
            },
            session: session.to_string(),
        })
        .collect()
}

/// Today's Asian fractals, NY fractals of the previous `ny_lookback_days`
/// days, and the setups between them. "Today" is the date of `reference_time`.
pub fn analyze_sessions(
    candles: &[Candle],
    reference_time: DateTime<Utc>,
    config: &SessionConfig,
) -> SessionAnalysis {
    let today = reference_time.date_naive();
    let n = config.fractal_window;

    let asian_candles = session_candles(candles, today, &config.asian);
    let asian = session_fractals(&asian_candles, n, "Asia", "_AS");
    debug!(
        "[Sessions] {} Asian candles on {}, {} fractals",
        asian_candles.len(),
        today,
        asian.len()
    );

    let mut new_york = Vec::new();
    for day in 1..=config.ny_lookback_days {
        let date = today - Duration::days(i64::from(day));
        let ny_candles = session_candles(candles, date, &config.new_york);
        let fractals = session_fractals(
            &ny_candles,
            n,
            &format!("NY (Day -{})", day),
            &format!("_NY{}", day),
        );
        debug!(
            "[Sessions] {} NY candles on {}, {} fractals",
            ny_candles.len(),
            date,
            fractals.len()
        );
        new_york.extend(fractals);
    }

    let mut setups = find_setups(&asian, &new_york, config.proximity_threshold());
    for setup in &setups {
        info!(
            "🎯 Setup found: {} at {} price {:.5}",
            setup.kind.as_str(),
            setup.time.format("%Y-%m-%d %H:%M"),
            setup.price
        );
    }
    setups.sort_by_key(|s| s.time);

    let mut fractals = asian;
    fractals.extend(new_york);
    fractals.sort_by_key(|f| f.time);

    SessionAnalysis { fractals, setups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn flat_day_candles(start: DateTime<Utc>, hours: i64) -> Vec<Candle> {
        (0..hours)
            .map(|h| Candle {
                time: start + Duration::hours(h),
                open: 1.0995,
                high: 1.1000,
                low: 1.0990,
                close: 1.0995,
                volume: None,
            })
            .collect()
    }

    fn set_high(candles: &mut [Candle], time: DateTime<Utc>, high: f64) {
        if let Some(c) = candles.iter_mut().find(|c| c.time == time) {
            c.high = high;
        }
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn slices_plain_and_wrapping_windows() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let candles = flat_day_candles(start, 48);
        let date = start.date_naive();

        let asian = session_candles(&candles, date, &SessionWindow::new(hm(0, 0), hm(9, 0)));
        assert_eq!(asian.len(), 10);
        assert_eq!(asian.first().unwrap().time, start);

        let overnight = session_candles(&candles, date, &SessionWindow::new(hm(22, 0), hm(2, 0)));
        // 00:00, 01:00, 02:00, 22:00, 23:00 of the same date
        assert_eq!(overnight.len(), 5);
        assert!(overnight.iter().all(|c| c.time.date_naive() == date));
    }

    #[test]
    fn fractals_are_tagged_with_session() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let mut candles = flat_day_candles(start, 10);
        set_high(&mut candles, start + Duration::hours(4), 1.1050);

        let fractals = session_fractals(&candles, 1, "Asia", "_AS");
        assert_eq!(fractals.len(), 1);
        assert_eq!(fractals[0].label, "F_H_AS");
        assert_eq!(fractals[0].session, "Asia");
        assert_eq!(fractals[0].side, SwingSide::High);
    }

    #[test]
    fn asian_high_near_previous_ny_high_is_resistance_setup() {
        let yesterday = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let mut candles = flat_day_candles(yesterday, 35); // through 10:00 today
        let ny_peak = yesterday + Duration::hours(17);
        let asian_peak = yesterday + Duration::hours(24 + 4);
        set_high(&mut candles, ny_peak, 1.1050);
        set_high(&mut candles, asian_peak, 1.1055);

        let reference = candles.last().unwrap().time;
        let analysis = analyze_sessions(&candles, reference, &SessionConfig::default());

        assert_eq!(analysis.fractals.len(), 2);
        assert_eq!(analysis.fractals[0].label, "F_H_NY1");
        assert_eq!(analysis.fractals[0].session, "NY (Day -1)");
        assert_eq!(analysis.fractals[1].label, "F_H_AS");

        assert_eq!(analysis.setups.len(), 1);
        let setup = &analysis.setups[0];
        assert_eq!(setup.kind, SetupKind::Resistance);
        assert_eq!(setup.time, asian_peak);
        assert!((setup.price - 1.1055).abs() < 1e-12);
    }

    #[test]
    fn distant_fractals_form_no_setup() {
        let yesterday = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let mut candles = flat_day_candles(yesterday, 35);
        set_high(&mut candles, yesterday + Duration::hours(17), 1.1050);
        set_high(&mut candles, yesterday + Duration::hours(28), 1.1200);

        let reference = candles.last().unwrap().time;
        let analysis = analyze_sessions(&candles, reference, &SessionConfig::default());
        assert_eq!(analysis.fractals.len(), 2);
        assert!(analysis.setups.is_empty());
    }
}
