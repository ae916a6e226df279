// src/structure/trendlines.rs
use crate::config::TrendLineConfig;
use crate::types::{seconds_between, LineSide, PriceWindow, Swing, TrendLine};
use chrono::{DateTime, Utc};
use log::debug;
use std::cmp::Ordering;

/// Builds a resistance line over the recent highs and a support line under
/// the recent lows, both projected to `last_time`.
///
/// Resistance comes first in the output. Support is drawn parallel to
/// resistance, `channel_height_factor` offsets below it, whenever a resistance
/// line exists; otherwise it is fitted to the lows on its own.
pub fn project_lines(
    highs: &[Swing],
    lows: &[Swing],
    last_time: DateTime<Utc>,
    price_window: &PriceWindow,
    window_size: usize,
    config: &TrendLineConfig,
) -> Vec<TrendLine> {
    let offset = price_window.midpoint() * config.offset_percentage;
    let mut lines = Vec::with_capacity(2);

    let resistance = anchor_points(highs, window_size, Extreme::Highest).and_then(|(start, end)| {
        line_through(&start, &end, last_time, offset, LineSide::Resistance)
    });

    let support = match &resistance {
        Some(r) => Some(parallel_support(r, offset * config.channel_height_factor)),
        None => anchor_points(lows, window_size, Extreme::Lowest).and_then(|(start, end)| {
            line_through(&start, &end, last_time, -offset, LineSide::Support)
        }),
    };

    debug!(
        "[TrendLines] offset={:.6}, resistance={}, support={} (parallel={})",
        offset,
        resistance.is_some(),
        support.is_some(),
        resistance.is_some() && support.is_some()
    );

    lines.extend(resistance);
    lines.extend(support);
    lines
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Extreme {
    Highest,
    Lowest,
}

/// The two most extreme swings among the last `window_size`, in time order.
fn anchor_points(swings: &[Swing], window_size: usize, extreme: Extreme) -> Option<(Swing, Swing)> {
    let mut by_time = swings.to_vec();
    by_time.sort_by_key(|s| s.time);
    let recent = &by_time[by_time.len().saturating_sub(window_size)..];
    if recent.len() < 2 {
        return None;
    }

    let mut ranked = recent.to_vec();
    ranked.sort_by(|a, b| {
        let ord = a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal);
        match extreme {
            Extreme::Highest => ord.reverse(),
            Extreme::Lowest => ord,
        }
    });

    let mut pair = [ranked[0], ranked[1]];
    pair.sort_by_key(|s| s.time);
    Some((pair[0], pair[1]))
}

/// Price change per second between two swings; flat when they share a time.
pub fn slope_between(start: &Swing, end: &Swing) -> f64 {
    let dt = seconds_between(start.time, end.time);
    if dt > f64::EPSILON {
        (end.price - start.price) / dt
    } else {
        0.0
    }
}

fn line_through(
    start: &Swing,
    end: &Swing,
    last_time: DateTime<Utc>,
    offset: f64,
    side: LineSide,
) -> Option<TrendLine> {
    if start.time >= last_time {
        return None;
    }
    let slope = slope_between(start, end);
    let projected = start.price + slope * seconds_between(start.time, last_time);

    Some(TrendLine {
        side,
        start_time: start.time,
        start_price: start.price + offset,
        end_time: last_time,
        end_price: projected + offset,
        slope,
    })
}

fn parallel_support(resistance: &TrendLine, height: f64) -> TrendLine {
    let start_price = resistance.start_price - height;
    TrendLine {
        side: LineSide::Support,
        start_time: resistance.start_time,
        start_price,
        end_time: resistance.end_time,
        end_price: start_price
            + resistance.slope * seconds_between(resistance.start_time, resistance.end_time),
        slope: resistance.slope,
    }
}
