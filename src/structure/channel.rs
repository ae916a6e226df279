// src/structure/channel.rs
use crate::types::{ChannelContext, TrendLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Rising,
    Falling,
    Flat,
}

fn direction(slope: f64, tolerance: f64) -> Direction {
    if slope > tolerance {
        Direction::Rising
    } else if slope < -tolerance {
        Direction::Falling
    } else {
        Direction::Flat
    }
}

/// Descriptive tag for a support/resistance pair. `None` unless both lines exist.
pub fn channel_context(
    support: Option<&TrendLine>,
    resistance: Option<&TrendLine>,
    tolerance: f64,
) -> Option<ChannelContext> {
    let (support, resistance) = (support?, resistance?);
    let lower = direction(support.slope, tolerance);
    let upper = direction(resistance.slope, tolerance);

    let context = match (upper, lower) {
        (Direction::Rising, Direction::Rising) => ChannelContext::Ascending,
        (Direction::Falling, Direction::Falling) => ChannelContext::Descending,
        (Direction::Flat, Direction::Flat) => ChannelContext::Horizontal,
        (Direction::Flat, Direction::Rising) => ChannelContext::AscendingTriangle,
        (Direction::Falling, Direction::Flat) => ChannelContext::DescendingTriangle,
        (Direction::Falling, Direction::Rising) => ChannelContext::ConvergingWedge,
        (Direction::Rising, Direction::Falling) => ChannelContext::Expanding,
        _ => ChannelContext::Mixed,
    };
    Some(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineSide;
    use chrono::{Duration, TimeZone, Utc};

    fn line(side: LineSide, slope: f64) -> TrendLine {
        let start = Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap();
        TrendLine {
            side,
            start_time: start,
            start_price: 1.0,
            end_time: start + Duration::hours(10),
            end_price: 1.0 + slope * 36_000.0,
            slope,
        }
    }

    fn ctx(resistance_slope: f64, support_slope: f64) -> Option<ChannelContext> {
        let r = line(LineSide::Resistance, resistance_slope);
        let s = line(LineSide::Support, support_slope);
        channel_context(Some(&s), Some(&r), 1e-9)
    }

    #[test]
    fn classifies_slope_pairs() {
        assert_eq!(ctx(1e-6, 2e-6), Some(ChannelContext::Ascending));
        assert_eq!(ctx(-1e-6, -1e-6), Some(ChannelContext::Descending));
        assert_eq!(ctx(0.0, 1e-12), Some(ChannelContext::Horizontal));
        assert_eq!(ctx(0.0, 1e-6), Some(ChannelContext::AscendingTriangle));
        assert_eq!(ctx(-1e-6, 0.0), Some(ChannelContext::DescendingTriangle));
        assert_eq!(ctx(-1e-6, 1e-6), Some(ChannelContext::ConvergingWedge));
        assert_eq!(ctx(1e-6, -1e-6), Some(ChannelContext::Expanding));
        assert_eq!(ctx(1e-6, 0.0), Some(ChannelContext::Mixed));
        assert_eq!(ctx(0.0, -1e-6), Some(ChannelContext::Mixed));
    }

    #[test]
    fn missing_line_has_no_context() {
        let r = line(LineSide::Resistance, 0.0);
        assert_eq!(channel_context(None, Some(&r), 1e-9), None);
        assert_eq!(channel_context(None, None, 1e-9), None);
    }
}
