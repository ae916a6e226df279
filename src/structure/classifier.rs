// src/structure/classifier.rs
use crate::types::{StructureLabel, StructurePoint, Swing, SwingSide};
use log::debug;

const PRICE_EPSILON: f64 = 1e-9;

#[derive(Default)]
struct Extremes {
    last_high: Option<StructurePoint>,
    last_low: Option<StructurePoint>,
}

/// Labels every swing against the previous swing of the same side and then
/// drops same-side repeats at an identical price.
///
/// Output is sorted by time. When a high and a low share a timestamp the high
/// is emitted first.
pub fn classify(highs: &[Swing], lows: &[Swing]) -> Vec<StructurePoint> {
    let mut swings: Vec<&Swing> = highs.iter().chain(lows.iter()).collect();
    // stable: highs stay ahead of lows at equal times
    swings.sort_by_key(|s| s.time);

    let (labeled, _) = swings.into_iter().fold(
        (Vec::with_capacity(highs.len() + lows.len()), Extremes::default()),
        |(mut points, mut extremes), swing| {
            let point = match swing.side {
                SwingSide::High => {
                    let label = match &extremes.last_high {
                        Some(prev) if swing.price > prev.price => StructureLabel::HigherHigh,
                        Some(prev) if swing.price < prev.price => StructureLabel::LowerHigh,
                        _ => StructureLabel::High,
                    };
                    let point = labeled_point(swing, label);
                    extremes.last_high = Some(point);
                    point
                }
                SwingSide::Low => {
                    let label = match &extremes.last_low {
                        Some(prev) if swing.price < prev.price => StructureLabel::LowerLow,
                        Some(prev) if swing.price > prev.price => StructureLabel::HigherLow,
                        _ => StructureLabel::Low,
                    };
                    let point = labeled_point(swing, label);
                    extremes.last_low = Some(point);
                    point
                }
            };
            points.push(point);
            (points, extremes)
        },
    );

    let collapsed = collapse_repeats(labeled);
    debug!("[Structure] Classified {} structure points", collapsed.len());
    collapsed
}

fn labeled_point(swing: &Swing, label: StructureLabel) -> StructurePoint {
    StructurePoint {
        time: swing.time,
        price: swing.price,
        label,
    }
}

fn collapse_repeats(points: Vec<StructurePoint>) -> Vec<StructurePoint> {
    let mut kept: Vec<StructurePoint> = Vec::with_capacity(points.len());
    for point in points {
        if let Some(prev) = kept.last() {
            let same_side = prev.label.side() == point.label.side();
            if same_side && (point.price - prev.price).abs() < PRICE_EPSILON {
                continue;
            }
        }
        kept.push(point);
    }
    kept
}
