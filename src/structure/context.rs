// src/structure/context.rs
use crate::types::StructureLabel::{HigherHigh, HigherLow, LowerHigh, LowerLow};
use crate::types::{Bias, BiasKind, BiasReason, StructureLabel, StructurePoint};

/// Infers the directional bias from the last two trend-defining points
/// (HH/HL/LH/LL), with one backward scan to confirm a break of structure.
///
/// Stateless: the same input always gives the same bias.
pub fn overall_bias(points: &[StructurePoint]) -> Bias {
    let trend: Vec<(usize, &StructurePoint)> = points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.label.is_trend_defining())
        .collect();

    match trend.as_slice() {
        [] => Bias::neutral(BiasReason::NoStructure),
        [(_, only)] => match only.label {
            HigherHigh | LowerLow => Bias::neutral(BiasReason::AwaitingConfirmation),
            _ => Bias::neutral(BiasReason::InsufficientStructure),
        },
        [.., (_, second_last), (last_idx, last)] => {
            classify_pair(&points[..*last_idx], second_last.label, last)
        }
    }
}

/// `history` holds every structure point before `last`.
fn classify_pair(
    history: &[StructurePoint],
    previous: StructureLabel,
    last: &StructurePoint,
) -> Bias {
    match (previous, last.label) {
        (HigherLow, HigherHigh) => {
            Bias::new(BiasKind::Long, BiasReason::UptrendHigherHighAfterHigherLow)
        }
        (LowerHigh, LowerLow) => {
            Bias::new(BiasKind::Short, BiasReason::DowntrendLowerLowAfterLowerHigh)
        }
        (HigherHigh, HigherLow) => {
            Bias::new(BiasKind::Long, BiasReason::PullbackHigherLowAfterHigherHigh)
        }
        (LowerLow, LowerHigh) => {
            Bias::new(BiasKind::Short, BiasReason::PullbackLowerHighAfterLowerLow)
        }
        (LowerLow, HigherHigh) | (HigherHigh, LowerLow) => {
            Bias::neutral(BiasReason::RangeExpansion)
        }
        (_, HigherHigh) => {
            let key_high = history
                .iter()
                .rev()
                .find(|p| matches!(p.label, LowerHigh | StructureLabel::High));
            match key_high {
                Some(reference) if last.price > reference.price => {
                    Bias::new(BiasKind::Long, BiasReason::HigherHighBrokeLowerHigh)
                }
                _ => Bias::neutral(BiasReason::HigherHighHeldBelowLowerHigh),
            }
        }
        (_, LowerLow) => {
            let key_low = history
                .iter()
                .rev()
                .find(|p| matches!(p.label, HigherLow | StructureLabel::Low));
            match key_low {
                Some(reference) if last.price < reference.price => {
                    Bias::new(BiasKind::Short, BiasReason::LowerLowBrokeHigherLow)
                }
                _ => Bias::neutral(BiasReason::LowerLowHeldAboveHigherLow),
            }
        }
        _ => Bias::neutral(BiasReason::RangeConsolidation),
    }
}
