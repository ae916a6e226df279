// src/markers.rs
use crate::sessions::SessionAnalysis;
use crate::types::StructurePoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChartMarker {
    pub time: DateTime<Utc>,
    /// HH, LL, F_H_AS, SETUP_Resist, ...
    #[serde(rename = "type")]
    pub label: String,
    pub price: f64,
}

/// Merges structure points, session fractals and setups into one time-ordered
/// marker list without duplicates (same minute, label and 5-decimal price).
pub fn build_markers(structure: &[StructurePoint], sessions: &SessionAnalysis) -> Vec<ChartMarker> {
    let mut markers: Vec<ChartMarker> = structure
        .iter()
        .map(|p| ChartMarker {
            time: p.time,
            label: p.label.as_str().to_string(),
            price: p.price,
        })
        .chain(sessions.fractals.iter().map(|f| ChartMarker {
            time: f.time,
            label: f.label.clone(),
            price: f.price,
        }))
        .chain(sessions.setups.iter().map(|s| ChartMarker {
            time: s.time,
            label: s.kind.as_str().to_string(),
            price: s.price,
        }))
        .collect();

    markers.sort_by_key(|m| m.time);

    let mut seen = HashSet::new();
    markers.retain(|m| seen.insert(dedup_key(m)));
    markers
}

fn dedup_key(marker: &ChartMarker) -> (i64, String, i64) {
    let minute = marker.time.timestamp().div_euclid(60);
    let price = (marker.price * 1e5).round() as i64;
    (minute, marker.label.clone(), price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::SessionFractal;
    use crate::types::{StructureLabel, SwingSide};
    use chrono::{Duration, TimeZone};

    #[test]
    fn merges_and_deduplicates() {
        let t = Utc.with_ymd_and_hms(2024, 3, 5, 4, 0, 0).unwrap();
        let structure = vec![StructurePoint {
            time: t + Duration::hours(2),
            price: 1.10551,
            label: StructureLabel::HigherHigh,
        }];
        let fractal = SessionFractal {
            time: t,
            price: 1.10550,
            side: SwingSide::High,
            label: "F_H_AS".to_string(),
            session: "Asia".to_string(),
        };
        let mut near_copy = fractal.clone();
        near_copy.time = t + Duration::seconds(30);
        near_copy.price = 1.105501;

        let sessions = SessionAnalysis {
            fractals: vec![fractal, near_copy],
            setups: vec![],
        };
        let markers = build_markers(&structure, &sessions);

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].label, "F_H_AS");
        assert_eq!(markers[1].label, "HH");
    }

    #[test]
    fn same_spot_different_label_is_kept() {
        let t = Utc.with_ymd_and_hms(2024, 3, 5, 4, 0, 0).unwrap();
        let structure = vec![StructurePoint {
            time: t,
            price: 1.2,
            label: StructureLabel::High,
        }];
        let sessions = SessionAnalysis {
            fractals: vec![SessionFractal {
                time: t,
                price: 1.2,
                side: SwingSide::High,
                label: "F_H_AS".to_string(),
                session: "Asia".to_string(),
            }],
            setups: vec![],
        };
        assert_eq!(build_markers(&structure, &sessions).len(), 2);
    }
}
