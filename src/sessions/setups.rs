// src/sessions/setups.rs
use super::SessionFractal;
use crate::types::SwingSide;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupKind {
    #[serde(rename = "SETUP_Resist")]
    Resistance,
    #[serde(rename = "SETUP_Support")]
    Support,
    #[serde(rename = "UNKNOWN_SETUP")]
    Unknown,
}

impl SetupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetupKind::Resistance => "SETUP_Resist",
            SetupKind::Support => "SETUP_Support",
            SetupKind::Unknown => "UNKNOWN_SETUP",
        }
    }

    fn from_sides(asian: SwingSide, new_york: SwingSide) -> Self {
        match (asian, new_york) {
            (SwingSide::High, SwingSide::High) => SetupKind::Resistance,
            (SwingSide::Low, SwingSide::Low) => SetupKind::Support,
            _ => SetupKind::Unknown,
        }
    }
}

/// An Asian fractal sitting within the proximity threshold of a recent NY fractal.
/// Placed at the Asian fractal's time and price.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SetupPoint {
    pub time: DateTime<Utc>,
    pub price: f64,
    pub kind: SetupKind,
    pub distance: f64,
    pub asian: SessionFractal,
    pub new_york: SessionFractal,
    pub details: String,
}

pub fn find_setups(
    asian: &[SessionFractal],
    new_york: &[SessionFractal],
    threshold: f64,
) -> Vec<SetupPoint> {
    let mut setups = Vec::new();
    for asian_f in asian {
        for ny_f in new_york {
            let distance = (asian_f.price - ny_f.price).abs();
            if distance > threshold {
                continue;
            }

            let details = format!(
                "Asian {} at {:.5} ({}) near NY {} at {:.5} ({}), Diff: {:.5}",
                asian_f.label,
                asian_f.price,
                asian_f.time.format("%H:%M"),
                ny_f.label,
                ny_f.price,
                ny_f.time.format("%Y-%m-%d %H:%M"),
                distance
            );

            setups.push(SetupPoint {
                time: asian_f.time,
                price: asian_f.price,
                kind: SetupKind::from_sides(asian_f.side, ny_f.side),
                distance,
                asian: asian_f.clone(),
                new_york: ny_f.clone(),
                details,
            });
        }
    }
    setups
}
