// src/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Input ---
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

// --- Swings ---
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SwingSide {
    High,
    Low,
}

/// A local extreme confirmed by `n` candles on each side.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Swing {
    pub time: DateTime<Utc>,
    pub price: f64,
    pub side: SwingSide,
}

// --- Structure ---
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureLabel {
    #[serde(rename = "HH")]
    HigherHigh,
    #[serde(rename = "HL")]
    HigherLow,
    #[serde(rename = "LH")]
    LowerHigh,
    #[serde(rename = "LL")]
    LowerLow,
    #[serde(rename = "H")]
    High,
    #[serde(rename = "L")]
    Low,
}

impl StructureLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StructureLabel::HigherHigh => "HH",
            StructureLabel::HigherLow => "HL",
            StructureLabel::LowerHigh => "LH",
            StructureLabel::LowerLow => "LL",
            StructureLabel::High => "H",
            StructureLabel::Low => "L",
        }
    }

    /// Coarse family: H, HH and LH are highs; L, HL and LL are lows.
    pub fn side(&self) -> SwingSide {
        match self {
            StructureLabel::HigherHigh | StructureLabel::LowerHigh | StructureLabel::High => {
                SwingSide::High
            }
            StructureLabel::HigherLow | StructureLabel::LowerLow | StructureLabel::Low => {
                SwingSide::Low
            }
        }
    }

    pub fn is_trend_defining(&self) -> bool {
        !matches!(self, StructureLabel::High | StructureLabel::Low)
    }
}

impl fmt::Display for StructureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct StructurePoint {
    pub time: DateTime<Utc>,
    pub price: f64,
    pub label: StructureLabel,
}

// --- Bias ---
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum BiasKind {
    Long,
    Short,
    Neutral,
}

impl fmt::Display for BiasKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BiasKind::Long => f.write_str("LONG"),
            BiasKind::Short => f.write_str("SHORT"),
            BiasKind::Neutral => f.write_str("NEUTRAL"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BiasReason {
    NoStructure,
    AwaitingConfirmation,
    InsufficientStructure,
    UptrendHigherHighAfterHigherLow,
    DowntrendLowerLowAfterLowerHigh,
    PullbackHigherLowAfterHigherHigh,
    PullbackLowerHighAfterLowerLow,
    HigherHighBrokeLowerHigh,
    HigherHighHeldBelowLowerHigh,
    LowerLowBrokeHigherLow,
    LowerLowHeldAboveHigherLow,
    RangeExpansion,
    RangeConsolidation,
}

impl fmt::Display for BiasReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BiasReason::NoStructure => "no structure",
            BiasReason::AwaitingConfirmation => "first BOS, awaiting confirmation",
            BiasReason::InsufficientStructure => "insufficient structure",
            BiasReason::UptrendHigherHighAfterHigherLow => "uptrend: HH after HL",
            BiasReason::DowntrendLowerLowAfterLowerHigh => "downtrend: LL after LH",
            BiasReason::PullbackHigherLowAfterHigherHigh => "pullback HL after HH",
            BiasReason::PullbackLowerHighAfterLowerLow => "pullback LH after LL",
            BiasReason::HigherHighBrokeLowerHigh => "BOS: HH broke prior LH",
            BiasReason::HigherHighHeldBelowLowerHigh => "HH did not break key LH, awaiting HL/BOS",
            BiasReason::LowerLowBrokeHigherLow => "BOS: LL broke prior HL",
            BiasReason::LowerLowHeldAboveHigherLow => "LL did not break key HL, awaiting LH/BOS",
            BiasReason::RangeExpansion => "range expansion",
            BiasReason::RangeConsolidation => "range/consolidation",
        };
        f.write_str(text)
    }
}

/// Directional stance plus the rule that produced it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bias {
    pub kind: BiasKind,
    pub reason: BiasReason,
}

impl Bias {
    pub fn new(kind: BiasKind, reason: BiasReason) -> Self {
        Self { kind, reason }
    }

    pub fn neutral(reason: BiasReason) -> Self {
        Self::new(BiasKind::Neutral, reason)
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.reason)
    }
}

// --- Trend lines ---
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineSide {
    Support,
    Resistance,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    pub side: LineSide,
    pub start_time: DateTime<Utc>,
    pub start_price: f64,
    pub end_time: DateTime<Utc>,
    pub end_price: f64,
    /// Price change per second.
    pub slope: f64,
}

impl TrendLine {
    pub fn price_at(&self, time: DateTime<Utc>) -> f64 {
        self.start_price + self.slope * seconds_between(self.start_time, time)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChannelContext {
    Ascending,
    Descending,
    Horizontal,
    AscendingTriangle,
    DescendingTriangle,
    ConvergingWedge,
    Expanding,
    Mixed,
}

impl fmt::Display for ChannelContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ChannelContext::Ascending => "Ascending channel",
            ChannelContext::Descending => "Descending channel",
            ChannelContext::Horizontal => "Horizontal channel",
            ChannelContext::AscendingTriangle => "Ascending triangle",
            ChannelContext::DescendingTriangle => "Descending triangle",
            ChannelContext::ConvergingWedge => "Converging wedge",
            ChannelContext::Expanding => "Expanding channel",
            ChannelContext::Mixed => "Mixed",
        };
        f.write_str(text)
    }
}

/// High/low envelope of the recent candles, used to size trend-line offsets.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PriceWindow {
    pub high: f64,
    pub low: f64,
}

impl PriceWindow {
    pub fn midpoint(&self) -> f64 {
        (self.high + self.low) / 2.0
    }
}

// Helper
pub fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}
