// src/engine.rs
// One full analysis pass over a candle table: validation, swings, structure,
// bias, trend lines and session markers.

use crate::config::AnalysisConfig;
use crate::data::{recent_price_window, validate_candles};
use crate::errors::{AnalysisError, ValidationError};
use crate::markers::{build_markers, ChartMarker};
use crate::sessions::{analyze_sessions, SessionAnalysis, SessionFractal, SetupPoint};
use crate::structure::{channel_context, classify, overall_bias, project_lines, SwingDetector};
use crate::types::{Bias, Candle, ChannelContext, LineSide, StructurePoint, Swing, TrendLine};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

// ==================== REQUEST / RESULT ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default = "default_symbol")]
    pub symbol: String,
    #[serde(default = "default_timeframe")]
    pub timeframe: String,
    pub candles: Vec<Candle>,
    /// Overrides the configured structure swing window.
    #[serde(default)]
    pub swing_window: Option<usize>,
    /// Overrides the configured trend-line lookback.
    #[serde(default)]
    pub trendline_window: Option<usize>,
}

fn default_symbol() -> String {
    "EUR/USD".to_string()
}

fn default_timeframe() -> String {
    "1h".to_string()
}

impl AnalysisRequest {
    pub fn new(symbol: &str, timeframe: &str, candles: Vec<Candle>) -> Self {
        Self {
            symbol: symbol.to_string(),
            timeframe: timeframe.to_string(),
            candles,
            swing_window: None,
            trendline_window: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub timeframe: String,
    pub candles_analyzed: usize,
    pub last_time: Option<DateTime<Utc>>,
    pub swing_window: usize,
    pub swing_highs: Vec<Swing>,
    pub swing_lows: Vec<Swing>,
    pub structure_points: Vec<StructurePoint>,
    pub bias: Bias,
    /// Human-readable bias, e.g. "LONG (BOS: HH broke prior LH)".
    pub context: String,
    pub trend_lines: Vec<TrendLine>,
    pub channel: Option<ChannelContext>,
    pub session_fractals: Vec<SessionFractal>,
    pub setups: Vec<SetupPoint>,
    pub markers: Vec<ChartMarker>,
}

impl AnalysisReport {
    pub fn line(&self, side: LineSide) -> Option<&TrendLine> {
        self.trend_lines.iter().find(|l| l.side == side)
    }
}

// ==================== ENGINE ====================

#[derive(Debug, Clone, Default)]
pub struct StructureAnalysisEngine {
    config: AnalysisConfig,
}

impl StructureAnalysisEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(AnalysisConfig::from_env())
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        let swing_window = window(
            "swing_window",
            request.swing_window,
            self.config.swing_window,
        )?;
        let trendline_window = window(
            "trendline_window",
            request.trendline_window,
            self.config.trendlines.points_window,
        )?;
        validate_candles(&request.candles)?;

        debug!(
            "[StructureEngine] Analyzing {}/{} with {} candles (n={}, trendline window={})",
            request.symbol,
            request.timeframe,
            request.candles.len(),
            swing_window,
            trendline_window
        );

        let candles = &request.candles;
        let (swing_highs, swing_lows) = SwingDetector::new(swing_window).detect(candles);
        debug!(
            "[StructureEngine] Found {} swing highs, {} swing lows",
            swing_highs.len(),
            swing_lows.len()
        );

        let structure_points = classify(&swing_highs, &swing_lows);
        let bias = overall_bias(&structure_points);

        let last_time = candles.last().map(|c| c.time);
        let price_window =
            recent_price_window(candles, self.config.trendlines.offset_lookback_candles);
        let trend_lines = match (last_time, price_window) {
            (Some(last), Some(window)) => project_lines(
                &swing_highs,
                &swing_lows,
                last,
                &window,
                trendline_window,
                &self.config.trendlines,
            ),
            _ => Vec::new(),
        };
        let channel = channel_context(
            trend_lines.iter().find(|l| l.side == LineSide::Support),
            trend_lines.iter().find(|l| l.side == LineSide::Resistance),
            self.config.trendlines.slope_tolerance,
        );

        let sessions = match last_time {
            Some(last) => analyze_sessions(candles, last, &self.config.sessions),
            None => SessionAnalysis::default(),
        };
        let markers = build_markers(&structure_points, &sessions);

        info!(
            "[StructureEngine] {}/{}: {} structure points, bias {}, {} lines, {} setups",
            request.symbol,
            request.timeframe,
            structure_points.len(),
            bias,
            trend_lines.len(),
            sessions.setups.len()
        );

        Ok(AnalysisReport {
            symbol: request.symbol,
            timeframe: request.timeframe,
            candles_analyzed: request.candles.len(),
            last_time,
            swing_window,
            swing_highs,
            swing_lows,
            structure_points,
            context: bias.to_string(),
            bias,
            trend_lines,
            channel,
            session_fractals: sessions.fractals,
            setups: sessions.setups,
            markers,
        })
    }
}

/// A zero override is the caller's mistake; a zero configured window is ours.
fn window(
    name: &'static str,
    requested: Option<usize>,
    configured: usize,
) -> Result<usize, AnalysisError> {
    match (requested, configured) {
        (Some(0), _) => Err(ValidationError::InvalidParameter {
            name,
            value: "0".to_string(),
        }
        .into()),
        (Some(v), _) => Ok(v),
        (None, 0) => Err(AnalysisError::Config(format!("{} must be positive", name))),
        (None, v) => Ok(v),
    }
}
