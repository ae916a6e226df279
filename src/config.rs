// src/config.rs
use chrono::NaiveTime;
use log::{info, warn};
use serde::Serialize;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Time-of-day range in UTC. `end < start` means the window wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl SessionWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn wraps_midnight(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.wraps_midnight() {
            time >= self.start || time <= self.end
        } else {
            time >= self.start && time <= self.end
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionConfig {
    /// Window size used for session fractals, usually smaller than the structure window.
    pub fractal_window: usize,
    pub asian: SessionWindow,
    pub new_york: SessionWindow,
    pub ny_lookback_days: u32,
    pub proximity_threshold_pips: f64,
    pub pip_value: f64,
}

impl SessionConfig {
    pub fn proximity_threshold(&self) -> f64 {
        self.proximity_threshold_pips * self.pip_value
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fractal_window: 1,
            asian: SessionWindow::new(hm(0, 0), hm(9, 0)),
            new_york: SessionWindow::new(hm(13, 0), hm(22, 0)),
            ny_lookback_days: 1,
            proximity_threshold_pips: 15.0,
            pip_value: 0.0001,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendLineConfig {
    /// Number of most recent swings per side considered for a line.
    pub points_window: usize,
    /// Fraction of the recent mid price used as the vertical offset.
    pub offset_percentage: f64,
    /// Support sits this many offsets below resistance in channel mode.
    pub channel_height_factor: f64,
    pub slope_tolerance: f64,
    /// Candles used to build the price window behind the offset.
    pub offset_lookback_candles: usize,
}

impl Default for TrendLineConfig {
    fn default() -> Self {
        Self {
            points_window: 5,
            offset_percentage: 0.001,
            channel_height_factor: 2.0,
            slope_tolerance: 1e-9,
            offset_lookback_candles: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisConfig {
    /// `n` for structure swings: a swing needs `n` weaker candles on each side.
    pub swing_window: usize,
    pub trendlines: TrendLineConfig,
    pub sessions: SessionConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            swing_window: 5,
            trendlines: TrendLineConfig::default(),
            sessions: SessionConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Defaults overridden by environment variables (and `.env`, when present).
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let defaults = Self::default();

        let config = Self {
            swing_window: env_or("SWING_POINT_N", defaults.swing_window),
            trendlines: TrendLineConfig {
                points_window: env_or(
                    "TRENDLINE_POINTS_WINDOW_SIZE",
                    defaults.trendlines.points_window,
                ),
                offset_percentage: env_or(
                    "TRENDLINE_OFFSET_PERCENTAGE",
                    defaults.trendlines.offset_percentage,
                ),
                channel_height_factor: env_or(
                    "CHANNEL_HEIGHT_FACTOR",
                    defaults.trendlines.channel_height_factor,
                ),
                slope_tolerance: env_or(
                    "TRENDLINE_SLOPE_TOLERANCE",
                    defaults.trendlines.slope_tolerance,
                ),
                offset_lookback_candles: env_or(
                    "TRENDLINE_OFFSET_LOOKBACK",
                    defaults.trendlines.offset_lookback_candles,
                ),
            },
            sessions: SessionConfig {
                fractal_window: env_or("SESSION_FRACTAL_N", defaults.sessions.fractal_window),
                asian: SessionWindow::new(
                    env_time_or("ASIAN_SESSION_START_UTC", defaults.sessions.asian.start),
                    env_time_or("ASIAN_SESSION_END_UTC", defaults.sessions.asian.end),
                ),
                new_york: SessionWindow::new(
                    env_time_or("NY_SESSION_START_UTC", defaults.sessions.new_york.start),
                    env_time_or("NY_SESSION_END_UTC", defaults.sessions.new_york.end),
                ),
                ny_lookback_days: env_or(
                    "NY_SESSIONS_TO_CHECK_PREVIOUS_DAYS",
                    defaults.sessions.ny_lookback_days,
                ),
                proximity_threshold_pips: env_or(
                    "FRACTAL_PROXIMITY_THRESHOLD_PIPS",
                    defaults.sessions.proximity_threshold_pips,
                ),
                pip_value: env_or("PIP_VALUE_DEFAULT", defaults.sessions.pip_value),
            },
        };

        info!(
            "📐 Analysis config: swing n={}, session n={}, line window={}, offset={}, channel x{}",
            config.swing_window,
            config.sessions.fractal_window,
            config.trendlines.points_window,
            config.trendlines.offset_percentage,
            config.trendlines.channel_height_factor
        );
        config
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("SERVER_PORT", 8080),
            cors_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:4200".to_string()),
        }
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("Invalid value '{}' for {}, using default {}", raw, key, default);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_time_or(key: &str, default: NaiveTime) -> NaiveTime {
    match env::var(key) {
        Ok(raw) => match NaiveTime::parse_from_str(raw.trim(), "%H:%M") {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "Invalid time '{}' for {} (expected HH:MM), using default {}",
                    raw, key, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_settings() {
        let config = AnalysisConfig::default();
        assert_eq!(config.swing_window, 5);
        assert_eq!(config.sessions.fractal_window, 1);
        assert_eq!(config.trendlines.points_window, 5);
        assert!((config.sessions.proximity_threshold() - 0.0015).abs() < 1e-12);
    }

    #[test]
    fn session_window_wraps_past_midnight() {
        let window = SessionWindow::new(hm(22, 0), hm(3, 0));
        assert!(window.wraps_midnight());
        assert!(window.contains(hm(23, 30)));
        assert!(window.contains(hm(2, 0)));
        assert!(!window.contains(hm(12, 0)));
    }

    #[test]
    fn session_window_bounds_are_inclusive() {
        let window = SessionWindow::new(hm(0, 0), hm(9, 0));
        assert!(window.contains(hm(0, 0)));
        assert!(window.contains(hm(9, 0)));
        assert!(!window.contains(hm(9, 1)));
    }
}
