// src/errors.rs
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde_json::json;

/// Problems with the candle table itself, reported before any analysis runs.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Row {row}: malformed timestamp '{value}'")]
    MalformedTimestamp { row: usize, value: String },

    #[error("Row {row}: invalid {field} value '{value}'")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("Row {row}: {field} must be a finite, non-negative price (got {value})")]
    InvalidPrice {
        row: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Row {row}: high {high} is below low {low}")]
    HighBelowLow { row: usize, high: f64, low: f64 },

    #[error("Row {row}: timestamp {current} does not follow {previous}")]
    NonChronological {
        row: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    #[error("Invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Malformed query string: {0}")]
    MalformedQuery(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResponseError for AnalysisError {
    fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::Validation(_) | AnalysisError::Csv(_) => StatusCode::BAD_REQUEST,
            AnalysisError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let kind = match self {
            AnalysisError::Validation(e) => {
                log::warn!("Rejected candle input: {}", e);
                "validation_error"
            }
            AnalysisError::Csv(e) => {
                log::warn!("CSV parsing error: {}", e);
                "csv_error"
            }
            AnalysisError::Config(msg) => {
                log::error!("Configuration error: {}", msg);
                "config_error"
            }
        };
        HttpResponse::build(self.status_code()).json(json!({
            "error": kind,
            "message": self.to_string(),
        }))
    }
}
