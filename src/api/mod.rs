// src/api/mod.rs
pub mod analyze_handler;

use crate::errors::{AnalysisError, ValidationError};
use actix_web::web;

/// Body size accepted by the analyze routes. Covers tens of thousands of candles.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .app_data(
            web::JsonConfig::default()
                .limit(MAX_BODY_BYTES)
                .error_handler(|err, _req| {
                    AnalysisError::from(ValidationError::MalformedBody(err.to_string())).into()
                }),
        )
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            AnalysisError::from(ValidationError::MalformedQuery(err.to_string())).into()
        }))
        .route("/analyze", web::post().to(analyze_handler::analyze_handler))
        .route(
            "/analyze/csv",
            web::post().to(analyze_handler::analyze_csv_handler),
        )
        .route("/config", web::get().to(analyze_handler::config_handler))
        .route("/health", web::get().to(analyze_handler::health_check));
}
