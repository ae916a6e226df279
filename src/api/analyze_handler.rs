// src/api/analyze_handler.rs
use crate::data::parse_candles_csv;
use crate::engine::{AnalysisRequest, StructureAnalysisEngine};
use crate::errors::AnalysisError;
use actix_web::{web, HttpResponse, Responder};
use log::info;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct CsvAnalyzeQuery {
    pub symbol: Option<String>,
    pub timeframe: Option<String>,
    pub swing_window: Option<usize>,
    pub trendline_window: Option<usize>,
}

pub async fn analyze_handler(
    engine: web::Data<StructureAnalysisEngine>,
    request: web::Json<AnalysisRequest>,
) -> Result<HttpResponse, AnalysisError> {
    let request = request.into_inner();
    info!(
        "📊 Analyze request: {} ({}, {} candles)",
        request.symbol,
        request.timeframe,
        request.candles.len()
    );
    let report = engine.analyze(request)?;
    Ok(HttpResponse::Ok().json(report))
}

pub async fn analyze_csv_handler(
    engine: web::Data<StructureAnalysisEngine>,
    query: web::Query<CsvAnalyzeQuery>,
    body: String,
) -> Result<HttpResponse, AnalysisError> {
    let query = query.into_inner();
    let candles = parse_candles_csv(body.as_bytes())?;

    let mut request = AnalysisRequest::new(
        query.symbol.as_deref().unwrap_or("EUR/USD"),
        query.timeframe.as_deref().unwrap_or("1h"),
        candles,
    );
    request.swing_window = query.swing_window;
    request.trendline_window = query.trendline_window;

    info!(
        "📊 CSV analyze request: {} ({}, {} candles)",
        request.symbol,
        request.timeframe,
        request.candles.len()
    );
    let report = engine.analyze(request)?;
    Ok(HttpResponse::Ok().json(report))
}

pub async fn config_handler(engine: web::Data<StructureAnalysisEngine>) -> impl Responder {
    HttpResponse::Ok().json(engine.config())
}

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK, market structure server is running")
}
