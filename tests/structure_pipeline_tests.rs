// tests/structure_pipeline_tests.rs
mod common;

use market_structure::config::AnalysisConfig;
use market_structure::data::parse_candles_csv;
use market_structure::structure::{classify, find_swings, overall_bias};
use market_structure::types::{BiasKind, BiasReason, ChannelContext, LineSide, StructureLabel};
use market_structure::{AnalysisRequest, StructureAnalysisEngine};

fn setup_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn labels(candles: &[market_structure::types::Candle], n: usize) -> Vec<&'static str> {
    let (highs, lows) = find_swings(candles, n);
    classify(&highs, &lows)
        .iter()
        .map(|p| p.label.as_str())
        .collect()
}

#[test]
fn uptrend_zigzag_classifies_and_goes_long() {
    setup_test_logging();
    let candles = common::uptrend();
    assert_eq!(labels(&candles, 2), vec!["L", "H", "HL", "HH", "HL", "HH"]);
    // wider window sees the same pivots
    assert_eq!(labels(&candles, 5), vec!["L", "H", "HL", "HH", "HL", "HH"]);

    let (highs, lows) = find_swings(&candles, 5);
    let bias = overall_bias(&classify(&highs, &lows));
    assert_eq!(bias.kind, BiasKind::Long);
    assert_eq!(bias.reason, BiasReason::UptrendHigherHighAfterHigherLow);
}

#[test]
fn engine_report_for_uptrend() {
    setup_test_logging();
    let candles = common::uptrend();
    let last_time = candles.last().unwrap().time;
    let engine = StructureAnalysisEngine::new(AnalysisConfig::default());
    let report = engine
        .analyze(AnalysisRequest::new("EUR/USD", "1h", candles))
        .unwrap();

    assert_eq!(report.candles_analyzed, 36);
    assert_eq!(report.swing_highs.len(), 3);
    assert_eq!(report.swing_lows.len(), 3);
    assert_eq!(report.bias.kind, BiasKind::Long);
    assert_eq!(report.context, "LONG (uptrend: HH after HL)");

    let resistance = report.line(LineSide::Resistance).unwrap();
    let support = report.line(LineSide::Support).unwrap();
    assert_eq!(resistance.end_time, last_time);
    assert_eq!(support.end_time, last_time);
    assert!(resistance.slope > 0.0);
    assert!((resistance.slope - support.slope).abs() < 1e-15);
    assert!(resistance.end_price > support.end_price);
    assert_eq!(report.channel, Some(ChannelContext::Ascending));

    // every structure point shows up as a chart marker
    for point in &report.structure_points {
        assert!(report
            .markers
            .iter()
            .any(|m| m.time == point.time && m.label == point.label.as_str()));
    }
    assert!(report.markers.windows(2).all(|w| w[0].time <= w[1].time));
}

#[test]
fn engine_report_for_downtrend() {
    let engine = StructureAnalysisEngine::default();
    let report = engine
        .analyze(AnalysisRequest::new("EUR/USD", "1h", common::downtrend()))
        .unwrap();

    let labels: Vec<StructureLabel> = report.structure_points.iter().map(|p| p.label).collect();
    assert_eq!(
        labels,
        vec![
            StructureLabel::High,
            StructureLabel::Low,
            StructureLabel::LowerHigh,
            StructureLabel::LowerLow,
            StructureLabel::LowerHigh,
            StructureLabel::LowerLow,
        ]
    );
    assert_eq!(report.bias.kind, BiasKind::Short);
    assert_eq!(report.channel, Some(ChannelContext::Descending));
}

#[test]
fn short_series_yields_empty_structure() {
    let engine = StructureAnalysisEngine::default();
    let candles: Vec<_> = common::uptrend().into_iter().take(8).collect();
    let report = engine
        .analyze(AnalysisRequest::new("EUR/USD", "1h", candles))
        .unwrap();

    assert!(report.swing_highs.is_empty());
    assert!(report.swing_lows.is_empty());
    assert!(report.trend_lines.is_empty());
    assert_eq!(report.bias.reason, BiasReason::NoStructure);
    assert_eq!(report.channel, None);
}

#[test]
fn csv_input_matches_direct_input() {
    let candles = common::uptrend();
    let parsed = parse_candles_csv(common::to_csv(&candles).as_bytes()).unwrap();
    assert_eq!(parsed.len(), candles.len());

    let engine = StructureAnalysisEngine::default();
    let direct = engine
        .analyze(AnalysisRequest::new("EUR/USD", "1h", candles))
        .unwrap();
    let from_csv = engine
        .analyze(AnalysisRequest::new("EUR/USD", "1h", parsed))
        .unwrap();
    assert_eq!(direct.bias, from_csv.bias);
    assert_eq!(direct.structure_points.len(), from_csv.structure_points.len());
}

#[test]
fn unordered_candles_are_rejected_before_analysis() {
    let mut candles = common::uptrend();
    candles.swap(3, 4);
    let engine = StructureAnalysisEngine::default();
    let err = engine
        .analyze(AnalysisRequest::new("EUR/USD", "1h", candles))
        .unwrap_err();
    assert!(err.to_string().contains("Row 4"));
}

#[test]
fn trendline_window_override_limits_anchors() {
    let engine = StructureAnalysisEngine::default();
    let mut request = AnalysisRequest::new("EUR/USD", "1h", common::uptrend());
    request.trendline_window = Some(2);
    let report = engine.analyze(request).unwrap();

    // only the last two highs (1.1150, 1.1200) are eligible
    let resistance = report.line(LineSide::Resistance).unwrap();
    assert_eq!(resistance.start_time, report.swing_highs[1].time);
}
