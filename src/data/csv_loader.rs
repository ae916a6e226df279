// src/data/csv_loader.rs
use crate::errors::{AnalysisError, ValidationError};
use crate::types::Candle;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use csv::ReaderBuilder;
use log::debug;
use std::io::Read;

const TIME_COLUMNS: [&str; 4] = ["time", "datetime", "timestamp", "_time"];

/// Reads a headered OHLC table. Column order is free; `volume` is optional.
pub fn parse_candles_csv<R: Read>(reader: R) -> Result<Vec<Candle>, AnalysisError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();

    // Find column indices
    let mut time_idx = None;
    let mut open_idx = None;
    let mut high_idx = None;
    let mut low_idx = None;
    let mut close_idx = None;
    let mut volume_idx = None;

    for (i, name) in headers.iter().enumerate() {
        let name = name.trim_start_matches('\u{feff}').to_ascii_lowercase();
        match name.as_str() {
            n if TIME_COLUMNS.contains(&n) && time_idx.is_none() => time_idx = Some(i),
            "open" => open_idx = Some(i),
            "high" => high_idx = Some(i),
            "low" => low_idx = Some(i),
            "close" => close_idx = Some(i),
            "volume" => volume_idx = Some(i),
            _ => {}
        }
    }

    let t_idx = time_idx.ok_or_else(|| ValidationError::MissingColumn("time".to_string()))?;
    let o_idx = open_idx.ok_or_else(|| ValidationError::MissingColumn("open".to_string()))?;
    let h_idx = high_idx.ok_or_else(|| ValidationError::MissingColumn("high".to_string()))?;
    let l_idx = low_idx.ok_or_else(|| ValidationError::MissingColumn("low".to_string()))?;
    let c_idx = close_idx.ok_or_else(|| ValidationError::MissingColumn("close".to_string()))?;

    let mut candles = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        let raw_time = record.get(t_idx).unwrap_or_default();
        let time = parse_timestamp(raw_time).ok_or_else(|| ValidationError::MalformedTimestamp {
            row,
            value: raw_time.to_string(),
        })?;

        let volume = match volume_idx.and_then(|v_idx| record.get(v_idx)) {
            Some(raw) if !raw.is_empty() => Some(parse_number(raw, row, "volume")?),
            _ => None,
        };

        candles.push(Candle {
            time,
            open: parse_number(record.get(o_idx).unwrap_or_default(), row, "open")?,
            high: parse_number(record.get(h_idx).unwrap_or_default(), row, "high")?,
            low: parse_number(record.get(l_idx).unwrap_or_default(), row, "low")?,
            close: parse_number(record.get(c_idx).unwrap_or_default(), row, "close")?,
            volume,
        });
    }

    debug!("[CsvLoader] Parsed {} candles", candles.len());
    Ok(candles)
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]` (read as UTC) and Unix seconds.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
}

fn parse_number(raw: &str, row: usize, field: &'static str) -> Result<f64, ValidationError> {
    raw.parse::<f64>().map_err(|_| ValidationError::InvalidNumber {
        row,
        field,
        value: raw.to_string(),
    })
}
