// src/data/mod.rs
pub mod csv_loader;
pub mod validation;

pub use csv_loader::{parse_candles_csv, parse_timestamp};
pub use validation::{recent_price_window, validate_candles};
