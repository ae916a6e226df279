// src/lib.rs
pub mod api;
pub mod config;
pub mod data;
pub mod engine;
pub mod errors;
pub mod markers;
pub mod sessions;
pub mod structure;
pub mod types;

pub use engine::{AnalysisReport, AnalysisRequest, StructureAnalysisEngine};
