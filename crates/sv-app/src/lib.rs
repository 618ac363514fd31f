//! Shared application service layer for sheetviz.
//!
//! This crate provides the interface the CLI talks to, centralizing
//! configuration, column selection, chart construction, wave analysis and
//! chart export.

pub mod chart_service;
pub mod config;
pub mod error;
pub mod query;
pub mod selection;

// Re-export key types for convenience
pub use chart_service::{
    VisualizeRequest, VisualizeResponse, analyze_waves, build_chart, build_position_chart,
    export_chart, load_input, prepare_table, visualize,
};
pub use config::{AppConfig, DedupPolicy, load_config, save_config};
pub use error::{AppError, AppResult};
pub use query::{ColumnInfo, WaveSummary, describe_columns, summarize_waves};
pub use selection::{ColumnSelection, measure_candidates};
