//! Application configuration, loaded from YAML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sv_render::RenderOptions;
use sv_waves::AnnotationStyle;

use crate::error::{AppError, AppResult};

/// Which duplicates to drop before charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    /// Identical rows.
    #[default]
    Rows,
    /// Rows repeating an earlier timestamp.
    Time,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    /// Delimiters offered for delimited input, in preference order.
    pub delimiters: Vec<String>,
    /// Annotate wave durations on the chart.
    pub show_duration: bool,
    pub dedup: DedupPolicy,
    pub annotation: AnnotationStyle,
    pub render: RenderOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Excel Visualizer".to_string(),
            delimiters: vec![";".to_string(), ",".to_string()],
            show_duration: true,
            dedup: DedupPolicy::Rows,
            annotation: AnnotationStyle::default(),
            render: RenderOptions::default(),
        }
    }
}

impl AppConfig {
    /// Configured delimiters as single bytes.
    pub fn delimiter_bytes(&self) -> AppResult<Vec<u8>> {
        self.delimiters
            .iter()
            .map(|d| sv_io::parse_delimiter(d).map_err(AppError::from))
            .collect()
    }
}

/// Load configuration from a YAML file.
pub fn load_config(path: &Path) -> AppResult<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: AppConfig = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?;
    config.delimiter_bytes()?;

    Ok(config)
}

/// Save configuration to a YAML file.
pub fn save_config(path: &Path, config: &AppConfig) -> AppResult<()> {
    let content = serde_yaml::to_string(config)
        .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::ConfigFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
