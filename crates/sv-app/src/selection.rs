//! Time and measure column selection.

use sv_core::Table;

use crate::error::{AppError, AppResult};

/// Columns offered as measures once `time_column` is chosen.
pub fn measure_candidates(table: &Table, time_column: &str) -> Vec<String> {
    table
        .columns()
        .iter()
        .filter(|c| c.as_str() != time_column)
        .cloned()
        .collect()
}

/// One time column plus the measures to chart. The first measure drives
/// wave detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    pub time_column: String,
    pub measures: Vec<String>,
}

impl ColumnSelection {
    pub fn new(time_column: impl Into<String>, measures: Vec<String>) -> Self {
        Self {
            time_column: time_column.into(),
            measures,
        }
    }

    pub fn primary_measure(&self) -> Option<&str> {
        self.measures.first().map(String::as_str)
    }

    /// Check the selection against a table's header.
    pub fn validate(&self, table: &Table) -> AppResult<()> {
        if !table.has_column(&self.time_column) {
            return Err(AppError::InvalidInput(format!(
                "Unknown time column: {}",
                self.time_column
            )));
        }
        if self.measures.is_empty() {
            return Err(AppError::InvalidInput(
                "Select at least one measure".to_string(),
            ));
        }
        for measure in &self.measures {
            if measure == &self.time_column {
                return Err(AppError::InvalidInput(format!(
                    "Time column '{}' cannot also be a measure",
                    measure
                )));
            }
            if !table.has_column(measure) {
                return Err(AppError::InvalidInput(format!(
                    "Unknown measure column: {}",
                    measure
                )));
            }
        }
        Ok(())
    }
}
