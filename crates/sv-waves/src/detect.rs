//! Wave detection over a time-ordered table.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use sv_core::{SvResult, Table, Timestamp, timestamp_from_cell, total_seconds, truncate_measure};

/// One closed interval during which the measure stayed above zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wave {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Wave {
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn duration_secs(&self) -> f64 {
        total_seconds(self.duration())
    }
}

/// Scan `table` once and return every closed wave of `measure_column`.
///
/// A wave opens on the first row whose truncated measure is `> 0` and closes
/// on the next row whose truncated measure is `== 0`. Negative readings
/// neither open nor close a wave. A wave still open after the last row is
/// dropped.
///
/// Time cells are only parsed on rows where a wave opens or closes.
pub fn detect_waves(
    table: &Table,
    time_column: &str,
    measure_column: &str,
) -> SvResult<Vec<Wave>> {
    let time_idx = table.column_index(time_column)?;
    let measure_idx = table.column_index(measure_column)?;

    let mut waves = Vec::new();
    let mut open: Option<Timestamp> = None;

    for (row_idx, row) in table.rows().iter().enumerate() {
        let value = truncate_measure(&row[measure_idx], measure_column, row_idx)?;
        match open {
            None if value > 0 => {
                open = Some(timestamp_from_cell(&row[time_idx])?);
            }
            Some(start) if value == 0 => {
                let end = timestamp_from_cell(&row[time_idx])?;
                waves.push(Wave { start, end });
                open = None;
            }
            _ => {}
        }
    }

    if let Some(start) = open {
        tracing::debug!(%start, "wave still open at end of table, not emitted");
    }
    tracing::debug!(
        rows = table.len(),
        waves = waves.len(),
        measure = measure_column,
        "wave scan complete"
    );
    Ok(waves)
}
