//! Query helpers for describing tables and wave results.

use sv_core::{CellKind, Table};
use sv_waves::Wave;

use crate::error::AppResult;

/// Column name and dominant cell kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: CellKind,
}

/// Describe every column of a table.
pub fn describe_columns(table: &Table) -> AppResult<Vec<ColumnInfo>> {
    table
        .columns()
        .iter()
        .map(|name| -> AppResult<ColumnInfo> {
            Ok(ColumnInfo {
                name: name.clone(),
                kind: table.column_kind(name)?,
            })
        })
        .collect()
}

/// Aggregate figures over detected waves.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveSummary {
    pub count: usize,
    pub total_s: f64,
    pub longest_s: f64,
    pub mean_s: f64,
}

pub fn summarize_waves(waves: &[Wave]) -> WaveSummary {
    let durations: Vec<f64> = waves.iter().map(Wave::duration_secs).collect();
    let total_s: f64 = durations.iter().sum();
    let longest_s = durations.iter().copied().fold(0.0, f64::max);
    let mean_s = if durations.is_empty() {
        0.0
    } else {
        total_s / durations.len() as f64
    };
    WaveSummary {
        count: waves.len(),
        total_s,
        longest_s,
        mean_s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_core::{CellValue, from_epoch_seconds};

    #[test]
    fn describes_columns() {
        let table = Table::from_rows(
            vec!["time".into(), "flow".into()],
            vec![vec!["2024-01-01 00:00:00".into(), CellValue::Number(3.0)]],
        )
        .unwrap();
        let info = describe_columns(&table).unwrap();
        assert_eq!(info[0].kind, CellKind::Text);
        assert_eq!(info[1].kind, CellKind::Number);
    }

    #[test]
    fn summary_of_waves() {
        let t = |v: f64| from_epoch_seconds(v).unwrap();
        let waves = [
            Wave {
                start: t(0.0),
                end: t(2.0),
            },
            Wave {
                start: t(5.0),
                end: t(9.0),
            },
        ];
        let summary = summarize_waves(&waves);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_s, 6.0);
        assert_eq!(summary.longest_s, 4.0);
        assert_eq!(summary.mean_s, 3.0);

        let empty = summarize_waves(&[]);
        assert_eq!(empty.count, 0);
        assert_eq!(empty.mean_s, 0.0);
    }
}
