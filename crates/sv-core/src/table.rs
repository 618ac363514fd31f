//! Column-addressed table of rows.

use std::collections::HashSet;

use crate::error::{SvError, SvResult};
use crate::value::{CellKind, CellValue};

/// Ordered rows under a fixed header.
///
/// Rows are expected to be in ascending time order; the table never checks
/// or enforces that.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from a header and rows, checking every row's width.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> SvResult<Self> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) -> SvResult<()> {
        if row.len() != self.columns.len() {
            return Err(SvError::RowWidth {
                row: self.rows.len(),
                found: row.len(),
                expected: self.columns.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> SvResult<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| SvError::MissingColumn {
                column: column.to_string(),
            })
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn cell(&self, row: usize, column: &str) -> SvResult<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows
            .get(row)
            .map(|r| &r[idx])
            .ok_or(SvError::Invariant {
                what: "row index out of bounds",
            })
    }

    /// Iterate over one column's cells in row order.
    pub fn column_values<'a>(
        &'a self,
        column: &str,
    ) -> SvResult<impl Iterator<Item = &'a CellValue> + use<'a>> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(move |r| &r[idx]))
    }

    /// Dominant non-empty kind of a column (`Empty` if every cell is blank).
    pub fn column_kind(&self, column: &str) -> SvResult<CellKind> {
        let mut numbers = 0usize;
        let mut texts = 0usize;
        for value in self.column_values(column)? {
            match value.kind() {
                CellKind::Number => numbers += 1,
                CellKind::Text => texts += 1,
                CellKind::Empty => {}
            }
        }
        Ok(match (numbers, texts) {
            (0, 0) => CellKind::Empty,
            (n, t) if n >= t => CellKind::Number,
            _ => CellKind::Text,
        })
    }

    /// Remove rows identical to an earlier row, keeping first occurrences.
    ///
    /// Returns the number of rows removed.
    pub fn drop_duplicates(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen: HashSet<Vec<CellKey>> = HashSet::with_capacity(before);
        self.rows
            .retain(|row| seen.insert(row.iter().map(CellKey::from).collect()));
        before - self.rows.len()
    }

    /// Remove rows whose `column` value repeats an earlier row's value.
    ///
    /// Returns the number of rows removed.
    pub fn drop_duplicate_keys(&mut self, column: &str) -> SvResult<usize> {
        let idx = self.column_index(column)?;
        let before = self.rows.len();
        let mut seen: HashSet<CellKey> = HashSet::with_capacity(before);
        self.rows.retain(|row| seen.insert(CellKey::from(&row[idx])));
        Ok(before - self.rows.len())
    }
}

/// Hashable identity of a cell. Numbers compare by bit pattern with `-0.0`
/// folded onto `0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CellKey {
    Empty,
    Number(u64),
    Text(String),
}

impl From<&CellValue> for CellKey {
    fn from(value: &CellValue) -> Self {
        match value {
            CellValue::Empty => CellKey::Empty,
            CellValue::Number(v) if *v == 0.0 => CellKey::Number(0.0f64.to_bits()),
            CellValue::Number(v) => CellKey::Number(v.to_bits()),
            CellValue::Text(s) => CellKey::Text(s.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec!["time".into(), "flow".into()],
            vec![
                vec![CellValue::Number(0.0), CellValue::Number(0.0)],
                vec![CellValue::Number(1.0), CellValue::Number(5.0)],
                vec![CellValue::Number(1.0), CellValue::Number(5.0)],
                vec![CellValue::Number(1.0), CellValue::Number(-0.0)],
                vec![CellValue::Number(2.0), CellValue::Number(0.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let table = sample();
        let err = table.column_index("pressure").unwrap_err();
        assert_eq!(
            err,
            SvError::MissingColumn {
                column: "pressure".to_string()
            }
        );
    }

    #[test]
    fn ragged_row_rejected() {
        let mut table = Table::new(vec!["a".into(), "b".into()]);
        let err = table.push_row(vec![CellValue::Empty]).unwrap_err();
        assert!(matches!(
            err,
            SvError::RowWidth {
                found: 1,
                expected: 2,
                ..
            }
        ));
    }

    #[test]
    fn drop_duplicates_keeps_first_occurrence() {
        let mut table = sample();
        assert_eq!(table.drop_duplicates(), 1);
        assert_eq!(table.len(), 4);
        assert_eq!(table.rows()[1][1], CellValue::Number(5.0));
        assert_eq!(table.rows()[2][1], CellValue::Number(-0.0));
    }

    #[test]
    fn drop_duplicate_keys_by_time() {
        let mut table = sample();
        assert_eq!(table.drop_duplicate_keys("time").unwrap(), 2);
        let times: Vec<f64> = table
            .column_values("time")
            .unwrap()
            .filter_map(CellValue::as_number)
            .collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn column_kind_prefers_majority() {
        let table = Table::from_rows(
            vec!["t".into(), "m".into()],
            vec![
                vec![CellValue::from("2024-01-01"), CellValue::Number(1.0)],
                vec![CellValue::from("2024-01-02"), CellValue::Empty],
            ],
        )
        .unwrap();
        assert_eq!(table.column_kind("t").unwrap(), CellKind::Text);
        assert_eq!(table.column_kind("m").unwrap(), CellKind::Number);
    }
}
