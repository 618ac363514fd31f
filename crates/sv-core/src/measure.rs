//! Numeric policy for measure columns.
//!
//! Measure values are truncated toward zero before any comparison, so `0.9`
//! counts as zero and `-0.5` counts as zero as well. Blank, textual or
//! non-finite cells are conversion errors.

use crate::error::{SvError, SvResult};
use crate::value::CellValue;

pub fn ensure_finite(v: f64, what: &'static str) -> SvResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SvError::NonFinite { what, value: v })
    }
}

/// Truncate a measure cell toward zero.
///
/// `column` and `row` only feed the error message.
pub fn truncate_measure(cell: &CellValue, column: &str, row: usize) -> SvResult<i64> {
    let non_numeric = || SvError::NonNumeric {
        column: column.to_string(),
        row,
        value: cell.to_string(),
    };
    match cell {
        CellValue::Number(v) => {
            let v = ensure_finite(*v, "measure value").map_err(|_| non_numeric())?;
            Ok(v.trunc() as i64)
        }
        CellValue::Text(s) => s.trim().parse::<i64>().map_err(|_| non_numeric()),
        CellValue::Empty => Err(non_numeric()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(truncate_measure(&CellValue::Number(5.7), "m", 0).unwrap(), 5);
        assert_eq!(truncate_measure(&CellValue::Number(0.9), "m", 0).unwrap(), 0);
        assert_eq!(truncate_measure(&CellValue::Number(-0.5), "m", 0).unwrap(), 0);
        assert_eq!(truncate_measure(&CellValue::Number(-2.5), "m", 0).unwrap(), -2);
    }

    #[test]
    fn integer_text_is_accepted() {
        let cell = CellValue::Text(" 12 ".to_string());
        assert_eq!(truncate_measure(&cell, "m", 3).unwrap(), 12);
    }

    #[test]
    fn rejects_non_numeric() {
        let err = truncate_measure(&CellValue::Text("high".into()), "flow", 7).unwrap_err();
        assert_eq!(
            err,
            SvError::NonNumeric {
                column: "flow".to_string(),
                row: 7,
                value: "high".to_string(),
            }
        );
        assert!(truncate_measure(&CellValue::Empty, "flow", 0).is_err());
        assert!(truncate_measure(&CellValue::Number(f64::INFINITY), "flow", 0).is_err());
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(f64::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }
}
