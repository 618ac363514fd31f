//! Cell values.

use std::fmt;

/// A single table cell, typed by inference at load time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Infer a cell from raw field text.
    ///
    /// Blank fields become `Empty`, anything `f64` accepts after trimming
    /// becomes `Number`, the rest is kept verbatim as `Text`.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(v) => CellValue::Number(v),
            Err(_) => CellValue::Text(raw.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Empty => CellKind::Empty,
            CellValue::Number(_) => CellKind::Number,
            CellValue::Text(_) => CellKind::Text,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Number(v as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

/// Coarse cell type, used to describe columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    Empty,
    Number,
    Text,
}

impl CellKind {
    pub fn label(&self) -> &'static str {
        match self {
            CellKind::Empty => "empty",
            CellKind::Number => "number",
            CellKind::Text => "text",
        }
    }
}
