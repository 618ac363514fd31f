//! Input format detection by file extension.

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Delimited,
    /// Excel workbook family; recognised so it can be rejected explicitly.
    Workbook,
}

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xltx", "xltm"];

/// Classify a path by its (case-insensitive) extension. Anything that is not
/// a workbook is read as delimited text.
pub fn detect_format(path: &Path) -> InputFormat {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some(e) if WORKBOOK_EXTENSIONS.contains(&e) => InputFormat::Workbook,
        _ => InputFormat::Delimited,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_extensions() {
        assert_eq!(detect_format(Path::new("data.csv")), InputFormat::Delimited);
        assert_eq!(detect_format(Path::new("DATA.CSV")), InputFormat::Delimited);
        assert_eq!(detect_format(Path::new("log.txt")), InputFormat::Delimited);
        assert_eq!(detect_format(Path::new("noext")), InputFormat::Delimited);
        assert_eq!(detect_format(Path::new("book.XLSX")), InputFormat::Workbook);
        assert_eq!(detect_format(Path::new("macro.xlsm")), InputFormat::Workbook);
    }
}
