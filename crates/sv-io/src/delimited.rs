//! Delimited text reader.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use sv_core::{CellValue, Table};

use crate::format::{InputFormat, detect_format};
use crate::{IoError, IoResult};

pub const DEFAULT_DELIMITERS: &[u8] = b";,";

/// Accept a single ASCII character as a field delimiter. `\t` and `tab`
/// both mean a tab.
pub fn parse_delimiter(text: &str) -> IoResult<u8> {
    if matches!(text, "\\t" | "tab") {
        return Ok(b'\t');
    }
    let bytes = text.as_bytes();
    if bytes.len() == 1 && bytes[0].is_ascii() && !bytes[0].is_ascii_alphanumeric() {
        Ok(bytes[0])
    } else {
        Err(IoError::InvalidDelimiter(text.to_string()))
    }
}

/// Pick the candidate that splits the header line into the most fields.
/// Ties go to the earlier candidate.
pub fn sniff_delimiter(data: &[u8], candidates: &[u8]) -> Option<u8> {
    let first_line = data.split(|&b| b == b'\n').next().unwrap_or(&[]);
    let mut best: Option<(u8, usize)> = None;
    for &delim in candidates {
        let fields = csv::ReaderBuilder::new()
            .delimiter(delim)
            .has_headers(false)
            .from_reader(first_line)
            .records()
            .next()
            .and_then(|r| r.ok())
            .map(|r| r.len())
            .unwrap_or(0);
        match best {
            Some((_, n)) if n >= fields => {}
            _ => best = Some((delim, fields)),
        }
    }
    best.map(|(d, _)| d)
}

/// Read a header row plus records into a [`Table`], inferring cell types.
///
/// Repeated header names get `.1`, `.2`, ... suffixes so every column stays
/// addressable by name.
pub fn read_table<R: Read>(reader: R, delimiter: u8) -> IoResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(IoError::Empty);
    }
    let mut table = Table::new(dedupe_names(headers.iter()));

    for record in rdr.records() {
        let record = record?;
        table.push_row(record.iter().map(CellValue::infer).collect())?;
    }
    Ok(table)
}

/// Load a file into a table.
///
/// With `delimiter == None` the delimiter is sniffed from `candidates`.
pub fn load_table(path: &Path, delimiter: Option<u8>, candidates: &[u8]) -> IoResult<Table> {
    if detect_format(path) == InputFormat::Workbook {
        return Err(IoError::UnsupportedFormat {
            what: format!("{} (spreadsheet workbooks are not supported)", path.display()),
        });
    }

    let data = fs::read(path)?;
    let delimiter = match delimiter {
        Some(d) => d,
        None => sniff_delimiter(&data, candidates).unwrap_or(b','),
    };
    let table = read_table(data.as_slice(), delimiter)?;
    tracing::info!(
        path = %path.display(),
        delimiter = %(delimiter as char),
        columns = table.columns().len(),
        rows = table.len(),
        "table loaded"
    );
    Ok(table)
}

fn dedupe_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::new();
    for name in names {
        let n = counts.entry(name.to_string()).or_insert(0);
        if *n == 0 {
            out.push(name.to_string());
        } else {
            out.push(format!("{}.{}", name, n));
        }
        *n += 1;
    }
    out
}
