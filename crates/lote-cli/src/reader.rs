//! CSV adapter feeding the pipeline.
//!
//! The pipeline itself never parses files; this adapter plays the role of
//! the external file parser, turning a CSV export into string-keyed rows.

use std::path::Path;

use anyhow::{Context, Result};

use lote_model::RawRecord;

/// Reads a CSV export into raw records keyed by header text.
pub fn read_rows(path: &Path, delimiter: char) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("read headers of {}", path.display()))?
        .clone();

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("parse line {} of {}", line + 2, path.display()))?;
        let mut row = RawRecord::new();
        for (index, field) in record.iter().enumerate() {
            if let Some(header) = headers.get(index) {
                row.insert(header.to_string(), field.to_string());
            }
        }
        rows.push(row);
    }
    Ok(rows)
}
