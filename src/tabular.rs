use std::collections::HashMap;

use anyhow::Result;
use tracing::debug;

/// One parsed CSV row, keyed by header name (or column index without a header).
pub type Row = HashMap<String, String>;

/// Parse delimited text into rows.
///
/// With `has_header`, the first non-empty line names the columns. Rows with
/// more fields than the header are skipped; rows with fewer map the missing
/// columns to `""`. Without a header, fields are keyed `"0"`, `"1"`, ...
/// Values are returned verbatim: no trimming, no numeric coercion.
pub fn parse(text: &str, has_header: bool) -> Vec<Row> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let line = idx + 1;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                debug!(line, error = %e, "skipping undecodable row");
                continue;
            }
        };

        if is_blank(&record) {
            continue;
        }

        if !has_header {
            rows.push(
                record
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v.to_string()))
                    .collect(),
            );
            continue;
        }

        let Some(names) = &header else {
            header = Some(record.iter().map(normalize_header_name).collect());
            continue;
        };

        if record.len() > names.len() {
            debug!(
                line,
                fields = record.len(),
                expected = names.len(),
                "skipping row with too many fields"
            );
            continue;
        }

        rows.push(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), record.get(i).unwrap_or("").to_string()))
                .collect(),
        );
    }

    rows
}

/// Serialize rows back to CSV, emitting `columns` as the header and in that order.
/// Keys missing from a row are written as empty fields.
pub fn to_csv(rows: &[Row], columns: &[&str]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns)?;
    for row in rows {
        writer.write_record(
            columns
                .iter()
                .map(|c| row.get(*c).map(String::as_str).unwrap_or("")),
        )?;
    }
    writer.flush()?;
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    name.trim_start_matches('\u{feff}').trim().to_string()
}
