//! CSV fetch and parse pipeline
//!
//! The engine fetches CSV text itself on a `load_csv` request: over HTTP
//! for `http(s)://` sources, from the local filesystem otherwise. Parsing
//! is header-based with dynamic typing: integer, float and boolean cells
//! become JSON scalars of that type, empty cells are absent, and rows with
//! no populated cells are skipped.

use crate::engine::error::{EngineError, EngineResult};
use crate::models::OrgRow;
use serde_json::Value;

/// Fetch raw CSV text from a URL or local path.
pub async fn fetch_text(client: &reqwest::Client, source: &str) -> EngineResult<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let response = client.get(source).send().await?;
        if !response.status().is_success() {
            return Err(EngineError::Fetch(format!(
                "HTTP error! status: {}",
                response.status().as_u16()
            )));
        }
        Ok(response.text().await?)
    } else {
        Ok(tokio::fs::read_to_string(source).await?)
    }
}

/// Parse CSV text into rows, first line as headers.
pub fn parse_rows(text: &str) -> EngineResult<Vec<OrgRow>> {
    let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;
        let mut row = OrgRow::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            if cell.is_empty() || header.is_empty() {
                continue;
            }
            row.insert(header, type_cell(cell));
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(rows)
}

/// Dynamic typing for a CSV cell: integers, floats and booleans become
/// typed scalars, everything else stays a string.
fn type_cell(cell: &str) -> Value {
    if let Ok(n) = cell.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = cell.parse::<f64>() {
        if f.is_finite() {
            return Value::from(f);
        }
    }
    match cell {
        "true" => Value::from(true),
        "false" => Value::from(false),
        _ => Value::from(cell),
    }
}
