//! Event-row decoding for the variant report tool.
//!
//! The upstream pipeline treats spreadsheet decoding as an external step
//! that yields an ordered sequence of row records; this module covers the
//! two tabular text forms the tool accepts: CSV with a header row, and
//! line-delimited JSON objects. Field values are coerced to strings and a
//! missing field decodes to an empty string, so shape problems surface as
//! skipped rows downstream rather than as errors here.

use std::io::BufRead;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use report_core::models::EventRow;
use report_core::{ReportError, Result};

// ── Public API ────────────────────────────────────────────────────────────────

/// Decode the event data file at `path` into ordered rows.
///
/// Dispatches on the file extension: `.csv` is read with a header row;
/// `.jsonl`, `.ndjson` and `.json` are read as one JSON object per line.
/// Anything else is a decode error.
pub fn read_event_rows(path: &Path) -> Result<Vec<EventRow>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let rows = match extension.as_str() {
        "csv" => read_csv_rows(path)?,
        "jsonl" | "ndjson" | "json" => read_jsonl_rows(path)?,
        other => {
            return Err(ReportError::Decode(format!(
                "unsupported data format: \"{}\" (expected csv, jsonl, ndjson or json)",
                other
            )))
        }
    };

    debug!("Decoded {} event rows from {}", rows.len(), path.display());
    Ok(rows)
}

// ── CSV decoding ──────────────────────────────────────────────────────────────

/// The columns an event row is built from, by header name.
const COLUMNS: [&str; 5] = [
    "CLUSTER_ID",
    "CAMPAIGN_ID",
    "DELIVERY_ID",
    "ENCODED_RECIPIENT_ID",
    "EVENT_NAME",
];

fn read_csv_rows(path: &Path) -> Result<Vec<EventRow>> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| ReportError::Decode(e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| ReportError::Decode(e.to_string()))?
        .clone();

    // Column positions; a header may be absent entirely.
    let positions: Vec<Option<usize>> = COLUMNS
        .iter()
        .map(|name| headers.iter().position(|h| h == *name))
        .collect();

    if positions.iter().all(Option::is_none) {
        warn!(
            "None of the expected columns found in {} (headers: {:?})",
            path.display(),
            headers
        );
    }

    let field = |record: &csv::StringRecord, column: usize| -> String {
        positions[column]
            .and_then(|i| record.get(i))
            .unwrap_or("")
            .to_string()
    };

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ReportError::Decode(e.to_string()))?;
        rows.push(EventRow {
            cluster_id: field(&record, 0),
            campaign_id: field(&record, 1),
            delivery_id: field(&record, 2),
            recipient_id: field(&record, 3),
            event_name: field(&record, 4),
        });
    }
    Ok(rows)
}

// ── JSONL decoding ────────────────────────────────────────────────────────────

fn read_jsonl_rows(path: &Path) -> Result<Vec<EventRow>> {
    let file = std::fs::File::open(path).map_err(|e| ReportError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let reader = std::io::BufReader::new(file);
    let mut rows = Vec::new();

    for (line_no, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|e| ReportError::Decode(e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(trimmed).map_err(|e| {
            ReportError::Decode(format!("line {}: {}", line_no + 1, e))
        })?;

        rows.push(EventRow {
            cluster_id: stringly(&value, "CLUSTER_ID"),
            campaign_id: stringly(&value, "CAMPAIGN_ID"),
            delivery_id: stringly(&value, "DELIVERY_ID"),
            recipient_id: stringly(&value, "ENCODED_RECIPIENT_ID"),
            event_name: stringly(&value, "EVENT_NAME"),
        });
    }
    Ok(rows)
}

/// Coerce a row field to its string form.
///
/// Spreadsheet exports leave numeric cells as JSON numbers; the mapping is
/// keyed by decimal strings, so numbers render through their decimal form.
/// Missing or null fields become the empty string.
fn stringly(row: &Value, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
