//! CSV rendering of the ordered report.
//!
//! Field values are joined verbatim: embedded commas or newlines in a
//! value are not quoted or escaped. This matches the upstream report
//! format and is a documented limitation, not one to fix silently.

use crate::models::AggregateRecord;

/// Render records as CSV text. Empty input yields an empty string.
///
/// The header line is the fixed report column order; each record becomes
/// one comma-joined line in that same order.
pub fn to_csv(records: &[AggregateRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(AggregateRecord::FIELD_NAMES.join(","));
    for record in records {
        lines.push(record.field_values().join(","));
    }
    lines.join("\n")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
