//! The top-level report pipeline.
//!
//! Chains rule parsing, aggregation, ordering and rendering over inputs
//! that are already resident in memory. Every stage is a pure synchronous
//! transformation; a parse failure aborts the whole run with no partial
//! output.

use tracing::info;

use crate::aggregator::EventAggregator;
use crate::rules::RuleParser;
use report_core::models::EventRow;
use report_core::ordering::{sort_records, TierPrefixes};
use report_core::{render, Result};

/// Run the full pipeline: rule text plus decoded rows in, CSV text out.
pub fn process(rule_text: &str, rows: &[EventRow], prefixes: &TierPrefixes) -> Result<String> {
    let mapping = RuleParser::parse(rule_text)?;
    info!(
        "Rule document yielded {} cluster keys",
        mapping.len()
    );

    let mut records = EventAggregator::aggregate(rows, &mapping);
    info!(
        "Aggregated {} rows into {} variant records",
        rows.len(),
        records.len()
    );

    sort_records(&mut records, prefixes);
    Ok(render::to_csv(&records))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
