//! Deduplicating aggregation of event rows against the range mapping.
//!
//! Rows are consumed once, in input order. Order is observable: the first
//! row counted for a variant donates the record's CAMPAIGN_ID and
//! DELIVERY_ID, and the first row seen for an event identity suppresses
//! every later duplicate of that identity.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use report_core::models::{
    AggregateRecord, EventIdentity, EventKind, EventRow, RangeMapping,
};

// ── EventAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that folds event rows into per-variant counters.
pub struct EventAggregator;

impl EventAggregator {
    /// Aggregate `rows` against `mapping`.
    ///
    /// Per row: resolve CLUSTER_ID through the mapping (no entry, including
    /// an empty or missing ID, skips the row); drop the row if its event
    /// identity was already seen; otherwise count it under its variant.
    /// An unrecognized EVENT_NAME increments no counter but still marks the
    /// identity as seen.
    ///
    /// Records come back in first-seen variant order; the caller imposes
    /// the report ordering separately.
    pub fn aggregate(rows: &[EventRow], mapping: &RangeMapping) -> Vec<AggregateRecord> {
        let mut seen: HashSet<EventIdentity> = HashSet::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut records: Vec<AggregateRecord> = Vec::new();

        let mut rows_skipped = 0u64;
        let mut rows_deduped = 0u64;

        for row in rows {
            let Some(variant) = mapping.variant_for(&row.cluster_id) else {
                rows_skipped += 1;
                continue;
            };

            let identity = EventIdentity {
                campaign_id: row.campaign_id.clone(),
                delivery_id: row.delivery_id.clone(),
                recipient_id: row.recipient_id.clone(),
                variant_code: variant.to_string(),
                event_name: row.event_name.clone(),
            };
            if !seen.insert(identity) {
                rows_deduped += 1;
                continue;
            }

            let slot = *index.entry(variant.to_string()).or_insert_with(|| {
                records.push(AggregateRecord::new(
                    variant,
                    &row.campaign_id,
                    &row.delivery_id,
                ));
                records.len() - 1
            });

            match EventKind::from_name(&row.event_name) {
                Some(EventKind::Open) => records[slot].opens += 1,
                Some(EventKind::Click) => records[slot].clicks += 1,
                Some(EventKind::Send) => records[slot].sends += 1,
                None => {}
            }
        }

        debug!(
            "Aggregated {} rows into {} variants ({} unmatched, {} duplicates)",
            rows.len(),
            records.len(),
            rows_skipped,
            rows_deduped,
        );

        records
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn row(cluster: &str, recipient: &str, event: &str) -> EventRow {
        EventRow {
            cluster_id: cluster.to_string(),
            campaign_id: "camp-1".to_string(),
            delivery_id: "del-1".to_string(),
            recipient_id: recipient.to_string(),
            event_name: event.to_string(),
        }
    }

    fn mapping(entries: &[(&str, &str)]) -> RangeMapping {
        let mut m = RangeMapping::new();
        for (key, variant) in entries {
            m.insert(*key, *variant);
        }
        m
    }

    // ── Counter mapping ───────────────────────────────────────────────────────

    #[test]
    fn test_event_names_map_to_counters() {
        let m = mapping(&[("1", "V1")]);
        let rows = vec![
            row("1", "r1", "emailSend"),
            row("1", "r1", "emailOpen"),
            row("1", "r1", "emailClick"),
        ];

        let records = EventAggregator::aggregate(&rows, &m);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sends, 1);
        assert_eq!(records[0].opens, 1);
        assert_eq!(records[0].clicks, 1);
    }

    #[test]
    fn test_unrecognized_event_counts_nothing_but_marks_identity() {
        let m = mapping(&[("1", "V1")]);
        let rows = vec![
            row("1", "r1", "emailBounce"),
            // Exact duplicate of the bounce: suppressed by the identity.
            row("1", "r1", "emailBounce"),
            row("1", "r1", "emailOpen"),
        ];

        let records = EventAggregator::aggregate(&rows, &m);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].opens, 1);
        assert_eq!(records[0].clicks, 0);
        assert_eq!(records[0].sends, 0);
    }

    // ── Mapping lookup ────────────────────────────────────────────────────────

    #[test]
    fn test_unmapped_cluster_rows_dropped() {
        let m = mapping(&[("1", "V1")]);
        let rows = vec![row("1", "r1", "emailOpen"), row("99", "r1", "emailOpen")];

        let records = EventAggregator::aggregate(&rows, &m);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].variant_code, "V1");
    }

    #[test]
    fn test_missing_cluster_id_treated_as_unmapped() {
        let m = mapping(&[("1", "V1")]);
        let rows = vec![row("", "r1", "emailOpen")];

        let records = EventAggregator::aggregate(&rows, &m);
        assert!(records.is_empty());
    }

    // ── Deduplication ─────────────────────────────────────────────────────────

    #[test]
    fn test_duplicate_identity_counted_once() {
        let m = mapping(&[("1", "V1")]);
        let rows = vec![
            row("1", "r1", "emailOpen"),
            row("1", "r1", "emailOpen"),
            row("1", "r1", "emailOpen"),
        ];

        let records = EventAggregator::aggregate(&rows, &m);
        assert_eq!(records[0].opens, 1);
    }

    #[test]
    fn test_different_recipients_are_distinct_identities() {
        let m = mapping(&[("1", "V1")]);
        let rows = vec![row("1", "r1", "emailOpen"), row("1", "r2", "emailOpen")];

        let records = EventAggregator::aggregate(&rows, &m);
        assert_eq!(records[0].opens, 2);
    }

    #[test]
    fn test_same_recipient_different_events_both_counted() {
        let m = mapping(&[("1", "V1")]);
        let rows = vec![row("1", "r1", "emailSend"), row("1", "r1", "emailOpen")];

        let records = EventAggregator::aggregate(&rows, &m);
        assert_eq!(records[0].sends, 1);
        assert_eq!(records[0].opens, 1);
    }

    #[test]
    fn test_two_clusters_same_variant_share_one_record() {
        let m = mapping(&[("1", "V1"), ("2", "V1")]);
        let rows = vec![row("1", "r1", "emailOpen"), row("2", "r2", "emailOpen")];

        let records = EventAggregator::aggregate(&rows, &m);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].opens, 2);
    }

    #[test]
    fn test_aggregation_is_idempotent_for_fixed_order() {
        let m = mapping(&[("1", "V1"), ("2", "V2")]);
        let rows = vec![
            row("1", "r1", "emailSend"),
            row("2", "r1", "emailOpen"),
            row("1", "r1", "emailSend"),
        ];

        let first = EventAggregator::aggregate(&rows, &m);
        let second = EventAggregator::aggregate(&rows, &m);
        assert_eq!(first, second);
    }

    // ── Seeding ───────────────────────────────────────────────────────────────

    #[test]
    fn test_record_seeded_from_first_counted_row() {
        let m = mapping(&[("1", "V1")]);
        let mut first = row("1", "r1", "emailOpen");
        first.campaign_id = "camp-A".to_string();
        first.delivery_id = "del-A".to_string();
        let mut second = row("1", "r2", "emailOpen");
        second.campaign_id = "camp-B".to_string();
        second.delivery_id = "del-B".to_string();

        let records = EventAggregator::aggregate(&[first, second], &m);
        assert_eq!(records[0].campaign_id, "camp-A");
        assert_eq!(records[0].delivery_id, "del-A");
    }

    #[test]
    fn test_records_in_first_seen_variant_order() {
        let m = mapping(&[("1", "Beta"), ("2", "Alpha")]);
        let rows = vec![row("1", "r1", "emailOpen"), row("2", "r1", "emailOpen")];

        let records = EventAggregator::aggregate(&rows, &m);
        let codes: Vec<&str> = records.iter().map(|r| r.variant_code.as_str()).collect();
        assert_eq!(codes, vec!["Beta", "Alpha"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(EventAggregator::aggregate(&[], &mapping(&[("1", "V1")])).is_empty());
        assert!(
            EventAggregator::aggregate(&[row("1", "r1", "emailOpen")], &RangeMapping::new())
                .is_empty()
        );
    }
}
