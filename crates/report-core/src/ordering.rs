//! Deterministic ordering of aggregated variant records.
//!
//! Records are ranked into three tiers by variant-code prefix and sorted
//! lexicographically within each tier. The tier assignment is explicit so
//! that additional tiers can be added without touching the comparator.

use crate::models::AggregateRecord;

// ── TierPrefixes ──────────────────────────────────────────────────────────────

/// The two variant-code prefixes that promote a record above the rest.
///
/// Tier-1 records sort first, tier-2 second, everything else last. The
/// defaults match the upstream rule-document naming convention.
#[derive(Debug, Clone)]
pub struct TierPrefixes {
    pub tier1: String,
    pub tier2: String,
}

impl Default for TierPrefixes {
    fn default() -> Self {
        Self {
            tier1: "PersadoVariant_C_".to_string(),
            tier2: "PersadoVariant_DEF_".to_string(),
        }
    }
}

impl TierPrefixes {
    /// Assign the sort tier for a variant code: 0, 1, or 2.
    pub fn tier(&self, variant_code: &str) -> u8 {
        if variant_code.starts_with(&self.tier1) {
            0
        } else if variant_code.starts_with(&self.tier2) {
            1
        } else {
            2
        }
    }
}

// ── Sorting ───────────────────────────────────────────────────────────────────

/// Stable sort by `(tier, variant_code)`.
pub fn sort_records(records: &mut [AggregateRecord], prefixes: &TierPrefixes) {
    records.sort_by(|a, b| {
        prefixes
            .tier(&a.variant_code)
            .cmp(&prefixes.tier(&b.variant_code))
            .then_with(|| a.variant_code.cmp(&b.variant_code))
    });
}

// ── Tests ─────────────────────────────────────────────────────────────────────
