use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ── EventKind ─────────────────────────────────────────────────────────────────

/// The three event names that contribute to a counter.
///
/// Any other EVENT_NAME value is still deduplicated but counts nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Open,
    Click,
    Send,
}

impl EventKind {
    /// Map a raw EVENT_NAME value to its counter, if it has one.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "emailOpen" => Some(Self::Open),
            "emailClick" => Some(Self::Click),
            "emailSend" => Some(Self::Send),
            _ => None,
        }
    }
}

// ── EventRow ──────────────────────────────────────────────────────────────────

/// A single decoded event row from the tabular source.
///
/// All fields are kept as strings: cluster IDs are coerced to their string
/// form at decode time and looked up as-is, and a missing field decodes to
/// an empty string so the row falls through the mapping lookup downstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventRow {
    #[serde(rename = "CLUSTER_ID", default)]
    pub cluster_id: String,
    #[serde(rename = "CAMPAIGN_ID", default)]
    pub campaign_id: String,
    #[serde(rename = "DELIVERY_ID", default)]
    pub delivery_id: String,
    #[serde(rename = "ENCODED_RECIPIENT_ID", default)]
    pub recipient_id: String,
    #[serde(rename = "EVENT_NAME", default)]
    pub event_name: String,
}

// ── EventIdentity ─────────────────────────────────────────────────────────────

/// Composite key used to deduplicate repeated event rows.
///
/// The first row observed for an identity is the only one counted; later
/// rows sharing the same identity are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventIdentity {
    pub campaign_id: String,
    pub delivery_id: String,
    pub recipient_id: String,
    pub variant_code: String,
    pub event_name: String,
}

// ── RangeMapping ──────────────────────────────────────────────────────────────

/// Mapping from an integer cluster key (serialized as a decimal string) to
/// the variant name that owns it.
///
/// Built by expanding each rule range into individual integer keys; later
/// rule blocks overwrite earlier ones on key collision.
#[derive(Debug, Clone, Default)]
pub struct RangeMapping {
    entries: HashMap<String, String>,
}

impl RangeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the variant name for a cluster key.
    pub fn insert(&mut self, cluster_key: impl Into<String>, variant: impl Into<String>) {
        self.entries.insert(cluster_key.into(), variant.into());
    }

    /// Resolve a cluster ID (in string form) to its variant name.
    pub fn variant_for(&self, cluster_id: &str) -> Option<&str> {
        self.entries.get(cluster_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── AggregateRecord ───────────────────────────────────────────────────────────

/// Per-variant counters plus the identifying columns of the output report.
///
/// CAMPAIGN_ID and DELIVERY_ID are taken from the first counted row for the
/// variant and are not validated for consistency across rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub variant_code: String,
    pub campaign_id: String,
    pub delivery_id: String,
    pub opens: u64,
    pub clicks: u64,
    pub sends: u64,
}

impl AggregateRecord {
    /// Output column names, in report order.
    pub const FIELD_NAMES: [&'static str; 6] = [
        "VARIANT_CODE",
        "CAMPAIGN_ID",
        "DELIVERY_ID",
        "OPENS",
        "CLICKS",
        "SENDS",
    ];

    /// Create a zeroed record seeded from the first counted row.
    pub fn new(
        variant_code: impl Into<String>,
        campaign_id: impl Into<String>,
        delivery_id: impl Into<String>,
    ) -> Self {
        Self {
            variant_code: variant_code.into(),
            campaign_id: campaign_id.into(),
            delivery_id: delivery_id.into(),
            opens: 0,
            clicks: 0,
            sends: 0,
        }
    }

    /// Field values in the same order as [`Self::FIELD_NAMES`].
    pub fn field_values(&self) -> [String; 6] {
        [
            self.variant_code.clone(),
            self.campaign_id.clone(),
            self.delivery_id.clone(),
            self.opens.to_string(),
            self.clicks.to_string(),
            self.sends.to_string(),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
