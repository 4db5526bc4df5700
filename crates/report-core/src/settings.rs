use clap::Parser;
use std::path::PathBuf;

use crate::ordering::TierPrefixes;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Map spreadsheet event rows to rule-defined variants and export a CSV report
#[derive(Parser, Debug, Clone)]
#[command(
    name = "variant-report",
    about = "Map spreadsheet event rows to rule-defined variants and export a CSV report",
    version
)]
pub struct Settings {
    /// Path to the XML rule document defining variant cluster ranges
    #[arg(long)]
    pub rules: PathBuf,

    /// Path to the event data file (.csv, .jsonl, .ndjson or .json lines)
    #[arg(long)]
    pub data: PathBuf,

    /// Output path (defaults to the data file name with "-processed" appended)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Variant-code prefix that sorts first in the report
    #[arg(long, default_value = "PersadoVariant_C_")]
    pub tier1_prefix: String,

    /// Variant-code prefix that sorts second in the report
    #[arg(long, default_value = "PersadoVariant_DEF_")]
    pub tier2_prefix: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,
}

impl Settings {
    /// Build the sort-tier configuration from the CLI prefixes.
    pub fn tier_prefixes(&self) -> TierPrefixes {
        TierPrefixes {
            tier1: self.tier1_prefix.clone(),
            tier2: self.tier2_prefix.clone(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
