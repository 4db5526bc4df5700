use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Output-path derivation ─────────────────────────────────────────────────────

/// Derive the report path from the data file name.
///
/// The name is split on `.` and only the first two segments are kept:
/// `events.csv` becomes `events-processed.csv`. A name with several dots
/// loses everything after the second segment (`report.final.csv` becomes
/// `report-processed.final`), matching the upstream naming exactly.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("report");

    let mut segments = name.split('.');
    let base = segments.next().unwrap_or(name);
    let processed = match segments.next() {
        Some(extension) => format!("{}-processed.{}", base, extension),
        None => format!("{}-processed", base),
    };

    input.with_file_name(processed)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── derive_output_path ────────────────────────────────────────────────────

    #[test]
    fn test_derive_output_path_simple_name() {
        let out = derive_output_path(Path::new("/data/events.csv"));
        assert_eq!(out, PathBuf::from("/data/events-processed.csv"));
    }

    #[test]
    fn test_derive_output_path_keeps_directory() {
        let out = derive_output_path(Path::new("deep/nested/rows.jsonl"));
        assert_eq!(out, PathBuf::from("deep/nested/rows-processed.jsonl"));
    }

    #[test]
    fn test_derive_output_path_no_extension() {
        let out = derive_output_path(Path::new("/data/events"));
        assert_eq!(out, PathBuf::from("/data/events-processed"));
    }

    #[test]
    fn test_derive_output_path_multi_dot_truncates() {
        // Only the first two dot-separated segments survive.
        let out = derive_output_path(Path::new("/data/report.final.csv"));
        assert_eq!(out, PathBuf::from("/data/report-processed.final"));
    }

    #[test]
    fn test_derive_output_path_leading_dot() {
        let out = derive_output_path(Path::new("/data/.csv"));
        assert_eq!(out, PathBuf::from("/data/-processed.csv"));
    }
}
