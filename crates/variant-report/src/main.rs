mod bootstrap;

use anyhow::Result;
use clap::Parser;
use report_core::settings::Settings;
use report_core::ReportError;
use report_data::pipeline;
use report_data::reader::read_event_rows;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("variant-report v{} starting", env!("CARGO_PKG_VERSION"));

    // Both inputs must exist before any stage runs; no partial output.
    if !settings.rules.exists() {
        return Err(ReportError::InputMissing(format!(
            "rule document {}",
            settings.rules.display()
        ))
        .into());
    }
    if !settings.data.exists() {
        return Err(ReportError::InputMissing(format!(
            "event data file {}",
            settings.data.display()
        ))
        .into());
    }

    let rule_text =
        std::fs::read_to_string(&settings.rules).map_err(|e| ReportError::FileRead {
            path: settings.rules.clone(),
            source: e,
        })?;

    let rows = read_event_rows(&settings.data)?;

    let csv = pipeline::process(&rule_text, &rows, &settings.tier_prefixes())?;

    let output_path = settings
        .output
        .clone()
        .unwrap_or_else(|| bootstrap::derive_output_path(&settings.data));

    std::fs::write(&output_path, &csv)?;

    tracing::info!("Report written to {}", output_path.display());

    Ok(())
}
