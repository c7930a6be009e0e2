//! Reporting and export — CSV, JSON, and Markdown artifacts.
//!
//! - **CSV**: the breakout table (date, close, volume, rolling_avg_volume,
//!   daily_pct_change, holding_return) with empty cells for undefined values
//! - **JSON**: full `AnalysisReport` with schema versioning
//! - **Markdown**: human-readable summary and table
//!
//! Unknown (newer) schema versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use breakout_core::BreakoutRecord;

use crate::runner::{AnalysisReport, SCHEMA_VERSION};

// ─── CSV export ─────────────────────────────────────────────────────

/// Columns written by `export_records_csv`.
pub const CSV_COLUMNS: [&str; 6] = [
    "date",
    "close",
    "volume",
    "rolling_avg_volume",
    "daily_pct_change",
    "holding_return",
];

/// Export breakout records as CSV. Undefined values become empty cells.
pub fn export_records_csv(records: &[BreakoutRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_COLUMNS)?;

    for r in records {
        wtr.write_record([
            r.date().to_string(),
            format!("{:.6}", r.close()),
            r.volume().to_string(),
            optional_cell(r.observation.rolling_avg_volume, 2),
            optional_cell(r.observation.daily_pct_change, 6),
            optional_cell(r.holding_return, 6),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

fn optional_cell(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{v:.precision$}"))
        .unwrap_or_default()
}

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize AnalysisReport to JSON")
}

/// Deserialize an `AnalysisReport`, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<AnalysisReport> {
    let report: AnalysisReport =
        serde_json::from_str(json).context("failed to deserialize AnalysisReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── Markdown report ────────────────────────────────────────────────

pub fn generate_markdown(report: &AnalysisReport) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str(&format!("# Breakout Report: {}\n\n", report.ticker));

    md.push_str("## Parameters\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!(
        "| Period | {} to {} |\n",
        report.start_date, report.end_date
    ));
    md.push_str(&format!(
        "| Volume Threshold | {}% of 20-day average |\n",
        report.params.volume_threshold_pct
    ));
    md.push_str(&format!(
        "| Price Change Threshold | > {}% |\n",
        report.params.price_change_threshold_pct
    ));
    md.push_str(&format!(
        "| Holding Period | {} days |\n",
        report.params.holding_period
    ));
    md.push_str(&format!("| Observations | {} |\n", report.observation_count));
    md.push_str(&format!("| Data Source | {:?} |\n", report.source));
    md.push_str(&format!("| Dataset Hash | {} |\n", report.dataset_hash));
    if report.is_synthetic() {
        md.push_str("| Data | **SYNTHETIC** |\n");
    }
    md.push('\n');

    if report.has_no_breakouts() {
        md.push_str("No breakout signals identified based on the given parameters.\n");
        return md;
    }

    let s = &report.stats;
    md.push_str("## Breakout Statistics\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Breakouts | {} |\n", s.breakout_count));
    md.push_str(&format!(
        "| Measured | {} ({} beyond series end) |\n",
        s.measured_count, s.unmeasured_count
    ));
    md.push_str(&format!("| Mean Return | {} |\n", pct_or_na(s.mean_return)));
    md.push_str(&format!("| Median Return | {} |\n", pct_or_na(s.median_return)));
    md.push_str(&format!("| Best | {} |\n", pct_or_na(s.best_return)));
    md.push_str(&format!("| Worst | {} |\n", pct_or_na(s.worst_return)));
    md.push_str(&format!(
        "| Win Rate | {} |\n",
        pct_or_na(s.win_rate.map(|w| w * 100.0))
    ));
    md.push('\n');

    md.push_str("## Breakout Days\n\n");
    md.push_str("| Date | Close | Volume | 20d Avg Volume | Daily Change | Holding Return |\n");
    md.push_str("| --- | ---: | ---: | ---: | ---: | ---: |\n");
    for r in &report.records {
        md.push_str(&format!(
            "| {} | {:.2} | {} | {} | {} | {} |\n",
            r.date(),
            r.close(),
            r.volume(),
            r.observation
                .rolling_avg_volume
                .map(|v| format!("{v:.0}"))
                .unwrap_or_else(|| "n/a".into()),
            pct_or_na(r.observation.daily_pct_change),
            pct_or_na(r.holding_return),
        ));
    }

    md
}

fn pct_or_na(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}%"))
        .unwrap_or_else(|| "n/a".into())
}

// ─── Report bundle ──────────────────────────────────────────────────

/// Paths of the files written by `save_report`.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub csv: PathBuf,
    pub json: PathBuf,
    pub markdown: PathBuf,
}

/// Write `{TICKER}_breakout_report.csv`, `{TICKER}_report.json` and
/// `{TICKER}_report.md` under `output_dir`, creating it if needed.
pub fn save_report(report: &AnalysisReport, output_dir: &Path) -> Result<ReportPaths> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create report dir: {}", output_dir.display()))?;

    let stem = sanitize_ticker(&report.ticker);
    let paths = ReportPaths {
        csv: output_dir.join(format!("{stem}_breakout_report.csv")),
        json: output_dir.join(format!("{stem}_report.json")),
        markdown: output_dir.join(format!("{stem}_report.md")),
    };

    let csv = export_records_csv(&report.records)?;
    std::fs::write(&paths.csv, csv)
        .with_context(|| format!("failed to write {}", paths.csv.display()))?;

    let json = export_json(report)?;
    std::fs::write(&paths.json, json)
        .with_context(|| format!("failed to write {}", paths.json.display()))?;

    std::fs::write(&paths.markdown, generate_markdown(report))
        .with_context(|| format!("failed to write {}", paths.markdown.display()))?;

    Ok(paths)
}

/// Load a report back from its JSON file.
pub fn load_report(path: &Path) -> Result<AnalysisReport> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

/// Tickers like `BRK/B` or `^GSPC` must not escape the output directory.
fn sanitize_ticker(ticker: &str) -> String {
    ticker
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect()
}
