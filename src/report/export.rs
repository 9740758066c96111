//! Scored dataset and JSON report export.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use polars::prelude::*;
use serde::Serialize;

use crate::pipeline::lift::DecileRow;
use crate::pipeline::scoring::FeatureImportance;
use crate::report::summary::ScoringReport;

/// Name of the appended probability column.
pub const SCORE_COLUMN: &str = "score_probabilidade";
/// Name of the appended risk label column.
pub const RISK_COLUMN: &str = "classe_risco";

/// Append the probability and risk label columns to the scored batch.
pub fn append_score_columns(
    df: &DataFrame,
    probabilities: &[f64],
    labels: &[&'static str],
) -> Result<DataFrame> {
    let mut scored = df.clone();
    scored
        .with_column(Column::new(SCORE_COLUMN.into(), probabilities))
        .context("Failed to append probability column")?;
    scored
        .with_column(Column::new(RISK_COLUMN.into(), labels))
        .context("Failed to append risk label column")?;
    Ok(scored)
}

/// Save the scored dataset to file (CSV or Parquet based on extension).
pub fn save_scored_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}

/// Metadata about the scoring run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// Escora version
    pub escora_version: String,
    /// Input file path
    pub input_file: String,
    /// Model artifact path
    pub model_file: String,
    /// Ground-truth label column name
    pub target_column: String,
    /// Percentile used for the risk cutoff
    pub risk_percentile: f64,
}

/// Batch-level summary statistics
#[derive(Serialize)]
pub struct BatchSummary {
    pub rows: usize,
    pub cutoff: f64,
    pub high_risk_count: usize,
    pub low_risk_count: usize,
    pub high_risk_pct: f64,
    pub low_risk_pct: f64,
}

/// Complete scoring report export with metadata
#[derive(Serialize)]
pub struct ScoringReportExport<'a> {
    pub metadata: RunMetadata,
    pub summary: BatchSummary,
    /// Full feature-importance ranking, descending by gain
    pub feature_importance: &'a [FeatureImportance],
    /// Lift table, present only when the target column was available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lift: Option<&'a [DecileRow]>,
}

/// Parameters for the JSON report export
pub struct ReportParams<'a> {
    pub input_file: &'a str,
    pub model_file: &'a str,
    pub target_column: &'a str,
    pub risk_percentile: f64,
}

/// Export the scoring report to a JSON file with run metadata.
pub fn export_report_json(
    report: &ScoringReport,
    output_path: &Path,
    params: &ReportParams,
) -> Result<()> {
    let export = ScoringReportExport {
        metadata: RunMetadata {
            timestamp: Utc::now().to_rfc3339(),
            escora_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            model_file: params.model_file.to_string(),
            target_column: params.target_column.to_string(),
            risk_percentile: params.risk_percentile,
        },
        summary: BatchSummary {
            rows: report.rows,
            cutoff: report.cutoff,
            high_risk_count: report.high_count,
            low_risk_count: report.low_count,
            high_risk_pct: report.high_pct,
            low_risk_pct: report.low_pct,
        },
        feature_importance: &report.importance,
        lift: report.lift.as_deref(),
    };

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize scoring report to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write scoring report to {}", output_path.display()))?;

    Ok(())
}
