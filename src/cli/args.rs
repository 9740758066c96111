//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default file name of the scored output table.
pub const DEFAULT_OUTPUT_NAME: &str = "base_escorada.csv";

/// Escora - Score applicant batches with a pre-trained credit-risk pipeline
#[derive(Parser, Debug)]
#[command(name = "escora")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file path (CSV or Parquet) with applicant records
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Model artifact path (JSON scoring pipeline)
    #[arg(short, long, default_value = "model_final.json")]
    pub model: PathBuf,

    /// Output file path for the scored table (CSV or Parquet, determined
    /// by extension). Defaults to 'base_escorada.csv' next to the input.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ground-truth label column (1 = defaulted). When absent from the
    /// input the lift table is skipped with a notice.
    #[arg(short, long, default_value = "mau")]
    pub target: String,

    /// Percentile of the batch's own scores used as the high-risk cutoff
    #[arg(long, default_value = "0.95", value_parser = validate_percentile)]
    pub risk_percentile: f64,

    /// How many top features to show in the importance chart
    #[arg(long, default_value = "15")]
    pub top_features: usize,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Path for the JSON scoring report.
    /// Defaults to '<input stem>_scoring_report.json' next to the input.
    #[arg(long)]
    pub report_json: Option<PathBuf>,

    /// Skip writing the JSON scoring report
    #[arg(long, default_value = "false")]
    pub no_report_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the structure of a model artifact
    Inspect {
        /// Model artifact path (JSON scoring pipeline)
        model: PathBuf,
    },
}

impl Cli {
    /// Get the input path, if provided.
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    /// Get the output path, deriving the stable default name next to the
    /// input if not explicitly provided.
    pub fn output_path(&self) -> Option<PathBuf> {
        let input = self.input.as_ref()?;
        Some(self.output.clone().unwrap_or_else(|| {
            let parent = input.parent().unwrap_or_else(|| std::path::Path::new("."));
            parent.join(DEFAULT_OUTPUT_NAME)
        }))
    }

    /// Get the JSON report path, derived from the input file when not
    /// explicitly provided.
    pub fn report_json_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.report_json {
            return Some(path.clone());
        }
        let input = self.input.as_ref()?;
        let parent = input.parent().unwrap_or_else(|| std::path::Path::new("."));
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        Some(parent.join(format!("{}_scoring_report.json", stem)))
    }
}

/// Validator for risk_percentile parameter
fn validate_percentile(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(value > 0.0 && value < 1.0) {
        Err(format!(
            "risk_percentile must be strictly between 0.0 and 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
