//! Dataset loader for CSV and Parquet files.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Load a dataset into memory (CSV or Parquet based on extension).
///
/// `infer_schema_length` controls how many rows the CSV reader scans for
/// dtype inference; 0 means a full table scan.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => {
            let infer = if infer_schema_length == 0 {
                None
            } else {
                Some(infer_schema_length)
            };
            LazyCsvReader::new(path)
                .with_infer_schema_length(infer)
                .finish()
                .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        }
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

/// Rows, columns and estimated memory (MB) of a loaded dataset.
pub fn dataset_stats(df: &DataFrame) -> (usize, usize, f64) {
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    (rows, cols, memory_mb)
}

/// Extract the binary ground-truth column as booleans, if present.
///
/// Returns `Ok(None)` when the column is absent — an expected condition
/// (the lift view is skipped), not an error. Any numeric or boolean dtype
/// is accepted; nonzero means defaulted; nulls count as non-default.
pub fn extract_target(df: &DataFrame, column: &str) -> Result<Option<Vec<bool>>> {
    let col = match df.column(column) {
        Ok(col) => col,
        Err(_) => return Ok(None),
    };

    if !col.dtype().is_primitive_numeric() && col.dtype() != &DataType::Boolean {
        anyhow::bail!(
            "Target column '{}' has non-numeric dtype {} - expected a 0/1 label",
            column,
            col.dtype()
        );
    }

    let float_col = col
        .cast(&DataType::Float64)
        .with_context(|| format!("Failed to read target column '{}'", column))?;
    let ca = float_col
        .f64()
        .with_context(|| format!("Failed to read target column '{}'", column))?;

    Ok(Some(
        ca.into_iter().map(|v| v.unwrap_or(0.0) != 0.0).collect(),
    ))
}
