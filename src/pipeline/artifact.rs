//! Model artifact loading and the process-wide cache.
//!
//! The artifact is a JSON serialization of [`ScoringPipeline`]: the fitted
//! winsorizer bounds, the fitted encoder categories, the tree ensemble and
//! its gain vector. It is loaded once per process and reused read-only for
//! every batch; there is nothing to tear down.

use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};

use super::scoring::ScoringPipeline;

static CACHED: OnceLock<ScoringPipeline> = OnceLock::new();

/// Load and validate a scoring pipeline artifact from a JSON file.
pub fn load(path: &Path) -> Result<ScoringPipeline> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read model artifact: {}", path.display()))?;

    let pipeline: ScoringPipeline = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse model artifact: {}", path.display()))?;

    pipeline
        .validate()
        .with_context(|| format!("Model artifact failed validation: {}", path.display()))?;

    Ok(pipeline)
}

/// Load-once-reuse-forever accessor for the model artifact.
///
/// The first call loads and validates the artifact; later calls return the
/// cached pipeline regardless of the path argument. Load failures are not
/// cached, so a corrected path can succeed on retry.
pub fn load_cached(path: &Path) -> Result<&'static ScoringPipeline> {
    if let Some(pipeline) = CACHED.get() {
        return Ok(pipeline);
    }
    let loaded = load(path)?;
    Ok(CACHED.get_or_init(|| loaded))
}

/// Serialize a pipeline to a JSON artifact file (pretty-printed).
///
/// Used by test fixtures and offline tooling that produces artifacts.
pub fn save(pipeline: &ScoringPipeline, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(pipeline)
        .context("Failed to serialize scoring pipeline")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write model artifact: {}", path.display()))?;
    Ok(())
}
