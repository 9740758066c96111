//! Tests for model artifact loading and validation

use escora::pipeline::artifact;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_artifact_json_roundtrip() {
    let pipeline = build_pipeline();
    let (_temp_dir, path) = create_temp_artifact(&pipeline);

    let loaded = artifact::load(&path).unwrap();

    let df = create_applicant_dataframe();
    let original = pipeline.predict_proba(&df).unwrap();
    let reloaded = loaded.predict_proba(&df).unwrap();
    assert_eq!(
        original, reloaded,
        "loaded artifact must reproduce the original's scores exactly"
    );
}

#[test]
fn test_save_then_load() {
    let pipeline = build_pipeline();
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("model.json");

    artifact::save(&pipeline, &path).unwrap();
    let loaded = artifact::load(&path).unwrap();
    assert_eq!(loaded.feature_names().unwrap(), pipeline.feature_names().unwrap());
}

#[test]
fn test_missing_file_is_contextual_error() {
    let err = artifact::load(std::path::Path::new("/nonexistent/model.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read model artifact"));
}

#[test]
fn test_malformed_json_rejected() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("model.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = artifact::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse model artifact"));
}

#[test]
fn test_gain_width_mismatch_rejected_at_load() {
    let mut pipeline = build_pipeline();
    pipeline.model.feature_gain.pop();
    let (_temp_dir, path) = create_temp_artifact(&pipeline);

    let err = artifact::load(&path).unwrap_err();
    assert!(
        err.to_string().contains("failed validation"),
        "got: {:#}",
        err
    );
}

#[test]
fn test_bounds_width_mismatch_rejected_at_load() {
    let mut pipeline = build_pipeline();
    pipeline
        .preprocessing
        .winsorizer
        .lower_bounds
        .as_mut()
        .unwrap()
        .push(0.0);
    let (_temp_dir, path) = create_temp_artifact(&pipeline);

    assert!(artifact::load(&path).is_err());
}

#[test]
fn test_treeless_model_rejected_at_load() {
    let mut pipeline = build_pipeline();
    pipeline.model.trees.clear();
    let (_temp_dir, path) = create_temp_artifact(&pipeline);

    assert!(artifact::load(&path).is_err());
}

#[test]
fn test_cached_load_returns_same_pipeline() {
    let pipeline = build_pipeline();
    let (_temp_dir, path) = create_temp_artifact(&pipeline);

    let first = artifact::load_cached(&path).unwrap();
    let second = artifact::load_cached(&path).unwrap();
    assert!(
        std::ptr::eq(first, second),
        "cached accessor must hand out the same instance"
    );
}
