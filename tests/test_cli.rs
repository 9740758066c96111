//! End-to-end tests for the escora binary

use assert_cmd::Command;
use polars::prelude::*;
use predicates::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

fn escora() -> Command {
    Command::cargo_bin("escora").unwrap()
}

fn write_csv(df: &mut DataFrame, path: &std::path::Path) {
    let mut file = std::fs::File::create(path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();
}

#[test]
fn test_full_run_writes_scored_table_and_report() {
    let pipeline = build_pipeline();
    let (temp_dir, model_path) = create_temp_artifact(&pipeline);

    let mut df = create_large_applicant_dataframe(100);
    let csv_path = temp_dir.path().join("clientes.csv");
    write_csv(&mut df, &csv_path);

    escora()
        .arg("-i")
        .arg(&csv_path)
        .arg("-m")
        .arg(&model_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Alto Risco"));

    let scored_path = temp_dir.path().join("base_escorada.csv");
    assert!(scored_path.exists(), "stable output name should be used");

    let scored = escora::pipeline::load_dataset(&scored_path, 100).unwrap();
    assert_has_columns(&scored, &["score_probabilidade", "classe_risco"]);
    assert_eq!(scored.height(), 100);

    let report_path = temp_dir.path().join("clientes_scoring_report.json");
    assert!(report_path.exists(), "JSON report should be written");
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["summary"]["rows"], 100);
}

#[test]
fn test_missing_target_column_skips_lift_but_succeeds() {
    let pipeline = build_pipeline();
    let (temp_dir, model_path) = create_temp_artifact(&pipeline);

    // Batch without the ground-truth 'mau' column
    let df = create_large_applicant_dataframe(50);
    let mut df = df.drop("mau").unwrap();
    let csv_path = temp_dir.path().join("sem_mau.csv");
    write_csv(&mut df, &csv_path);

    escora()
        .arg("-i")
        .arg(&csv_path)
        .arg("-m")
        .arg(&model_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("não encontrada"));

    assert!(temp_dir.path().join("base_escorada.csv").exists());
}

#[test]
fn test_schema_mismatch_fails_with_column_name() {
    let pipeline = build_pipeline();
    let (temp_dir, model_path) = create_temp_artifact(&pipeline);

    let mut df = df! {
        "idade" => [30i64, 40],
        "uf" => ["SP", "RJ"],
    }
    .unwrap();
    let csv_path = temp_dir.path().join("incompleto.csv");
    write_csv(&mut df, &csv_path);

    escora()
        .arg("-i")
        .arg(&csv_path)
        .arg("-m")
        .arg(&model_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("renda"));
}

#[test]
fn test_missing_input_flag_fails() {
    escora()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file is required"));
}

#[test]
fn test_missing_model_file_fails() {
    let pipeline = build_pipeline();
    let (temp_dir, _model_path) = create_temp_artifact(&pipeline);

    let mut df = create_applicant_dataframe();
    let csv_path = temp_dir.path().join("clientes.csv");
    write_csv(&mut df, &csv_path);

    escora()
        .arg("-i")
        .arg(&csv_path)
        .arg("-m")
        .arg(temp_dir.path().join("nao_existe.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("model artifact"));
}

#[test]
fn test_inspect_prints_model_structure() {
    let pipeline = build_pipeline();
    let (_temp_dir, model_path) = create_temp_artifact(&pipeline);

    escora()
        .arg("inspect")
        .arg(&model_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("MODEL ARTIFACT"))
        .stdout(predicate::str::contains("renda"));
}

#[test]
fn test_small_batch_warns_about_unstable_percentile() {
    let pipeline = build_pipeline();
    let (temp_dir, model_path) = create_temp_artifact(&pipeline);

    let mut df = create_applicant_dataframe();
    let csv_path = temp_dir.path().join("pequeno.csv");
    write_csv(&mut df, &csv_path);

    escora()
        .arg("-i")
        .arg(&csv_path)
        .arg("-m")
        .arg(&model_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("unstable"));
}

#[test]
fn test_no_report_json_flag_skips_report() {
    let pipeline = build_pipeline();
    let (temp_dir, model_path) = create_temp_artifact(&pipeline);

    let mut df = create_large_applicant_dataframe(30);
    let csv_path = temp_dir.path().join("clientes.csv");
    write_csv(&mut df, &csv_path);

    escora()
        .arg("-i")
        .arg(&csv_path)
        .arg("-m")
        .arg(&model_path)
        .arg("--no-report-json")
        .assert()
        .success();

    assert!(!temp_dir.path().join("clientes_scoring_report.json").exists());
}
