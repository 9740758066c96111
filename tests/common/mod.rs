//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

use escora::pipeline::{GbdtModel, Node, OneHotEncoder, Preprocessor, ScoringPipeline, Tree, Winsorizer};

fn split(feature: usize, threshold: f64, left: Node, right: Node) -> Node {
    Node::Split {
        feature,
        threshold,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn leaf(value: f64) -> Node {
    Node::Leaf { value }
}

/// Build a small hand-fitted scoring pipeline with a known structure:
///
/// - numeric columns `idade` (bounds [20, 70]) and `renda` (bounds [500, 10000])
/// - categorical column `uf` with levels RJ and SP
/// - feature order: [idade, renda, uf_RJ, uf_SP]
/// - tree 1: renda < 3000 -> margin +1.5 (low income = higher risk), else -1.5
/// - tree 2: uf_RJ < 0.5 -> margin -0.5, else +0.5
///
/// So a low-income RJ applicant scores sigmoid(2.0) ~= 0.88 and a
/// high-income SP applicant scores sigmoid(-2.0) ~= 0.12.
pub fn build_pipeline() -> ScoringPipeline {
    let winsorizer = Winsorizer {
        lower_quantile: 0.01,
        upper_quantile: 0.99,
        lower_bounds: Some(vec![20.0, 500.0]),
        upper_bounds: Some(vec![70.0, 10000.0]),
    };

    let encoder = OneHotEncoder {
        categories: vec![vec!["RJ".to_string(), "SP".to_string()]],
    };

    let model = GbdtModel {
        base_score: 0.0,
        trees: vec![
            Tree {
                root: split(1, 3000.0, leaf(1.5), leaf(-1.5)),
            },
            Tree {
                root: split(2, 0.5, leaf(-0.5), leaf(0.5)),
            },
        ],
        feature_gain: vec![5.0, 42.0, 7.0, 1.5],
    };

    ScoringPipeline {
        preprocessing: Preprocessor {
            numeric_columns: vec!["idade".to_string(), "renda".to_string()],
            winsorizer,
            categorical_columns: vec!["uf".to_string()],
            encoder,
        },
        model,
    }
}

/// A small applicant batch matching the fixture pipeline's schema,
/// including the ground-truth `mau` column.
pub fn create_applicant_dataframe() -> DataFrame {
    df! {
        "idade" => [25i64, 63, 41, 35, 52, 29, 47, 38, 56, 33],
        "renda" => [1200.0f64, 8500.0, 2200.0, 4100.0, 900.0, 7600.0, 1500.0, 5200.0, 2800.0, 9900.0],
        "uf" => ["RJ", "SP", "RJ", "SP", "RJ", "SP", "SP", "RJ", "RJ", "SP"],
        "mau" => [1i64, 0, 1, 0, 1, 0, 0, 0, 1, 0],
    }
    .unwrap()
}

/// A larger synthetic batch: probability of default driven by low renda,
/// so the fixture model has real ranking power on it.
pub fn create_large_applicant_dataframe(rows: usize) -> DataFrame {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let idade: Vec<i64> = (0..rows).map(|_| rng.gen_range(21..75)).collect();
    let renda: Vec<f64> = (0..rows).map(|_| rng.gen_range(600.0..12000.0)).collect();
    let uf: Vec<&str> = (0..rows)
        .map(|_| if rng.gen_bool(0.5) { "RJ" } else { "SP" })
        .collect();
    let mau: Vec<i64> = renda
        .iter()
        .map(|&r| {
            let p = if r < 3000.0 { 0.5 } else { 0.05 };
            i64::from(rng.gen_bool(p))
        })
        .collect();

    df! {
        "idade" => idade,
        "renda" => renda,
        "uf" => uf,
        "mau" => mau,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Write a pipeline artifact as JSON into a fresh temporary directory
pub fn create_temp_artifact(pipeline: &ScoringPipeline) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("model_final.json");
    let json = serde_json::to_string_pretty(pipeline).unwrap();
    std::fs::write(&path, json).unwrap();
    (temp_dir, path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}
