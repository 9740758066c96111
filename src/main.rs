//! Escora: Credit Scoring CLI Tool
//!
//! A command-line tool that scores applicant batches with a pre-trained
//! credit-risk pipeline and renders a risk/importance/lift report.

mod cli;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use cli::{Cli, Commands};
use pipeline::{artifact, classify, compute_lift, dataset_stats, extract_target, load_dataset};
use report::{
    append_score_columns, export_report_json, save_scored_dataset, ReportParams, ScoringReport,
};
use utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_info, print_step_header, print_step_time, print_success, print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Inspect { model } => cli::inspect::run_inspect(model),
        };
    }

    // Main scoring pipeline - require input
    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;
    let output_path = cli.output_path().unwrap();

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));

    // Print configuration card
    print_config(
        input,
        &cli.model,
        &output_path,
        &cli.target,
        cli.risk_percentile,
    );

    // Step 1: Load model artifact (cached for the process lifetime)
    print_step_header(1, "Load Model");

    let step_start = Instant::now();
    let spinner = create_spinner("Loading model artifact...");
    let model = artifact::load_cached(&cli.model)?;
    finish_with_success(
        &spinner,
        &format!(
            "Model loaded: {} tree(s), {} feature(s)",
            model.model.trees.len(),
            model.model.n_features()
        ),
    );
    print_step_time(step_start.elapsed());

    // Step 2: Load dataset
    print_step_header(2, "Load Dataset");

    let step_start = Instant::now();
    let df = load_dataset(input, cli.infer_schema_length)?;
    let (rows, cols, memory_mb) = dataset_stats(&df);
    print_success("Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);
    print_step_time(step_start.elapsed());

    // Step 3: Score the batch
    print_step_header(3, "Score Batch");

    let step_start = Instant::now();
    let spinner = create_spinner("Scoring records...");
    let probabilities = model.predict_proba(&df)?;
    finish_with_success(&spinner, &format!("Scored {} record(s)", probabilities.len()));
    print_step_time(step_start.elapsed());

    // Step 4: Risk classification by batch percentile
    print_step_header(4, "Risk Classification");

    let step_start = Instant::now();
    let classification = classify(&probabilities, cli.risk_percentile)?;
    if !classification.is_stable() {
        print_warning(&format!(
            "Batch has fewer than {} rows; the percentile cutoff is unstable",
            pipeline::STABLE_BATCH_SIZE
        ));
    }
    print_success(&format!(
        "Cutoff {:.6}: {} Alto Risco / {} Baixo Risco",
        classification.cutoff, classification.high_count, classification.low_count
    ));
    print_step_time(step_start.elapsed());

    // Step 5: Feature importance ranking (training-time gain)
    print_step_header(5, "Feature Importance");

    let step_start = Instant::now();
    let importance = model.gain_importance()?;
    print_success(&format!("Ranked {} feature(s) by gain", importance.len()));
    print_step_time(step_start.elapsed());

    // Step 6: Lift table, only when the ground-truth column is present
    print_step_header(6, "Lift Analysis");

    let step_start = Instant::now();
    let lift = match extract_target(&df, &cli.target)? {
        Some(labels) => match compute_lift(&probabilities, &labels) {
            Ok(table) => {
                print_success("Lift table computed");
                Some(table)
            }
            Err(err) => {
                print_warning(&format!("Lift skipped: {}", err));
                None
            }
        },
        None => {
            print_info(&format!(
                "Coluna '{}' não encontrada. Curva Lift não pode ser calculada.",
                cli.target
            ));
            None
        }
    };
    print_step_time(step_start.elapsed());

    // Step 7: Export scored table and JSON report
    print_step_header(7, "Save Results");

    let step_start = Instant::now();
    let spinner = create_spinner("Writing scored table...");
    let mut scored = append_score_columns(&df, &probabilities, &classification.labels)?;
    save_scored_dataset(&mut scored, &output_path)?;
    finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));

    let scoring_report = ScoringReport::new(rows, &classification)
        .with_importance(importance, cli.top_features)
        .with_lift(lift);

    if cli.no_report_json {
        print_info("JSON report skipped (--no-report-json)");
    } else {
        let report_path = cli.report_json_path().unwrap();
        let spinner = create_spinner("Writing JSON report...");
        let input_file = input.display().to_string();
        let model_file = cli.model.display().to_string();
        let params = ReportParams {
            input_file: &input_file,
            model_file: &model_file,
            target_column: &cli.target,
            risk_percentile: cli.risk_percentile,
        };
        match export_report_json(&scoring_report, &report_path, &params) {
            Ok(()) => finish_with_success(
                &spinner,
                &format!("Report saved to {}", report_path.display()),
            ),
            Err(err) => finish_with_warning(&spinner, &format!("Report not written: {}", err)),
        }
    }
    print_step_time(step_start.elapsed());

    // Display preview and report
    println!();
    println!(
        "    {} {}",
        style("📊").cyan(),
        style("RESULTADO DA ESCORAGEM").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!("{}", scored.head(Some(5)));

    scoring_report.display();

    // Final completion message
    print_completion();

    Ok(())
}
