//! `inspect` subcommand: print the structure of a model artifact

use std::path::Path;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Table};
use console::style;

use crate::pipeline::artifact;

/// Load an artifact and print its stages, dimensions and top gains.
pub fn run_inspect(model_path: &Path) -> Result<()> {
    let pipeline = artifact::load(model_path)?;

    println!();
    println!(
        "    {} {}",
        style("🧠").cyan(),
        style("MODEL ARTIFACT").white().bold()
    );
    println!("    {}", style(model_path.display().to_string()).dim());
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let pre = &pipeline.preprocessing;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Stage").add_attribute(Attribute::Bold),
        Cell::new("Detail").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Numeric columns"),
        Cell::new(pre.numeric_columns.join(", ")),
    ]);
    table.add_row(vec![
        Cell::new("Winsorizer quantiles"),
        Cell::new(format!(
            "[{:.2}, {:.2}]",
            pre.winsorizer.lower_quantile, pre.winsorizer.upper_quantile
        )),
    ]);
    table.add_row(vec![
        Cell::new("Categorical columns"),
        Cell::new(pre.categorical_columns.join(", ")),
    ]);
    table.add_row(vec![
        Cell::new("Expanded features"),
        Cell::new(pre.output_width()),
    ]);
    table.add_row(vec![
        Cell::new("Trees"),
        Cell::new(pipeline.model.trees.len()),
    ]);
    table.add_row(vec![
        Cell::new("Base score"),
        Cell::new(format!("{:.4}", pipeline.model.base_score)),
    ]);

    for line in table.to_string().lines() {
        println!("    {}", line);
    }

    println!();
    println!(
        "    {} {}",
        style("📈").cyan(),
        style("TOP GAINS").white().bold()
    );
    for entry in pipeline.gain_importance()?.iter().take(10) {
        println!(
            "      {} {} {}",
            style("•").dim(),
            entry.feature,
            style(format!("{:.1}", entry.gain)).dim()
        );
    }
    println!();

    Ok(())
}
