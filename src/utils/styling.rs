//! Terminal styling utilities for the scoring report surface

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CARD: Emoji<'_, '_> = Emoji("💳 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static MODEL: Emoji<'_, '_> = Emoji("🧠 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
    ███████╗███████╗ ██████╗ ██████╗ ██████╗  █████╗
    ██╔════╝██╔════╝██╔════╝██╔═══██╗██╔══██╗██╔══██╗
    █████╗  ███████╗██║     ██║   ██║██████╔╝███████║
    ██╔══╝  ╚════██║██║     ██║   ██║██╔══██╗██╔══██║
    ███████╗███████║╚██████╗╚██████╔╝██║  ██║██║  ██║
    ╚══════╝╚══════╝ ╚═════╝ ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        CARD,
        style("Credit scoring e análise de risco").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(
    input: &Path,
    model: &Path,
    output: &Path,
    target: &str,
    risk_percentile: f64,
) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:  {:<39}│",
        FOLDER,
        truncate_path(input, 38)
    );
    println!("    │  {} Model:  {:<39}│", MODEL, truncate_path(model, 38));
    println!("    │  {} Output: {:<39}│", SAVE, truncate_path(output, 38));
    println!(
        "    │  {} Target: {:<39}│",
        TARGET,
        truncate_string(target, 38)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Risk cutoff percentile: {:<23}│",
        CARD,
        style(format!("{:.0}%", risk_percentile * 100.0)).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!(
        "    {} {}",
        style("⚠").yellow().bold(),
        style(message).yellow()
    );
}

/// Print the elapsed time for a step
pub fn print_step_time(elapsed: std::time::Duration) {
    println!(
        "      {}",
        style(format!("⏱  {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Escoragem concluída!").green().bold()
    );
    println!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("...{}", &s[s.len() - max_len + 3..])
    }
}
