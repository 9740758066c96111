//! Scoring summary report generation

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::lift::DecileRow;
use crate::pipeline::risk::RiskClassification;
use crate::pipeline::scoring::FeatureImportance;

/// Width of the unicode bars in the importance and lift charts.
const BAR_WIDTH: usize = 30;

/// Summary of one scored batch, ready to render.
#[derive(Debug)]
pub struct ScoringReport {
    pub rows: usize,
    pub cutoff: f64,
    pub high_count: usize,
    pub low_count: usize,
    pub high_pct: f64,
    pub low_pct: f64,
    /// Full importance ranking, descending by gain.
    pub importance: Vec<FeatureImportance>,
    /// How many top features to chart.
    pub top_features: usize,
    /// Present only when the upload carried the ground-truth column.
    pub lift: Option<Vec<DecileRow>>,
}

impl ScoringReport {
    pub fn new(rows: usize, classification: &RiskClassification) -> Self {
        Self {
            rows,
            cutoff: classification.cutoff,
            high_count: classification.high_count,
            low_count: classification.low_count,
            high_pct: classification.high_pct(),
            low_pct: classification.low_pct(),
            importance: Vec::new(),
            top_features: 15,
            lift: None,
        }
    }

    pub fn with_importance(mut self, importance: Vec<FeatureImportance>, top: usize) -> Self {
        self.importance = importance;
        self.top_features = top;
        self
    }

    pub fn with_lift(mut self, lift: Option<Vec<DecileRow>>) -> Self {
        self.lift = lift;
        self
    }

    pub fn display(&self) {
        self.display_risk_metrics();
        self.display_importance();
        self.display_lift();
    }

    fn display_risk_metrics(&self) {
        println!();
        println!(
            "    {} {}",
            style("📌").cyan(),
            style("CLASSIFICAÇÃO DE RISCO").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📄 Scored rows"), Cell::new(self.rows)]);
        table.add_row(vec![
            Cell::new("✂️  Batch cutoff (p95)"),
            Cell::new(format!("{:.6}", self.cutoff)),
        ]);
        table.add_row(vec![
            Cell::new("🔴 Alto Risco"),
            Cell::new(format!("{} ({:.2}%)", self.high_count, self.high_pct))
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("🟢 Baixo Risco"),
            Cell::new(format!("{} ({:.2}%)", self.low_count, self.low_pct))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }

    fn display_importance(&self) {
        if self.importance.is_empty() {
            return;
        }

        println!();
        println!(
            "    {} {}",
            style("📈").cyan(),
            style("IMPORTÂNCIA DAS VARIÁVEIS (GAIN)").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let top = &self.importance[..self.top_features.min(self.importance.len())];
        let max_gain = top.iter().map(|f| f.gain).fold(f64::MIN, f64::max);
        let name_width = top.iter().map(|f| f.feature.len()).max().unwrap_or(0);

        for entry in top {
            let filled = if max_gain > 0.0 {
                ((entry.gain / max_gain) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let bar = "█".repeat(filled);
            println!(
                "      {:<width$} {} {}",
                entry.feature,
                style(bar).cyan(),
                style(format!("{:.1}", entry.gain)).dim(),
                width = name_width
            );
        }
    }

    fn display_lift(&self) {
        let Some(lift) = &self.lift else {
            return;
        };

        println!();
        println!(
            "    {} {}",
            style("📉").cyan(),
            style("CURVA LIFT POR DECIL").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let max_lift = lift.iter().map(|d| d.lift).fold(f64::MIN, f64::max);

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Decil").add_attribute(Attribute::Bold),
            Cell::new("Clientes").add_attribute(Attribute::Bold),
            Cell::new("Inadimplentes").add_attribute(Attribute::Bold),
            Cell::new("Taxa").add_attribute(Attribute::Bold),
            Cell::new("Lift").add_attribute(Attribute::Bold),
            Cell::new(""),
        ]);

        // Decile 1 = highest risk first (inverted axis in the original chart)
        for row in lift {
            let filled = if max_lift > 0.0 {
                ((row.lift / max_lift) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let color = if row.lift >= 1.0 {
                Color::Red
            } else {
                Color::White
            };
            table.add_row(vec![
                Cell::new(row.decile + 1),
                Cell::new(row.count),
                Cell::new(row.positives),
                Cell::new(format!("{:.2}%", row.rate * 100.0)),
                Cell::new(format!("{:.2}", row.lift)).fg(color),
                Cell::new("▆".repeat(filled)).fg(Color::Cyan),
            ]);
        }

        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}
