//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::grid::GridModel;
use crate::hunt::{OutcomeStatus, StrategyOutcome};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Format outcomes for reports and console output
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// One report record: a `Name:` header, then either the labeled rows or
    /// the failure reason, terminated by a blank line
    pub fn format_record(outcome: &StrategyOutcome) -> String {
        let mut output = format!("{}:\n", outcome.strategy);

        match (&outcome.status, &outcome.solution) {
            (OutcomeStatus::Solved, Some(grid)) => output.push_str(&grid.to_string()),
            (status, _) => {
                output.push_str(&status.to_string());
                output.push('\n');
            }
        }

        output.push('\n');
        output
    }

    /// Save outcomes in the requested format, truncating or appending
    pub fn save_outcomes<P: AsRef<Path>>(
        outcomes: &[StrategyOutcome],
        path: P,
        format: OutputFormat,
        overwrite: bool,
    ) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = match format {
            OutputFormat::Text => outcomes.iter().map(Self::format_record).collect::<String>(),
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(outcomes)
                    .context("Failed to serialize outcomes")?;
                json.push('\n');
                json
            }
        };

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .append(!overwrite)
            .truncate(overwrite)
            .open(path)
            .with_context(|| format!("Failed to open report file: {}", path.display()))?;

        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write report file: {}", path.display()))?;

        Ok(())
    }

    /// Format outcomes as a summary table
    pub fn format_outcome_summary(outcomes: &[StrategyOutcome]) -> String {
        let mut output = String::new();

        output.push_str("Strategy     | Time(ms)   | Result\n");
        output.push_str("-------------|------------|----------------\n");

        for outcome in outcomes {
            output.push_str(&format!(
                "{:12} | {:10.3} | {}\n",
                outcome.strategy, outcome.solve_time_ms, outcome.status
            ));
        }

        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &GridModel) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..grid.cols() {
            output.push_str(&format!("{:3}", col % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for (row, cells) in grid.to_rows().iter().enumerate() {
            output.push_str(&format!("{:2} ", row));
            for cell in cells {
                output.push_str(&format!("{:>3}", cell.to_string()));
            }
            output.push('\n');
        }

        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }

    /// Color a status by how definitive it is
    pub fn status(status: &OutcomeStatus) -> String {
        let text = status.to_string();
        match status {
            OutcomeStatus::Solved => Self::success(&text),
            OutcomeStatus::Unsatisfiable | OutcomeStatus::BudgetExhausted { .. } => Self::warning(&text),
            OutcomeStatus::Inconclusive { .. } | OutcomeStatus::Rejected { .. } => Self::error(&text),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
