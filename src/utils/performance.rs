//! Performance table shared across runs
//!
//! ```text
//!    Test Case    |     CaDiCaL     |  Backtracking
//! ------------------------------------------------------
//!        1        |    0.052000     |    0.013000     |
//! ```
//! Times are in milliseconds; `N/A` marks a strategy that did not run for
//! that test case. A summary block with per-strategy averages follows.

use crate::hunt::StrategyOutcome;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

const TEST_CASE_COLUMN: &str = "Test Case";
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceReport {
    strategies: Vec<String>,
    rows: BTreeMap<u32, BTreeMap<String, f64>>,
}

impl PerformanceReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an existing table; a missing file yields an empty report
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read performance file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse performance file: {}", path.display()))
    }

    /// Parse the table part of a rendered report
    pub fn parse(content: &str) -> Result<Self> {
        let mut lines = content.lines();
        let mut report = Self::new();

        let Some(header) = lines.next() else {
            return Ok(report);
        };
        report.strategies = split_fields(header).skip(1).map(str::to_string).collect();
        lines.next(); // separator

        for line in lines.take_while(|line| !line.trim().is_empty()) {
            let mut fields = split_fields(line);
            let test_case: u32 = fields
                .next()
                .context("Missing test case column")?
                .parse()
                .with_context(|| format!("Invalid test case in line: {}", line))?;

            let mut times = BTreeMap::new();
            for (strategy, field) in report.strategies.iter().zip(fields) {
                if field != NOT_AVAILABLE {
                    let time: f64 = field
                        .parse()
                        .with_context(|| format!("Invalid time '{}' in line: {}", field, line))?;
                    times.insert(strategy.clone(), time);
                }
            }
            report.rows.insert(test_case, times);
        }

        Ok(report)
    }

    /// Record the timings of one run, replacing any earlier row for the test case
    pub fn record(&mut self, test_case: u32, outcomes: &[StrategyOutcome]) {
        let mut times = BTreeMap::new();
        for outcome in outcomes {
            if !self.strategies.contains(&outcome.strategy) {
                self.strategies.push(outcome.strategy.clone());
            }
            times.insert(outcome.strategy.clone(), outcome.solve_time_ms);
        }
        self.rows.insert(test_case, times);
    }

    pub fn time(&self, test_case: u32, strategy: &str) -> Option<f64> {
        self.rows.get(&test_case)?.get(strategy).copied()
    }

    /// Mean time per strategy over the test cases it ran on
    pub fn average(&self, strategy: &str) -> Option<f64> {
        let times: Vec<f64> = self
            .rows
            .values()
            .filter_map(|row| row.get(strategy).copied())
            .collect();
        (!times.is_empty()).then(|| times.iter().sum::<f64>() / times.len() as f64)
    }

    pub fn render(&self) -> String {
        let mut columns = vec![TEST_CASE_COLUMN.to_string()];
        columns.extend(self.strategies.iter().cloned());

        let header = columns
            .iter()
            .map(|c| format!("{:^15}", c))
            .collect::<Vec<_>>()
            .join(" | ");
        let separator = "-".repeat(header.len());

        let mut output = format!("{}\n{}\n", header, separator);

        for (test_case, times) in &self.rows {
            output.push_str(&format!("{:^15} | ", test_case));
            for strategy in &self.strategies {
                match times.get(strategy) {
                    Some(time) => output.push_str(&format!("{:^15.6} | ", time)),
                    None => output.push_str(&format!("{:^15} | ", NOT_AVAILABLE)),
                }
            }
            output.push('\n');
        }

        output.push_str("\nSummary Statistics:\n");
        output.push_str(&separator);
        output.push('\n');

        for strategy in &self.strategies {
            match self.average(strategy) {
                Some(avg) => output.push_str(&format!("Average {:^15} | {:^15.6} ms\n", strategy, avg)),
                None => output.push_str(&format!("Average {:^15} | {:^15}\n", strategy, NOT_AVAILABLE)),
            }
        }

        output
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, self.render())
            .with_context(|| format!("Failed to write performance file: {}", path.display()))
    }
}

fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split('|').map(str::trim).filter(|field| !field.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hunt::OutcomeStatus;
    use crate::sat::SearchStatistics;
    use std::time::Duration;
    use tempfile::tempdir;

    fn outcome(strategy: &str, micros: u64) -> StrategyOutcome {
        StrategyOutcome::new(
            strategy,
            OutcomeStatus::Solved,
            None,
            Duration::from_micros(micros),
            SearchStatistics::default(),
        )
    }

    #[test]
    fn test_record_and_render() {
        let mut report = PerformanceReport::new();
        report.record(2, &[outcome("CaDiCaL", 1500), outcome("Backtracking", 500)]);
        report.record(1, &[outcome("CaDiCaL", 500)]);

        let text = report.render();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("Test Case"));
        assert!(lines[0].contains("Backtracking"));
        // Rows sorted by test case
        assert!(lines[2].trim_start().starts_with('1'));
        assert!(lines[2].contains(NOT_AVAILABLE));
        assert!(lines[3].contains("1.500000"));

        assert_eq!(report.average("CaDiCaL"), Some(1.0));
        assert!(text.contains("Summary Statistics:"));
    }

    #[test]
    fn test_parse_rendered_table() {
        let mut report = PerformanceReport::new();
        report.record(3, &[outcome("CaDiCaL", 250), outcome("BruteForce", 4000)]);
        report.record(5, &[outcome("BruteForce", 1000)]);

        let parsed = PerformanceReport::parse(&report.render()).unwrap();
        assert_eq!(parsed, report);
        assert_eq!(parsed.time(3, "BruteForce"), Some(4.0));
        assert_eq!(parsed.time(5, "CaDiCaL"), None);
    }

    #[test]
    fn test_merge_with_existing_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("performance.txt");

        let mut first = PerformanceReport::load(&path).unwrap();
        first.record(1, &[outcome("CaDiCaL", 1000)]);
        first.save(&path).unwrap();

        let mut second = PerformanceReport::load(&path).unwrap();
        second.record(2, &[outcome("CaDiCaL", 3000), outcome("Backtracking", 2000)]);
        second.record(1, &[outcome("CaDiCaL", 2000)]);
        second.save(&path).unwrap();

        let merged = PerformanceReport::load(&path).unwrap();
        assert_eq!(merged.time(1, "CaDiCaL"), Some(2.0));
        assert_eq!(merged.time(2, "Backtracking"), Some(2.0));
        assert_eq!(merged.average("CaDiCaL"), Some(2.5));
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(PerformanceReport::parse("").unwrap(), PerformanceReport::new());
    }
}
