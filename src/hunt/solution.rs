//! Per-strategy solving outcomes

use crate::grid::GridModel;
use crate::sat::SearchStatistics;
use serde::Serialize;
use std::time::Duration;

/// What one strategy produced for one grid
#[derive(Debug, Clone, Serialize)]
pub struct StrategyOutcome {
    /// Strategy name as it appears in reports
    pub strategy: String,
    pub status: OutcomeStatus,
    /// Labeled grid, present only when the model passed validation
    pub solution: Option<GridModel>,
    #[serde(skip)]
    pub solve_time: Duration,
    pub solve_time_ms: f64,
    pub statistics: SearchStatistics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// A model was found, rendered and validated
    Solved,
    /// The formula was proven unsatisfiable
    Unsatisfiable,
    /// Brute force stopped before covering the search space
    BudgetExhausted { attempts: u64 },
    /// The strategy gave no definitive answer
    Inconclusive { reason: String },
    /// A model was returned but could not be rendered or failed validation
    Rejected { reason: String },
}

impl StrategyOutcome {
    pub fn new(
        strategy: impl Into<String>,
        status: OutcomeStatus,
        solution: Option<GridModel>,
        solve_time: Duration,
        statistics: SearchStatistics,
    ) -> Self {
        Self {
            strategy: strategy.into(),
            status,
            solution,
            solve_time,
            solve_time_ms: solve_time.as_secs_f64() * 1000.0,
            statistics,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.status == OutcomeStatus::Solved
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeStatus::Solved => write!(f, "Solved"),
            OutcomeStatus::Unsatisfiable => write!(f, "Unsatisfiable"),
            OutcomeStatus::BudgetExhausted { .. } => write!(f, "Limit reached"),
            OutcomeStatus::Inconclusive { reason } => write!(f, "Inconclusive: {}", reason),
            OutcomeStatus::Rejected { reason } => write!(f, "Rejected: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::parse_grid_from_string;

    #[test]
    fn test_outcome_json() {
        let grid = parse_grid_from_string("1, T\n").unwrap();
        let outcome = StrategyOutcome::new(
            "Backtracking",
            OutcomeStatus::Solved,
            Some(grid),
            Duration::from_millis(3),
            SearchStatistics::default(),
        );

        assert!(outcome.is_solved());
        let json = outcome.to_json().unwrap();
        assert!(json.contains("\"strategy\": \"Backtracking\""));
        assert!(json.contains("\"kind\": \"solved\""));
        assert!(json.contains("\"hazard\""));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(OutcomeStatus::Unsatisfiable.to_string(), "Unsatisfiable");
        assert_eq!(OutcomeStatus::BudgetExhausted { attempts: 5 }.to_string(), "Limit reached");
        assert_eq!(
            OutcomeStatus::Rejected { reason: "bad".into() }.to_string(),
            "Rejected: bad"
        );
    }
}
