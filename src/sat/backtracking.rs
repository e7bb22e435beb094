//! Chronological backtracking over partial assignments
//!
//! Variables are decided in ascending id order, `true` before `false`.
//! After each tentative assignment, every clause whose variables are all
//! decided must already be satisfied, otherwise the branch is cut. The
//! descent uses an explicit per-variable state array instead of recursion,
//! so depth is bounded by heap memory rather than the call stack.

use super::constraints::Formula;
use super::solver::{trivial_result, Model, SearchStatistics, SolveReport, SolveResult, SolvingStrategy};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct BacktrackingSolver;

impl BacktrackingSolver {
    pub fn new() -> Self {
        Self
    }
}

/// Which values have been tried for a variable on the current path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Untried,
    TriedTrue,
    Exhausted,
}

struct Search<'a> {
    formula: &'a Formula,
    /// `by_last_var[v]` lists clauses whose largest variable is `v`; those
    /// become fully decided exactly when `v` is assigned
    by_last_var: Vec<Vec<usize>>,
    assignment: Vec<Option<bool>>,
    frames: Vec<Frame>,
    statistics: SearchStatistics,
}

impl<'a> Search<'a> {
    fn new(formula: &'a Formula, num_vars: usize) -> Self {
        let mut by_last_var = vec![Vec::new(); num_vars + 1];
        for (idx, clause) in formula.clauses().iter().enumerate() {
            by_last_var[clause.max_variable()].push(idx);
        }

        Self {
            formula,
            by_last_var,
            assignment: vec![None; num_vars],
            frames: vec![Frame::Untried; num_vars],
            statistics: SearchStatistics::default(),
        }
    }

    /// Clauses that just became fully decided must hold
    fn decided_clauses_hold(&self, var: usize) -> bool {
        self.by_last_var[var].iter().all(|&idx| {
            self.formula.clauses()[idx]
                .is_satisfied_by(|v| self.assignment[v - 1].unwrap_or(false))
        })
    }

    fn run(&mut self) -> bool {
        let num_vars = self.assignment.len();
        let mut var = 1;

        while var >= 1 {
            if var > num_vars {
                return true;
            }

            let slot = var - 1;
            let value = match self.frames[slot] {
                Frame::Untried => {
                    self.frames[slot] = Frame::TriedTrue;
                    true
                }
                Frame::TriedTrue => {
                    self.frames[slot] = Frame::Exhausted;
                    false
                }
                Frame::Exhausted => {
                    // Both values failed; hand control back to the previous variable
                    self.frames[slot] = Frame::Untried;
                    self.assignment[slot] = None;
                    var -= 1;
                    continue;
                }
            };

            self.statistics.decisions += 1;
            self.assignment[slot] = Some(value);

            if self.decided_clauses_hold(var) {
                var += 1;
            } else {
                self.statistics.pruned += 1;
            }
        }

        false
    }

    fn model(&self) -> Model {
        Model::from_values(self.assignment.iter().map(|v| v.unwrap_or(false)).collect())
    }
}

impl SolvingStrategy for BacktrackingSolver {
    fn name(&self) -> &str {
        "Backtracking"
    }

    fn run(&self, formula: &Formula, num_vars: usize) -> SolveReport {
        if let Some(result) = trivial_result(formula, num_vars) {
            return SolveReport::new(result);
        }

        let mut search = Search::new(formula, num_vars);
        let found = search.run();

        debug!(
            decisions = search.statistics.decisions,
            pruned = search.statistics.pruned,
            found,
            "backtracking finished"
        );

        let result = if found {
            SolveResult::Sat(search.model())
        } else {
            SolveResult::Unsat
        };

        SolveReport {
            result,
            statistics: search.statistics,
        }
    }
}
