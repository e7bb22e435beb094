//! Common contract shared by every solving strategy

use super::constraints::{Formula, Literal};
use serde::Serialize;
use std::fmt;

/// Total assignment over variables `1..=num_vars`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    /// Model over zero variables
    pub fn empty() -> Self {
        Self::default()
    }

    /// `values[i]` is the truth value of variable `i + 1`
    pub fn from_values(values: Vec<bool>) -> Self {
        Self { values }
    }

    /// Truth value of a variable, `None` if the model does not cover it
    pub fn value(&self, variable: usize) -> Option<bool> {
        variable
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .copied()
    }

    pub fn num_vars(&self) -> usize {
        self.values.len()
    }

    /// Signed literals in ascending variable order
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.values.iter().enumerate().map(|(i, &value)| {
            let var = i as Literal + 1;
            if value { var } else { -var }
        })
    }

    /// Number of variables set to true
    pub fn true_count(&self) -> usize {
        self.values.iter().filter(|&&v| v).count()
    }

    /// Check every clause; uncovered variables count as false
    pub fn satisfies(&self, formula: &Formula) -> bool {
        formula
            .clauses()
            .iter()
            .all(|clause| clause.is_satisfied_by(|var| self.value(var).unwrap_or(false)))
    }
}

/// Why a strategy finished without a definitive answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnknownReason {
    /// Brute force ran out of attempts before covering the search space
    BudgetExhausted { attempts: u64 },
    /// Formula references variable 0 or variables beyond the declared count
    InvalidFormula { detail: String },
    /// The external backend gave no answer
    Backend { message: String },
}

impl fmt::Display for UnknownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownReason::BudgetExhausted { attempts } => {
                write!(f, "attempt budget exhausted after {} attempts", attempts)
            }
            UnknownReason::InvalidFormula { detail } => write!(f, "invalid formula: {}", detail),
            UnknownReason::Backend { message } => write!(f, "backend failure: {}", message),
        }
    }
}

/// Outcome of a single solve call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    Sat(Model),
    Unsat,
    Unknown(UnknownReason),
}

impl SolveResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, SolveResult::Sat(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, SolveResult::Unsat)
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            SolveResult::Sat(model) => Some(model),
            _ => None,
        }
    }
}

/// Counters gathered while searching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStatistics {
    /// Tentative assignments made (backtracking)
    pub decisions: u64,
    /// Branches cut by the partial check (backtracking)
    pub pruned: u64,
    /// Complete candidates checked (brute force)
    pub candidates: u64,
}

/// A result together with the counters that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    pub result: SolveResult,
    pub statistics: SearchStatistics,
}

impl SolveReport {
    pub fn new(result: SolveResult) -> Self {
        Self {
            result,
            statistics: SearchStatistics::default(),
        }
    }
}

/// Decides a CNF formula over variables `1..=num_vars`
///
/// Implementations keep all mutable search state private to the call, so a
/// strategy can be shared across threads.
pub trait SolvingStrategy: Send + Sync {
    /// Name used in reports
    fn name(&self) -> &str;

    /// Solve and report search counters
    fn run(&self, formula: &Formula, num_vars: usize) -> SolveReport;

    fn solve(&self, formula: &Formula, num_vars: usize) -> SolveResult {
        self.run(formula, num_vars).result
    }
}

/// Answers that need no search: contradictions, malformed input and the empty problem
pub(crate) fn trivial_result(formula: &Formula, num_vars: usize) -> Option<SolveResult> {
    if formula.has_empty_clause() {
        return Some(SolveResult::Unsat);
    }

    if formula.clauses().iter().any(|clause| clause.literals.contains(&0)) {
        return Some(SolveResult::Unknown(UnknownReason::InvalidFormula {
            detail: "literal 0 does not name a variable".to_string(),
        }));
    }

    let max_variable = formula.max_variable();
    if max_variable > num_vars {
        return Some(SolveResult::Unknown(UnknownReason::InvalidFormula {
            detail: format!(
                "variable {} referenced but only {} variables exist",
                max_variable, num_vars
            ),
        }));
    }

    if num_vars == 0 {
        return Some(SolveResult::Sat(Model::empty()));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::Clause;

    #[test]
    fn test_model_accessors() {
        let model = Model::from_values(vec![true, false, true]);
        assert_eq!(model.num_vars(), 3);
        assert_eq!(model.value(1), Some(true));
        assert_eq!(model.value(2), Some(false));
        assert_eq!(model.value(0), None);
        assert_eq!(model.value(4), None);
        assert_eq!(model.literals().collect::<Vec<_>>(), vec![1, -2, 3]);
        assert_eq!(model.true_count(), 2);
    }

    #[test]
    fn test_model_satisfies() {
        let formula = Formula::from_clauses(vec![Clause::new(vec![1, 2]), Clause::new(vec![-1, 2])]);
        assert!(Model::from_values(vec![false, true]).satisfies(&formula));
        assert!(!Model::from_values(vec![true, false]).satisfies(&formula));
    }

    #[test]
    fn test_trivial_results() {
        let contradiction = Formula::from_clauses(vec![Clause::empty()]);
        assert_eq!(trivial_result(&contradiction, 0), Some(SolveResult::Unsat));

        let empty = Formula::new();
        assert_eq!(trivial_result(&empty, 0), Some(SolveResult::Sat(Model::empty())));

        let out_of_range = Formula::from_clauses(vec![Clause::unit(4)]);
        assert!(matches!(
            trivial_result(&out_of_range, 2),
            Some(SolveResult::Unknown(UnknownReason::InvalidFormula { .. }))
        ));

        let zero_literal = Formula::from_clauses(vec![Clause::new(vec![1, 0])]);
        assert!(matches!(
            trivial_result(&zero_literal, 1),
            Some(SolveResult::Unknown(UnknownReason::InvalidFormula { .. }))
        ));

        let regular = Formula::from_clauses(vec![Clause::unit(1)]);
        assert_eq!(trivial_result(&regular, 1), None);
    }

    #[test]
    fn test_unknown_reason_display() {
        let reason = UnknownReason::BudgetExhausted { attempts: 10 };
        assert!(reason.to_string().contains("attempt budget exhausted"));
    }
}
