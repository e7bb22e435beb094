//! Exhaustive enumeration of complete assignments

use super::constraints::Formula;
use super::solver::{
    trivial_result, Model, SearchStatistics, SolveReport, SolveResult, SolvingStrategy, UnknownReason,
};
use tracing::debug;

/// Default number of candidates tried before giving up
pub const DEFAULT_MAX_ATTEMPTS: u64 = 1_000_000;

/// Tries assignments `0, 1, 2, ...` where bit `i` of the counter is the value
/// of variable `i + 1`, stopping at the first candidate that satisfies every
/// clause or when the attempt budget runs out.
#[derive(Debug, Clone)]
pub struct BruteForceSolver {
    max_attempts: u64,
}

impl BruteForceSolver {
    pub fn new(max_attempts: u64) -> Self {
        Self { max_attempts }
    }

    fn bit(candidate: u64, var: usize) -> bool {
        var <= 64 && (candidate >> (var - 1)) & 1 == 1
    }

    fn satisfies(formula: &Formula, candidate: u64) -> bool {
        formula
            .clauses()
            .iter()
            .all(|clause| clause.is_satisfied_by(|var| Self::bit(candidate, var)))
    }

    fn to_model(candidate: u64, num_vars: usize) -> Model {
        Model::from_values((1..=num_vars).map(|var| Self::bit(candidate, var)).collect())
    }
}

impl Default for BruteForceSolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl SolvingStrategy for BruteForceSolver {
    fn name(&self) -> &str {
        "BruteForce"
    }

    fn run(&self, formula: &Formula, num_vars: usize) -> SolveReport {
        if let Some(result) = trivial_result(formula, num_vars) {
            return SolveReport::new(result);
        }

        // None when the space does not fit in a u64, which no budget can cover anyway
        let total = u32::try_from(num_vars).ok().and_then(|n| 1u64.checked_shl(n));
        let limit = total.map_or(self.max_attempts, |t| t.min(self.max_attempts));

        let mut statistics = SearchStatistics::default();
        for candidate in 0..limit {
            statistics.candidates += 1;
            if Self::satisfies(formula, candidate) {
                debug!(candidates = statistics.candidates, "brute force found a model");
                return SolveReport {
                    result: SolveResult::Sat(Self::to_model(candidate, num_vars)),
                    statistics,
                };
            }
        }

        let exhausted_space = total.is_some_and(|t| t <= self.max_attempts);
        debug!(candidates = statistics.candidates, exhausted_space, "brute force found no model");

        let result = if exhausted_space {
            SolveResult::Unsat
        } else {
            SolveResult::Unknown(UnknownReason::BudgetExhausted {
                attempts: self.max_attempts,
            })
        };

        SolveReport { result, statistics }
    }
}
