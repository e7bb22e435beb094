//! Adapter over an off-the-shelf CNF solver

use super::constraints::{Clause, Formula};
use super::solver::{trivial_result, Model, SolveReport, SolveResult, SolvingStrategy, UnknownReason};
use anyhow::Result;
use cadical::Solver;
use tracing::debug;

/// Capability consumed from an external SAT solver: given clauses over
/// `1..=num_vars`, return `Some(model)` when satisfiable and `None` when not
pub trait SatBackend: Send + Sync {
    fn name(&self) -> &str;

    fn check(&self, clauses: &[Clause], num_vars: usize) -> Result<Option<Model>>;
}

/// CaDiCaL through the `cadical` crate
#[derive(Debug, Clone, Default)]
pub struct CadicalBackend;

impl SatBackend for CadicalBackend {
    fn name(&self) -> &str {
        "CaDiCaL"
    }

    fn check(&self, clauses: &[Clause], num_vars: usize) -> Result<Option<Model>> {
        let mut solver: Solver = Solver::new();
        let mut max_variable = 0;

        for clause in clauses {
            if clause.is_empty() {
                anyhow::bail!("Cannot add empty clause (unsatisfiable)");
            }
            max_variable = max_variable.max(clause.max_variable());
            solver.add_clause(clause.literals.iter().copied());
        }

        match solver.solve() {
            Some(true) => {
                // Variables never mentioned are unconstrained and reported as false
                let values = (1..=num_vars)
                    .map(|var| {
                        var <= max_variable && solver.value(var as i32).unwrap_or(false)
                    })
                    .collect();
                Ok(Some(Model::from_values(values)))
            }
            Some(false) => Ok(None),
            None => anyhow::bail!("CaDiCaL stopped without a result"),
        }
    }
}

/// Solving strategy that hands the whole formula to a [`SatBackend`]
#[derive(Debug, Clone, Default)]
pub struct ExternalSatSolver<B = CadicalBackend> {
    backend: B,
}

impl<B: SatBackend> ExternalSatSolver<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: SatBackend> SolvingStrategy for ExternalSatSolver<B> {
    fn name(&self) -> &str {
        self.backend.name()
    }

    fn run(&self, formula: &Formula, num_vars: usize) -> SolveReport {
        if let Some(result) = trivial_result(formula, num_vars) {
            return SolveReport::new(result);
        }

        let result = match self.backend.check(formula.clauses(), num_vars) {
            Ok(Some(model)) => SolveResult::Sat(model),
            Ok(None) => SolveResult::Unsat,
            Err(e) => {
                debug!(backend = self.backend.name(), error = %e, "external solver failed");
                SolveResult::Unknown(UnknownReason::Backend {
                    message: e.to_string(),
                })
            }
        };

        SolveReport::new(result)
    }
}
