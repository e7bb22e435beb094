//! Gem hunter problem definition: grid in, labeled grids out

use super::{OutcomeStatus, SolutionRenderer, SolutionValidator, StrategyOutcome};
use crate::config::Settings;
use crate::grid::{load_grid_from_file, GridModel};
use crate::sat::{
    ConstraintEncoder, Encoding, EncodingStatistics, SolveResult, SolvingStrategy, StrategyRegistry,
    UnknownReason,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

/// A loaded puzzle together with its CNF encoding
pub struct HuntProblem {
    settings: Settings,
    grid: GridModel,
    encoding: Encoding,
    renderer: SolutionRenderer,
    validator: SolutionValidator,
}

impl HuntProblem {
    /// Create a new problem from settings, loading the grid file
    pub fn new(settings: Settings) -> Result<Self> {
        let grid = load_grid_from_file(&settings.input.grid_file)
            .context("Failed to load grid file")?;

        Ok(Self::with_grid(settings, grid))
    }

    /// Create a problem with an explicit grid (useful for testing)
    pub fn with_grid(settings: Settings, grid: GridModel) -> Self {
        let encoding = ConstraintEncoder::encode(&grid);
        let renderer = SolutionRenderer::new(settings.rendering.missing_variables);

        Self {
            settings,
            grid,
            encoding,
            renderer,
            validator: SolutionValidator::new(),
        }
    }

    /// Run every configured strategy
    pub fn solve(&self) -> Vec<StrategyOutcome> {
        let registry = StrategyRegistry::from_config(&self.settings.solver);
        self.solve_with(&registry)
    }

    /// Run every strategy in `registry`, returning outcomes in registry order
    pub fn solve_with(&self, registry: &StrategyRegistry) -> Vec<StrategyOutcome> {
        info!(
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            variables = self.encoding.num_vars(),
            clauses = self.encoding.formula.len(),
            strategies = registry.len(),
            "solving grid"
        );

        if self.settings.solver.parallel {
            registry
                .strategies()
                .par_iter()
                .map(|strategy| self.run_strategy(strategy.as_ref()))
                .collect()
        } else {
            registry
                .strategies()
                .iter()
                .map(|strategy| self.run_strategy(strategy.as_ref()))
                .collect()
        }
    }

    /// Solve with one strategy, then render and validate its model
    pub fn run_strategy(&self, strategy: &dyn SolvingStrategy) -> StrategyOutcome {
        let start_time = Instant::now();
        let report = strategy.run(&self.encoding.formula, self.encoding.num_vars());
        let solve_time = start_time.elapsed();

        let (status, solution) = match report.result {
            SolveResult::Sat(model) => {
                match self.renderer.apply(&self.grid, &self.encoding.variables, &model) {
                    Ok(labeled) => {
                        let validation = self.validator.validate(&labeled);
                        if validation.is_valid {
                            (OutcomeStatus::Solved, Some(labeled))
                        } else {
                            let reason = format!(
                                "model violates {} clue(s)",
                                validation.violations.len()
                            );
                            (OutcomeStatus::Rejected { reason }, None)
                        }
                    }
                    Err(e) => (OutcomeStatus::Rejected { reason: e.to_string() }, None),
                }
            }
            SolveResult::Unsat => (OutcomeStatus::Unsatisfiable, None),
            SolveResult::Unknown(UnknownReason::BudgetExhausted { attempts }) => {
                (OutcomeStatus::BudgetExhausted { attempts }, None)
            }
            SolveResult::Unknown(reason) => (
                OutcomeStatus::Inconclusive {
                    reason: reason.to_string(),
                },
                None,
            ),
        };

        info!(
            strategy = strategy.name(),
            status = %status,
            elapsed_ms = solve_time.as_secs_f64() * 1000.0,
            "strategy finished"
        );

        StrategyOutcome::new(strategy.name(), status, solution, solve_time, report.statistics)
    }

    /// Get the puzzle grid
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// Get the CNF encoding of the grid
    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    /// Get the problem settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get encoding statistics
    pub fn encoding_statistics(&self) -> &EncodingStatistics {
        &self.encoding.statistics
    }
}
