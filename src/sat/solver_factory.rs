//! Factory for creating solving strategies based on configuration

use super::backtracking::BacktrackingSolver;
use super::brute_force::BruteForceSolver;
use super::external::{CadicalBackend, ExternalSatSolver};
use super::solver::SolvingStrategy;
use crate::config::{SolverConfig, StrategyKind};

/// Create a single strategy instance
pub fn create_strategy(kind: StrategyKind, config: &SolverConfig) -> Box<dyn SolvingStrategy> {
    match kind {
        StrategyKind::Cadical => Box::new(ExternalSatSolver::new(CadicalBackend)),
        StrategyKind::Backtracking => Box::new(BacktrackingSolver::new()),
        StrategyKind::BruteForce => Box::new(BruteForceSolver::new(config.brute_force_budget)),
    }
}

/// Ordered list of named strategies to run against the same formula
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn SolvingStrategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One strategy per configured kind, in configuration order
    pub fn from_config(config: &SolverConfig) -> Self {
        let mut registry = Self::new();
        for &kind in &config.strategies {
            registry.register(create_strategy(kind, config));
        }
        registry
    }

    pub fn register(&mut self, strategy: Box<dyn SolvingStrategy>) {
        self.strategies.push(strategy);
    }

    pub fn strategies(&self) -> &[Box<dyn SolvingStrategy>] {
        &self.strategies
    }

    pub fn names(&self) -> Vec<String> {
        self.strategies.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.strategies.iter().map(|s| s.name())).finish()
    }
}
