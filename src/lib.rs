//! Gem Hunter SAT Solver
//!
//! This library labels the unknown cells of a clue grid as hazards or safe
//! cells by encoding the clues as CNF and solving the formula with several
//! interchangeable strategies.

pub mod config;
pub mod error;
pub mod grid;
pub mod hunt;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use error::{GridError, RenderError};
pub use grid::{Cell, GridModel};
pub use hunt::{HuntProblem, OutcomeStatus, StrategyOutcome};

use anyhow::Result;

/// Main entry point: load the configured grid and run every configured strategy
pub fn solve_puzzle(settings: Settings) -> Result<Vec<StrategyOutcome>> {
    let problem = HuntProblem::new(settings)?;
    Ok(problem.solve())
}
