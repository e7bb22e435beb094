//! Gem hunter pipeline: encoding, solving, rendering and validation

pub mod problem;
pub mod renderer;
pub mod solution;
pub mod validator;

pub use problem::HuntProblem;
pub use renderer::SolutionRenderer;
pub use solution::{OutcomeStatus, StrategyOutcome};
pub use validator::{ClueViolation, SolutionValidator, ValidationResult};
