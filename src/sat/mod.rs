//! SAT encoding and solving strategies for the gem hunter puzzle

pub mod variables;
pub mod constraints;
pub mod encoder;
pub mod solver;
pub mod backtracking;
pub mod brute_force;
pub mod external;
pub mod solver_factory;

pub use variables::VariableMap;
pub use constraints::{exactly_n_clauses, Clause, Formula, Literal};
pub use encoder::{ConstraintEncoder, Encoding, EncodingStatistics};
pub use solver::{Model, SearchStatistics, SolveReport, SolveResult, SolvingStrategy, UnknownReason};
pub use backtracking::BacktrackingSolver;
pub use brute_force::BruteForceSolver;
pub use external::{CadicalBackend, ExternalSatSolver, SatBackend};
pub use solver_factory::{create_strategy, StrategyRegistry};
