//! Report formatting and terminal output helpers

pub mod display;
pub mod performance;

pub use display::{Color, ColorOutput, SolutionFormatter};
pub use performance::PerformanceReport;
