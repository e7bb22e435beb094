//! Configuration management for the gem hunter solver

pub mod settings;

pub use settings::{
    Settings, InputConfig, OutputConfig, SolverConfig, RenderingConfig,
    OutputFormat, StrategyKind, MissingVariablePolicy, CliOverrides
};
