//! Configuration settings for the gem hunter solver

use crate::sat::brute_force::DEFAULT_MAX_ATTEMPTS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub solver: SolverConfig,
    #[serde(default)]
    pub rendering: RenderingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub grid_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub report_file: PathBuf,
    /// Truncate the report before writing instead of appending to it
    pub overwrite: bool,
    pub format: OutputFormat,
    #[serde(default)]
    pub performance_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub strategies: Vec<StrategyKind>,
    pub brute_force_budget: u64,
    /// Run the strategies concurrently on the rayon pool
    #[serde(default)]
    pub parallel: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Cadical,
    Backtracking,
    BruteForce,
}

impl std::str::FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "cadical" | "sat" => Ok(StrategyKind::Cadical),
            "backtracking" => Ok(StrategyKind::Backtracking),
            "brute_force" | "bruteforce" => Ok(StrategyKind::BruteForce),
            other => anyhow::bail!("Unknown strategy: {}", other),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderingConfig {
    #[serde(default)]
    pub missing_variables: MissingVariablePolicy,
}

/// What to do with an unknown cell whose variable the model leaves out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingVariablePolicy {
    /// Label the cell safe
    #[default]
    Safe,
    /// Refuse to render the model
    Reject,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: InputConfig {
                grid_file: PathBuf::from("input/testcases/input_1.txt"),
            },
            output: OutputConfig {
                report_file: PathBuf::from("output/output_1.txt"),
                overwrite: true,
                format: OutputFormat::Text,
                performance_file: None,
            },
            solver: SolverConfig {
                strategies: vec![StrategyKind::Cadical, StrategyKind::Backtracking, StrategyKind::BruteForce],
                brute_force_budget: DEFAULT_MAX_ATTEMPTS,
                parallel: false,
            },
            rendering: RenderingConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.solver.strategies.is_empty() {
            anyhow::bail!("At least one solving strategy must be configured");
        }

        if self.solver.brute_force_budget == 0 {
            anyhow::bail!("Brute force attempt budget must be positive");
        }

        if !self.input.grid_file.exists() {
            anyhow::bail!("Grid file does not exist: {}", self.input.grid_file.display());
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref grid_file) = cli_overrides.grid_file {
            self.input.grid_file = grid_file.clone();
        }
        if let Some(ref report_file) = cli_overrides.report_file {
            self.output.report_file = report_file.clone();
        }
        if let Some(ref strategies) = cli_overrides.strategies {
            if !strategies.is_empty() {
                self.solver.strategies = strategies.clone();
            }
        }
        if let Some(budget) = cli_overrides.brute_force_budget {
            self.solver.brute_force_budget = budget;
        }
        if let Some(ref performance_file) = cli_overrides.performance_file {
            self.output.performance_file = Some(performance_file.clone());
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if cli_overrides.append {
            self.output.overwrite = false;
        }
        if cli_overrides.parallel {
            self.solver.parallel = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub grid_file: Option<PathBuf>,
    pub report_file: Option<PathBuf>,
    pub strategies: Option<Vec<StrategyKind>>,
    pub brute_force_budget: Option<u64>,
    pub performance_file: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub append: bool,
    pub parallel: bool,
}
