//! Main CLI application for the gem hunter solver

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gem_hunter_sat::{
    config::{CliOverrides, OutputFormat, Settings, StrategyKind},
    grid::{create_example_grids, load_grid_from_file, Cell},
    hunt::{HuntProblem, SolutionValidator},
    utils::{ColorOutput, PerformanceReport, SolutionFormatter},
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "gem_hunter_sat")]
#[command(about = "Gem Hunter SAT Solver")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a puzzle grid with the configured strategies
    Solve(SolveArgs),

    /// Create example configuration and input files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Check a labeled grid against its clues
    Validate {
        /// Labeled grid file (clues, T and G)
        #[arg(short, long)]
        grid: PathBuf,
    },

    /// Print a grid together with its encoding statistics
    Analyze {
        /// Puzzle grid file
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Args)]
struct SolveArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Puzzle grid file (overrides config)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Report file (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Strategy to run, repeatable (overrides config)
    #[arg(short, long = "strategy")]
    strategies: Vec<StrategyKind>,

    /// Brute force attempt budget (overrides config)
    #[arg(short, long)]
    budget: Option<u64>,

    /// Performance table to update (overrides config)
    #[arg(short, long)]
    performance: Option<PathBuf>,

    /// Test case number for the performance table, taken from the input
    /// file name when omitted
    #[arg(short, long)]
    test_case: Option<u32>,

    /// Report format: text or json (overrides config)
    #[arg(short, long, value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// Append to the report instead of overwriting it
    #[arg(long)]
    append: bool,

    /// Run strategies concurrently
    #[arg(long)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve(args) => {
            init_tracing(args.verbose)?;
            solve_command(args)
        }
        Commands::Setup { directory, force } => {
            init_tracing(false)?;
            setup_command(directory, force)
        }
        Commands::Validate { grid } => {
            init_tracing(false)?;
            validate_command(grid)
        }
        Commands::Analyze { input } => {
            init_tracing(false)?;
            analyze_command(input)
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install log subscriber")?;
    Ok(())
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_ascii_lowercase().as_str() {
        "text" | "txt" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(format!("unknown format '{}', expected text or json", other)),
    }
}

/// `input_12.txt` -> 12
fn test_case_from_path(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    let digits: String = stem
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
        Ok(Settings::default())
    }
}

fn solve_command(args: SolveArgs) -> Result<()> {
    println!("{}", ColorOutput::info("💎 Starting Gem Hunter Solver"));

    let mut settings = load_settings(&args.config)?;

    // Apply CLI overrides
    let cli_overrides = CliOverrides {
        grid_file: args.input.clone(),
        report_file: args.output.clone(),
        strategies: (!args.strategies.is_empty()).then(|| args.strategies.clone()),
        brute_force_budget: args.budget,
        performance_file: args.performance.clone(),
        format: args.format,
        append: args.append,
        parallel: args.parallel,
    };
    settings.merge_with_cli(&cli_overrides);

    if args.verbose {
        println!("Configuration:");
        println!("  Grid file: {}", settings.input.grid_file.display());
        println!("  Report file: {}", settings.output.report_file.display());
        println!("  Strategies: {:?}", settings.solver.strategies);
        println!("  Brute force budget: {}", settings.solver.brute_force_budget);
        println!();
    }

    settings.validate()
        .context("Configuration validation failed")?;

    let start_time = Instant::now();
    let problem = HuntProblem::new(settings.clone())
        .context("Failed to create gem hunter problem")?;

    if args.verbose {
        println!("{}", SolutionFormatter::format_grid_with_coords(problem.grid()));
        println!("{}", problem.encoding_statistics());
    }

    println!("{}", ColorOutput::info("🧮 Encoding clues and solving..."));
    let outcomes = problem.solve();
    let total_time = start_time.elapsed();

    println!("\n{}", SolutionFormatter::format_outcome_summary(&outcomes));
    for outcome in &outcomes {
        println!("{} {}", ColorOutput::info(&format!("{}:", outcome.strategy)), ColorOutput::status(&outcome.status));
        if let Some(solution) = &outcome.solution {
            println!("{}", solution);
        }
    }

    let solved = outcomes.iter().filter(|o| o.is_solved()).count();
    if solved == 0 {
        println!("{}", ColorOutput::warning("❌ No strategy produced a solution"));
    } else {
        println!("{}", ColorOutput::success(&format!(
            "✅ {} of {} strategies solved the grid in {:.3}s",
            solved,
            outcomes.len(),
            total_time.as_secs_f64()
        )));
    }

    SolutionFormatter::save_outcomes(
        &outcomes,
        &settings.output.report_file,
        settings.output.format,
        settings.output.overwrite,
    )
    .context("Failed to save report")?;
    println!("{}", ColorOutput::success(&format!(
        "Report saved to {}",
        settings.output.report_file.display()
    )));

    if let Some(performance_file) = &settings.output.performance_file {
        match args.test_case.or_else(|| test_case_from_path(&settings.input.grid_file)) {
            Some(test_case) => {
                let mut report = PerformanceReport::load(performance_file)?;
                report.record(test_case, &outcomes);
                report.save(performance_file)
                    .context("Failed to save performance table")?;
                println!("Performance table updated: {}", performance_file.display());
            }
            None => println!("{}", ColorOutput::warning(
                "No test case number given, performance table not updated"
            )),
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/testcases");
    let output_dir = directory.join("output");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_grids(&input_dir)
        .context("Failed to create example grids")?;
    println!("Created example grids in: {}", input_dir.display());

    let variants_dir = config_dir.join("variants");
    std::fs::create_dir_all(&variants_dir)?;

    // SAT solver only
    let mut fast_config = Settings::default();
    fast_config.solver.strategies = vec![StrategyKind::Cadical];
    fast_config.input.grid_file = PathBuf::from("input/testcases/input_3.txt");
    fast_config.output.report_file = PathBuf::from("output/output_3.txt");
    fast_config.to_file(&variants_dir.join("fast.yaml"))?;

    // Every strategy, concurrently, with timings collected
    let mut benchmark_config = Settings::default();
    benchmark_config.solver.parallel = true;
    benchmark_config.input.grid_file = PathBuf::from("input/testcases/input_2.txt");
    benchmark_config.output.report_file = PathBuf::from("output/output_2.txt");
    benchmark_config.output.performance_file = Some(PathBuf::from("output/performance.txt"));
    benchmark_config.to_file(&variants_dir.join("benchmark.yaml"))?;

    println!("Created configuration variants in: {}", variants_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your puzzle grids to {}", input_dir.display());
    println!("3. Run: cargo run -- solve --config config/default.yaml");

    Ok(())
}

fn validate_command(grid_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Validating labeled grid..."));

    let grid = load_grid_from_file(&grid_path)
        .with_context(|| format!("Failed to load grid from {}", grid_path.display()))?;

    let result = SolutionValidator::new().validate(&grid);
    println!("{}", result);

    if result.is_valid && result.unresolved_cells == 0 {
        println!("{}", ColorOutput::success("✅ Grid is solved!"));
    } else if result.is_valid {
        println!("{}", ColorOutput::warning("Clues hold, but some cells are still unknown"));
    } else {
        println!("{}", ColorOutput::error("❌ Grid violates its clues"));
    }

    Ok(())
}

fn analyze_command(input_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("🔬 Analyzing puzzle grid..."));

    let grid = load_grid_from_file(&input_path)
        .with_context(|| format!("Failed to load grid from {}", input_path.display()))?;

    println!("Grid ({}x{}):", grid.rows(), grid.cols());
    println!("{}", SolutionFormatter::format_grid_with_coords(&grid));

    let total = grid.rows() * grid.cols();
    let unknown = grid.count(Cell::Unknown);
    println!("Grid Statistics:");
    println!("  Clues: {}", grid.iter().filter(|(_, cell)| cell.is_clue()).count());
    println!("  Unknown cells: {}", unknown);
    if total > 0 {
        println!("  Unknown density: {:.1}%", unknown as f64 / total as f64 * 100.0);
    }

    let problem = HuntProblem::with_grid(Settings::default(), grid);
    println!("\n{}", problem.encoding_statistics());

    Ok(())
}
