//! svm-loss Command Line Interface
//!
//! A diagnostic harness that generates seeded random problems, compares the
//! naive and vectorized hinge loss strategies, and checks gradients numerically.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info, warn};
use svm_loss::api::HingeLoss;
use svm_loss::core::{LossError, Result, Strategy};
use svm_loss::loss::validate_inputs;
use svm_loss::report::ComparisonReport;
use svm_loss::utils::gradcheck::GradCheckConfig;
use svm_loss::utils::random::{RandomProblem, DEFAULT_WEIGHT_SCALE};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "svm-loss")]
#[command(about = "Multiclass hinge loss diagnostics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "svm-loss contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the naive and vectorized strategies on a random problem
    Compare(CompareArgs),
    /// Check the analytic gradient against finite differences
    Gradcheck(GradCheckArgs),
    /// Display a saved comparison report
    Info(InfoArgs),
}

#[derive(Args, Clone)]
struct ProblemArgs {
    /// Number of examples N
    #[arg(short = 'n', long, default_value = "500")]
    samples: usize,

    /// Feature dimensionality D
    #[arg(long, default_value = "3073")]
    dims: usize,

    /// Number of classes C
    #[arg(short = 'c', long, default_value = "10")]
    classes: usize,

    /// Regularization strength
    #[arg(short, long, default_value = "0.0")]
    reg: f64,

    /// Random seed
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// Standard deviation of the random weights
    #[arg(long, default_value_t = DEFAULT_WEIGHT_SCALE)]
    weight_scale: f64,
}

#[derive(Args)]
struct CompareArgs {
    #[command(flatten)]
    problem: ProblemArgs,

    /// Maximum allowed disagreement between the strategies
    #[arg(short, long, default_value = "1e-7")]
    tolerance: f64,

    /// Save the report as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliStrategy {
    /// Explicit loops over examples and classes
    #[value(name = "naive")]
    Naive,
    /// Whole-matrix operations
    #[value(name = "vectorized")]
    Vectorized,
}

impl From<CliStrategy> for Strategy {
    fn from(cli_strategy: CliStrategy) -> Self {
        match cli_strategy {
            CliStrategy::Naive => Strategy::Naive,
            CliStrategy::Vectorized => Strategy::Vectorized,
        }
    }
}

#[derive(Args)]
struct GradCheckArgs {
    #[command(flatten)]
    problem: ProblemArgs,

    /// Strategy whose gradient is checked
    #[arg(long, default_value = "vectorized")]
    strategy: CliStrategy,

    /// Number of random coordinates to check
    #[arg(long, default_value = "10")]
    num_checks: usize,

    /// Finite difference step
    #[arg(long, default_value = "1e-5")]
    step: f64,

    /// Largest acceptable relative error
    #[arg(long, default_value = "1e-5")]
    threshold: f64,
}

#[derive(Args)]
struct InfoArgs {
    /// Report file
    report: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Compare(args) => compare_command(args),
        Commands::Gradcheck(args) => gradcheck_command(args),
        Commands::Info(args) => info_command(args),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("Error: {e}");
            process::exit(1);
        }
    }
}

fn generate_problem(args: &ProblemArgs) -> Result<RandomProblem> {
    info!(
        "Generating problem: N={}, D={}, C={}, seed={}",
        args.samples, args.dims, args.classes, args.seed
    );
    RandomProblem::generate(
        args.samples,
        args.dims,
        args.classes,
        args.weight_scale,
        args.seed,
    )
}

fn compare_command(args: CompareArgs) -> Result<bool> {
    if !args.tolerance.is_finite() || args.tolerance < 0.0 {
        return Err(LossError::InvalidParameter(format!(
            "Tolerance must be finite and non-negative, got: {}",
            args.tolerance
        )));
    }

    let problem = generate_problem(&args.problem)?;
    let reg = args.problem.reg;
    let shape = validate_inputs(&problem.weights, &problem.batch, &problem.labels, reg)?;

    let comparison = HingeLoss::new()
        .with_reg(reg)
        .compare(&problem.weights, &problem.batch, &problem.labels)?;

    let report = ComparisonReport::from_comparison(&comparison, shape, reg, Some(problem.seed));
    report.print_summary();
    println!("Speedup: {:.1}x", comparison.speedup());

    if let Some(output) = &args.output {
        report.save_to_file(output)?;
        info!("Report saved to: {output:?}");
    }

    let agrees = comparison.agrees(args.tolerance);
    if agrees {
        println!("Result: strategies agree within {:e}", args.tolerance);
    } else {
        warn!(
            "Strategies disagree: loss difference {:.3e}, max gradient difference {:.3e}",
            comparison.loss_difference, comparison.max_gradient_difference
        );
        println!("Result: strategies DISAGREE beyond {:e}", args.tolerance);
    }

    Ok(agrees)
}

fn gradcheck_command(args: GradCheckArgs) -> Result<bool> {
    let problem = generate_problem(&args.problem)?;
    let strategy: Strategy = args.strategy.into();

    if args.problem.reg != 0.0 {
        warn!(
            "Penalty gradient is reg * W, half the derivative of reg * ||W||^2; \
             entries will not match with reg != 0"
        );
    }

    let config = GradCheckConfig {
        num_checks: args.num_checks,
        step: args.step,
        seed: args.problem.seed,
    };

    let report = HingeLoss::new()
        .with_reg(args.problem.reg)
        .with_strategy(strategy)
        .check_gradient(&problem.weights, &problem.batch, &problem.labels, &config)?;

    println!("=== Gradient Check ({strategy}) ===");
    for entry in &report.entries {
        println!(
            "({}, {}) numerical: {:.6e} analytic: {:.6e} relative error: {:.3e}",
            entry.row, entry.col, entry.numerical, entry.analytic, entry.relative_error
        );
    }
    println!("Max relative error: {:.3e}", report.max_relative_error());

    let passed = report.passed(args.threshold);
    if passed {
        println!("Result: passed (threshold {:e})", args.threshold);
    } else {
        println!("Result: FAILED (threshold {:e})", args.threshold);
    }

    Ok(passed)
}

fn info_command(args: InfoArgs) -> Result<bool> {
    info!("Loading report from: {:?}", args.report);
    let report = ComparisonReport::load_from_file(&args.report)?;
    report.print_summary();
    Ok(true)
}
