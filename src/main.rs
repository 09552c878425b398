//! hll-validate CLI
//!
//! ```text
//! hll-validate visualize [--run P] [--summary P] [--out1 P] [--out2 P]
//! hll-validate theory-check --B <int> [--summary P] [--tail <int>] [--json]
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hll_validate::config::{self, TheoryCheckConfig, VisualizeConfig};
use hll_validate::pipeline;
use hll_validate::rse::Precision;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hll-validate", version)]
#[command(about = "Validate a cardinality estimator against its theoretical RSE", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Command {
    /// Render the run trajectory and summary band charts
    Visualize(VisualizeArgs),

    /// Compare empirical tail RSE with the theoretical bounds
    #[command(name = "theory-check")]
    TheoryCheck(TheoryCheckArgs),
}

#[derive(Args)]
struct VisualizeArgs {
    /// Single-run table
    #[arg(long, default_value = config::DEFAULT_RUN_PATH)]
    run: PathBuf,

    /// Summary table
    #[arg(long, default_value = config::DEFAULT_SUMMARY_PATH)]
    summary: PathBuf,

    /// Run chart output
    #[arg(long, default_value = config::DEFAULT_RUN_CHART_PATH)]
    out1: PathBuf,

    /// Summary chart output
    #[arg(long, default_value = config::DEFAULT_SUMMARY_CHART_PATH)]
    out2: PathBuf,
}

impl From<VisualizeArgs> for VisualizeConfig {
    fn from(args: VisualizeArgs) -> Self {
        Self {
            run: args.run,
            summary: args.summary,
            out1: args.out1,
            out2: args.out2,
        }
    }
}

#[derive(Args)]
struct TheoryCheckArgs {
    /// Summary table
    #[arg(long, default_value = config::DEFAULT_SUMMARY_PATH)]
    summary: PathBuf,

    /// Estimator precision B (m = 2^B registers)
    #[arg(short = 'b', long = "B", allow_hyphen_values = true)]
    precision: Precision,

    /// Number of trailing summary rows to aggregate
    #[arg(long, default_value_t = 5, allow_hyphen_values = true)]
    tail: i64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl TryFrom<TheoryCheckArgs> for TheoryCheckConfig {
    type Error = hll_validate::Error;

    fn try_from(args: TheoryCheckArgs) -> hll_validate::Result<Self> {
        Self::new(args.precision).summary(args.summary).tail(args.tail)
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Visualize(args) => {
            let config = VisualizeConfig::from(args);
            pipeline::visualize(&config).context("visualize failed")?;
            println!("saved {}", config.out1.display());
            println!("saved {}", config.out2.display());
        }
        Command::TheoryCheck(args) => {
            let json = args.json;
            let config = TheoryCheckConfig::try_from(args)?;
            let report = pipeline::theory_check(&config).context("theory-check failed")?;
            if json {
                println!("{}", report.to_json()?);
            } else {
                print!("{}", report.render());
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
