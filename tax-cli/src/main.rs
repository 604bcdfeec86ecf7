use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tax_cli::edit::Edit;
use tax_cli::{logging, rates, report};
use tax_core::{CellId, TaxEngine, TaxRates, fixture};
use tracing::info;

/// Corporate income tax return calculator.
///
/// Inputs are worksheet cells such as `C4` (domestic sales) or `D6`
/// (registered exporter flag). Every derived cell is recomputed after each
/// change and the headline results are printed in rupees.
#[derive(Parser, Debug)]
#[command(name = "tax-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML file overriding the statutory rates
    #[arg(short, long, global = true)]
    rates: Option<PathBuf>,

    /// Log filter directive (e.g. `debug`, `tax_core=trace`); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a return and print the results
    Calc(CalcArgs),

    /// Check the built-in worked example against its reference figures
    Verify,
}

#[derive(Args, Debug)]
struct CalcArgs {
    /// CSV file of `cell,value` rows to load
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Set one cell, e.g. `--set C17=12,000,000` (repeatable)
    #[arg(short, long = "set", value_name = "CELL=VALUE")]
    edits: Vec<Edit>,

    /// Start from the built-in worked example
    #[arg(short, long, default_value_t = false)]
    test_data: bool,

    /// Print this cell before the summary (repeatable)
    #[arg(long = "show", value_name = "CELL")]
    show: Vec<CellId>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let tax_rates = match &cli.rates {
        Some(path) => rates::load_rates(path)?,
        None => TaxRates::default(),
    };
    let mut engine = TaxEngine::with_rates(tax_rates).context("Invalid tax rates")?;

    match cli.command {
        Command::Calc(args) => calc(&mut engine, &args),
        Command::Verify => Ok(verify(&mut engine)),
    }
}

fn calc(
    engine: &mut TaxEngine,
    args: &CalcArgs,
) -> Result<ExitCode> {
    if args.test_data {
        engine.load_test_data();
    }

    if let Some(path) = &args.input {
        let assignments = tax_data::load_from_file(path)
            .with_context(|| format!("Failed to load inputs from: {}", path.display()))?;
        info!(count = assignments.len(), path = %path.display(), "applying CSV inputs");
        tax_data::apply(engine, &assignments);
    }

    for edit in &args.edits {
        edit.apply(engine);
    }

    for &cell in &args.show {
        println!("{}", report::format_cell(cell, engine.value(cell)));
    }
    if !args.show.is_empty() {
        println!();
    }
    print!("{}", report::format_results(&engine.get_tax_results()));

    Ok(ExitCode::SUCCESS)
}

fn verify(engine: &mut TaxEngine) -> ExitCode {
    engine.load_test_data();
    let mismatches = fixture::verify(engine);

    print!("{}", report::format_verification(&mismatches));

    if mismatches.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
