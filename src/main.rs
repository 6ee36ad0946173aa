use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use cpk_metrics::cli::{BatchArgs, CalcArgs, Cli, Command};
use cpk_metrics::{batch, report, CapabilityInput, OutputFormat, ProcessCapability};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run_calc(args: &CalcArgs) -> Result<()> {
    let input = CapabilityInput::parse(
        &args.mean,
        &args.std_dev,
        args.usl.as_deref(),
        args.lsl.as_deref(),
    )?;
    let result = ProcessCapability::from_input(input);

    match args.format {
        OutputFormat::Table => {
            report::print_table(result.metrics().entries()).context("failed to write table")?
        }
        OutputFormat::Json => {
            let json = report::to_json(&result).context("failed to serialize report")?;
            writeln!(std::io::stdout().lock(), "{json}").context("failed to write report")?;
        }
    }
    Ok(())
}

fn run_batch(args: &BatchArgs) -> Result<()> {
    let summary = batch::run_file(&args.input, args.output.as_deref(), &args.config())
        .with_context(|| format!("batch evaluation of {} failed", args.input.display()))?;

    if args.output.is_some() {
        eprintln!(
            "{} rows: {} computed, {} skipped",
            summary.rows, summary.computed, summary.skipped
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match &cli.command {
        Command::Calc(args) => run_calc(args),
        Command::Batch(args) => run_batch(args),
    }
}
