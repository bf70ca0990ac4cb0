mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::{PaymentArgs, ScheduleArgs};
use commands::documents::DocumentsArgs;
use commands::evaluation::EvaluateArgs;
use commands::rut::RutArgs;
use commands::simulation::SimulateArgs;

/// Mortgage credit simulation and evaluation
#[derive(Parser)]
#[command(
    name = "mcx",
    version,
    about = "Mortgage credit simulation and evaluation",
    long_about = "A CLI for simulating mortgage installments and evaluating credit \
                  requests against bank policy with decimal precision. Supports \
                  monthly payments, amortization schedules, policy rule evaluation, \
                  document requirements per loan type, and RUT validation."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Fixed monthly installment for a loan
    MonthlyPayment(PaymentArgs),
    /// Month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Simulate installment and total cost of a loan
    Simulate(SimulateArgs),
    /// Evaluate a credit request against policy rules R1-R7.5
    Evaluate(EvaluateArgs),
    /// List the documents a loan type requires
    RequiredDocuments(DocumentsArgs),
    /// Check a RUT's modulus-11 check digit
    ValidateRut(RutArgs),
    /// Print a RUT in 12.345.678-5 form
    FormatRut(RutArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    if let Err(e) = telemetry::init() {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::MonthlyPayment(args) => commands::amortization::run_monthly_payment(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::Simulate(args) => commands::simulation::run_simulate(args),
        Commands::Evaluate(args) => commands::evaluation::run_evaluate(args),
        Commands::RequiredDocuments(args) => commands::documents::run_required_documents(args),
        Commands::ValidateRut(args) => commands::rut::run_validate_rut(args),
        Commands::FormatRut(args) => commands::rut::run_format_rut(args),
        Commands::Version => {
            println!("mcx {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
