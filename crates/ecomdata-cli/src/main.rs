mod config;
mod logging;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use ecomdata_generate::{GenerateOptions, GenerationEngine, GenerationError, ItemsPerOrder};
use ecomdata_ingest::{IngestEngine, IngestError, IngestOptions};
use thiserror::Error;
use tracing::{error, info};

use config::{Settings, load_settings};
use logging::{LogFormat, init_logging};
use report::write_json_atomic;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("generation failed: {0}")]
    Generate(#[from] GenerationError),
    #[error("ingestion failed: {0}")]
    Ingest(#[from] IngestError),
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "ecomdata",
    version,
    about = "Synthetic e-commerce dataset generator and SQLite loader"
)]
struct Cli {
    /// Settings file (defaults to ./ecomdata.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the five CSV tables.
    Generate(GenerateArgs),
    /// Load the CSV tables into a fresh SQLite database.
    Ingest(IngestArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Output directory for the CSV files.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    users: Option<usize>,
    #[arg(long)]
    products: Option<usize>,
    #[arg(long)]
    orders: Option<usize>,
    /// Minimum line items per order.
    #[arg(long)]
    min_items: Option<usize>,
    /// Maximum line items per order.
    #[arg(long)]
    max_items: Option<usize>,
    /// Date treated as "today" (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    reference_date: Option<NaiveDate>,
    /// Write the generation report as JSON.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct IngestArgs {
    /// Directory holding the CSV files.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// SQLite database file to recreate.
    #[arg(long = "db", value_name = "PATH")]
    db_path: Option<PathBuf>,
    /// Load without PRAGMA foreign_keys.
    #[arg(long, default_value_t = false)]
    no_foreign_keys: bool,
    /// Write the ingestion report as JSON.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.log_format, cli.verbose) {
        eprintln!("ecomdata: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "run failed");
            eprintln!("ecomdata: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = load_settings(cli.config.as_deref())?;
    match cli.command {
        Command::Generate(args) => run_generate(args, settings),
        Command::Ingest(args) => run_ingest(args, settings).await,
    }
}

fn run_generate(args: GenerateArgs, settings: Settings) -> Result<(), CliError> {
    let options = generate_options(&args, settings.generate);
    let result = GenerationEngine::new(options).run()?;

    for table in &result.report.tables {
        println!("{}: {} rows -> {}", table.table, table.rows, table.file.display());
    }

    if let Some(path) = &args.report {
        write_json_atomic(path, &result.report)?;
        info!(path = %path.display(), "generation report written");
    }
    Ok(())
}

async fn run_ingest(args: IngestArgs, settings: Settings) -> Result<(), CliError> {
    let options = ingest_options(&args, settings.ingest);
    let report = IngestEngine::new(options).run().await?;

    for table in &report.tables {
        println!("{}: {} rows", table.table, table.rows);
    }
    println!("database: {}", report.db_path.display());

    if let Some(path) = &args.report {
        write_json_atomic(path, &report)?;
        info!(path = %path.display(), "ingestion report written");
    }
    Ok(())
}

fn generate_options(args: &GenerateArgs, mut options: GenerateOptions) -> GenerateOptions {
    if let Some(out_dir) = &args.out_dir {
        options.out_dir = out_dir.clone();
    }
    if let Some(seed) = args.seed {
        options.seed = seed;
    }
    if let Some(users) = args.users {
        options.users = users;
    }
    if let Some(products) = args.products {
        options.products = products;
    }
    if let Some(orders) = args.orders {
        options.orders = orders;
    }
    let ItemsPerOrder { min, max } = options.items_per_order;
    options.items_per_order = ItemsPerOrder {
        min: args.min_items.unwrap_or(min),
        max: args.max_items.unwrap_or(max),
    };
    if args.reference_date.is_some() {
        options.reference_date = args.reference_date;
    }
    options
}

fn ingest_options(args: &IngestArgs, mut options: IngestOptions) -> IngestOptions {
    if let Some(data_dir) = &args.data_dir {
        options.data_dir = data_dir.clone();
    }
    if let Some(db_path) = &args.db_path {
        options.db_path = db_path.clone();
    }
    if args.no_foreign_keys {
        options.enforce_foreign_keys = false;
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("parse cli")
    }

    #[test]
    fn flags_override_settings() {
        let cli = parse(&[
            "ecomdata",
            "generate",
            "--seed",
            "9",
            "--orders",
            "12",
            "--max-items",
            "4",
            "--reference-date",
            "2024-06-01",
        ]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };

        let mut file_options = GenerateOptions::default();
        file_options.users = 30;
        let options = generate_options(&args, file_options);

        assert_eq!(options.seed, 9);
        assert_eq!(options.orders, 12);
        assert_eq!(options.users, 30);
        assert_eq!(options.items_per_order, ItemsPerOrder { min: 1, max: 4 });
        assert_eq!(options.reference_date, NaiveDate::from_ymd_opt(2024, 6, 1));
    }

    #[test]
    fn ingest_defaults_match_settings() {
        let cli = parse(&["ecomdata", "--log-format", "json", "ingest", "--db", "tmp/x.db"]);
        assert_eq!(cli.log_format, LogFormat::Json);
        let Command::Ingest(args) = cli.command else {
            panic!("expected ingest");
        };

        let options = ingest_options(&args, IngestOptions::default());
        assert_eq!(options.data_dir, PathBuf::from("data"));
        assert_eq!(options.db_path, PathBuf::from("tmp/x.db"));
        assert!(options.enforce_foreign_keys);
    }

    #[test]
    fn rejects_malformed_reference_date() {
        assert!(
            Cli::try_parse_from(["ecomdata", "generate", "--reference-date", "06/01/2024"])
                .is_err()
        );
    }
}
