//! CLI entry point for the GPA rater.
//!
//! Reads a result sheet from a file or URL, computes the credit-weighted GPA
//! with optional course exclusions, and prints the awarded class.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use gpa_rater::{
    config::resolve_exclusions,
    fetch::load_source,
    gpa::{classify, evaluate, grade::grade_scale},
    output::{ResultRecord, append_record, render_json, render_summary},
    parser::parse_sheet,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const INVALID_FILE_MESSAGE: &str =
    "Error processing file. Please make sure it is a valid Excel result sheet.";

#[derive(Parser)]
#[command(name = "gpa_rater")]
#[command(about = "Compute a GPA and honors class from a course result sheet", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the GPA from an .xlsx, .xls, .ods or .csv result sheet
    Calculate {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Comma-separated course codes to leave out of the GPA (e.g. "CS1013,EN1001")
        #[arg(short = 'x', long, env = "GPA_EXCLUDE")]
        exclude: Option<String>,

        /// JSON file holding an array of course codes to leave out
        #[arg(long, value_name = "PATH")]
        exclude_file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Optional: CSV file to append the result to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the honors class for a GPA value
    Classify {
        #[arg(allow_negative_numbers = true)]
        gpa: f64,
    },
    /// Print the grade-to-point scale
    Grades,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let _file_guard = init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Calculate {
            source,
            exclude,
            exclude_file,
            format,
            output,
        } => {
            return calculate(
                &source,
                exclude.as_deref(),
                exclude_file.as_deref(),
                format,
                output.as_deref(),
            )
            .await;
        }
        Commands::Classify { gpa } => {
            println!("{}", classify(gpa));
        }
        Commands::Grades => {
            for (grade, points) in grade_scale() {
                println!("{grade:<3} {points:.1}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_tracing() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/gpa_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gpa_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info")));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::try_from_env("RUST_LOG_JSON").unwrap_or_else(|_| EnvFilter::new("debug")),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .try_init()?;

    Ok(guard)
}

/// Loads, decodes and evaluates a result sheet, then reports the outcome.
#[tracing::instrument(skip(exclude, exclude_file, format))]
async fn calculate(
    source: &str,
    exclude: Option<&str>,
    exclude_file: Option<&Path>,
    format: Format,
    output: Option<&str>,
) -> Result<ExitCode> {
    let excluded = resolve_exclusions(exclude, exclude_file)?;
    let bytes = load_source(source).await?;

    let rows = match parse_sheet(&bytes) {
        Ok(rows) => rows,
        Err(e) => {
            error!(error = %e, "Result sheet could not be decoded");
            eprintln!("{INVALID_FILE_MESSAGE}");
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(rows = rows.len(), excluded = excluded.len(), "Result sheet decoded");

    let result = match evaluate(&rows, &excluded) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(
        gpa = %result.gpa,
        total_credits = result.total_credits,
        class = result.class(),
        "GPA calculated"
    );

    match format {
        Format::Text => println!("{}", render_summary(&result)),
        Format::Json => println!("{}", render_json(&result)?),
    }

    if let Some(path) = output {
        append_record(path, &ResultRecord::new(source, &result))?;
    }

    Ok(ExitCode::SUCCESS)
}
