//! curlport - export API client collections as cURL scripts
//!
//! Reads one or more collection files and writes the scripts under the
//! export root, printing one status line per collection.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use curlport::{convert_file, convert_reader, Config, ConvertError, Outcome};

#[derive(Parser, Debug)]
#[command(
    name = "curlport",
    version,
    about = "Export API client collections as ready-to-run cURL scripts"
)]
struct Cli {
    /// Collection files to convert (`-` reads from stdin)
    #[arg(required = true, value_name = "COLLECTION")]
    inputs: Vec<PathBuf>,

    /// Directory the collection folders are created in
    #[arg(short, long, value_name = "DIR", env = "CURLPORT_EXPORT_ROOT")]
    output: Option<PathBuf>,

    /// Config file to use instead of ~/.curlport/config.yaml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log every step
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli)?;

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    let export_root = cli.output.clone().unwrap_or_else(|| config.export_root.clone());
    let options = config.export_options();

    let mut failed = false;
    for input in &cli.inputs {
        let result = if input.as_os_str() == "-" {
            convert_reader(io::stdin().lock(), &export_root, &options)
        } else {
            convert_file(input, &export_root, &options)
        };

        match result {
            Ok(outcome) => print_outcome(&outcome, cli.verbose),
            Err(err) => {
                failed = true;
                eprintln!("error: {}: {}", input.display(), describe(&err));
            }
        }
    }

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Initialize tracing; the guard must live until exit when logging to a file
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match &cli.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path.file_name().context("log file path has no file name")?;
            let file_appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(non_blocking)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn print_outcome(outcome: &Outcome, verbose: bool) {
    match outcome {
        Outcome::Converted(report) => {
            println!(
                "Collection \"{}\" processed successfully! Check the \"{}\" directory.",
                report.collection_name,
                report.output_dir.display()
            );
            println!(
                "  {} script(s) written, {} item(s) skipped",
                report.written.len(),
                report.skipped.len()
            );
            if verbose {
                for item in &report.skipped {
                    println!("  skipped {} in {}: {}", item.name, item.location.display(), item.reason);
                }
            }
        }
        Outcome::Empty { collection_name, .. } => {
            println!(
                "warning: Collection \"{}\" appears to be empty or has an invalid structure.",
                collection_name
            );
        }
    }
}

fn describe(err: &ConvertError) -> String {
    match err {
        ConvertError::InvalidFileType(_) => "Invalid file type. Please provide a .json file.".to_string(),
        err if err.is_input_format() => {
            format!("Invalid JSON file. Please provide a valid Postman collection. ({})", err)
        }
        err => err.to_string(),
    }
}
