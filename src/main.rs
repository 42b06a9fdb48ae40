use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use serde::Serialize;
use tracing::info;

use terrace_gam::{Mode, diagnose, rank_terms};
use terrace_io::{DatasetReader, ImportanceWriter, ModelReader};

#[derive(Parser)]
#[command(name = "terrace")]
#[command(about = "Term-importance diagnostics for step-function additive models")]
#[command(version)]
struct Cli {
    /// Path to the dataset CSV file
    #[arg(long)]
    data: PathBuf,

    /// Path to the fitted additive model file
    #[arg(long)]
    model: PathBuf,

    /// Output path for the ranked term-importance report
    #[arg(long)]
    output: PathBuf,

    /// Importance statistic: "L1" (mean absolute deviation) or "L2" (variance)
    #[arg(long, default_value = "L2")]
    mode: String,

    /// Enable verbose (debug-level) logging
    #[arg(long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long)]
    threads: Option<usize>,
}

/// JSON summary printed to stdout after a successful run.
#[derive(Serialize)]
struct DiagnoseOutput {
    n_instances: usize,
    n_attributes: usize,
    n_components: usize,
    n_distinct_terms: usize,
    mode: String,
    top_term: Option<String>,
    top_weight: Option<f64>,
    report: String,
}

fn run(cli: Cli) -> Result<()> {
    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    let mode: Mode = cli.mode.parse().context("invalid --mode value")?;

    // Read dataset
    let dataset = DatasetReader::new(&cli.data)
        .read()
        .context("failed to read dataset CSV")?;
    info!(
        n_instances = dataset.n_instances(),
        n_attributes = dataset.n_attributes(),
        "dataset loaded"
    );

    // Read model
    let model = ModelReader::new(&cli.model)
        .read()
        .context("failed to read model")?;
    info!(n_components = model.n_components(), "model loaded");

    // Compute and rank importances
    let ranked = rank_terms(diagnose(&model, dataset.instances(), mode));

    // Write the report
    ImportanceWriter::new(&cli.output)
        .write(&ranked)
        .context("failed to write importance report")?;
    info!(path = %cli.output.display(), "report written");

    // Print stdout summary
    let output = DiagnoseOutput {
        n_instances: dataset.n_instances(),
        n_attributes: dataset.n_attributes(),
        n_components: model.n_components(),
        n_distinct_terms: ranked.len(),
        mode: mode.to_string(),
        top_term: ranked.first().map(|t| t.term.to_string()),
        top_weight: ranked.first().map(|t| t.weight),
        report: cli.output.display().to_string(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn main() -> ExitCode {
    // clap's default exit code for usage errors is 2; this tool's contract
    // is 1, so parse failures are handled explicitly.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
