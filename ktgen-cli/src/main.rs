//! Command line entry point for the Kotlin client generator.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use ktgen_codegen::{GenerationReport, Generator};
use ktgen_schema::parse_spec_file;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generates Kotlin data types from an OpenAPI specification.
#[derive(Debug, Parser)]
#[command(name = "ktgen", version, about)]
struct Cli {
    /// Path to the OpenAPI specification (JSON or YAML).
    spec: PathBuf,

    /// Output directory for the generated source tree.
    out_dir: PathBuf,

    /// Kotlin package for the generated types.
    package: String,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<GenerationReport> {
    if !cli.spec.exists() {
        bail!("specification file not found: {}", cli.spec.display());
    }

    let spec = parse_spec_file(&cli.spec)
        .with_context(|| format!("failed to parse {}", cli.spec.display()))?;
    info!(title = %spec.title, version = %spec.version, schemas = spec.len(), "parsed specification");

    let report = Generator::new(&spec, &cli.package)
        .write_to(&cli.out_dir)
        .context("failed to write generated sources")?;

    for failure in &report.failures {
        eprintln!("failed: {} ({})", failure.schema, failure.error);
    }
    println!(
        "generated {} of {} schemas into {}",
        report.files.len(),
        report.files.len() + report.failures.len(),
        cli.out_dir.display()
    );
    Ok(report)
}
