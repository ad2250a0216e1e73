use anyhow::{Context, Result};
use clap::Parser;
use fimcheck::cli::{Cli, Command, OutputFormat};
use fimcheck::config::ValidationConfig;
use fimcheck::report::ComparisonReport;
use fimcheck::{accuracy, canonicalize, parser, reconcile};
use std::io::Write;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Compare sample results against exact results and print the report
fn run_compare(
    config: ValidationConfig,
    large: &Path,
    sample: &Path,
    format: OutputFormat,
    explain: bool,
) -> Result<()> {
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let extended = parser::parse_exact(large, config.extended_threshold())
        .context("Failed to load exact results")?;
    let sampled = parser::parse_sample(sample, config.sample_threshold())
        .context("Failed to load sample results")?;

    let reconciliation = reconcile::reconcile(&extended, &sampled, config.min_freq);

    // Set agreement is printed even when no accuracy figures can be computed
    let (accuracy, failure) =
        match accuracy::evaluate(&extended, &sampled, &reconciliation, config.epsilon) {
            Ok(accuracy) => (Some(accuracy), None),
            Err(err) => (None, Some(err)),
        };

    if explain {
        if let Some(accuracy) = &accuracy {
            eprint!("{}", accuracy.to_report_string());
        }
    }

    let report = ComparisonReport::new(large, sample, &config, &reconciliation, accuracy);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => {
            for itemset in &report.non_acceptable_false_positives {
                writeln!(out, "{}", itemset)?;
            }
            for line in report.summary_lines() {
                writeln!(out, "{}", line)?;
            }
            out.flush()?;
            if let Some(csv) = report.csv_line() {
                eprintln!("{}", csv);
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", report.to_json()?)?;
            out.flush()?;
        }
    }

    match failure {
        Some(err) => Err(anyhow::Error::new(err).context("Failed to evaluate sample accuracy")),
        None => Ok(()),
    }
}

fn run_sort(file: &Path) -> Result<()> {
    let lines = canonicalize::canonicalize(file).context("Failed to canonicalize results")?;
    canonicalize::write_lines(std::io::stdout().lock(), &lines)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    match args.command {
        Command::Compare {
            epsilon,
            min_freq,
            large,
            sample,
            format,
            explain,
        } => run_compare(
            ValidationConfig::new(epsilon, min_freq),
            &large,
            &sample,
            format,
            explain,
        ),
        Command::Sort { file } => run_sort(&file),
    }
}
