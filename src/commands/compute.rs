use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::{load_parameters_with_env, FieldNames};
use crate::formatting::FormattingConfig;
use crate::io::{self, InputFormat, OutputFormat};
use crate::roi::{self, InputRow, MetricsReport};

/// Settings for one `compute` run, built from the command line.
#[derive(Debug, Clone)]
pub struct ComputeConfig {
    pub params: PathBuf,
    pub input: PathBuf,
    pub input_format: Option<InputFormat>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub parallel: bool,
    pub formatting: FormattingConfig,
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

fn load_rows(
    input: &Path,
    format: Option<InputFormat>,
    fields: &FieldNames,
) -> Result<Vec<InputRow>> {
    let rows = if is_stdin(input) {
        let stdin = std::io::stdin();
        io::read_rows(stdin.lock(), format.unwrap_or(InputFormat::Csv), fields)
            .context("Failed to read rows from stdin")?
    } else {
        io::read_rows_from_path(input, format, fields)
            .with_context(|| format!("Failed to read rows from {}", input.display()))?
    };
    Ok(rows)
}

/// Load parameters and rows, then aggregate. No output side effects.
pub fn build_report(config: &ComputeConfig) -> Result<MetricsReport> {
    let params = load_parameters_with_env(&config.params)
        .with_context(|| format!("Failed to load parameters from {}", config.params.display()))?
        .resolve()
        .context("Parameters are incomplete or invalid")?;

    let rows = load_rows(&config.input, config.input_format, &params.fields)?;

    let report = if config.parallel {
        roi::compute_parallel(&params, &rows)
    } else {
        roi::compute(&params, &rows)
    };
    report
        .ensure_finite()
        .context("Cost totals cannot be reported")?;
    log::info!("{}", report.summary());

    Ok(report)
}

pub fn handle_compute(config: ComputeConfig) -> Result<()> {
    let report = build_report(&config)?;
    io::write_report(
        &report,
        config.format,
        &config.formatting,
        config.output.as_deref(),
    )?;
    Ok(())
}
