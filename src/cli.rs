use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_PARAMETERS_FILE;
use crate::io::{InputFormat, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "forecast-roi")]
#[command(about = "Compare the cost of model forecasts against human forecasts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the ROI report for a table of actuals and forecasts
    Compute {
        /// Parameter file (JSON or TOML)
        #[arg(short, long, env = "FORECAST_ROI_PARAMS", default_value = DEFAULT_PARAMETERS_FILE)]
        params: PathBuf,

        /// Input table, or '-' for CSV on stdin
        #[arg(short, long, env = "FORECAST_ROI_INPUT")]
        input: PathBuf,

        /// Input format (detected from the file extension by default)
        #[arg(long = "input-format", value_enum)]
        input_format: Option<InputFormat>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sum rows on a thread pool
        #[arg(long)]
        parallel: bool,

        /// Disable colors in terminal output
        #[arg(long)]
        plain: bool,
    },

    /// Write a template parameter file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Destination (defaults to model_parameters.json, or .toml with --toml)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Write TOML instead of JSON
        #[arg(long)]
        toml: bool,
    },
}
