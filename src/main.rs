use anyhow::Result;
use clap::Parser;
use forecast_roi::cli::{Cli, Commands};
use forecast_roi::commands::compute::ComputeConfig;
use forecast_roi::errors::RoiError;
use forecast_roi::formatting::FormattingConfig;
use log::LevelFilter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Compute {
            params,
            input,
            input_format,
            format,
            output,
            parallel,
            plain,
        } => {
            let formatting = create_formatting_config(plain);
            colored::control::set_override(formatting.use_color());

            forecast_roi::commands::compute::handle_compute(ComputeConfig {
                params,
                input,
                input_format,
                format,
                output,
                parallel,
                formatting,
            })
        }
        Commands::Init { force, path, toml } => {
            let written = forecast_roi::commands::init::init_parameters(path, toml, force)?;
            println!("Created parameter file {}", written.display());
            Ok(())
        }
    }
}

// Pure function to map -v count to a log level; RUST_LOG still wins
fn verbosity_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(verbosity_level(verbosity))
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

// Pure function to create formatting configuration
fn create_formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}

fn report_error(err: &anyhow::Error) {
    match err.chain().find_map(|cause| cause.downcast_ref::<RoiError>()) {
        Some(roi_err) => eprintln!("Error [{}]: {err:#}", roi_err.code()),
        None => eprintln!("Error: {err:#}"),
    }
}
