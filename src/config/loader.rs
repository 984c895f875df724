use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use super::core::CostParameters;
use crate::errors::RoiError;

/// Parameter file looked up in the working directory when none is given.
pub const DEFAULT_PARAMETERS_FILE: &str = "model_parameters.json";

/// Document format of a parameter source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterFormat {
    Json,
    Toml,
}

impl ParameterFormat {
    /// `.toml` files are TOML; everything else is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Pure function to read parameter file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse a parameter document.
///
/// Absent keys come back as `None`; unknown keys are ignored.
pub fn parse_parameters(contents: &str, format: ParameterFormat) -> Result<CostParameters, RoiError> {
    let parse_error = |e: &dyn std::fmt::Display| {
        RoiError::configuration(format!("Failed to parse parameters: {e}"))
    };

    match format {
        ParameterFormat::Json => {
            // Serde would otherwise accept an array positionally.
            let document: serde_json::Value =
                serde_json::from_str(contents).map_err(|e| parse_error(&e))?;
            if !document.is_object() {
                return Err(RoiError::configuration(
                    "Parameter document must be a JSON object",
                ));
            }
            serde_json::from_value::<CostParameters>(document).map_err(|e| parse_error(&e))
        }
        ParameterFormat::Toml => {
            toml::from_str::<CostParameters>(contents).map_err(|e| parse_error(&e))
        }
    }
}

/// Load parameters from a JSON or TOML file.
pub fn load_parameters(path: &Path) -> Result<CostParameters, RoiError> {
    let contents = read_config_file(path)
        .map_err(|e| RoiError::io("Failed to read parameter file", Some(path), e))?;

    let params = parse_parameters(&contents, ParameterFormat::from_path(path)).map_err(|e| match e {
        RoiError::Configuration { message, .. } => RoiError::configuration_at(message, path),
        other => other,
    })?;

    log::debug!("Loaded parameters from {}", path.display());

    let missing = params.missing_keys();
    if !missing.is_empty() {
        log::debug!("Parameter keys not set in {}: {}", path.display(), missing.join(", "));
    }

    Ok(params)
}

/// Load parameters and apply `FORECAST_ROI_<KEY>` environment overrides.
pub fn load_parameters_with_env(path: &Path) -> Result<CostParameters, RoiError> {
    load_parameters(path)?.with_env_overrides(|name| std::env::var(name).ok())
}
