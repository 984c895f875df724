use crate::config::DEFAULT_PARAMETERS_FILE;
use crate::io;
use anyhow::{Context, Result};
use std::path::PathBuf;

const JSON_TEMPLATE: &str = r#"{
  "COST_OF_ONE_SURPLUS": 1.0,
  "COST_OF_ONE_DEFICIT": 2.0,
  "COST_OF_ONE_MODEL_INFERENCE": 1.0,
  "COST_OF_ONE_HUMAN_INFERENCE": 1.0,
  "ACTUALS_FIELD": "actual",
  "MODEL_PRED_FIELD": "model_prediction",
  "HUMAN_PRED_FIELD": "human_prediction"
}
"#;

const TOML_TEMPLATE: &str = r#"# Forecast ROI parameters

# Cost of one unit of over-prediction
COST_OF_ONE_SURPLUS = 1.0
# Cost of one unit of under-prediction
COST_OF_ONE_DEFICIT = 2.0
# Cost multiplier per model forecast
COST_OF_ONE_MODEL_INFERENCE = 1.0
# Cost multiplier per human forecast
COST_OF_ONE_HUMAN_INFERENCE = 1.0

# Input columns
ACTUALS_FIELD = "actual"
MODEL_PRED_FIELD = "model_prediction"
HUMAN_PRED_FIELD = "human_prediction"
"#;

fn default_path(toml: bool) -> PathBuf {
    let path = PathBuf::from(DEFAULT_PARAMETERS_FILE);
    if toml {
        path.with_extension("toml")
    } else {
        path
    }
}

/// Write a template parameter file and return where it went.
pub fn init_parameters(path: Option<PathBuf>, toml: bool, force: bool) -> Result<PathBuf> {
    let config_path = path.unwrap_or_else(|| default_path(toml));

    if config_path.exists() && !force {
        anyhow::bail!(
            "Parameter file {} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    let template = if toml { TOML_TEMPLATE } else { JSON_TEMPLATE };
    io::write_text_file(&config_path, template)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    log::info!("Created parameter file {}", config_path.display());

    Ok(config_path)
}
