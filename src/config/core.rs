use serde::Deserialize;

use crate::errors::RoiError;

pub const COST_OF_ONE_SURPLUS: &str = "COST_OF_ONE_SURPLUS";
pub const COST_OF_ONE_DEFICIT: &str = "COST_OF_ONE_DEFICIT";
pub const COST_OF_ONE_MODEL_INFERENCE: &str = "COST_OF_ONE_MODEL_INFERENCE";
pub const COST_OF_ONE_HUMAN_INFERENCE: &str = "COST_OF_ONE_HUMAN_INFERENCE";
pub const ACTUALS_FIELD: &str = "ACTUALS_FIELD";
pub const MODEL_PRED_FIELD: &str = "MODEL_PRED_FIELD";
pub const HUMAN_PRED_FIELD: &str = "HUMAN_PRED_FIELD";

/// Prefix for environment variables that override individual keys,
/// e.g. `FORECAST_ROI_COST_OF_ONE_SURPLUS`.
pub const ENV_PREFIX: &str = "FORECAST_ROI_";

/// Parameter bundle as read from the source document.
///
/// Every key is optional: an absent key is not a load failure. Call
/// [`CostParameters::resolve`] before aggregating to get a bundle with every
/// value present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CostParameters {
    #[serde(rename = "COST_OF_ONE_SURPLUS", default)]
    pub cost_of_one_surplus: Option<f64>,

    #[serde(rename = "COST_OF_ONE_DEFICIT", default)]
    pub cost_of_one_deficit: Option<f64>,

    #[serde(rename = "COST_OF_ONE_MODEL_INFERENCE", default)]
    pub cost_of_one_model_inference: Option<f64>,

    #[serde(rename = "COST_OF_ONE_HUMAN_INFERENCE", default)]
    pub cost_of_one_human_inference: Option<f64>,

    #[serde(rename = "ACTUALS_FIELD", default)]
    pub actuals_field: Option<String>,

    #[serde(rename = "MODEL_PRED_FIELD", default)]
    pub model_pred_field: Option<String>,

    #[serde(rename = "HUMAN_PRED_FIELD", default)]
    pub human_pred_field: Option<String>,
}

/// The four cost coefficients, all present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostCoefficients {
    pub surplus: f64,
    pub deficit: f64,
    pub model_inference: f64,
    pub human_inference: f64,
}

/// Names of the input columns holding actuals and the two forecasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub actuals: String,
    pub model_pred: String,
    pub human_pred: String,
}

/// Fully populated parameters, shared read-only by aggregation calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameters {
    pub costs: CostCoefficients,
    pub fields: FieldNames,
}

fn require<T>(value: Option<T>, key: &'static str) -> Result<T, RoiError> {
    value.ok_or_else(|| RoiError::missing_parameter(key))
}

impl CostParameters {
    /// Keys that are absent, in document order.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        [
            (COST_OF_ONE_SURPLUS, self.cost_of_one_surplus.is_none()),
            (COST_OF_ONE_DEFICIT, self.cost_of_one_deficit.is_none()),
            (COST_OF_ONE_MODEL_INFERENCE, self.cost_of_one_model_inference.is_none()),
            (COST_OF_ONE_HUMAN_INFERENCE, self.cost_of_one_human_inference.is_none()),
            (ACTUALS_FIELD, self.actuals_field.is_none()),
            (MODEL_PRED_FIELD, self.model_pred_field.is_none()),
            (HUMAN_PRED_FIELD, self.human_pred_field.is_none()),
        ]
        .into_iter()
        .filter_map(|(key, missing)| missing.then_some(key))
        .collect()
    }

    /// Produce a bundle with every value present.
    ///
    /// Fails with [`RoiError::MissingParameter`] for the first absent key and
    /// with [`RoiError::Configuration`] for non-finite coefficients or empty
    /// field names.
    pub fn resolve(&self) -> Result<ResolvedParameters, RoiError> {
        let resolved = ResolvedParameters {
            costs: CostCoefficients {
                surplus: require(self.cost_of_one_surplus, COST_OF_ONE_SURPLUS)?,
                deficit: require(self.cost_of_one_deficit, COST_OF_ONE_DEFICIT)?,
                model_inference: require(
                    self.cost_of_one_model_inference,
                    COST_OF_ONE_MODEL_INFERENCE,
                )?,
                human_inference: require(
                    self.cost_of_one_human_inference,
                    COST_OF_ONE_HUMAN_INFERENCE,
                )?,
            },
            fields: FieldNames {
                actuals: require(self.actuals_field.clone(), ACTUALS_FIELD)?,
                model_pred: require(self.model_pred_field.clone(), MODEL_PRED_FIELD)?,
                human_pred: require(self.human_pred_field.clone(), HUMAN_PRED_FIELD)?,
            },
        };
        resolved.validate()?;
        Ok(resolved)
    }

    /// Apply `FORECAST_ROI_<KEY>` overrides found through `lookup`.
    ///
    /// `lookup` receives the full variable name. Taking a closure keeps this
    /// testable without touching the process environment.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, RoiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(&format!("{ENV_PREFIX}{key}"));

        let numeric = |key: &'static str| -> Result<Option<f64>, RoiError> {
            var(key)
                .map(|raw| {
                    raw.trim().parse::<f64>().map_err(|_| {
                        RoiError::configuration(format!(
                            "{ENV_PREFIX}{key} must be a number, got '{raw}'"
                        ))
                    })
                })
                .transpose()
        };

        if let Some(v) = numeric(COST_OF_ONE_SURPLUS)? {
            self.cost_of_one_surplus = Some(v);
        }
        if let Some(v) = numeric(COST_OF_ONE_DEFICIT)? {
            self.cost_of_one_deficit = Some(v);
        }
        if let Some(v) = numeric(COST_OF_ONE_MODEL_INFERENCE)? {
            self.cost_of_one_model_inference = Some(v);
        }
        if let Some(v) = numeric(COST_OF_ONE_HUMAN_INFERENCE)? {
            self.cost_of_one_human_inference = Some(v);
        }
        if let Some(v) = var(ACTUALS_FIELD) {
            self.actuals_field = Some(v);
        }
        if let Some(v) = var(MODEL_PRED_FIELD) {
            self.model_pred_field = Some(v);
        }
        if let Some(v) = var(HUMAN_PRED_FIELD) {
            self.human_pred_field = Some(v);
        }

        Ok(self)
    }
}

impl ResolvedParameters {
    fn validate(&self) -> Result<(), RoiError> {
        let coefficients = [
            (COST_OF_ONE_SURPLUS, self.costs.surplus),
            (COST_OF_ONE_DEFICIT, self.costs.deficit),
            (COST_OF_ONE_MODEL_INFERENCE, self.costs.model_inference),
            (COST_OF_ONE_HUMAN_INFERENCE, self.costs.human_inference),
        ];

        for (key, value) in coefficients {
            if !value.is_finite() {
                return Err(RoiError::configuration(format!(
                    "{key} must be finite, got {value}"
                )));
            }
            if value < 0.0 {
                // Negative costs flip the verdict; allowed but suspicious.
                log::warn!("{key} is negative ({value}); cost comparison will be inverted");
            }
        }

        let fields = [
            (ACTUALS_FIELD, &self.fields.actuals),
            (MODEL_PRED_FIELD, &self.fields.model_pred),
            (HUMAN_PRED_FIELD, &self.fields.human_pred),
        ];

        for (key, name) in fields {
            if name.trim().is_empty() {
                return Err(RoiError::configuration(format!("{key} must not be empty")));
            }
        }

        Ok(())
    }
}
