//! Parameter loading.
//!
//! A parameter document carries four cost coefficients and the three column
//! names used to pick actuals and forecasts out of the input table:
//!
//! ```json
//! {
//!   "COST_OF_ONE_SURPLUS": 1.0,
//!   "COST_OF_ONE_DEFICIT": 2.0,
//!   "COST_OF_ONE_MODEL_INFERENCE": 1.0,
//!   "COST_OF_ONE_HUMAN_INFERENCE": 1.0,
//!   "ACTUALS_FIELD": "actual",
//!   "MODEL_PRED_FIELD": "model_prediction",
//!   "HUMAN_PRED_FIELD": "human_prediction"
//! }
//! ```
//!
//! Loading never fails because a key is absent. [`CostParameters::resolve`]
//! checks completeness when the bundle is about to be used.

mod core;
mod loader;

pub use self::core::{
    CostCoefficients, CostParameters, FieldNames, ResolvedParameters, ACTUALS_FIELD,
    COST_OF_ONE_DEFICIT, COST_OF_ONE_HUMAN_INFERENCE, COST_OF_ONE_MODEL_INFERENCE,
    COST_OF_ONE_SURPLUS, ENV_PREFIX, HUMAN_PRED_FIELD, MODEL_PRED_FIELD,
};

pub use loader::{
    load_parameters, load_parameters_with_env, parse_parameters, ParameterFormat,
    DEFAULT_PARAMETERS_FILE,
};
