// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod roi;

// Re-export commonly used types
pub use crate::config::{
    load_parameters, load_parameters_with_env, parse_parameters, CostCoefficients,
    CostParameters, FieldNames, ParameterFormat, ResolvedParameters,
};

pub use crate::errors::{ErrorCode, RoiError};

pub use crate::io::{read_rows, read_rows_from_path, write_report, InputFormat, OutputFormat};

pub use crate::roi::{
    compute, compute_parallel, BusinessValueTest, CostTotals, InputRow, MetricsReport, RoiValues,
    RowCosts,
};
