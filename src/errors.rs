//! Error types for parameter loading, input reading and report output.
//!
//! Every fallible library operation returns [`RoiError`]. Variants map onto
//! the three failure classes of a run:
//!
//! - **Configuration**: the parameter source is unreadable, malformed, or a
//!   resolved coefficient is unusable
//! - **Missing parameter**: a recognised key was absent when the bundle was
//!   resolved for use
//! - **Invalid input**: a row lacks a configured field or holds a value that
//!   is not a finite number
//!
//! Rows and coefficients are validated at the edges. Aggregated totals are
//! checked once more before a report is emitted, since finite inputs can
//! still overflow `f64`.
//!
//! # Error Codes
//!
//! - E001-E009: I/O and filesystem errors
//! - E020-E029: Configuration errors
//! - E050-E059: Input validation errors
//! - E060-E069: Output errors
//!
//! # Example
//!
//! ```rust
//! use forecast_roi::errors::{ErrorCode, RoiError};
//!
//! let err = RoiError::missing_parameter("COST_OF_ONE_SURPLUS");
//! assert_eq!(err.code(), ErrorCode::CONFIG_MISSING);
//! assert!(err.is_user_fixable());
//! ```

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error - file not found
    pub const IO_FILE_NOT_FOUND: ErrorCode = ErrorCode("E001");
    /// I/O error - permission denied
    pub const IO_PERMISSION_DENIED: ErrorCode = ErrorCode("E002");
    /// I/O error - generic
    pub const IO_GENERIC: ErrorCode = ErrorCode("E009");

    /// Config error - invalid or unparsable value
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");
    /// Config error - missing required key
    pub const CONFIG_MISSING: ErrorCode = ErrorCode("E021");

    /// Input error - bad value in a row
    pub const INPUT_INVALID_VALUE: ErrorCode = ErrorCode("E050");
    /// Input error - malformed table or missing column
    pub const INPUT_MALFORMED: ErrorCode = ErrorCode("E051");

    /// Output error - report could not be serialized
    pub const OUTPUT_SERIALIZATION: ErrorCode = ErrorCode("E060");

    /// Get the error code string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for every fallible operation in the crate.
#[derive(Debug, Error)]
pub enum RoiError {
    /// Parameter source is malformed or a resolved value is unusable.
    #[error("Configuration error{}: {message}", describe_path(.path))]
    Configuration {
        message: String,
        path: Option<PathBuf>,
    },

    /// A recognised parameter key was absent at resolution time.
    #[error("Missing parameter: {key} is not set")]
    MissingParameter { key: &'static str },

    /// A row or table could not be turned into numeric triples.
    #[error("Invalid input{}: {message}", describe_location(.row, .field))]
    InvalidInput {
        /// 1-based data row, `None` for table-level problems.
        row: Option<usize>,
        field: Option<String>,
        message: String,
    },

    /// File system errors while reading parameters or input, or writing output.
    #[error("File system error{}: {message}", describe_path(.path))]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// Report serialization failed.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

fn describe_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

fn describe_location(row: &Option<usize>, field: &Option<String>) -> String {
    match (row, field) {
        (Some(row), Some(field)) => format!(" at row {row}, field '{field}'"),
        (Some(row), None) => format!(" at row {row}"),
        (None, Some(field)) => format!(" for field '{field}'"),
        (None, None) => String::new(),
    }
}

impl RoiError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            path: None,
        }
    }

    pub fn configuration_at(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Configuration {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn missing_parameter(key: &'static str) -> Self {
        Self::MissingParameter { key }
    }

    /// Bad value in a specific row and field.
    pub fn invalid_value(row: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            row: Some(row),
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// A row that could not be read at all.
    pub fn invalid_row(row: usize, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            row: Some(row),
            field: None,
            message: message.into(),
        }
    }

    /// A configured column absent from the table.
    pub fn missing_column(field: impl Into<String>) -> Self {
        Self::InvalidInput {
            row: None,
            field: Some(field.into()),
            message: "column not found in input header".to_string(),
        }
    }

    /// Table-level problem with no row or field attached.
    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            row: None,
            field: None,
            message: message.into(),
        }
    }

    /// An aggregated total that overflowed to infinity or NaN.
    pub fn non_finite_total(series: &'static str, value: f64) -> Self {
        Self::InvalidInput {
            row: None,
            field: Some(series.to_string()),
            message: format!("aggregated total is {value}; costs overflow the f64 range"),
        }
    }

    pub fn io(message: impl Into<String>, path: Option<&Path>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: path.map(Path::to_path_buf),
            source,
        }
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Configuration { .. } => ErrorCode::CONFIG_INVALID,
            Self::MissingParameter { .. } => ErrorCode::CONFIG_MISSING,
            Self::InvalidInput { row: Some(_), .. } => ErrorCode::INPUT_INVALID_VALUE,
            Self::InvalidInput { row: None, .. } => ErrorCode::INPUT_MALFORMED,
            Self::Io { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => ErrorCode::IO_FILE_NOT_FOUND,
                io::ErrorKind::PermissionDenied => ErrorCode::IO_PERMISSION_DENIED,
                _ => ErrorCode::IO_GENERIC,
            },
            Self::Serialization(_) => ErrorCode::OUTPUT_SERIALIZATION,
        }
    }

    /// Whether the user can fix this by editing parameters or input data.
    #[must_use]
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::MissingParameter { .. } | Self::InvalidInput { .. }
        )
    }
}
