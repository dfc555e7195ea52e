//! Error types for evaluation and assumption loading

use thiserror::Error;

/// Failure of an evaluation stage
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    /// An assumption lies outside its physically sensible domain
    #[error("invalid input for '{field}' ({value}): {reason}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The IRR solver found no real root within its bounds
    #[error("IRR is undefined: {reason}")]
    UndefinedIrr { reason: String },

    /// A computation produced no meaningful number (zero term, overflow)
    #[error("degenerate arithmetic in {stage}: {detail}")]
    ArithmeticDegenerate {
        stage: &'static str,
        detail: String,
    },
}

impl EvaluationError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidInput { field, value, reason }
    }

    pub(crate) fn degenerate(stage: &'static str, detail: impl Into<String>) -> Self {
        Self::ArithmeticDegenerate {
            stage,
            detail: detail.into(),
        }
    }
}

/// Failure while loading an assumptions file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown assumption field: {0}")]
    UnknownField(String),

    #[error("invalid value '{value}' for field '{field}'")]
    InvalidValue { field: String, value: String },

    #[error("unsupported assumptions file extension: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, EvaluationError>;
