use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Errors that fail a single trend, comparison or insight call.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid granularity: {0} (expected day, month, quarter, year or season)")]
    InvalidGranularity(String),

    #[error("Invalid range for {field}: {reason}")]
    InvalidRange { field: &'static str, reason: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Upstream unavailable: {0}")]
    Upstream(#[from] SourceError),
}

impl QueryError {
    pub fn invalid_range(field: &'static str, reason: impl Into<String>) -> Self {
        QueryError::InvalidRange {
            field,
            reason: reason.into(),
        }
    }

    pub fn log_error(&self) {
        match self {
            QueryError::InvalidGranularity(g) => {
                warn!("Rejected query with unsupported granularity: {}", g);
            }
            QueryError::InvalidRange { field, reason } => {
                warn!("Rejected query with invalid {} range: {}", field, reason);
            }
            QueryError::InvalidRequest(msg) => {
                warn!("Rejected invalid request: {}", msg);
            }
            QueryError::Upstream(e) => {
                error!("Data source failed: {}", e);
                debug!("Data source error details: {:?}", e);
            }
        }
    }
}

/// Failures reported by a record source. The core never retries these.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a raw row could not become a normalized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    MissingRequiredField,
    UnparseableDate,
    UnparseableRequiredNumber,
    NoMeasurements,
}

impl RejectReason {
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::MissingRequiredField => "missing_required_field",
            RejectReason::UnparseableDate => "unparseable_date",
            RejectReason::UnparseableRequiredNumber => "unparseable_required_number",
            RejectReason::NoMeasurements => "no_measurements",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Row-level rejection. Counted by the batch, never propagated past normalization.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("row rejected ({reason})")]
pub struct Rejected {
    pub reason: RejectReason,
    /// Canonical name of the offending field, when one applies.
    pub field: Option<String>,
}

impl Rejected {
    pub fn new(reason: RejectReason, field: impl Into<String>) -> Self {
        Self {
            reason,
            field: Some(field.into()),
        }
    }

    pub fn without_field(reason: RejectReason) -> Self {
        Self {
            reason,
            field: None,
        }
    }
}

/// Errors raised at the prediction boundary.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Invalid prediction input: {0}")]
    InvalidInput(String),

    #[error("No value and no configured default for feature `{0}`")]
    MissingFeature(String),

    #[error("Failed to start predictor process: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Predictor timed out after {0:?}")]
    Timeout(Duration),

    #[error("Predictor exited with status {code:?}: {stderr}")]
    ProcessFailed { code: Option<i32>, stderr: String },

    #[error("Predictor produced no output")]
    EmptyOutput,

    #[error("Invalid predictor output: {0}")]
    InvalidOutput(String),

    #[error("Model error: {0}")]
    Model(String),
}

impl PredictionError {
    pub fn log_error(&self) {
        match self {
            PredictionError::InvalidInput(_) | PredictionError::MissingFeature(_) => {
                warn!("Prediction request rejected: {}", self);
            }
            PredictionError::ProcessFailed { code, stderr } => {
                error!("Predictor process failed with status {:?}", code);
                debug!("Predictor stderr: {}", stderr);
            }
            other => {
                error!("Prediction failed: {}", other);
                debug!("Prediction error details: {:?}", other);
            }
        }
    }
}
