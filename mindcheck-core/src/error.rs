//! Error types for mindcheck-core.

use thiserror::Error;

/// Rejections from the survey collector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurveyError {
    /// The key is not one of the catalog's question keys.
    #[error("unknown survey question '{0}'")]
    UnknownQuestion(String),

    /// The value is not one of the question's allowed options.
    #[error("'{value}' is not a valid answer for '{key}'")]
    InvalidOption { key: String, value: String },

    /// Submission was attempted before every question had an answer.
    /// `missing` lists the unanswered keys in catalog order.
    #[error("{} question(s) still unanswered", .missing.len())]
    Incomplete { missing: Vec<&'static str> },
}

/// A risk class outside the known `0..=2` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown risk class {0}")]
pub struct UnknownRiskClass(pub i64);

/// Failure of a single round trip to the prediction or chat service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Connection, timeout, or body transfer failure.
    #[error("could not reach the service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    ///
    /// `message` carries the service's own `error` text when the body had one.
    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("unexpected response from the service: {0}")]
    Decode(String),

    /// The prediction service answered with a class the client cannot present.
    #[error(transparent)]
    UnknownRiskClass(#[from] UnknownRiskClass),
}
