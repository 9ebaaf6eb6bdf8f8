//! Typed errors for the validation and journal layers
//!
//! Plan generation itself never fails; these cover input parsing, template
//! loading and build bookkeeping.

use thiserror::Error;

use crate::models::BuildStatus;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("invalid measurement {input:?}: expected feet such as 5, 5.5, 1/2 or 5 1/2")]
    InvalidFeet { input: String },

    #[error("invalid dimensions {input:?}: expected WIDTHxLENGTH or WIDTHxLENGTHxHEIGHT")]
    InvalidDimensions { input: String },

    #[error("{field} must be at least {min} feet (got {value})")]
    TooSmall {
        field: &'static str,
        value: f64,
        min: f64,
    },

    #[error("unknown {kind} {value:?}; expected one of: {expected}")]
    UnknownOption {
        kind: &'static str,
        value: String,
        expected: String,
    },

    #[error("unknown build status {0:?}")]
    UnknownStatus(String),

    #[error("cannot move a build from {from} to {to}")]
    InvalidTransition { from: BuildStatus, to: BuildStatus },

    #[error("rating must be between 1 and 5 (got {0})")]
    RatingOutOfRange(u8),

    #[error("invalid quick build template {origin}: {source}")]
    Template {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("quick build {id:?} is invalid: {reason}")]
    InvalidTemplate { id: String, reason: String },

    #[error(transparent)]
    Pattern(#[from] regex::Error),
}
