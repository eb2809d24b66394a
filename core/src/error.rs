//! Error types for payload parsing and validation.
//!
//! The `Display` output of `ValidationError` is sent verbatim as the body of
//! a 400 response.

use thiserror::Error;

/// A well-formed payload that breaks one of the todo rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid UUID provided.")]
    InvalidId,

    #[error("Empty todo text supplied. This field must be non-empty.")]
    EmptyText,

    #[error("Invalid status provided. Valid values are 'N' or 'D'.")]
    InvalidStatus,

    /// Same rule as `InvalidStatus`, reported for the `status` query parameter.
    #[error("Invalid status parameter provided. Valid values are 'N' or 'D'.")]
    InvalidStatusParameter,

    #[error("UUID in payload does not match the UUID in the path.")]
    IdMismatch,
}

/// The request body could not be read as a todo payload at all.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed todo payload: {0}")]
    Malformed(#[from] serde_json::Error),
}
