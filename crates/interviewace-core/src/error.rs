// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by the InterviewAce crates.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// The primary error type for proxy and domain operations.
#[derive(Debug, Error)]
pub enum AceError {
    /// Configuration errors (bad upstream URL, unusable client settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// The upstream service could not be reached or returned an unreadable body.
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The upstream call exceeded its deadline.
    #[error("upstream request timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Local input failed field validation before any network call.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// No usable credentials (missing or rejected after refresh).
    #[error("authentication required")]
    Unauthorized,

    /// Malformed local input that is not a per-field validation failure.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for AceError {
    fn from(errors: ValidationErrors) -> Self {
        AceError::Validation(errors)
    }
}
