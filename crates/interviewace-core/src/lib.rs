// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for InterviewAce.
//!
//! Provides the typed contracts exchanged with the upstream interview service,
//! the shared error type, and the field validation run before requests leave
//! the client.

pub mod error;
pub mod types;
pub mod validation;

// Re-export key items at crate root for ergonomic imports.
pub use error::AceError;
pub use types::{
    AnswerSubmission, InterviewSession, InterviewStartRequest, InterviewSummary, Question,
    QuestionFeedback, TokenPair, User, UserRole,
};
pub use validation::{Validate, ValidationErrors};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ace_error_has_all_variants() {
        let _config = AceError::Config("test".into());
        let _upstream = AceError::Upstream {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _timeout = AceError::Timeout {
            duration: std::time::Duration::from_secs(120),
        };
        let _validation = AceError::Validation(ValidationErrors::new());
        let _unauthorized = AceError::Unauthorized;
        let _invalid = AceError::InvalidInput("test".into());
        let _internal = AceError::Internal("test".into());
    }

    #[test]
    fn validation_errors_convert_into_ace_error() {
        let mut errors = ValidationErrors::new();
        errors.add("answer_text", "Please provide an answer");
        let err: AceError = errors.into();
        assert_eq!(
            err.to_string(),
            "validation failed: answer_text: Please provide an answer"
        );
    }

    #[test]
    fn timeout_error_reports_duration() {
        let err = AceError::Timeout {
            duration: std::time::Duration::from_secs(120),
        };
        assert!(err.to_string().contains("120s"));
    }
}
