// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field validation for user-submitted forms.
//!
//! Every check collects all failures instead of stopping at the first one, so
//! a form can show a message next to each offending field at once.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::types::{
    AnswerSubmission, ChangePasswordRequest, InterviewStartRequest, LoginRequest, RegisterRequest,
    ResetPasswordRequest,
};

/// Bounds on the number of questions in one interview.
pub const MIN_QUESTION_COUNT: u32 = 5;
pub const MAX_QUESTION_COUNT: u32 = 30;
pub const DEFAULT_QUESTION_COUNT: u32 = 12;

/// Maximum number of focus-area tags on a start request.
pub const MAX_FOCUS_AREAS: usize = 10;

/// Maximum answer length in characters.
pub const MAX_ANSWER_CHARS: usize = 5000;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// Per-field validation messages, keyed by the field's wire name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for one field (empty if the field passed).
    pub fn field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Implemented by every request type that is checked before it leaves the client.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

impl Validate for InterviewStartRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.question_count < MIN_QUESTION_COUNT {
            errors.add("question_count", format!("Minimum {MIN_QUESTION_COUNT} questions"));
        }
        if self.question_count > MAX_QUESTION_COUNT {
            errors.add("question_count", format!("Maximum {MAX_QUESTION_COUNT} questions"));
        }
        if let Some(areas) = &self.focus_areas
            && areas.len() > MAX_FOCUS_AREAS
        {
            errors.add("focus_areas", format!("Maximum {MAX_FOCUS_AREAS} focus areas"));
        }

        errors.into_result()
    }
}

impl Validate for AnswerSubmission {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let chars = self.answer_text.chars().count();
        if chars == 0 {
            errors.add("answer_text", "Please provide an answer");
        } else if chars > MAX_ANSWER_CHARS {
            errors.add(
                "answer_text",
                format!("Answer must be at most {MAX_ANSWER_CHARS} characters"),
            );
        }

        errors.into_result()
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_email(&mut errors, "email", &self.email);
        if self.password.is_empty() {
            errors.add("password", "Password is required");
        }
        errors.into_result()
    }
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name_len = self.full_name.chars().count();
        if name_len < 2 {
            errors.add("full_name", "Name must be at least 2 characters");
        } else if name_len > 100 {
            errors.add("full_name", "Name must be at most 100 characters");
        }
        check_email(&mut errors, "email", &self.email);
        check_password_strength(&mut errors, "password", &self.password);
        check_confirmation(&mut errors, &self.password, &self.confirm_password);

        errors.into_result()
    }
}

impl Validate for ResetPasswordRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.token.is_empty() {
            errors.add("token", "Reset token is required");
        }
        check_password_strength(&mut errors, "new_password", &self.new_password);
        check_confirmation(&mut errors, &self.new_password, &self.confirm_password);
        errors.into_result()
    }
}

impl Validate for ChangePasswordRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.old_password.is_empty() {
            errors.add("old_password", "Current password is required");
        }
        check_password_strength(&mut errors, "new_password", &self.new_password);
        check_confirmation(&mut errors, &self.new_password, &self.confirm_password);
        errors.into_result()
    }
}

fn check_email(errors: &mut ValidationErrors, field: &str, email: &str) {
    if email.is_empty() {
        errors.add(field, "Email is required");
    } else if !EMAIL_PATTERN.is_match(email) {
        errors.add(field, "Invalid email address");
    }
}

fn check_password_strength(errors: &mut ValidationErrors, field: &str, password: &str) {
    let len = password.chars().count();
    if len < 8 {
        errors.add(field, "Password must be at least 8 characters");
    }
    if len > 128 {
        errors.add(field, "Password must be at most 128 characters");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.add(field, "Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.add(field, "Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.add(field, "Password must contain at least one number");
    }
}

fn check_confirmation(errors: &mut ValidationErrors, password: &str, confirmation: &str) {
    if confirmation.is_empty() {
        errors.add("confirm_password", "Please confirm your password");
    } else if password != confirmation {
        errors.add("confirm_password", "Passwords do not match");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;

    fn start_request(question_count: u32) -> InterviewStartRequest {
        InterviewStartRequest {
            resume_id: None,
            question_count,
            difficulty: Difficulty::Mixed,
            focus_areas: None,
        }
    }

    #[test]
    fn default_start_request_is_valid() {
        assert!(InterviewStartRequest::default().validate().is_ok());
        assert_eq!(InterviewStartRequest::default().question_count, DEFAULT_QUESTION_COUNT);
    }

    #[test]
    fn question_count_bounds_are_inclusive() {
        assert!(start_request(5).validate().is_ok());
        assert!(start_request(30).validate().is_ok());

        let errors = start_request(4).validate().unwrap_err();
        assert_eq!(errors.field("question_count"), ["Minimum 5 questions"]);

        let errors = start_request(31).validate().unwrap_err();
        assert_eq!(errors.field("question_count"), ["Maximum 30 questions"]);
    }

    #[test]
    fn too_many_focus_areas_rejected() {
        let mut req = start_request(12);
        req.focus_areas = Some((0..11).map(|i| format!("area-{i}")).collect());
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field("focus_areas").len(), 1);
    }

    #[test]
    fn empty_answer_rejected() {
        let answer = AnswerSubmission {
            answer_text: String::new(),
            time_taken_seconds: None,
        };
        let errors = answer.validate().unwrap_err();
        assert_eq!(errors.field("answer_text"), ["Please provide an answer"]);
    }

    #[test]
    fn whitespace_answer_counts_as_characters() {
        let answer = AnswerSubmission {
            answer_text: "   ".into(),
            time_taken_seconds: Some(3),
        };
        assert!(answer.validate().is_ok());
    }

    #[test]
    fn answer_length_counts_characters_not_bytes() {
        let at_limit = AnswerSubmission {
            answer_text: "é".repeat(MAX_ANSWER_CHARS),
            time_taken_seconds: Some(3),
        };
        assert!(at_limit.validate().is_ok());

        let over = AnswerSubmission {
            answer_text: "a".repeat(MAX_ANSWER_CHARS + 1),
            time_taken_seconds: None,
        };
        assert!(over.validate().is_err());
    }

    #[test]
    fn login_requires_well_formed_email_and_password() {
        let req = LoginRequest {
            email: "not-an-email".into(),
            password: String::new(),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field("email"), ["Invalid email address"]);
        assert_eq!(errors.field("password"), ["Password is required"]);
    }

    #[test]
    fn register_collects_every_failure() {
        let req = RegisterRequest {
            email: "".into(),
            full_name: "A".into(),
            password: "short".into(),
            confirm_password: "different".into(),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field("email"), ["Email is required"]);
        assert_eq!(errors.field("full_name").len(), 1);
        // too short, no uppercase, no digit
        assert_eq!(errors.field("password").len(), 3);
        assert_eq!(errors.field("confirm_password"), ["Passwords do not match"]);
    }

    #[test]
    fn strong_register_request_passes() {
        let req = RegisterRequest {
            email: "ada@example.com".into(),
            full_name: "Ada Lovelace".into(),
            password: "Analytical1".into(),
            confirm_password: "Analytical1".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn full_name_length_counts_raw_characters() {
        let mut req = RegisterRequest {
            email: "ada@example.com".into(),
            full_name: " A".into(),
            password: "Analytical1".into(),
            confirm_password: "Analytical1".into(),
        };
        assert!(req.validate().is_ok());

        req.full_name = "a".repeat(100);
        assert!(req.validate().is_ok());
        req.full_name = "a".repeat(101);
        assert_eq!(
            req.validate().unwrap_err().field("full_name"),
            ["Name must be at most 100 characters"]
        );
    }

    #[test]
    fn display_joins_field_messages() {
        let mut errors = ValidationErrors::new();
        errors.add("a", "first");
        errors.add("b", "second");
        assert_eq!(errors.to_string(), "a: first; b: second");
    }
}
