// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors surfaced to whoever drives the client.

use interviewace_core::ValidationErrors;
use interviewace_flow::FlowError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The gateway answered with a non-2xx status other than 401.
    #[error("{detail}")]
    Api { status: StatusCode, detail: String },

    /// The session is gone (401 after the gateway's own refresh attempt).
    /// Callers send the user back to login.
    #[error("{0}")]
    AuthenticationRequired(String),

    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// The operation does not fit the current interview phase.
    #[error(transparent)]
    Flow(#[from] FlowError),

    /// Connection failure or timeout.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx body that does not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::AuthenticationRequired(_) => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }

    pub fn is_auth_required(&self) -> bool {
        matches!(self, ClientError::AuthenticationRequired(_))
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        ClientError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interviewace_flow::Phase;

    #[test]
    fn api_error_displays_detail_verbatim() {
        let err = ClientError::Api {
            status: StatusCode::NOT_FOUND,
            detail: "Session not found".into(),
        };
        assert_eq!(err.to_string(), "Session not found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn auth_required_reports_401() {
        let err = ClientError::AuthenticationRequired("Not authenticated".into());
        assert!(err.is_auth_required());
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn flow_error_converts() {
        let err: ClientError = FlowError::WrongPhase {
            expected: Phase::Answering,
            actual: Phase::Loading,
        }
        .into();
        assert_eq!(err.to_string(), "interview is loading, expected answering");
        assert!(err.status().is_none());
    }
}
