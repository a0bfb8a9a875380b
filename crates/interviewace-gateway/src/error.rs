// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from [`AceError`] to browser-facing HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use interviewace_core::types::ApiErrorBody;
use interviewace_core::AceError;

/// An [`AceError`] on its way out of a handler.
///
/// The body always uses the upstream's `{"detail": "..."}` shape so the
/// browser parses gateway and upstream failures the same way.
#[derive(Debug)]
pub struct ApiError(pub AceError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AceError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AceError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            AceError::Unauthorized => StatusCode::UNAUTHORIZED,
            AceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AceError::Config(_) | AceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match &self.0 {
            AceError::Upstream { .. } => "Upstream service unavailable".to_string(),
            AceError::Timeout { .. } => "Upstream service timed out".to_string(),
            AceError::Unauthorized => "Not authenticated".to_string(),
            AceError::InvalidInput(message) => message.clone(),
            AceError::Validation(errors) => errors.to_string(),
            AceError::Config(_) | AceError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl From<AceError> for ApiError {
    fn from(err: AceError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self.0, "request failed");
        } else {
            tracing::debug!(status = %status, error = %self.0, "request rejected");
        }
        (status, Json(ApiErrorBody::detail(self.detail()))).into_response()
    }
}

/// `{"detail": message}` with the given status.
pub fn detail_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ApiErrorBody::detail(message))).into_response()
}
