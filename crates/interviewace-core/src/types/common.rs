// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shapes shared by every upstream endpoint.

use serde::{Deserialize, Serialize};

/// Generic paginated list from the upstream service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
    pub has_more: bool,
}

/// `{"message": "..."}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One entry of a field-validation error list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationItem {
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// The `detail` member of an error body: a message, or a list of field errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Items(Vec<ValidationItem>),
}

/// Error body in the upstream's format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn detail(message: impl Into<String>) -> Self {
        Self {
            detail: Some(ErrorDetail::Message(message.into())),
            message: None,
        }
    }

    /// Human-readable text: the detail string, a generic label for a field
    /// list, else `message`.
    pub fn text(&self) -> Option<String> {
        match &self.detail {
            Some(ErrorDetail::Message(m)) => Some(m.clone()),
            Some(ErrorDetail::Items(_)) => Some("Validation error".to_string()),
            None => self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_surfaced_verbatim() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"detail":"Session not found or not owned by user"}"#).unwrap();
        assert_eq!(body.text().as_deref(), Some("Session not found or not owned by user"));
    }

    #[test]
    fn list_detail_becomes_generic_label() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"detail":[{"msg":"field required","type":"value_error.missing"}]}"#,
        )
        .unwrap();
        assert_eq!(body.text().as_deref(), Some("Validation error"));
    }

    #[test]
    fn message_is_fallback() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"message":"Logged out"}"#).unwrap();
        assert_eq!(body.text().as_deref(), Some("Logged out"));
        let empty: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert!(empty.text().is_none());
    }
}
