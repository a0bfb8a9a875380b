// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed client for the gateway's `/api/*` routes.
//!
//! Holds a cookie store, so after [`ApiClient::login`] every call carries
//! the gateway-issued cookies exactly as a browser would. The client never
//! sees a bearer token.

use std::time::Duration;

use interviewace_core::types::{
    AnswerEnvelope, ApiErrorBody, ChangePasswordRequest, LoginRequest, LoginResponse,
    MessageResponse, PaginatedResponse, RegisterRequest, ResetPasswordRequest,
    ResumeAnalysisResponse,
};
use interviewace_core::{
    InterviewSession, InterviewStartRequest, InterviewSummary, Question, User, Validate,
};
use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::ClientError;

/// Same-origin client for a running gateway.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the gateway at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path`; `None` on 204.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ClientError> {
        self.send::<T, ()>(Method::GET, path, None).await
    }

    /// POST `body` as JSON; `None` on 204.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<T>, ClientError> {
        self.send(Method::POST, path, body).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ClientError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ClientError> {
        self.send::<T, ()>(Method::PATCH, path, None).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ClientError> {
        self.send::<T, ()>(Method::DELETE, path, None).await
    }

    async fn send<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<T>, ClientError> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(%method, path, %status, "gateway call");
        handle_response(response).await
    }

    // --- auth ---

    /// Log in. Credentials are checked locally first.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        request.validate()?;
        self.post("/api/auth/login", Some(request))
            .await?
            .ok_or_else(|| empty_body("/api/auth/login"))
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ClientError> {
        request.validate()?;
        self.post("/api/auth/register", Some(request))
            .await?
            .ok_or_else(|| empty_body("/api/auth/register"))
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        self.post::<MessageResponse, ()>("/api/auth/logout", None)
            .await
            .map(|_| ())
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        self.get("/api/auth/me")
            .await?
            .ok_or_else(|| empty_body("/api/auth/me"))
    }

    /// Change the signed-in user's password. `confirm_password` is only
    /// checked locally and never sent.
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<Option<MessageResponse>, ClientError> {
        request.validate()?;
        self.post("/api/auth/change-password", Some(request)).await
    }

    /// Complete a password reset with the emailed token.
    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<Option<MessageResponse>, ClientError> {
        request.validate()?;
        self.post("/api/auth/reset-password", Some(request)).await
    }

    // --- interviews ---

    pub async fn start_interview(
        &self,
        request: &InterviewStartRequest,
    ) -> Result<InterviewSession, ClientError> {
        request.validate()?;
        self.post("/api/interviews/start", Some(request))
            .await?
            .ok_or_else(|| empty_body("/api/interviews/start"))
    }

    pub async fn interview(&self, session_id: &str) -> Result<InterviewSession, ClientError> {
        let path = format!("/api/interviews/{}", segment(session_id));
        self.get(&path).await?.ok_or_else(|| empty_body(&path))
    }

    /// Next unanswered question, or `None` when the interview is exhausted.
    pub async fn next_question(&self, session_id: &str) -> Result<Option<Question>, ClientError> {
        let path = format!("/api/interviews/{}/next-question", segment(session_id));
        self.get(&path).await
    }

    /// Submit an answer; the gateway responds with the following question,
    /// or nothing once the last one has been answered.
    pub async fn submit_answer(
        &self,
        session_id: &str,
        envelope: &AnswerEnvelope,
    ) -> Result<Option<Question>, ClientError> {
        envelope.answer.validate()?;
        let path = format!("/api/interviews/{}/answer", segment(session_id));
        self.post(&path, Some(envelope)).await
    }

    pub async fn complete_interview(
        &self,
        session_id: &str,
    ) -> Result<InterviewSummary, ClientError> {
        let path = format!("/api/interviews/{}/complete", segment(session_id));
        self.post::<InterviewSummary, ()>(&path, None)
            .await?
            .ok_or_else(|| empty_body(&path))
    }

    pub async fn interview_summary(
        &self,
        session_id: &str,
    ) -> Result<InterviewSummary, ClientError> {
        let path = format!("/api/interviews/{}/summary", segment(session_id));
        self.get(&path).await?.ok_or_else(|| empty_body(&path))
    }

    pub async fn interview_history(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<PaginatedResponse<InterviewSession>, ClientError> {
        let path = format!("/api/interviews/history?skip={skip}&limit={limit}");
        self.get(&path).await?.ok_or_else(|| empty_body(&path))
    }

    // --- resumes ---

    pub async fn resume_analysis(
        &self,
        resume_id: &str,
    ) -> Result<ResumeAnalysisResponse, ClientError> {
        let path = format!("/api/resumes/{}/analysis", segment(resume_id));
        self.get(&path).await?.ok_or_else(|| empty_body(&path))
    }
}

/// Map a gateway response onto the client's result shape.
///
/// 204 is `Ok(None)`, 401 is [`ClientError::AuthenticationRequired`], and
/// any other non-2xx carries the error body's text (or the status reason).
async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Option<T>, ClientError> {
    let status = response.status();

    if !status.is_success() {
        let bytes = response.bytes().await.unwrap_or_default();
        let detail = serde_json::from_slice::<ApiErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.text())
            .unwrap_or_else(|| reason(status));
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::AuthenticationRequired(detail));
        }
        return Err(ClientError::Api { status, detail });
    }

    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| ClientError::Decode(e.to_string()))
}

fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

fn empty_body(path: &str) -> ClientError {
    ClientError::Decode(format!("{path} returned no content"))
}

fn segment(id: &str) -> String {
    url::form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
