// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock upstream interview service backed by wiremock.
//!
//! Fixture builders produce the upstream's JSON shapes; the `mount_*`
//! helpers wire up the endpoint sequences the gateway calls.

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Access token issued by [`MockUpstream::mount_login`].
pub const ACCESS_TOKEN: &str = "test-access";
/// Refresh token issued by [`MockUpstream::mount_login`].
pub const REFRESH_TOKEN: &str = "test-refresh";

pub fn user(role: &str) -> Value {
    json!({
        "id": "u-1",
        "email": "candidate@example.com",
        "full_name": "Test Candidate",
        "is_active": true,
        "role": role,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    })
}

pub fn session(id: &str, question_count: u32) -> Value {
    json!({
        "id": id,
        "user_id": "u-1",
        "difficulty": "mixed",
        "question_count": question_count,
        "started_at": "2026-01-01T10:00:00Z"
    })
}

pub fn question(id: &str, order_index: u32) -> Value {
    json!({
        "question_id": id,
        "question_text": format!("Question {order_index}: describe a tradeoff you made."),
        "category": "technical",
        "difficulty": "medium",
        "order_index": order_index
    })
}

pub fn summary(session_id: &str) -> Value {
    json!({
        "session_id": session_id,
        "final_score": 7.5,
        "feedback_summary": "Solid fundamentals, expand on system design.",
        "question_feedback": [],
        "strengths": ["clarity"],
        "weaknesses": ["depth"]
    })
}

/// A wiremock server standing in for the upstream REST API.
pub struct MockUpstream {
    server: MockServer,
}

impl MockUpstream {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// The underlying server, for custom mocks and request inspection.
    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// `POST /auth/login` issues the fixed token pair; `GET /auth/me` with
    /// that token returns a user with `role`.
    pub async fn mount_login(&self, role: &str) {
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": ACCESS_TOKEN,
                "refresh_token": REFRESH_TOKEN,
                "token_type": "bearer"
            })))
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(user(role)))
            .mount(&self.server)
            .await;
    }

    /// A whole interview of `question_count` questions `q-1..=q-n`.
    ///
    /// Start returns the session, `next` returns `q-1`, answering `q-i`
    /// returns `q-(i+1)` and answering the last one returns 204, and
    /// complete returns [`summary`].
    pub async fn mount_interview(&self, session_id: &str, question_count: u32) {
        Mock::given(method("POST"))
            .and(path("/interview/start"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(session(session_id, question_count)),
            )
            .mount(&self.server)
            .await;

        let next = if question_count == 0 {
            ResponseTemplate::new(204)
        } else {
            ResponseTemplate::new(200).set_body_json(question("q-1", 0))
        };
        Mock::given(method("GET"))
            .and(path(format!("/interview/{session_id}/next")))
            .respond_with(next)
            .mount(&self.server)
            .await;

        for i in 1..=question_count {
            let response = if i == question_count {
                ResponseTemplate::new(204)
            } else {
                ResponseTemplate::new(200).set_body_json(question(&format!("q-{}", i + 1), i))
            };
            Mock::given(method("POST"))
                .and(path(format!("/interview/{session_id}/q-{i}/answer")))
                .respond_with(response)
                .mount(&self.server)
                .await;
        }

        Mock::given(method("POST"))
            .and(path(format!("/interview/{session_id}/complete")))
            .respond_with(ResponseTemplate::new(200).set_body_json(summary(session_id)))
            .mount(&self.server)
            .await;
    }

    /// Every call to `method path` answers `status` with `{"detail": detail}`.
    pub async fn mount_error(&self, verb: &str, route: &str, status: u16, detail: &str) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"detail": detail})))
            .mount(&self.server)
            .await;
    }
}
