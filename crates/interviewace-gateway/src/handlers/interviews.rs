// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/api/interviews/*` handlers.
//!
//! `next-question` and `answer` relay a `204` as an empty `204`: that is how
//! the browser learns the interview has no questions left.

use axum::{
    extract::{Path, RawQuery, State},
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use bytes::Bytes;
use serde_json::Value;

use crate::backend::FetchOptions;
use crate::handlers::{bad_request, forward, json_body, query_string, segment};
use crate::server::GatewayState;

/// POST /api/interviews/start
pub async fn start(
    State(state): State<GatewayState>,
    jar: CookieJar,
    body: Bytes,
) -> Response {
    let body = match json_body(&body) {
        Ok(Value::Null) => Value::Object(Default::default()),
        Ok(body) => body,
        Err(response) => return response,
    };
    forward(&state, jar, "/interview/start", FetchOptions::post().json(body)).await
}

/// GET /api/interviews/history
pub async fn history(
    State(state): State<GatewayState>,
    RawQuery(query): RawQuery,
    jar: CookieJar,
) -> Response {
    let path = format!("/interview/history{}", query_string(query.as_deref()));
    forward(&state, jar, &path, FetchOptions::get()).await
}

/// GET /api/interviews/{id}
pub async fn get_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Response {
    let path = format!("/interview/{}", segment(&id));
    forward(&state, jar, &path, FetchOptions::get()).await
}

/// GET /api/interviews/{id}/next-question
pub async fn next_question(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Response {
    let path = format!("/interview/{}/next", segment(&id));
    forward(&state, jar, &path, FetchOptions::get()).await
}

/// Split `{question_id, ...answer}` into the id and the remaining fields.
pub fn split_answer(body: Value) -> Option<(String, Value)> {
    let Value::Object(mut fields) = body else {
        return None;
    };
    let question_id = match fields.remove("question_id")? {
        Value::String(id) if !id.is_empty() => id,
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Some((question_id, Value::Object(fields)))
}

/// POST /api/interviews/{id}/answer
pub async fn answer(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    jar: CookieJar,
    body: Bytes,
) -> Response {
    let body = match json_body(&body) {
        Ok(body) => body,
        Err(response) => return response,
    };
    let Some((question_id, answer)) = split_answer(body) else {
        return bad_request("question_id is required");
    };
    let path = format!(
        "/interview/{}/{}/answer",
        segment(&id),
        segment(&question_id)
    );
    forward(&state, jar, &path, FetchOptions::post().json(answer)).await
}

/// POST /api/interviews/{id}/complete
pub async fn complete(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Response {
    let path = format!("/interview/{}/complete", segment(&id));
    forward(&state, jar, &path, FetchOptions::post()).await
}

/// GET /api/interviews/{id}/summary
pub async fn summary(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Response {
    let path = format!("/interview/{}/summary", segment(&id));
    forward(&state, jar, &path, FetchOptions::get()).await
}
