// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route handlers for the `/api/*` surface and the local health check.
//!
//! Each handler reads an [`AuthSession`] from the request cookies, makes its
//! upstream call(s), and returns the upstream status and body together with
//! whatever cookie changes the calls produced.

pub mod admin;
pub mod auth;
pub mod interviews;
pub mod resumes;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use interviewace_core::AceError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::backend::{BackendResponse, FetchOptions, Payload};
use crate::error::ApiError;
use crate::server::GatewayState;
use crate::session::{AuthSession, CookiePolicy};

/// Response body for GET /health.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// GET /health
///
/// Local liveness only; does not call the upstream service.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}

impl IntoResponse for BackendResponse {
    fn into_response(self) -> Response {
        match self.payload {
            Payload::Empty => self.status.into_response(),
            Payload::Json(value) => (self.status, Json(value)).into_response(),
            Payload::Raw {
                content_type,
                bytes,
            } => {
                let content_type =
                    content_type.unwrap_or_else(|| "application/octet-stream".to_string());
                (self.status, [(header::CONTENT_TYPE, content_type)], bytes).into_response()
            }
        }
    }
}

/// Attach the session's cookie changes to the outcome of an upstream call.
pub(crate) fn respond(
    jar: CookieJar,
    session: AuthSession,
    policy: &CookiePolicy,
    result: Result<BackendResponse, AceError>,
) -> Response {
    let jar = session.apply(jar, policy);
    match result {
        Ok(upstream) => (jar, upstream).into_response(),
        Err(err) => (jar, ApiError(err)).into_response(),
    }
}

/// Forward one call upstream with the request's credentials and relay the result.
pub(crate) async fn forward(
    state: &GatewayState,
    jar: CookieJar,
    path: &str,
    options: FetchOptions,
) -> Response {
    let mut session = AuthSession::from_jar(&jar);
    let result = state.backend.fetch(&mut session, path, options).await;
    respond(jar, session, &state.cookies, result)
}

/// Rebuild a query string from the incoming one, dropping empty values.
///
/// Returns `""` or `"?k=v&..."`.
pub fn query_string(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(raw.as_bytes())
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if pairs.is_empty() {
        return String::new();
    }
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("?{encoded}")
}

/// Percent-encode a caller-supplied id for use as one upstream path segment.
pub fn segment(id: &str) -> String {
    url::form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Parse an optional JSON request body; an empty body is `null`.
pub(crate) fn json_body(bytes: &[u8]) -> Result<serde_json::Value, Response> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|_| bad_request("Request body must be valid JSON"))
}

/// Parse a JSON request body into `T`.
///
/// Malformed JSON is a 400; well-formed JSON of the wrong shape is a 422.
/// Both carry a `{"detail": ...}` body.
pub(crate) fn typed_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Response> {
    serde_json::from_slice(bytes).map_err(|e| {
        if e.is_data() {
            crate::error::detail_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                &format!("Invalid request body: {e}"),
            )
        } else {
            bad_request("Request body must be valid JSON")
        }
    })
}

/// 400 for a body that is not valid for the route.
pub(crate) fn bad_request(message: &str) -> Response {
    crate::error::detail_response(StatusCode::BAD_REQUEST, message)
}
