// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/api/resumes/*` handlers.

use axum::{
    body::Body,
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use bytes::Bytes;
use futures::TryStreamExt;
use serde_json::Value;
use tracing::debug;

use crate::backend::FetchOptions;
use crate::error::ApiError;
use crate::handlers::{bad_request, forward, json_body, query_string, segment};
use crate::server::GatewayState;
use crate::session::AuthSession;

/// Largest multipart upload accepted from the browser.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// GET /api/resumes
pub async fn list(
    State(state): State<GatewayState>,
    RawQuery(query): RawQuery,
    jar: CookieJar,
) -> Response {
    let path = format!("/resume/{}", query_string(query.as_deref()));
    forward(&state, jar, &path, FetchOptions::get()).await
}

/// POST /api/resumes
///
/// The multipart body is forwarded byte-for-byte with its original
/// `Content-Type`, boundary included.
pub async fn upload(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    jar: CookieJar,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|ct| ct.starts_with("multipart/form-data"));
    let Some(content_type) = content_type else {
        return bad_request("Expected a multipart/form-data upload");
    };

    debug!(bytes = body.len(), "forwarding resume upload");
    let options = FetchOptions::post().raw(content_type, body);
    forward(&state, jar, "/resume/upload/", options).await
}

/// GET /api/resumes/{id}
pub async fn get_resume(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Response {
    let path = format!("/resume/{}", segment(&id));
    forward(&state, jar, &path, FetchOptions::get()).await
}

/// PUT /api/resumes/{id}
pub async fn update_resume(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    jar: CookieJar,
    Json(body): Json<Value>,
) -> Response {
    let path = format!("/resume/{}", segment(&id));
    forward(
        &state,
        jar,
        &path,
        FetchOptions::new(reqwest::Method::PUT).json(body),
    )
    .await
}

/// DELETE /api/resumes/{id}
pub async fn delete_resume(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Response {
    let path = format!("/resume/{}", segment(&id));
    forward(
        &state,
        jar,
        &path,
        FetchOptions::new(reqwest::Method::DELETE),
    )
    .await
}

/// GET /api/resumes/{id}/analysis
pub async fn analysis(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Response {
    let path = format!("/resume/analysis/{}", segment(&id));
    forward(&state, jar, &path, FetchOptions::get()).await
}

/// POST /api/resumes/{id}/analysis
pub async fn reanalyze(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Response {
    let path = format!("/resume/analysis/{}/reanalyze", segment(&id));
    forward(&state, jar, &path, FetchOptions::post()).await
}

/// GET /api/resumes/{id}/versions
pub async fn versions(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Response {
    let path = format!("/resume/version/{}/versions", segment(&id));
    forward(&state, jar, &path, FetchOptions::get()).await
}

/// POST /api/resumes/{id}/share
pub async fn share(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    jar: CookieJar,
    body: Bytes,
) -> Response {
    let body = match json_body(&body) {
        Ok(body) => body,
        Err(response) => return response,
    };
    let path = format!("/resume/sharing/{}/share", segment(&id));
    let mut options = FetchOptions::post();
    if !body.is_null() {
        options = options.json(body);
    }
    forward(&state, jar, &path, options).await
}

/// DELETE /api/resumes/{id}/share
pub async fn unshare(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Response {
    let path = format!("/resume/sharing/{}/unshare", segment(&id));
    forward(&state, jar, &path, FetchOptions::post()).await
}

/// GET /api/resumes/{id}/export
///
/// Streams the file straight through; the body is never buffered here.
pub async fn export(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
    jar: CookieJar,
) -> Response {
    let path = format!(
        "/resume/export/{}/download{}",
        segment(&id),
        query_string(query.as_deref())
    );

    let mut session = AuthSession::from_jar(&jar);
    let result = state
        .backend
        .fetch_stream(&mut session, &path, FetchOptions::get())
        .await;
    let jar = session.apply(jar, &state.cookies);

    let upstream = match result {
        Ok(upstream) => upstream,
        Err(e) => return (jar, ApiError(e)).into_response(),
    };

    let status = upstream.status();
    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| header::HeaderValue::from_static("application/octet-stream"));
    let disposition = upstream.headers().get(header::CONTENT_DISPOSITION).cloned();

    let stream = upstream.bytes_stream().map_err(std::io::Error::other);
    let mut response = (status, Body::from_stream(stream)).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, content_type);
    if let Some(disposition) = disposition {
        response
            .headers_mut()
            .insert(header::CONTENT_DISPOSITION, disposition);
    }
    (jar, response).into_response()
}
