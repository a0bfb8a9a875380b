// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/api/auth/*` handlers.
//!
//! Login, logout, and refresh are the only places that write the token
//! cookies outside the refresh-on-401 path in [`crate::backend`].

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use bytes::Bytes;
use interviewace_core::types::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use interviewace_core::{AceError, TokenPair, User, Validate};
use tracing::{info, warn};

use crate::backend::FetchOptions;
use crate::error::{detail_response, ApiError};
use crate::handlers::{forward, json_body, respond, typed_body};
use crate::server::GatewayState;
use crate::session::AuthSession;

/// Upstream path for an auth action and whether it needs the bearer token.
pub fn action_route(action: &str) -> Option<(&'static str, bool)> {
    match action {
        "verify-email" => Some(("/auth/verify-email", false)),
        "resend-verification" => Some(("/auth/resend-verification", false)),
        "forgot-password" => Some(("/auth/reset-password-request", false)),
        "reset-password" => Some(("/auth/reset-password-confirm", false)),
        "change-password" => Some(("/auth/change-password", true)),
        _ => None,
    }
}

/// POST /api/auth/login
///
/// Exchanges credentials for tokens (form-encoded upstream), stores them as
/// cookies, then loads the profile so the role cookie and the sanitized user
/// go back in the same response.
pub async fn login(
    State(state): State<GatewayState>,
    jar: CookieJar,
    body: Bytes,
) -> Response {
    let body: LoginRequest = match typed_body(&body) {
        Ok(body) => body,
        Err(response) => return response,
    };
    if let Err(errors) = body.validate() {
        return ApiError(AceError::Validation(errors)).into_response();
    }

    let mut session = AuthSession::from_jar(&jar);
    let options = FetchOptions::post()
        .form([("username", body.email.as_str()), ("password", body.password.as_str())])
        .no_auth();

    let tokens = match state.backend.fetch(&mut session, "/auth/login", options).await {
        Ok(upstream) if !upstream.is_success() => {
            info!(status = %upstream.status, "login rejected by upstream");
            return respond(jar, session, &state.cookies, Ok(upstream));
        }
        Ok(upstream) => upstream.json::<TokenPair>(),
        Err(e) => Err(e),
    };
    let tokens = match tokens {
        Ok(tokens) => tokens,
        Err(e) => return respond(jar, session, &state.cookies, Err(e)),
    };

    let token_type = tokens.token_type.clone();
    session.store_tokens(tokens);

    let profile = state
        .backend
        .fetch(&mut session, "/auth/me", FetchOptions::get())
        .await;
    let user = match profile {
        Ok(upstream) if upstream.is_success() => upstream.json::<User>(),
        other => return respond(jar, session, &state.cookies, other),
    };
    let user = match user {
        Ok(user) => user,
        Err(e) => return respond(jar, session, &state.cookies, Err(e)),
    };

    session.set_role(user.effective_role());
    info!(user_id = %user.id, role = %user.effective_role(), "login succeeded");

    let jar = session.apply(jar, &state.cookies);
    let body = LoginResponse {
        token_type,
        message: "Login successful".to_string(),
        user,
    };
    (jar, Json(body)).into_response()
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<GatewayState>,
    jar: CookieJar,
    body: Bytes,
) -> Response {
    let body: RegisterRequest = match typed_body(&body) {
        Ok(body) => body,
        Err(response) => return response,
    };
    let payload = serde_json::json!({
        "email": body.email,
        "full_name": body.full_name,
        "password": body.password,
    });
    forward(
        &state,
        jar,
        "/auth/register",
        FetchOptions::post().json(payload).no_auth(),
    )
    .await
}

/// POST /api/auth/logout
///
/// Upstream notification is best-effort; the cookies are cleared regardless.
pub async fn logout(State(state): State<GatewayState>, jar: CookieJar) -> Response {
    let mut session = AuthSession::from_jar(&jar);

    if session.is_authenticated() {
        match state
            .backend
            .fetch(&mut session, "/auth/logout", FetchOptions::post())
            .await
        {
            Ok(upstream) if upstream.is_success() => {}
            Ok(upstream) => warn!(status = %upstream.status, "upstream logout rejected"),
            Err(e) => warn!(error = %e, "upstream logout failed"),
        }
    }

    session.clear_all();
    info!("logged out");
    let jar = session.apply(jar, &state.cookies);
    (jar, Json(MessageResponse::new("Logged out"))).into_response()
}

/// POST /api/auth/refresh
pub async fn refresh(State(state): State<GatewayState>, jar: CookieJar) -> Response {
    let mut session = AuthSession::from_jar(&jar);
    let Some(refresh_token) = session.refresh_token().map(str::to_owned) else {
        return detail_response(StatusCode::UNAUTHORIZED, "No refresh token");
    };

    let bearer = match HeaderValue::from_str(&format!("Bearer {refresh_token}")) {
        Ok(value) => value,
        Err(_) => {
            session.clear_tokens();
            let jar = session.apply(jar, &state.cookies);
            return (jar, detail_response(StatusCode::UNAUTHORIZED, "Invalid refresh token"))
                .into_response();
        }
    };
    let options = FetchOptions::post()
        .header(header::AUTHORIZATION, bearer)
        .no_auth();

    let result = state
        .backend
        .fetch(&mut session, "/auth/refresh", options)
        .await;
    let upstream = match result {
        Ok(upstream) => upstream,
        Err(e) => return respond(jar, session, &state.cookies, Err(e)),
    };

    if !upstream.is_success() {
        warn!(status = %upstream.status, "explicit refresh rejected, clearing tokens");
        session.clear_tokens();
        return respond(jar, session, &state.cookies, Ok(upstream));
    }

    match upstream.json::<TokenPair>() {
        Ok(tokens) => {
            session.store_tokens(tokens);
            let jar = session.apply(jar, &state.cookies);
            (jar, Json(MessageResponse::new("Token refreshed"))).into_response()
        }
        Err(e) => {
            session.clear_tokens();
            respond(jar, session, &state.cookies, Err(e))
        }
    }
}

/// GET /api/auth/me
pub async fn me(State(state): State<GatewayState>, jar: CookieJar) -> Response {
    forward(&state, jar, "/auth/me", FetchOptions::get()).await
}

/// POST /api/auth/{action}
pub async fn action(
    State(state): State<GatewayState>,
    Path(action): Path<String>,
    jar: CookieJar,
    body: Bytes,
) -> Response {
    let Some((path, requires_auth)) = action_route(&action) else {
        return detail_response(StatusCode::NOT_FOUND, "Unknown auth action");
    };
    let body = match json_body(&body) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let mut options = FetchOptions::post().json(body);
    if !requires_auth {
        options = options.no_auth();
    }
    forward(&state, jar, path, options).await
}
