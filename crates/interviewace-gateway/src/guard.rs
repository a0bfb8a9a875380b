// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route guard for page navigation.
//!
//! Looks only at cookie presence and the readable `user_role` cookie. It
//! saves a round trip for navigation that is obviously going to fail; it is
//! not an authorization check. Every `/api/*` handler still relies on the
//! upstream service validating the bearer token.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::session::{ACCESS_TOKEN_COOKIE, USER_ROLE_COOKIE};

/// Pages reachable without a session.
const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/login",
    "/register",
    "/verify-email",
    "/forgot-password",
    "/reset-password",
];

/// Pages a signed-in user is sent away from.
const AUTH_ONLY_PATHS: &[&str] = &["/login", "/register"];

const DASHBOARD_PATH: &str = "/dashboard";

/// Outcome of the guard for one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// Decide what to do with a navigation to `path`.
///
/// Checks run in a fixed order: signed-in users on auth pages, public
/// pages, API/asset paths, missing session, then the admin area.
pub fn decide(path: &str, has_token: bool, role: Option<&str>) -> GuardDecision {
    if has_token && AUTH_ONLY_PATHS.contains(&path) {
        return GuardDecision::Redirect(DASHBOARD_PATH.to_string());
    }

    if PUBLIC_PATHS.contains(&path) {
        return GuardDecision::Allow;
    }

    if path.starts_with("/api/") || path.starts_with("/_next/") || path.contains('.') {
        return GuardDecision::Allow;
    }

    if !has_token {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("callbackUrl", path)
            .finish();
        return GuardDecision::Redirect(format!("/login?{query}"));
    }

    if path.starts_with("/admin") && role != Some("admin") {
        return GuardDecision::Redirect(DASHBOARD_PATH.to_string());
    }

    GuardDecision::Allow
}

/// Middleware applying [`decide`] with a `307 Temporary Redirect`.
pub async fn route_guard(jar: CookieJar, request: Request, next: Next) -> Response {
    let has_token = jar.get(ACCESS_TOKEN_COOKIE).is_some();
    let role = jar.get(USER_ROLE_COOKIE).map(|c| c.value().to_string());

    match decide(request.uri().path(), has_token, role.as_deref()) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect(location) => {
            debug!(path = %request.uri().path(), %location, "route guard redirect");
            Redirect::temporary(&location).into_response()
        }
    }
}
