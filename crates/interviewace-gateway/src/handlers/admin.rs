// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard and `/api/admin/*` handlers.
//!
//! Role enforcement for admin routes is left to the upstream service; the
//! gateway only forwards the caller's token.

use axum::{
    extract::{Path, Query, RawQuery, State},
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::backend::FetchOptions;
use crate::handlers::{bad_request, forward, query_string, segment};
use crate::server::GatewayState;

/// Query for PATCH /api/admin/users/{id}.
#[derive(Debug, Default, Deserialize)]
pub struct UserActionQuery {
    pub action: Option<String>,
}

/// Map the `action` query value onto the upstream path suffix.
pub fn user_action(action: Option<&str>) -> Option<&'static str> {
    match action? {
        "activate" => Some("activate"),
        "deactivate" => Some("deactivate"),
        _ => None,
    }
}

/// GET /api/dashboard/stats
pub async fn dashboard_stats(State(state): State<GatewayState>, jar: CookieJar) -> Response {
    forward(&state, jar, "/dashboard/stats", FetchOptions::get()).await
}

/// GET /api/admin/stats
pub async fn stats(State(state): State<GatewayState>, jar: CookieJar) -> Response {
    forward(&state, jar, "/admin/stats", FetchOptions::get()).await
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<GatewayState>,
    RawQuery(query): RawQuery,
    jar: CookieJar,
) -> Response {
    let path = format!("/admin/users{}", query_string(query.as_deref()));
    forward(&state, jar, &path, FetchOptions::get()).await
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Response {
    let path = format!("/admin/users/{}", segment(&id));
    forward(&state, jar, &path, FetchOptions::get()).await
}

/// PATCH /api/admin/users/{id}?action=activate|deactivate
pub async fn update_user(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Query(query): Query<UserActionQuery>,
    jar: CookieJar,
) -> Response {
    let Some(action) = user_action(query.action.as_deref()) else {
        return bad_request("Invalid action");
    };
    let path = format!("/admin/users/{}/{action}", segment(&id));
    forward(
        &state,
        jar,
        &path,
        FetchOptions::new(reqwest::Method::PATCH),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_action_accepts_known_values() {
        assert_eq!(user_action(Some("activate")), Some("activate"));
        assert_eq!(user_action(Some("deactivate")), Some("deactivate"));
    }

    #[test]
    fn user_action_rejects_everything_else() {
        assert_eq!(user_action(None), None);
        assert_eq!(user_action(Some("")), None);
        assert_eq!(user_action(Some("delete")), None);
        assert_eq!(user_action(Some("Activate")), None);
    }
}
