// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use interviewace_config::model::InterviewAceConfig;
use interviewace_core::AceError;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::backend::BackendClient;
use crate::guard::route_guard;
use crate::handlers::{self, admin, auth, interviews, resumes};
use crate::session::CookiePolicy;

/// Health state for the unauthenticated health endpoint.
#[derive(Debug, Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Shared state for axum request handlers.
#[derive(Debug, Clone)]
pub struct GatewayState {
    /// Upstream client with refresh-and-retry.
    pub backend: BackendClient,
    /// Attributes for every cookie the gateway writes.
    pub cookies: CookiePolicy,
    /// Health state for unauthenticated endpoints.
    pub health: HealthState,
}

impl GatewayState {
    pub fn new(backend: BackendClient, cookies: CookiePolicy) -> Self {
        Self {
            backend,
            cookies,
            health: HealthState {
                start_time: std::time::Instant::now(),
            },
        }
    }

    pub fn from_config(config: &InterviewAceConfig) -> Result<Self, AceError> {
        let backend = BackendClient::new(&config.upstream)?;
        Ok(Self::new(backend, CookiePolicy::from_config(&config.cookies)))
    }
}

async fn page_not_found() -> Response {
    StatusCode::NOT_FOUND.into_response()
}

/// Build the full router.
///
/// - GET /health (local liveness)
/// - /api/* (proxied to the upstream service)
/// - everything else: the built frontend from `static_dir` (or 404), behind
///   the route guard
pub fn build_router(state: GatewayState, static_dir: Option<&str>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/{action}", post(auth::action))
        .route("/api/interviews/start", post(interviews::start))
        .route("/api/interviews/history", get(interviews::history))
        .route("/api/interviews/{id}", get(interviews::get_session))
        .route(
            "/api/interviews/{id}/next-question",
            get(interviews::next_question),
        )
        .route("/api/interviews/{id}/answer", post(interviews::answer))
        .route("/api/interviews/{id}/complete", post(interviews::complete))
        .route("/api/interviews/{id}/summary", get(interviews::summary))
        .route(
            "/api/resumes",
            get(resumes::list)
                .post(resumes::upload)
                .layer(DefaultBodyLimit::max(resumes::MAX_UPLOAD_BYTES)),
        )
        .route(
            "/api/resumes/{id}",
            get(resumes::get_resume)
                .put(resumes::update_resume)
                .delete(resumes::delete_resume),
        )
        .route(
            "/api/resumes/{id}/analysis",
            get(resumes::analysis).post(resumes::reanalyze),
        )
        .route("/api/resumes/{id}/versions", get(resumes::versions))
        .route(
            "/api/resumes/{id}/share",
            post(resumes::share).delete(resumes::unshare),
        )
        .route("/api/resumes/{id}/export", get(resumes::export))
        .route("/api/dashboard/stats", get(admin::dashboard_stats))
        .route("/api/admin/stats", get(admin::stats))
        .route("/api/admin/users", get(admin::list_users))
        .route(
            "/api/admin/users/{id}",
            get(admin::get_user).patch(admin::update_user),
        )
        .with_state(state);

    let pages = match static_dir {
        Some(dir) => Router::new().fallback_service(ServeDir::new(dir)),
        None => Router::new().fallback(page_not_found),
    }
    .layer(axum_middleware::from_fn(route_guard));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .fallback_service(pages)
        .layer(TraceLayer::new_for_http())
}

/// Start the gateway HTTP server and run until `shutdown` resolves.
pub async fn start_server(
    config: &InterviewAceConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), AceError> {
    let state = GatewayState::from_config(config)?;
    let app = build_router(state, config.server.static_dir.as_deref());

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AceError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!(
        upstream = %config.upstream.base_url,
        "gateway listening on {addr}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AceError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("gateway stopped");
    Ok(())
}
