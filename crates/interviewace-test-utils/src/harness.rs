// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` runs a real gateway on an ephemeral local port in front of
//! a [`MockUpstream`], so clients can be tested over actual HTTP with real
//! cookie handling.

use std::time::Duration;

use interviewace_config::model::InterviewAceConfig;
use interviewace_core::AceError;
use interviewace_gateway::{build_router, BackendClient, CookiePolicy, GatewayState};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::mock_upstream::MockUpstream;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    upstream_timeout: Duration,
    secure_cookies: bool,
    login_role: Option<String>,
    interview: Option<(String, u32)>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            upstream_timeout: Duration::from_secs(5),
            secure_cookies: false,
            login_role: None,
            interview: None,
        }
    }

    /// Deadline for each gateway-to-upstream call.
    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// Mark gateway cookies `Secure`. Off by default since tests use plain HTTP.
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    /// Mount the login and profile endpoints for a user with `role`.
    pub fn with_login(mut self, role: &str) -> Self {
        self.login_role = Some(role.to_string());
        self
    }

    /// Mount a scripted interview (see [`MockUpstream::mount_interview`]).
    pub fn with_interview(mut self, session_id: &str, question_count: u32) -> Self {
        self.interview = Some((session_id.to_string(), question_count));
        self
    }

    /// Start the mock upstream and the gateway.
    pub async fn build(self) -> Result<TestHarness, AceError> {
        let upstream = MockUpstream::start().await;
        if let Some(role) = &self.login_role {
            upstream.mount_login(role).await;
        }
        if let Some((session_id, count)) = &self.interview {
            upstream.mount_interview(session_id, *count).await;
        }

        let mut config = InterviewAceConfig::default();
        config.cookies.secure = self.secure_cookies;

        let backend = BackendClient::with_base_url(upstream.uri(), self.upstream_timeout)?;
        let state = GatewayState::new(backend, CookiePolicy::from_config(&config.cookies));
        let app = build_router(state, None);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| AceError::Internal(format!("failed to bind test gateway: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| AceError::Internal(format!("failed to read test gateway address: {e}")))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = result {
                tracing::error!(error = %e, "test gateway stopped with error");
            }
        });

        Ok(TestHarness {
            upstream,
            base_url: format!("http://{addr}"),
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }
}

/// A running gateway and the mock upstream behind it.
///
/// The gateway shuts down when the harness is dropped.
pub struct TestHarness {
    /// The mock upstream; mount extra mocks or inspect received requests.
    pub upstream: MockUpstream,
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Base URL of the running gateway, e.g. `http://127.0.0.1:41234`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stop the gateway and wait for it to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn harness_serves_health() {
        let harness = TestHarness::builder().build().await.unwrap();
        let response = reqwest::get(format!("{}/health", harness.base_url()))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        harness.shutdown().await;
    }

    #[tokio::test]
    async fn harness_proxies_to_mock_upstream() {
        let harness = TestHarness::builder().with_login("user").build().await.unwrap();
        let response = reqwest::Client::new()
            .get(format!("{}/api/auth/me", harness.base_url()))
            .header("cookie", "access_token=test-access")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["role"], "user");
    }
}
