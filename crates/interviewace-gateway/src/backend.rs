// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the upstream interview service.
//!
//! [`BackendClient::fetch`] attaches the session's bearer token, and when
//! an authenticated call comes back `401` it refreshes the token pair once
//! and retries the call once. A failed refresh clears both tokens and hands
//! back the original `401`. Nothing else is retried.

use std::time::Duration;

use bytes::Bytes;
use interviewace_config::model::UpstreamConfig;
use interviewace_core::{AceError, TokenPair};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::redact::redact;
use crate::session::AuthSession;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Body of an upstream request.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(serde_json::Value),
    /// Pre-encoded `application/x-www-form-urlencoded` string.
    Form(String),
    /// Bytes sent as-is under the given content type (multipart uploads).
    Raw { content_type: String, bytes: Bytes },
}

/// Per-call options for [`BackendClient::fetch`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub method: Method,
    pub body: Option<RequestBody>,
    pub headers: HeaderMap,
    /// Skip the bearer token and the refresh-on-401 handling.
    pub no_auth: bool,
}

impl FetchOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: HeaderMap::new(),
            no_auth: false,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(value));
        self
    }

    /// Form-encode `pairs` as the body.
    pub fn form<'a>(mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        self.body = Some(RequestBody::Form(encoded));
        self
    }

    pub fn raw(mut self, content_type: impl Into<String>, bytes: Bytes) -> Self {
        self.body = Some(RequestBody::Raw {
            content_type: content_type.into(),
            bytes,
        });
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn no_auth(mut self) -> Self {
        self.no_auth = true;
        self
    }
}

/// Decoded upstream body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `204 No Content`.
    Empty,
    Json(serde_json::Value),
    /// Anything not labelled JSON, relayed unparsed.
    Raw {
        content_type: Option<String>,
        bytes: Bytes,
    },
}

/// Status and body of an upstream response.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub payload: Payload,
}

impl BackendResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Deserialize a JSON payload into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AceError> {
        match &self.payload {
            Payload::Json(value) => {
                serde_json::from_value(value.clone()).map_err(|e| AceError::Upstream {
                    message: format!("unexpected upstream response shape: {e}"),
                    source: Some(Box::new(e)),
                })
            }
            _ => Err(AceError::Upstream {
                message: format!("expected a JSON body from upstream, got status {}", self.status),
                source: None,
            }),
        }
    }
}

/// Client for the upstream REST API.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl BackendClient {
    /// Build a client for `config.base_url` with `config.timeout_secs` per call.
    pub fn new(config: &UpstreamConfig) -> Result<Self, AceError> {
        Self::with_base_url(config.base_url.clone(), config.timeout())
    }

    /// Build a client for an explicit base URL (also used to point at wiremock).
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AceError::Config(format!("failed to build upstream HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call `path` and decode the body.
    ///
    /// `204` becomes [`Payload::Empty`] with the status preserved, JSON
    /// bodies are parsed, and everything else is returned as raw bytes.
    pub async fn fetch(
        &self,
        session: &mut AuthSession,
        path: &str,
        options: FetchOptions,
    ) -> Result<BackendResponse, AceError> {
        let response = self.send(session, path, &options).await?;
        read_payload(response).await
    }

    /// Call `path` and hand back the undecoded response for streaming.
    pub async fn fetch_stream(
        &self,
        session: &mut AuthSession,
        path: &str,
        options: FetchOptions,
    ) -> Result<reqwest::Response, AceError> {
        self.send(session, path, &options).await
    }

    /// Exchange the session's refresh token for a new pair.
    ///
    /// On success both tokens are replaced together. On any failure,
    /// including a missing refresh token, both are cleared.
    pub async fn refresh(&self, session: &mut AuthSession) -> bool {
        let Some(refresh_token) = session.refresh_token().map(str::to_owned) else {
            debug!("no refresh token, skipping refresh");
            session.clear_tokens();
            return false;
        };

        let url = format!("{}/auth/refresh", self.base_url);
        let result = self
            .client
            .post(&url)
            .bearer_auth(&refresh_token)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                match response.json::<TokenPair>().await {
                    Ok(pair) => {
                        debug!("token pair refreshed");
                        session.store_tokens(pair);
                        true
                    }
                    Err(e) => {
                        warn!(error = %redact(&e.to_string()), "refresh response unreadable, clearing tokens");
                        session.clear_tokens();
                        false
                    }
                }
            }
            Ok(response) => {
                warn!(status = %response.status(), "token refresh rejected, clearing tokens");
                session.clear_tokens();
                false
            }
            Err(e) => {
                warn!(error = %redact(&e.to_string()), "token refresh failed, clearing tokens");
                session.clear_tokens();
                false
            }
        }
    }

    async fn send(
        &self,
        session: &mut AuthSession,
        path: &str,
        options: &FetchOptions,
    ) -> Result<reqwest::Response, AceError> {
        let token = if options.no_auth {
            None
        } else {
            session.access_token().map(str::to_owned)
        };

        let response = self.send_once(path, options, token.as_deref()).await?;
        if options.no_auth || response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!(path, "upstream returned 401, refreshing token");
        if !self.refresh(session).await {
            return Ok(response);
        }

        let token = session.access_token().map(str::to_owned);
        self.send_once(path, options, token.as_deref()).await
    }

    async fn send_once(
        &self,
        path: &str,
        options: &FetchOptions,
        token: Option<&str>,
    ) -> Result<reqwest::Response, AceError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(options.method.clone(), &url)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .headers(options.headers.clone());

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        request = match &options.body {
            Some(RequestBody::Json(value)) => request
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(value.to_string()),
            Some(RequestBody::Form(encoded)) => request
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(encoded.clone()),
            Some(RequestBody::Raw {
                content_type,
                bytes,
            }) => request
                .header(CONTENT_TYPE, content_type.as_str())
                .body(bytes.clone()),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                warn!(method = %options.method, path, "upstream request timed out");
                AceError::Timeout {
                    duration: self.timeout,
                }
            } else {
                let message = redact(&e.to_string());
                warn!(method = %options.method, path, error = %message, "upstream request failed");
                AceError::Upstream {
                    message: format!("upstream request failed: {message}"),
                    source: Some(Box::new(e)),
                }
            }
        })?;

        debug!(
            method = %options.method,
            path,
            status = %response.status(),
            authenticated = token.is_some(),
            "upstream response"
        );
        Ok(response)
    }
}

async fn read_payload(response: reqwest::Response) -> Result<BackendResponse, AceError> {
    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return Ok(BackendResponse {
            status,
            payload: Payload::Empty,
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let bytes = response.bytes().await.map_err(|e| AceError::Upstream {
        message: format!("failed to read upstream body: {}", redact(&e.to_string())),
        source: Some(Box::new(e)),
    })?;

    let is_json = content_type
        .as_deref()
        .is_some_and(|ct| ct.contains(JSON_CONTENT_TYPE));

    let payload = if is_json {
        let value = serde_json::from_slice(&bytes).map_err(|e| AceError::Upstream {
            message: format!("upstream sent invalid JSON: {e}"),
            source: Some(Box::new(e)),
        })?;
        Payload::Json(value)
    } else {
        Payload::Raw {
            content_type,
            bytes,
        }
    };

    Ok(BackendResponse { status, payload })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::with_base_url(server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn pair_json(access: &str, refresh: &str) -> serde_json::Value {
        json!({"access_token": access, "refresh_token": refresh, "token_type": "bearer"})
    }

    #[tokio::test]
    async fn attaches_bearer_and_parses_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("authorization", "Bearer a1"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut session = AuthSession::with_tokens(Some("a1".into()), None);
        let response = client
            .fetch(&mut session, "/auth/me", FetchOptions::get())
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.payload, Payload::Json(json!({"id": "u1"})));
    }

    #[tokio::test]
    async fn no_content_is_empty_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/interview/s1/next"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut session = AuthSession::with_tokens(Some("a1".into()), None);
        let response = client
            .fetch(&mut session, "/interview/s1/next", FetchOptions::get())
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::NO_CONTENT);
        assert_eq!(response.payload, Payload::Empty);
    }

    #[tokio::test]
    async fn non_json_body_is_raw() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/plain"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/plain")
                    .set_body_string("hello"),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client
            .fetch(&mut AuthSession::default(), "/plain", FetchOptions::get())
            .await
            .unwrap();
        match response.payload {
            Payload::Raw {
                content_type,
                bytes,
            } => {
                assert_eq!(content_type.as_deref(), Some("text/plain"));
                assert_eq!(&bytes[..], b"hello");
            }
            other => panic!("expected raw payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn form_body_is_url_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("username=a%40b.com&password=p+w%26"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pair_json("a", "r")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let options = FetchOptions::post()
            .form([("username", "a@b.com"), ("password", "p w&")])
            .no_auth();
        let response = client
            .fetch(&mut AuthSession::default(), "/auth/login", options)
            .await
            .unwrap();
        let pair: TokenPair = response.json().unwrap();
        assert_eq!(pair.access_token, "a");
    }

    #[tokio::test]
    async fn unauthorized_refreshes_once_and_retries_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dashboard/stats"))
            .and(header("authorization", "Bearer old"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .and(header("authorization", "Bearer r-old"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pair_json("new", "r-new")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dashboard/stats"))
            .and(header("authorization", "Bearer new"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 3})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut session = AuthSession::with_tokens(Some("old".into()), Some("r-old".into()));
        let response = client
            .fetch(&mut session, "/dashboard/stats", FetchOptions::get())
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert!(session.tokens_stored());
        assert_eq!(session.access_token(), Some("new"));
        assert_eq!(session.refresh_token(), Some("r-new"));
    }

    #[tokio::test]
    async fn second_unauthorized_is_returned_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "nope"})))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pair_json("new", "r-new")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut session = AuthSession::with_tokens(Some("old".into()), Some("r-old".into()));
        let response = client
            .fetch(&mut session, "/auth/me", FetchOptions::get())
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.payload, Payload::Json(json!({"detail": "nope"})));
    }

    #[tokio::test]
    async fn failed_refresh_clears_tokens_and_returns_original_401() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/resume/"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut session = AuthSession::with_tokens(Some("old".into()), Some("r-old".into()));
        let response = client
            .fetch(&mut session, "/resume/", FetchOptions::get())
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.payload, Payload::Json(json!({"detail": "expired"})));
        assert!(session.tokens_cleared());
        assert!(session.access_token().is_none());
        assert!(session.refresh_token().is_none());
    }

    #[tokio::test]
    async fn missing_refresh_token_skips_refresh_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pair_json("x", "y")))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut session = AuthSession::with_tokens(Some("old".into()), None);
        let response = client
            .fetch(&mut session, "/auth/me", FetchOptions::get())
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert!(session.tokens_cleared());
    }

    #[tokio::test]
    async fn no_auth_call_never_refreshes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Incorrect email or password"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut session = AuthSession::with_tokens(Some("a".into()), Some("r".into()));
        let response = client
            .fetch(&mut session, "/auth/login", FetchOptions::post().no_auth())
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert!(!session.tokens_cleared());
    }

    #[tokio::test]
    async fn server_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/interview/start"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "LLM down"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client
            .fetch(
                &mut AuthSession::default(),
                "/interview/start",
                FetchOptions::post().json(json!({"question_count": 5})),
            )
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = BackendClient::with_base_url(server.uri(), Duration::from_millis(50)).unwrap();
        let err = client
            .fetch(&mut AuthSession::default(), "/slow", FetchOptions::get())
            .await
            .unwrap_err();
        assert!(matches!(err, AceError::Timeout { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_upstream_error() {
        let client =
            BackendClient::with_base_url("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = client
            .fetch(&mut AuthSession::default(), "/auth/me", FetchOptions::get())
            .await
            .unwrap_err();
        assert!(matches!(err, AceError::Upstream { .. }), "got {err:?}");
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn rejected_refresh_is_logged_without_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut session =
            AuthSession::with_tokens(Some("secret-access".into()), Some("secret-refresh".into()));
        assert!(!client.refresh(&mut session).await);

        assert!(logs_contain("token refresh rejected"));
        assert!(!logs_contain("secret-refresh"));
        assert!(!logs_contain("secret-access"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client =
            BackendClient::with_base_url("http://localhost:8000/api/v1/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
    }
}
