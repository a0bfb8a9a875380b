// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cookie-held credentials for one browser request.
//!
//! An [`AuthSession`] is read from the request's cookies, handed by `&mut`
//! to every upstream call the handler makes, and written back to the
//! response jar once at the end. The access and refresh tokens change only
//! as a pair: [`AuthSession::store_tokens`] replaces both and
//! [`AuthSession::clear_tokens`] removes both, so a response never carries
//! one new token next to one stale one.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use interviewace_config::model::CookieConfig;
use interviewace_core::{TokenPair, UserRole};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
/// Readable by page scripts and the route guard; carries the role only.
pub const USER_ROLE_COOKIE: &str = "user_role";

/// Attributes applied to every cookie the gateway sets.
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    pub secure: bool,
    pub max_age: time::Duration,
}

impl CookiePolicy {
    pub fn from_config(config: &CookieConfig) -> Self {
        Self {
            secure: config.secure,
            max_age: time::Duration::seconds(i64::try_from(config.max_age_secs).unwrap_or(i64::MAX)),
        }
    }

    fn build(&self, name: &'static str, value: String, http_only: bool) -> Cookie<'static> {
        Cookie::build((name, value))
            .http_only(http_only)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(self.max_age)
            .build()
    }
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self::from_config(&CookieConfig::default())
    }
}

#[derive(Clone, PartialEq, Eq)]
enum TokenUpdate {
    Store(TokenPair),
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleUpdate {
    Set(UserRole),
    Clear,
}

/// Credentials for the current request plus any pending cookie writes.
#[derive(Clone, Default)]
pub struct AuthSession {
    access_token: Option<String>,
    refresh_token: Option<String>,
    tokens: Option<TokenUpdate>,
    role: Option<RoleUpdate>,
}

impl AuthSession {
    /// Read the token cookies from an incoming request.
    pub fn from_jar(jar: &CookieJar) -> Self {
        Self {
            access_token: cookie_value(jar, ACCESS_TOKEN_COOKIE),
            refresh_token: cookie_value(jar, REFRESH_TOKEN_COOKIE),
            tokens: None,
            role: None,
        }
    }

    /// A session with the given tokens and nothing pending.
    pub fn with_tokens(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token,
            refresh_token,
            tokens: None,
            role: None,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Replace both tokens. Later calls in this request use the new access token.
    pub fn store_tokens(&mut self, pair: TokenPair) {
        self.access_token = Some(pair.access_token.clone());
        self.refresh_token = Some(pair.refresh_token.clone());
        self.tokens = Some(TokenUpdate::Store(pair));
    }

    /// Drop both tokens.
    pub fn clear_tokens(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
        self.tokens = Some(TokenUpdate::Clear);
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.role = Some(RoleUpdate::Set(role));
    }

    /// Drop both tokens and the role cookie.
    pub fn clear_all(&mut self) {
        self.clear_tokens();
        self.role = Some(RoleUpdate::Clear);
    }

    /// Whether the token cookies will be cleared on the response.
    pub fn tokens_cleared(&self) -> bool {
        matches!(self.tokens, Some(TokenUpdate::Clear))
    }

    /// Whether a fresh token pair will be written on the response.
    pub fn tokens_stored(&self) -> bool {
        matches!(self.tokens, Some(TokenUpdate::Store(_)))
    }

    /// Write pending changes into the response jar.
    pub fn apply(self, jar: CookieJar, policy: &CookiePolicy) -> CookieJar {
        let jar = match self.tokens {
            Some(TokenUpdate::Store(pair)) => jar
                .add(policy.build(ACCESS_TOKEN_COOKIE, pair.access_token, true))
                .add(policy.build(REFRESH_TOKEN_COOKIE, pair.refresh_token, true)),
            Some(TokenUpdate::Clear) => jar
                .remove(removal(ACCESS_TOKEN_COOKIE))
                .remove(removal(REFRESH_TOKEN_COOKIE)),
            None => jar,
        };
        match self.role {
            Some(RoleUpdate::Set(role)) => {
                jar.add(policy.build(USER_ROLE_COOKIE, role.to_string(), false))
            }
            Some(RoleUpdate::Clear) => jar.remove(removal(USER_ROLE_COOKIE)),
            None => jar,
        }
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pending = match &self.tokens {
            Some(TokenUpdate::Store(_)) => "store",
            Some(TokenUpdate::Clear) => "clear",
            None => "none",
        };
        f.debug_struct("AuthSession")
            .field("access_token", &self.access_token.as_ref().map(|_| "[redacted]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[redacted]"))
            .field("tokens", &pending)
            .field("role", &self.role)
            .finish()
    }
}

fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};
    use axum::response::IntoResponse;

    fn jar_with(cookies: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookies).unwrap());
        CookieJar::from_headers(&headers)
    }

    fn pair(access: &str, refresh: &str) -> TokenPair {
        TokenPair {
            access_token: access.into(),
            refresh_token: refresh.into(),
            token_type: "bearer".into(),
        }
    }

    fn set_cookies(jar: CookieJar) -> Vec<String> {
        let response = (jar, ()).into_response();
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn reads_tokens_from_cookies() {
        let session = AuthSession::from_jar(&jar_with("access_token=a1; refresh_token=r1"));
        assert_eq!(session.access_token(), Some("a1"));
        assert_eq!(session.refresh_token(), Some("r1"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn empty_cookie_counts_as_absent() {
        let session = AuthSession::from_jar(&jar_with("access_token="));
        assert!(session.access_token().is_none());
    }

    #[test]
    fn store_tokens_writes_both_with_policy() {
        let mut session = AuthSession::default();
        session.store_tokens(pair("a2", "r2"));
        assert_eq!(session.access_token(), Some("a2"));

        let policy = CookiePolicy {
            secure: true,
            max_age: time::Duration::seconds(604_800),
        };
        let written = set_cookies(session.apply(CookieJar::new(), &policy));
        assert_eq!(written.len(), 2);
        for cookie in &written {
            assert!(cookie.contains("HttpOnly"), "{cookie}");
            assert!(cookie.contains("Secure"), "{cookie}");
            assert!(cookie.contains("SameSite=Lax"), "{cookie}");
            assert!(cookie.contains("Path=/"), "{cookie}");
            assert!(cookie.contains("Max-Age=604800"), "{cookie}");
        }
        assert!(written.iter().any(|c| c.starts_with("access_token=a2")));
        assert!(written.iter().any(|c| c.starts_with("refresh_token=r2")));
    }

    #[test]
    fn clear_tokens_removes_both() {
        let jar = jar_with("access_token=a1; refresh_token=r1; user_role=admin");
        let mut session = AuthSession::from_jar(&jar);
        session.clear_tokens();
        assert!(session.tokens_cleared());
        assert!(session.access_token().is_none());
        assert!(session.refresh_token().is_none());

        let jar = session.apply(jar, &CookiePolicy::default());
        assert!(jar.get(ACCESS_TOKEN_COOKIE).is_none());
        assert!(jar.get(REFRESH_TOKEN_COOKIE).is_none());
        assert!(jar.get(USER_ROLE_COOKIE).is_some());
        let written = set_cookies(jar);
        assert_eq!(written.len(), 2);
        assert!(written.iter().all(|c| c.contains("Max-Age=0")));
    }

    #[test]
    fn role_cookie_is_readable_by_scripts() {
        let mut session = AuthSession::default();
        session.set_role(UserRole::Admin);
        let written = set_cookies(session.apply(CookieJar::new(), &CookiePolicy::default()));
        assert_eq!(written.len(), 1);
        assert!(written[0].starts_with("user_role=admin"));
        assert!(!written[0].contains("HttpOnly"));
    }

    #[test]
    fn clear_all_removes_three_cookies() {
        let jar = jar_with("access_token=a1; refresh_token=r1; user_role=user");
        let mut session = AuthSession::from_jar(&jar);
        session.clear_all();
        let jar = session.apply(jar, &CookiePolicy::default());
        assert_eq!(jar.iter().count(), 0);
    }

    #[test]
    fn nothing_pending_writes_nothing() {
        let jar = jar_with("access_token=a1");
        let session = AuthSession::from_jar(&jar);
        assert!(set_cookies(session.apply(jar, &CookiePolicy::default())).is_empty());
    }

    #[test]
    fn debug_redacts_tokens() {
        let session = AuthSession::with_tokens(Some("secret-a".into()), Some("secret-r".into()));
        let debug = format!("{session:?}");
        assert!(!debug.contains("secret-a"));
        assert!(!debug.contains("secret-r"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn policy_from_config() {
        let policy = CookiePolicy::from_config(&CookieConfig {
            secure: true,
            max_age_secs: 60,
        });
        assert!(policy.secure);
        assert_eq!(policy.max_age, time::Duration::seconds(60));
    }
}
