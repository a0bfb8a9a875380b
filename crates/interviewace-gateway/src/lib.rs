// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend-for-frontend gateway for InterviewAce.
//!
//! The browser only ever talks to this gateway on its own origin. Access and
//! refresh tokens live in `httpOnly` cookies; every `/api/*` route reads
//! them, calls the upstream service with a bearer credential, refreshes once
//! on a `401`, and relays the upstream status and body back.

pub mod backend;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod redact;
pub mod server;
pub mod session;

pub use backend::{BackendClient, BackendResponse, FetchOptions, Payload};
pub use error::ApiError;
pub use guard::{decide, GuardDecision};
pub use server::{build_router, start_server, GatewayState};
pub use session::{AuthSession, CookiePolicy};
