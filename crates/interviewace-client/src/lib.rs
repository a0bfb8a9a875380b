// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client side of the InterviewAce gateway.
//!
//! [`ApiClient`] speaks to `/api/*` the way the browser does, cookies
//! included. [`InterviewDriver`] runs a live interview on top of it and keeps
//! the flow state machine in step with each response.

pub mod api;
pub mod driver;
pub mod error;

pub use api::ApiClient;
pub use driver::{error_message, AnswerOutcome, InterviewDriver};
pub use error::ClientError;
