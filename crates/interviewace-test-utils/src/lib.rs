// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for InterviewAce integration tests.
//!
//! # Components
//!
//! - [`MockUpstream`] - wiremock stand-in for the upstream REST API, with
//!   fixture builders for its JSON shapes
//! - [`TestHarness`] - a live gateway on an ephemeral port in front of a
//!   `MockUpstream`

pub mod harness;
pub mod mock_upstream;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_upstream::MockUpstream;
