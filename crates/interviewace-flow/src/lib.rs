// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interview flow state machine for InterviewAce.
//!
//! Two views of the same lifecycle live here:
//! - [`InterviewFlow`]: the snapshot store a UI surface reads from. Every
//!   setter is accepted in every phase; sequencing is the caller's job.
//! - [`Interview`]: a typestate machine where each transition exists only on
//!   the phase it is legal from, so out-of-order calls do not compile.
//!
//! The phases are `configuring -> loading -> answering -> submitting ->
//! feedback -> completing -> summary`, with a reset back to `configuring`
//! from anywhere.

pub mod clock;
pub mod error;
pub mod machine;
pub mod phase;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::FlowError;
pub use machine::{AnyInterview, Interview};
pub use phase::Phase;
pub use store::InterviewFlow;
