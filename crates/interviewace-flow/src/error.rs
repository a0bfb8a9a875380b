// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors raised when a dynamically held interview is narrowed to a phase.

use thiserror::Error;

use crate::phase::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// The interview is not in the phase the operation needs.
    #[error("interview is {actual}, expected {expected}")]
    WrongPhase { expected: Phase, actual: Phase },
}
