// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typestate interview machine.
//!
//! `Interview<P>` carries exactly the data phase `P` needs, and each
//! transition consumes `self` and exists only on its legal source phase:
//!
//! ```text
//! Configuring --start--> Loading --question--> Answering --submit--> Submitting
//!                           |                     ^                   |     |
//!                           |                     +------fail---------+     |
//!                           |                                          evaluated
//!                           |                                               v
//!                           +--no_more_questions--> Completing <---------- Feedback
//!                                                       |                   |
//!                                                   finish             next_question
//!                                                       v                   v
//!                                                    Summary            Answering
//! ```
//!
//! `reset` is available from every phase. [`AnyInterview`] holds a machine
//! whose phase is only known at runtime and narrows back with `try_into_*`,
//! which returns the original value untouched on a phase mismatch.

use interviewace_core::{InterviewSession, InterviewSummary, Question};

use crate::clock::elapsed_seconds;
use crate::error::FlowError;
use crate::phase::Phase;

mod sealed {
    pub trait Sealed {}
}

/// Marker implemented by the seven phase types.
pub trait PhaseState: sealed::Sealed {
    const PHASE: Phase;
}

/// Choosing interview settings. Holds the last start failure, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuring {
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loading {
    session: InterviewSession,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Answering {
    session: InterviewSession,
    question: Question,
    started_at: i64,
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submitting {
    session: InterviewSession,
    question: Question,
    started_at: i64,
}

/// The answer to `question` was evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    session: InterviewSession,
    question: Question,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completing {
    session: InterviewSession,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    session: InterviewSession,
    summary: InterviewSummary,
}

macro_rules! phase_state {
    ($($ty:ident => $phase:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl PhaseState for $ty {
                const PHASE: Phase = Phase::$phase;
            }
        )*
    };
}

phase_state! {
    Configuring => Configuring,
    Loading => Loading,
    Answering => Answering,
    Submitting => Submitting,
    Feedback => Feedback,
    Completing => Completing,
    Summary => Summary,
}

/// An interview statically known to be in phase `P`.
#[derive(Debug, Clone, PartialEq)]
pub struct Interview<P> {
    answered: u32,
    state: P,
}

impl<P: PhaseState> Interview<P> {
    pub fn phase(&self) -> Phase {
        P::PHASE
    }

    /// Answers evaluated so far.
    pub fn answered(&self) -> u32 {
        self.answered
    }

    /// Abandon the interview.
    pub fn reset(self) -> Interview<Configuring> {
        Interview::new()
    }
}

impl Interview<Configuring> {
    pub fn new() -> Self {
        Self {
            answered: 0,
            state: Configuring::default(),
        }
    }

    /// Last start failure.
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Starting the session failed; stay here with the message.
    pub fn fail(self, message: impl Into<String>) -> Self {
        Self {
            answered: 0,
            state: Configuring {
                error: Some(message.into()),
            },
        }
    }

    pub fn start(self, session: InterviewSession) -> Interview<Loading> {
        Interview {
            answered: 0,
            state: Loading { session },
        }
    }
}

impl Default for Interview<Configuring> {
    fn default() -> Self {
        Self::new()
    }
}

impl Interview<Loading> {
    pub fn session(&self) -> &InterviewSession {
        &self.state.session
    }

    pub fn question(self, question: Question, now_millis: i64) -> Interview<Answering> {
        Interview {
            answered: self.answered,
            state: Answering {
                session: self.state.session,
                question,
                started_at: now_millis,
                error: None,
            },
        }
    }

    pub fn no_more_questions(self) -> Interview<Completing> {
        Interview {
            answered: self.answered,
            state: Completing {
                session: self.state.session,
            },
        }
    }
}

impl Interview<Answering> {
    pub fn session(&self) -> &InterviewSession {
        &self.state.session
    }

    pub fn question(&self) -> &Question {
        &self.state.question
    }

    /// Error from the last submission of this question.
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn elapsed_seconds(&self, now_millis: i64) -> u64 {
        elapsed_seconds(self.state.started_at, now_millis)
    }

    pub fn submit(self) -> Interview<Submitting> {
        Interview {
            answered: self.answered,
            state: Submitting {
                session: self.state.session,
                question: self.state.question,
                started_at: self.state.started_at,
            },
        }
    }
}

impl Interview<Submitting> {
    pub fn session(&self) -> &InterviewSession {
        &self.state.session
    }

    pub fn question(&self) -> &Question {
        &self.state.question
    }

    /// The answer was evaluated; counts toward `answered`.
    pub fn evaluated(self) -> Interview<Feedback> {
        Interview {
            answered: self.answered.saturating_add(1),
            state: Feedback {
                session: self.state.session,
                question: self.state.question,
            },
        }
    }

    /// Submission failed. The question and its timer are kept.
    pub fn fail(self, message: impl Into<String>) -> Interview<Answering> {
        Interview {
            answered: self.answered,
            state: Answering {
                session: self.state.session,
                question: self.state.question,
                started_at: self.state.started_at,
                error: Some(message.into()),
            },
        }
    }
}

impl Interview<Feedback> {
    pub fn session(&self) -> &InterviewSession {
        &self.state.session
    }

    /// The question that was just evaluated.
    pub fn last_question(&self) -> &Question {
        &self.state.question
    }

    pub fn next_question(self, question: Question, now_millis: i64) -> Interview<Answering> {
        Interview {
            answered: self.answered,
            state: Answering {
                session: self.state.session,
                question,
                started_at: now_millis,
                error: None,
            },
        }
    }

    pub fn no_more_questions(self) -> Interview<Completing> {
        Interview {
            answered: self.answered,
            state: Completing {
                session: self.state.session,
            },
        }
    }
}

impl Interview<Completing> {
    pub fn session(&self) -> &InterviewSession {
        &self.state.session
    }

    pub fn finish(self, summary: InterviewSummary) -> Interview<Summary> {
        Interview {
            answered: self.answered,
            state: Summary {
                session: self.state.session,
                summary,
            },
        }
    }
}

impl Interview<Summary> {
    pub fn session(&self) -> &InterviewSession {
        &self.state.session
    }

    pub fn summary(&self) -> &InterviewSummary {
        &self.state.summary
    }

    pub fn into_summary(self) -> InterviewSummary {
        self.state.summary
    }
}

/// An interview whose phase is only known at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyInterview {
    Configuring(Interview<Configuring>),
    Loading(Interview<Loading>),
    Answering(Interview<Answering>),
    Submitting(Interview<Submitting>),
    Feedback(Interview<Feedback>),
    Completing(Interview<Completing>),
    Summary(Interview<Summary>),
}

macro_rules! any_interview_conversions {
    ($($variant:ident => $method:ident),* $(,)?) => {
        $(
            impl From<Interview<$variant>> for AnyInterview {
                fn from(interview: Interview<$variant>) -> Self {
                    AnyInterview::$variant(interview)
                }
            }
        )*

        impl AnyInterview {
            $(
                /// Narrow to this phase, handing `self` back unchanged otherwise.
                pub fn $method(self) -> Result<Interview<$variant>, AnyInterview> {
                    match self {
                        AnyInterview::$variant(interview) => Ok(interview),
                        other => Err(other),
                    }
                }
            )*
        }
    };
}

any_interview_conversions! {
    Configuring => try_into_configuring,
    Loading => try_into_loading,
    Answering => try_into_answering,
    Submitting => try_into_submitting,
    Feedback => try_into_feedback,
    Completing => try_into_completing,
    Summary => try_into_summary,
}

impl AnyInterview {
    pub fn phase(&self) -> Phase {
        match self {
            AnyInterview::Configuring(i) => i.phase(),
            AnyInterview::Loading(i) => i.phase(),
            AnyInterview::Answering(i) => i.phase(),
            AnyInterview::Submitting(i) => i.phase(),
            AnyInterview::Feedback(i) => i.phase(),
            AnyInterview::Completing(i) => i.phase(),
            AnyInterview::Summary(i) => i.phase(),
        }
    }

    pub fn answered(&self) -> u32 {
        match self {
            AnyInterview::Configuring(i) => i.answered(),
            AnyInterview::Loading(i) => i.answered(),
            AnyInterview::Answering(i) => i.answered(),
            AnyInterview::Submitting(i) => i.answered(),
            AnyInterview::Feedback(i) => i.answered(),
            AnyInterview::Completing(i) => i.answered(),
            AnyInterview::Summary(i) => i.answered(),
        }
    }

    /// The session, in every phase after `configuring`.
    pub fn session(&self) -> Option<&InterviewSession> {
        match self {
            AnyInterview::Configuring(_) => None,
            AnyInterview::Loading(i) => Some(i.session()),
            AnyInterview::Answering(i) => Some(i.session()),
            AnyInterview::Submitting(i) => Some(i.session()),
            AnyInterview::Feedback(i) => Some(i.session()),
            AnyInterview::Completing(i) => Some(i.session()),
            AnyInterview::Summary(i) => Some(i.session()),
        }
    }

    /// Fail unless the interview is in one of `allowed`.
    pub fn require(&self, allowed: &[Phase]) -> Result<(), FlowError> {
        let actual = self.phase();
        if allowed.contains(&actual) {
            Ok(())
        } else {
            Err(FlowError::WrongPhase {
                expected: allowed.first().copied().unwrap_or_default(),
                actual,
            })
        }
    }

    pub fn reset(self) -> Interview<Configuring> {
        Interview::new()
    }
}

impl Default for AnyInterview {
    fn default() -> Self {
        AnyInterview::Configuring(Interview::new())
    }
}
