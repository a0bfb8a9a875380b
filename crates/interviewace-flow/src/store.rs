// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Snapshot store for a single mock interview.
//!
//! The store holds what is currently known about the interview and the
//! phase the UI should render. It never rejects a call: whoever drives it
//! (the interview page, or `InterviewDriver` in the client crate) owns the
//! call order. Use [`crate::Interview`] when the order must be enforced.

use std::sync::Arc;

use interviewace_core::{InterviewSession, InterviewSummary, Question};
use tracing::debug;

use crate::clock::{elapsed_seconds, Clock, SystemClock};
use crate::phase::Phase;

/// Client-held interview state. One owner, no concurrent writers.
pub struct InterviewFlow {
    phase: Phase,
    session: Option<InterviewSession>,
    current_question: Option<Question>,
    questions_answered: u32,
    total_questions: u32,
    summary: Option<InterviewSummary>,
    error: Option<String>,
    answer_started_at: Option<i64>,
    clock: Arc<dyn Clock>,
}

impl InterviewFlow {
    /// A fresh flow in `configuring`, timed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// A fresh flow timed by `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            phase: Phase::Configuring,
            session: None,
            current_question: None,
            questions_answered: 0,
            total_questions: 0,
            summary: None,
            error: None,
            answer_started_at: None,
            clock,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> Option<&InterviewSession> {
        self.session.as_ref()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    pub fn summary(&self) -> Option<&InterviewSummary> {
        self.summary.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Epoch milliseconds at which the current answer timer started.
    pub fn answer_started_at(&self) -> Option<i64> {
        self.answer_started_at
    }

    /// Clear everything and return to `configuring`. The clock is kept.
    pub fn reset_interview(&mut self) {
        self.session = None;
        self.current_question = None;
        self.questions_answered = 0;
        self.total_questions = 0;
        self.summary = None;
        self.error = None;
        self.answer_started_at = None;
        self.transition(Phase::Configuring);
    }

    /// Session created upstream; wait for the first question.
    pub fn set_session(&mut self, session: InterviewSession) {
        self.total_questions = session.question_count;
        self.session = Some(session);
        self.error = None;
        self.transition(Phase::Loading);
    }

    /// A question arrived; start its answer timer.
    pub fn set_current_question(&mut self, question: Question) {
        self.current_question = Some(question);
        self.error = None;
        self.answer_started_at = Some(self.clock.now_millis());
        self.transition(Phase::Answering);
    }

    /// The upstream answered the question fetch with no content.
    pub fn set_no_more_questions(&mut self) {
        self.current_question = None;
        self.transition(Phase::Completing);
    }

    pub fn set_submitting(&mut self) {
        self.transition(Phase::Submitting);
    }

    pub fn set_feedback(&mut self) {
        self.transition(Phase::Feedback);
    }

    pub fn set_summary(&mut self, summary: InterviewSummary) {
        self.summary = Some(summary);
        self.current_question = None;
        self.transition(Phase::Summary);
    }

    /// Record a failure. With a session the question stays on screen,
    /// without one the flow falls back to configuration.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        let next = if self.session.is_some() {
            Phase::Answering
        } else {
            Phase::Configuring
        };
        self.transition(next);
    }

    /// Restart the answer timer without changing phase.
    pub fn start_answer_timer(&mut self) {
        self.answer_started_at = Some(self.clock.now_millis());
    }

    /// Seconds since the answer timer started, 0 when it never started.
    pub fn elapsed_seconds(&self) -> u64 {
        match self.answer_started_at {
            Some(start) => elapsed_seconds(start, self.clock.now_millis()),
            None => 0,
        }
    }

    pub fn increment_answered(&mut self) {
        self.questions_answered = self.questions_answered.saturating_add(1);
    }

    fn transition(&mut self, to: Phase) {
        if self.phase != to {
            debug!(from = %self.phase, to = %to, "interview phase change");
        }
        self.phase = to;
    }
}

impl Default for InterviewFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InterviewFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterviewFlow")
            .field("phase", &self.phase)
            .field("session", &self.session.as_ref().map(|s| &s.id))
            .field(
                "current_question",
                &self.current_question.as_ref().map(|q| &q.question_id),
            )
            .field("questions_answered", &self.questions_answered)
            .field("total_questions", &self.total_questions)
            .field("has_summary", &self.summary.is_some())
            .field("error", &self.error)
            .field("answer_started_at", &self.answer_started_at)
            .finish_non_exhaustive()
    }
}
