// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs a live interview against the gateway.
//!
//! The driver keeps two views in step: the [`InterviewFlow`] snapshot a UI
//! renders from, and an [`AnyInterview`] that is narrowed to the required
//! phase before every operation. An out-of-order call fails with
//! [`ClientError::Flow`] and touches neither.
//!
//! Request failures go to `InterviewFlow::set_error`. The typestate side
//! only moves on the edges it has: a failed submission returns to
//! `answering` with the question kept; other failures leave it where it was
//! so the operation can be retried.

use std::sync::Arc;

use interviewace_core::types::{AnswerEnvelope, LoginRequest, LoginResponse, RegisterRequest};
use interviewace_core::{
    AnswerSubmission, InterviewSession, InterviewStartRequest, InterviewSummary, Question, User,
    Validate,
};
use interviewace_flow::{AnyInterview, Clock, FlowError, InterviewFlow, Phase, SystemClock};
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::error::ClientError;

/// What happened after an answer was accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// The next question is now current.
    Next(Question),
    /// That was the last question; call [`InterviewDriver::complete`].
    Finished,
}

pub struct InterviewDriver {
    api: ApiClient,
    flow: InterviewFlow,
    machine: AnyInterview,
    clock: Arc<dyn Clock>,
}

impl InterviewDriver {
    pub fn new(api: ApiClient) -> Self {
        Self::with_clock(api, Arc::new(SystemClock))
    }

    /// Drive with an explicit clock; the store and the typestate share it.
    pub fn with_clock(api: ApiClient, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            flow: InterviewFlow::with_clock(clock.clone()),
            machine: AnyInterview::default(),
            clock,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn flow(&self) -> &InterviewFlow {
        &self.flow
    }

    pub fn interview(&self) -> &AnyInterview {
        &self.machine
    }

    pub fn phase(&self) -> Phase {
        self.flow.phase()
    }

    // --- auth ---

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let response = self
            .api
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        info!(user_id = %response.user.id, "logged in");
        Ok(response)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ClientError> {
        self.api.register(request).await
    }

    pub async fn logout(&mut self) -> Result<(), ClientError> {
        self.reset();
        self.api.logout().await
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        self.api.me().await
    }

    // --- interview ---

    /// Start an interview. Only from `configuring`.
    pub async fn start(
        &mut self,
        config: InterviewStartRequest,
    ) -> Result<InterviewSession, ClientError> {
        self.machine.require(&[Phase::Configuring])?;
        config.validate()?;

        match self.api.start_interview(&config).await {
            Ok(session) => {
                debug!(session_id = %session.id, questions = session.question_count, "interview started");
                self.flow.set_session(session.clone());
                let configuring = self.take_machine().try_into_configuring();
                self.machine = match configuring {
                    Ok(interview) => interview.start(session.clone()).into(),
                    Err(other) => other,
                };
                Ok(session)
            }
            Err(err) => {
                self.record_error(&err);
                let configuring = self.take_machine().try_into_configuring();
                self.machine = match configuring {
                    Ok(interview) => interview.fail(error_message(&err)).into(),
                    Err(other) => other,
                };
                Err(err)
            }
        }
    }

    /// Load the first question. Only from `loading`.
    ///
    /// `None` means the interview had no questions and is now `completing`.
    pub async fn fetch_next_question(&mut self) -> Result<Option<Question>, ClientError> {
        self.machine.require(&[Phase::Loading])?;
        let session_id = self.session_id()?;

        match self.api.next_question(&session_id).await {
            Ok(Some(question)) => {
                self.flow.set_current_question(question.clone());
                let now = self.clock.now_millis();
                let loading = self.take_machine().try_into_loading();
                self.machine = match loading {
                    Ok(interview) => interview.question(question.clone(), now).into(),
                    Err(other) => other,
                };
                Ok(Some(question))
            }
            Ok(None) => {
                self.flow.set_no_more_questions();
                let loading = self.take_machine().try_into_loading();
                self.machine = match loading {
                    Ok(interview) => interview.no_more_questions().into(),
                    Err(other) => other,
                };
                Ok(None)
            }
            Err(err) => {
                self.record_error(&err);
                Err(err)
            }
        }
    }

    /// Submit an answer to the current question. Only from `answering`.
    ///
    /// The time taken is measured from when the question became current.
    /// Validation failures are returned without any state change.
    pub async fn submit_answer(&mut self, answer_text: &str) -> Result<AnswerOutcome, ClientError> {
        let answering = match self.take_machine().try_into_answering() {
            Ok(interview) => interview,
            Err(other) => return Err(self.put_back(other, Phase::Answering)),
        };

        let elapsed = answering.elapsed_seconds(self.clock.now_millis());
        let envelope = AnswerEnvelope {
            question_id: answering.question().question_id.clone(),
            answer: AnswerSubmission {
                answer_text: answer_text.to_string(),
                time_taken_seconds: Some(u32::try_from(elapsed).unwrap_or(u32::MAX)),
            },
        };
        if let Err(errors) = envelope.answer.validate() {
            self.machine = answering.into();
            return Err(errors.into());
        }

        let session_id = answering.session().id.clone();
        self.flow.set_submitting();
        let submitting = answering.submit();
        self.machine = submitting.clone().into();

        match self.api.submit_answer(&session_id, &envelope).await {
            Ok(next) => {
                self.flow.set_feedback();
                self.flow.increment_answered();
                let feedback = submitting.evaluated();
                debug!(
                    question_id = %envelope.question_id,
                    answered = feedback.answered(),
                    "answer accepted"
                );
                match next {
                    Some(question) => {
                        self.flow.set_current_question(question.clone());
                        let now = self.clock.now_millis();
                        self.machine = feedback.next_question(question.clone(), now).into();
                        Ok(AnswerOutcome::Next(question))
                    }
                    None => {
                        self.flow.set_no_more_questions();
                        self.machine = feedback.no_more_questions().into();
                        Ok(AnswerOutcome::Finished)
                    }
                }
            }
            Err(err) => {
                self.record_error(&err);
                self.machine = submitting.fail(error_message(&err)).into();
                Err(err)
            }
        }
    }

    /// Close the interview and fetch the summary. Only from `completing`.
    pub async fn complete(&mut self) -> Result<InterviewSummary, ClientError> {
        self.machine.require(&[Phase::Completing])?;
        let session_id = self.session_id()?;

        match self.api.complete_interview(&session_id).await {
            Ok(summary) => {
                info!(session_id = %session_id, score = summary.final_score, "interview completed");
                self.flow.set_summary(summary.clone());
                let completing = self.take_machine().try_into_completing();
                self.machine = match completing {
                    Ok(interview) => interview.finish(summary.clone()).into(),
                    Err(other) => other,
                };
                Ok(summary)
            }
            Err(err) => {
                self.record_error(&err);
                Err(err)
            }
        }
    }

    /// Drop all interview state; available from every phase.
    pub fn reset(&mut self) {
        self.flow.reset_interview();
        self.machine = self.take_machine().reset().into();
    }

    fn take_machine(&mut self) -> AnyInterview {
        std::mem::take(&mut self.machine)
    }

    /// Put a mismatched interview back and report the phase error.
    fn put_back(&mut self, interview: AnyInterview, expected: Phase) -> ClientError {
        let actual = interview.phase();
        self.machine = interview;
        FlowError::WrongPhase { expected, actual }.into()
    }

    fn session_id(&self) -> Result<String, ClientError> {
        self.machine
            .session()
            .map(|s| s.id.clone())
            .ok_or_else(|| ClientError::Decode("no active interview session".into()))
    }

    fn record_error(&mut self, err: &ClientError) {
        warn!(phase = %self.flow.phase(), error = %err, "interview step failed");
        self.flow.set_error(error_message(err));
    }
}

impl std::fmt::Debug for InterviewDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterviewDriver")
            .field("base_url", &self.api.base_url())
            .field("flow", &self.flow)
            .field("interview", &self.machine.phase())
            .finish()
    }
}

/// The text a UI shows for a failed step.
pub fn error_message(err: &ClientError) -> String {
    match err {
        ClientError::AuthenticationRequired(_) => {
            "Your session has expired. Please log in again.".to_string()
        }
        ClientError::Transport(e) if e.is_timeout() => {
            "The request timed out. Please try again.".to_string()
        }
        ClientError::Transport(_) => "Could not reach the server. Please try again.".to_string(),
        other => other.to_string(),
    }
}
