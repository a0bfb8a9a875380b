// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `interviewace practice` command implementation.
//!
//! Logs in through a running gateway, then runs a mock interview in the
//! terminal: one question at a time, answers typed at a readline prompt,
//! and the summary printed at the end.

use std::io::Write;
use std::time::Duration;

use colored::Colorize;
use interviewace_client::{error_message, AnswerOutcome, ApiClient, ClientError, InterviewDriver};
use interviewace_config::model::InterviewAceConfig;
use interviewace_core::types::{Difficulty, QuestionCategory};
use interviewace_core::{InterviewStartRequest, InterviewSummary, Question};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;
use uuid::Uuid;

/// Environment variable read before prompting for the password.
pub const PASSWORD_ENV_VAR: &str = "INTERVIEWACE_PASSWORD";

/// Client-side deadline; a little above the gateway's upstream timeout.
const CLIENT_TIMEOUT_SLACK: Duration = Duration::from_secs(10);

/// Options for one practice run.
#[derive(Debug, Clone)]
pub struct PracticeOptions {
    pub email: String,
    pub question_count: u32,
    pub difficulty: Difficulty,
    pub resume_id: Option<Uuid>,
    pub focus_areas: Vec<String>,
}

impl PracticeOptions {
    fn start_request(&self) -> InterviewStartRequest {
        InterviewStartRequest {
            resume_id: self.resume_id,
            question_count: self.question_count,
            difficulty: self.difficulty,
            focus_areas: (!self.focus_areas.is_empty()).then(|| self.focus_areas.clone()),
        }
    }
}

/// Where answers come from.
pub trait AnswerSource {
    /// The answer to `question`, or `None` to abandon the interview.
    fn answer(&mut self, question: &Question) -> Option<String>;
}

/// Reads answers from the terminal. An empty line ends a multi-line answer.
pub struct TerminalAnswers {
    editor: DefaultEditor,
}

impl TerminalAnswers {
    pub fn new() -> Result<Self, ClientError> {
        let editor = DefaultEditor::new()
            .map_err(|e| ClientError::Decode(format!("failed to initialize readline: {e}")))?;
        Ok(Self { editor })
    }
}

impl AnswerSource for TerminalAnswers {
    fn answer(&mut self, _question: &Question) -> Option<String> {
        let mut lines = Vec::new();
        loop {
            let prompt = if lines.is_empty() {
                format!("{} ", "answer>".green())
            } else {
                format!("{} ", "......>".dimmed())
            };
            match self.editor.readline(&prompt) {
                Ok(line) if line.trim() == "/quit" => return None,
                Ok(line) if line.trim().is_empty() && !lines.is_empty() => break,
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => {
                    let _ = self.editor.add_history_entry(&line);
                    lines.push(line);
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return None,
                Err(e) => {
                    eprintln!("{}: {e}", "error".red());
                    return None;
                }
            }
        }
        Some(lines.join("\n"))
    }
}

/// Runs `interviewace practice` against `config.client.base_url`.
pub async fn run_practice(
    config: &InterviewAceConfig,
    options: PracticeOptions,
) -> Result<(), ClientError> {
    let timeout = config.upstream.timeout() + CLIENT_TIMEOUT_SLACK;
    let api = ApiClient::new(&config.client.base_url, timeout)?;
    let mut driver = InterviewDriver::new(api);

    let password = read_password()?;
    let login = driver.login(&options.email, &password).await?;
    println!(
        "{} {}",
        "signed in as".dimmed(),
        login.user.full_name.bold()
    );

    let mut answers = TerminalAnswers::new()?;
    let mut out = std::io::stdout();
    let result = run_interview(&mut driver, &options, &mut answers, &mut out).await;

    if let Err(e) = driver.logout().await {
        debug!(error = %e, "logout after practice failed");
    }
    result.map(|_| ())
}

/// Drive one interview from start to summary.
///
/// Returns `Ok(None)` when the answer source abandons the interview. A
/// failed submission is reported and the same question asked again.
pub async fn run_interview(
    driver: &mut InterviewDriver,
    options: &PracticeOptions,
    answers: &mut dyn AnswerSource,
    out: &mut dyn Write,
) -> Result<Option<InterviewSummary>, ClientError> {
    let session = driver.start(options.start_request()).await?;
    let _ = writeln!(
        out,
        "{} {} questions, {} difficulty",
        "interview started:".bold(),
        session.question_count,
        session.difficulty
    );

    let mut current = driver.fetch_next_question().await?;
    while let Some(question) = current.take() {
        let _ = writeln!(out, "\n{}", question_header(&question, driver));
        let _ = writeln!(out, "{}\n", question.question_text);

        let Some(text) = answers.answer(&question) else {
            let _ = writeln!(out, "{}", "interview abandoned".yellow());
            driver.reset();
            return Ok(None);
        };

        match driver.submit_answer(&text).await {
            Ok(AnswerOutcome::Next(next)) => current = Some(next),
            Ok(AnswerOutcome::Finished) => {}
            Err(ClientError::Validation(errors)) => {
                let _ = writeln!(out, "{}: {errors}", "invalid answer".yellow());
                current = Some(question);
            }
            Err(e) if e.is_auth_required() => return Err(e),
            Err(e) => {
                let _ = writeln!(out, "{}: {}", "error".red(), error_message(&e));
                current = Some(question);
            }
        }
    }

    let _ = writeln!(out, "\n{}", "evaluating your interview...".dimmed());
    let summary = driver.complete().await?;
    let _ = writeln!(out, "{}", render_summary(&summary));
    Ok(Some(summary))
}

fn question_header(question: &Question, driver: &InterviewDriver) -> String {
    let flow = driver.flow();
    let mut header = format!(
        "Question {} of {}",
        flow.questions_answered() + 1,
        flow.total_questions()
    );
    if let Some(category) = question.category.filter(|c| *c != QuestionCategory::Unknown) {
        header.push_str(&format!(" [{category}]"));
    }
    header.bold().cyan().to_string()
}

/// Human-readable summary block.
pub fn render_summary(summary: &InterviewSummary) -> String {
    let mut text = format!(
        "{}\n{} {:.1}/10\n\n{}\n",
        "interview complete".bold().green(),
        "score:".bold(),
        summary.final_score,
        summary.feedback_summary
    );
    if let Some(strengths) = summary.strengths.as_ref().filter(|s| !s.is_empty()) {
        text.push_str(&format!("\n{}\n", "strengths".bold()));
        for item in strengths {
            text.push_str(&format!("  + {item}\n"));
        }
    }
    if let Some(weaknesses) = summary.weaknesses.as_ref().filter(|w| !w.is_empty()) {
        text.push_str(&format!("\n{}\n", "to improve".bold()));
        for item in weaknesses {
            text.push_str(&format!("  - {item}\n"));
        }
    }
    for feedback in &summary.question_feedback {
        text.push_str(&format!(
            "\n{} {:.1}: {}",
            feedback.question_id.dimmed(),
            feedback.evaluation_score,
            feedback.feedback_comment
        ));
    }
    text
}

/// Password from the environment, else a hidden TTY prompt.
fn read_password() -> Result<String, ClientError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV_VAR)
        && !password.is_empty()
    {
        return Ok(password);
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        eprint!("Password: ");
        return rpassword::read_password()
            .map_err(|e| ClientError::Decode(format!("failed to read password: {e}")));
    }

    Err(ClientError::Decode(format!(
        "No password provided. Set {PASSWORD_ENV_VAR} or run interactively."
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use interviewace_flow::Phase;
    use interviewace_test_utils::TestHarness;

    struct Scripted(Vec<String>);

    impl AnswerSource for Scripted {
        fn answer(&mut self, _question: &Question) -> Option<String> {
            if self.0.is_empty() {
                None
            } else {
                Some(self.0.remove(0))
            }
        }
    }

    fn options(count: u32) -> PracticeOptions {
        PracticeOptions {
            email: "candidate@example.com".into(),
            question_count: count,
            difficulty: Difficulty::Easy,
            resume_id: None,
            focus_areas: vec!["rust".into()],
        }
    }

    async fn logged_in_driver(harness: &TestHarness) -> InterviewDriver {
        let api = ApiClient::new(harness.base_url(), Duration::from_secs(10)).unwrap();
        let driver = InterviewDriver::new(api);
        driver.login("candidate@example.com", "Secret123").await.unwrap();
        driver
    }

    #[test]
    fn start_request_omits_empty_focus_areas() {
        let mut opts = options(5);
        opts.focus_areas.clear();
        assert!(opts.start_request().focus_areas.is_none());
        assert_eq!(options(5).start_request().focus_areas.unwrap(), vec!["rust"]);
    }

    #[test]
    fn summary_lists_strengths_and_weaknesses() {
        let summary = InterviewSummary {
            session_id: "s-1".into(),
            final_score: 8.25,
            feedback_summary: "Good.".into(),
            question_feedback: vec![],
            score_breakdown: None,
            strengths: Some(vec!["clarity".into()]),
            weaknesses: Some(vec![]),
        };
        let text = render_summary(&summary);
        assert!(text.contains("8.2") || text.contains("8.3"));
        assert!(text.contains("+ clarity"));
        assert!(!text.contains("to improve"));
    }

    #[tokio::test]
    async fn scripted_interview_reaches_summary() {
        let harness = TestHarness::builder()
            .with_login("user")
            .with_interview("s-1", 5)
            .build()
            .await
            .unwrap();
        let mut driver = logged_in_driver(&harness).await;
        let mut answers = Scripted((1..=5).map(|i| format!("answer {i}")).collect());
        let mut out = Vec::new();

        let summary = run_interview(&mut driver, &options(5), &mut answers, &mut out)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(summary.session_id, "s-1");
        assert_eq!(driver.phase(), Phase::Summary);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Question 1 of 5"));
        assert!(printed.contains("Question 5 of 5"));
        assert!(printed.contains("[technical]"));
        assert!(printed.contains("interview complete"));
    }

    #[tokio::test]
    async fn abandoning_resets_the_flow() {
        let harness = TestHarness::builder()
            .with_login("user")
            .with_interview("s-1", 5)
            .build()
            .await
            .unwrap();
        let mut driver = logged_in_driver(&harness).await;
        let mut answers = Scripted(vec!["only one".into()]);
        let mut out = Vec::new();

        let result = run_interview(&mut driver, &options(5), &mut answers, &mut out)
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(driver.phase(), Phase::Configuring);
        assert!(String::from_utf8(out).unwrap().contains("abandoned"));
    }
}
