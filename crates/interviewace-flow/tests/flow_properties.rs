// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for the interview flow store.

use std::sync::Arc;

use interviewace_core::{InterviewSession, InterviewSummary, Question};
use interviewace_flow::{InterviewFlow, ManualClock, Phase};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    SetSession(u32),
    SetCurrentQuestion(u32),
    SetSubmitting,
    SetFeedback,
    SetNoMoreQuestions,
    SetSummary,
    SetError,
    IncrementAnswered,
    StartAnswerTimer,
    Advance(i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (5u32..=30).prop_map(Op::SetSession),
        (0u32..30).prop_map(Op::SetCurrentQuestion),
        Just(Op::SetSubmitting),
        Just(Op::SetFeedback),
        Just(Op::SetNoMoreQuestions),
        Just(Op::SetSummary),
        Just(Op::SetError),
        Just(Op::IncrementAnswered),
        Just(Op::StartAnswerTimer),
        (0i64..120_000).prop_map(Op::Advance),
    ]
}

fn session(question_count: u32) -> InterviewSession {
    InterviewSession {
        id: "sess".into(),
        user_id: "user".into(),
        resume_id: None,
        difficulty: "mixed".into(),
        question_count,
        focus_areas: None,
        started_at: "2026-01-01T00:00:00Z".into(),
        completed_at: None,
        final_score: None,
        feedback_summary: None,
        score_breakdown: None,
    }
}

fn question(order_index: u32) -> Question {
    Question {
        question_id: format!("q{order_index}"),
        question_text: "Describe a system you designed.".into(),
        category: Some(interviewace_core::types::QuestionCategory::SystemDesign),
        difficulty: "hard".into(),
        order_index,
    }
}

fn summary() -> InterviewSummary {
    InterviewSummary {
        session_id: "sess".into(),
        final_score: 6.0,
        feedback_summary: "Fine".into(),
        question_feedback: vec![],
        score_breakdown: None,
        strengths: None,
        weaknesses: None,
    }
}

fn apply(flow: &mut InterviewFlow, clock: &ManualClock, op: &Op) {
    match op {
        Op::SetSession(n) => flow.set_session(session(*n)),
        Op::SetCurrentQuestion(i) => flow.set_current_question(question(*i)),
        Op::SetSubmitting => flow.set_submitting(),
        Op::SetFeedback => flow.set_feedback(),
        Op::SetNoMoreQuestions => flow.set_no_more_questions(),
        Op::SetSummary => flow.set_summary(summary()),
        Op::SetError => flow.set_error("failure"),
        Op::IncrementAnswered => flow.increment_answered(),
        Op::StartAnswerTimer => flow.start_answer_timer(),
        Op::Advance(ms) => clock.advance(*ms),
    }
}

fn assert_initial(flow: &InterviewFlow) {
    assert_eq!(flow.phase(), Phase::Configuring);
    assert!(flow.session().is_none());
    assert!(flow.current_question().is_none());
    assert_eq!(flow.questions_answered(), 0);
    assert_eq!(flow.total_questions(), 0);
    assert!(flow.summary().is_none());
    assert!(flow.error().is_none());
    assert!(flow.answer_started_at().is_none());
    assert_eq!(flow.elapsed_seconds(), 0);
}

proptest! {
    #[test]
    fn phase_is_always_one_of_the_seven(ops in prop::collection::vec(op(), 0..64)) {
        let clock = Arc::new(ManualClock::new(0));
        let mut flow = InterviewFlow::with_clock(clock.clone());
        for op in &ops {
            apply(&mut flow, &clock, op);
            prop_assert!(Phase::ALL.contains(&flow.phase()));
        }
    }

    #[test]
    fn reset_restores_initial_values(ops in prop::collection::vec(op(), 0..64)) {
        let clock = Arc::new(ManualClock::new(0));
        let mut flow = InterviewFlow::with_clock(clock.clone());
        for op in &ops {
            apply(&mut flow, &clock, op);
        }
        flow.reset_interview();
        assert_initial(&flow);
    }

    #[test]
    fn set_error_depends_only_on_session(ops in prop::collection::vec(op(), 0..64)) {
        let clock = Arc::new(ManualClock::new(0));
        let mut flow = InterviewFlow::with_clock(clock.clone());
        for op in &ops {
            apply(&mut flow, &clock, op);
        }
        let had_session = flow.session().is_some();
        flow.set_error("boom");
        let expected = if had_session { Phase::Answering } else { Phase::Configuring };
        prop_assert_eq!(flow.phase(), expected);
        prop_assert_eq!(flow.error(), Some("boom"));
    }

    #[test]
    fn answered_counter_counts_increments(ops in prop::collection::vec(op(), 0..64)) {
        let clock = Arc::new(ManualClock::new(0));
        let mut flow = InterviewFlow::with_clock(clock.clone());
        let mut expected = 0u32;
        for op in &ops {
            let before = flow.questions_answered();
            apply(&mut flow, &clock, op);
            prop_assert!(flow.questions_answered() >= before);
            if matches!(op, Op::IncrementAnswered) {
                expected += 1;
            }
        }
        prop_assert_eq!(flow.questions_answered(), expected);
    }

    #[test]
    fn elapsed_matches_rounded_delta(start in 0i64..10_000_000_000, delta in 0i64..3_600_000) {
        let clock = Arc::new(ManualClock::new(start));
        let mut flow = InterviewFlow::with_clock(clock.clone());
        prop_assert_eq!(flow.elapsed_seconds(), 0);
        flow.set_current_question(question(0));
        clock.advance(delta);
        let expected = ((delta as f64) / 1000.0).round() as u64;
        prop_assert_eq!(flow.elapsed_seconds(), expected);
    }

    #[test]
    fn total_questions_tracks_latest_session(counts in prop::collection::vec(5u32..=30, 1..8)) {
        let mut flow = InterviewFlow::new();
        for n in &counts {
            flow.set_session(session(*n));
            prop_assert_eq!(flow.phase(), Phase::Loading);
            prop_assert_eq!(flow.total_questions(), *n);
            prop_assert_eq!(flow.session(), Some(&session(*n)));
        }
    }
}
