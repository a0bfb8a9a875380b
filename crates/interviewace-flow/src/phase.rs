// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The closed set of interview phases.

use serde::{Deserialize, Serialize};

/// Phases in the interview flow FSM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Choosing question count, difficulty, and focus areas.
    #[default]
    Configuring,
    /// Session created, waiting for the first question.
    Loading,
    /// A question is on screen and the answer timer is running.
    Answering,
    /// Answer sent, waiting for the evaluation.
    Submitting,
    /// Evaluation received, before the next question arrives.
    Feedback,
    /// No questions left, waiting for the summary.
    Completing,
    /// Summary received.
    Summary,
}

impl Phase {
    /// Every phase, in lifecycle order.
    pub const ALL: [Phase; 7] = [
        Phase::Configuring,
        Phase::Loading,
        Phase::Answering,
        Phase::Submitting,
        Phase::Feedback,
        Phase::Completing,
        Phase::Summary,
    ];

    /// Whether a request to the upstream service is in flight in this phase.
    pub fn is_busy(self) -> bool {
        matches!(self, Phase::Loading | Phase::Submitting | Phase::Completing)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Configuring => write!(f, "configuring"),
            Phase::Loading => write!(f, "loading"),
            Phase::Answering => write!(f, "answering"),
            Phase::Submitting => write!(f, "submitting"),
            Phase::Feedback => write!(f, "feedback"),
            Phase::Completing => write!(f, "completing"),
            Phase::Summary => write!(f, "summary"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_display() {
        let names: Vec<String> = Phase::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            [
                "configuring",
                "loading",
                "answering",
                "submitting",
                "feedback",
                "completing",
                "summary"
            ]
        );
    }

    #[test]
    fn serde_matches_display() {
        for phase in Phase::ALL {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{phase}\""));
        }
    }

    #[test]
    fn default_is_configuring() {
        assert_eq!(Phase::default(), Phase::Configuring);
    }

    #[test]
    fn busy_phases() {
        assert!(Phase::Loading.is_busy());
        assert!(Phase::Submitting.is_busy());
        assert!(!Phase::Answering.is_busy());
        assert!(!Phase::Summary.is_busy());
    }
}
