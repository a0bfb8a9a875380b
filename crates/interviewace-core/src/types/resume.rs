// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resume contracts, including the analysis sum type.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Processing status of an uploaded resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResumeStatus {
    Pending,
    Processing,
    Analyzed,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field_of_study: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub is_current: bool,
}

/// The analysis shape produced by the resume analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredAnalysis {
    pub skills: Vec<String>,
    pub summary: String,
    pub confidence_score: f64,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub job_titles: Vec<String>,
    #[serde(default)]
    pub years_of_experience: f64,
}

/// Resume analysis, classified once at deserialization.
///
/// Anything that does not match a known shape is kept verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResumeAnalysis {
    Structured(StructuredAnalysis),
    Unknown(serde_json::Value),
}

impl ResumeAnalysis {
    pub fn as_structured(&self) -> Option<&StructuredAnalysis> {
        match self {
            ResumeAnalysis::Structured(a) => Some(a),
            ResumeAnalysis::Unknown(_) => None,
        }
    }
}

/// Body of `GET /resume/analysis/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysisResponse {
    pub resume_id: String,
    #[serde(default)]
    pub analysis: Option<ResumeAnalysis>,
    pub status: ResumeStatus,
    pub created_at: String,
    #[serde(default)]
    pub processing_time: Option<f64>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
}
