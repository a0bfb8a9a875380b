// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request/response contracts exchanged with the upstream service.

pub mod auth;
pub mod common;
pub mod interview;
pub mod resume;

pub use auth::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, ResetPasswordRequest,
    TokenPair, User, UserRole,
};
pub use common::{ApiErrorBody, ErrorDetail, MessageResponse, PaginatedResponse, ValidationItem};
pub use interview::{
    AnswerEnvelope, AnswerSubmission, Difficulty, InterviewSession, InterviewStartRequest,
    InterviewSummary, Question, QuestionCategory, QuestionFeedback,
};
pub use resume::{
    Education, Experience, ResumeAnalysis, ResumeAnalysisResponse, ResumeStatus,
    StructuredAnalysis,
};
