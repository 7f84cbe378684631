//! Core data model types for quizlens.
//!
//! These are the raw, user-focused input types: one record per student,
//! carrying the questions they answered together with the canonical
//! solutions, exactly as the quiz exports them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// All submissions of one dataset, keyed by user id.
///
/// A `BTreeMap` keeps users in ascending key order, so aggregation and
/// serialized output are deterministic for equal input.
pub type SubmissionMap = BTreeMap<String, UserSubmission>;

/// One student's quiz submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSubmission {
    /// Unique user id.
    pub key: String,
    /// Display name.
    pub name: String,
    /// The questions this user answered, in submission order.
    #[serde(default)]
    pub sections: Vec<AnsweredSection>,
}

/// One answered multiple-choice question within a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnsweredSection {
    /// Unique question id.
    pub key: String,
    /// Display text of the question.
    pub title: String,
    /// The answer rows of this question, in definition order.
    #[serde(default)]
    pub parts: Vec<AnsweredPart>,
}

/// One answer row of a question, with the canonical solution and the value
/// the user submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnsweredPart {
    /// Part id, unique within its section.
    pub key: String,
    /// Prompt text of this answer row.
    pub text: String,
    /// Canonical correct value.
    pub solution: Value,
    /// The submitted value. Null when the user left the row blank.
    #[serde(default)]
    pub input: Value,
}
