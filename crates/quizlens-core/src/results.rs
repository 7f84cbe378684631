//! Derived, question-focused result types produced by aggregation.
//!
//! These structures are recomputed in full on every aggregation call and
//! exist only to be rendered or serialized; nothing mutates them afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-question summaries keyed by question id.
pub type QuestionMap = BTreeMap<String, QuestionSummary>;

/// Aggregated statistics for one question across all users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSummary {
    /// Question id (the section key).
    pub key: String,
    /// Display text of the question.
    pub title: String,
    /// Per-part summaries keyed by part id.
    pub answers: BTreeMap<String, AnswerSummary>,
    /// Number of users who answered every part of this question correctly.
    pub correct: u32,
    /// Number of users who answered this question at all.
    pub total: u32,
    /// Point statistics over all users who answered this question.
    pub points: PointsSummary,
}

impl QuestionSummary {
    /// The first whitespace-separated token of the title, used as the short
    /// axis label in the points overview chart.
    pub fn leading_title_token(&self) -> &str {
        self.title.split_whitespace().next().unwrap_or(&self.title)
    }
}

/// Aggregated statistics for one answer row of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSummary {
    /// Part id.
    pub key: String,
    /// Prompt text of this answer row.
    pub text: String,
    /// The canonical solution, taken from the first-seen definition.
    pub solution: Value,
    /// Every submitted value, keyed by user id.
    pub inputs: BTreeMap<String, InputRecord>,
    /// Number of correct inputs.
    pub correct: u32,
    /// Number of inputs recorded.
    pub total: u32,
}

impl AnswerSummary {
    /// Whether the solution marks this row as one the user should check.
    ///
    /// Boolean solutions are the common case; other JSON values follow
    /// truthiness so that charts can color the marker for any dataset.
    pub fn solution_checked(&self) -> bool {
        match &self.solution {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}

/// One user's submitted value for one answer row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    /// User id.
    pub key: String,
    /// Display name of the user.
    pub name: String,
    /// The submitted value.
    pub input: Value,
    /// Whether the input matches the canonical solution.
    pub correct: bool,
}

/// Minimum, maximum, and mean points achieved on one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsSummary {
    pub min: u32,
    pub max: u32,
    pub average: f64,
}

impl PointsSummary {
    /// Format the average for display: bare integer when whole, one decimal
    /// otherwise.
    pub fn format_average(&self) -> String {
        if self.average.fract() == 0.0 {
            format!("{}", self.average as u64)
        } else {
            format!("{:.1}", self.average)
        }
    }
}
