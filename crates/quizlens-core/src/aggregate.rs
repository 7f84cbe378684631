//! The aggregation transform: user-focused submissions become
//! question-focused statistics.
//!
//! This is a pure function over its input. Every call accumulates into a
//! freshly allocated output; the caller's data is only borrowed.

use std::collections::BTreeMap;

use crate::error::AggregateError;
use crate::model::{AnsweredSection, SubmissionMap};
use crate::results::{AnswerSummary, InputRecord, PointsSummary, QuestionMap, QuestionSummary};

/// Points a user scores on one question: twice the correctly answered parts
/// minus the part count, floored at zero.
///
/// The range is `[0, part_count]`: a fully correct question yields one point
/// per part, and anything at or below half-correct yields zero.
pub fn question_points(correct_parts: u32, part_count: u32) -> u32 {
    (2 * correct_parts).saturating_sub(part_count)
}

/// Accumulates one question's summary while users are folded in.
///
/// Min/max points stay undefined until the first sample; `finish` resolves
/// them and guards the average against an empty question.
#[derive(Debug)]
struct QuestionBuilder {
    key: String,
    title: String,
    answers: BTreeMap<String, AnswerSummary>,
    correct: u32,
    total: u32,
    points_min: Option<u32>,
    points_max: Option<u32>,
    points_sum: u64,
}

impl QuestionBuilder {
    /// Initialize from the first-seen definition of a question.
    fn new(section: &AnsweredSection) -> Self {
        let answers = section
            .parts
            .iter()
            .map(|part| {
                (
                    part.key.clone(),
                    AnswerSummary {
                        key: part.key.clone(),
                        text: part.text.clone(),
                        solution: part.solution.clone(),
                        inputs: BTreeMap::new(),
                        correct: 0,
                        total: 0,
                    },
                )
            })
            .collect();

        Self {
            key: section.key.clone(),
            title: section.title.clone(),
            answers,
            correct: 0,
            total: 0,
            points_min: None,
            points_max: None,
            points_sum: 0,
        }
    }

    fn record_points(&mut self, points: u32) {
        self.points_min = Some(self.points_min.map_or(points, |min| min.min(points)));
        self.points_max = Some(self.points_max.map_or(points, |max| max.max(points)));
        self.points_sum += u64::from(points);
    }

    fn finish(self) -> QuestionSummary {
        let average = if self.total == 0 {
            0.0
        } else {
            self.points_sum as f64 / f64::from(self.total)
        };

        QuestionSummary {
            key: self.key,
            title: self.title,
            answers: self.answers,
            correct: self.correct,
            total: self.total,
            points: PointsSummary {
                min: self.points_min.unwrap_or(0),
                max: self.points_max.unwrap_or(0),
                average,
            },
        }
    }
}

/// Convert user-focused submissions into question-focused summaries.
///
/// Users are visited in ascending key order, their sections in submission
/// order. The first user to carry a question contributes its definition
/// (title, part texts, solutions); every later input is graded against that
/// first-seen solution. A part key absent from the first-seen definition
/// fails the whole call with [`AggregateError::MissingAnswerKey`] and no
/// partial result is returned.
///
/// Full credit on a question and its point score both use the submitting
/// user's own part list, so a user carrying fewer parts is graded over the
/// parts they answered.
pub fn aggregate(submissions: &SubmissionMap) -> Result<QuestionMap, AggregateError> {
    let mut builders: BTreeMap<String, QuestionBuilder> = BTreeMap::new();

    for user in submissions.values() {
        for section in &user.sections {
            let builder = builders
                .entry(section.key.clone())
                .or_insert_with(|| QuestionBuilder::new(section));

            let mut correct_parts = 0u32;
            for part in &section.parts {
                let answer = builder.answers.get_mut(&part.key).ok_or_else(|| {
                    AggregateError::MissingAnswerKey {
                        question: section.key.clone(),
                        part: part.key.clone(),
                        user: user.key.clone(),
                    }
                })?;

                if part.solution != answer.solution {
                    tracing::warn!(
                        "question '{}' part '{}': user '{}' carries a different solution, \
                         grading against the first-seen definition",
                        section.key,
                        part.key,
                        user.key
                    );
                }

                let correct = part.input == answer.solution;
                answer.inputs.insert(
                    user.key.clone(),
                    InputRecord {
                        key: user.key.clone(),
                        name: user.name.clone(),
                        input: part.input.clone(),
                        correct,
                    },
                );
                if correct {
                    answer.correct += 1;
                    correct_parts += 1;
                }
                answer.total += 1;
            }

            let part_count = section.parts.len() as u32;
            if correct_parts == part_count {
                builder.correct += 1;
            }
            builder.total += 1;
            builder.record_points(question_points(correct_parts, part_count));
        }
    }

    Ok(builders
        .into_iter()
        .map(|(key, builder)| (key, builder.finish()))
        .collect())
}
