//! Analytics report types with JSON persistence and cohort comparison.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::aggregate;
use crate::error::AggregateError;
use crate::model::SubmissionMap;
use crate::results::QuestionMap;

/// A complete analytics report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Dataset title.
    pub title: String,
    /// Number of users whose submissions were aggregated.
    pub user_count: usize,
    /// Per-question statistics.
    pub questions: QuestionMap,
}

impl AnalyticsReport {
    /// Aggregate a submission mapping into a fresh report.
    pub fn from_submissions(
        title: impl Into<String>,
        submissions: &SubmissionMap,
    ) -> Result<Self, AggregateError> {
        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            title: title.into(),
            user_count: submissions.len(),
            questions: aggregate(submissions)?,
        })
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AnalyticsReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against a baseline cohort.
    ///
    /// Questions are matched by key and compared on their average points.
    /// A delta beyond `threshold` points in either direction lands in
    /// `declines` or `improvements`; anything closer counts as unchanged.
    pub fn compare(&self, baseline: &AnalyticsReport, threshold: f64) -> ComparisonReport {
        let mut declines = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_questions = 0usize;

        for (key, current) in &self.questions {
            let Some(base) = baseline.questions.get(key) else {
                new_questions += 1;
                continue;
            };

            let delta = current.points.average - base.points.average;
            if delta < -threshold {
                declines.push(QuestionDelta {
                    question: key.clone(),
                    title: current.title.clone(),
                    baseline_average: base.points.average,
                    current_average: current.points.average,
                    delta,
                });
            } else if delta > threshold {
                improvements.push(QuestionDelta {
                    question: key.clone(),
                    title: current.title.clone(),
                    baseline_average: base.points.average,
                    current_average: current.points.average,
                    delta,
                });
            } else {
                unchanged += 1;
            }
        }

        let removed_questions = baseline
            .questions
            .keys()
            .filter(|k| !self.questions.contains_key(*k))
            .count();

        ComparisonReport {
            declines,
            improvements,
            unchanged,
            new_questions,
            removed_questions,
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Questions where average points went down.
    pub declines: Vec<QuestionDelta>,
    /// Questions where average points went up.
    pub improvements: Vec<QuestionDelta>,
    /// Questions with no significant change.
    pub unchanged: usize,
    /// Questions in current but not baseline.
    pub new_questions: usize,
    /// Questions in baseline but not current.
    pub removed_questions: usize,
}

/// A question whose average points moved between cohorts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDelta {
    pub question: String,
    pub title: String,
    pub baseline_average: f64,
    pub current_average: f64,
    pub delta: f64,
}

impl ComparisonReport {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} declines, {} improvements, {} unchanged\n\n",
            self.declines.len(),
            self.improvements.len(),
            self.unchanged
        ));

        if !self.declines.is_empty() {
            md.push_str("### Declines\n\n");
            md.push_str("| Question | Title | Baseline | Current | Delta |\n");
            md.push_str("|----------|-------|----------|---------|-------|\n");
            for d in &self.declines {
                md.push_str(&format!(
                    "| {} | {} | {:.2} | {:.2} | {:.2} |\n",
                    d.question, d.title, d.baseline_average, d.current_average, d.delta
                ));
            }
            md.push('\n');
        }

        if !self.improvements.is_empty() {
            md.push_str("### Improvements\n\n");
            md.push_str("| Question | Title | Baseline | Current | Delta |\n");
            md.push_str("|----------|-------|----------|---------|-------|\n");
            for i in &self.improvements {
                md.push_str(&format!(
                    "| {} | {} | {:.2} | {:.2} | +{:.2} |\n",
                    i.question, i.title, i.baseline_average, i.current_average, i.delta
                ));
            }
        }

        md
    }

    /// Returns true if any question declined.
    pub fn has_declines(&self) -> bool {
        !self.declines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnsweredPart, AnsweredSection, UserSubmission};
    use crate::results::{PointsSummary, QuestionSummary};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn make_question(key: &str, average: f64) -> QuestionSummary {
        QuestionSummary {
            key: key.into(),
            title: format!("{key} Title"),
            answers: BTreeMap::new(),
            correct: 1,
            total: 2,
            points: PointsSummary {
                min: 0,
                max: 2,
                average,
            },
        }
    }

    fn make_report(questions: Vec<(&str, f64)>) -> AnalyticsReport {
        AnalyticsReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            title: "Test".into(),
            user_count: 2,
            questions: questions
                .into_iter()
                .map(|(key, avg)| (key.to_string(), make_question(key, avg)))
                .collect(),
        }
    }

    #[test]
    fn from_submissions_counts_users() {
        let alice = UserSubmission {
            key: "alice".into(),
            name: "Alice".into(),
            sections: vec![AnsweredSection {
                key: "q1".into(),
                title: "Q1".into(),
                parts: vec![AnsweredPart {
                    key: "a".into(),
                    text: "T".into(),
                    solution: json!(true),
                    input: json!(true),
                }],
            }],
        };
        let submissions: SubmissionMap = [("alice".to_string(), alice)].into_iter().collect();

        let report = AnalyticsReport::from_submissions("Unit 3", &submissions).unwrap();
        assert_eq!(report.title, "Unit 3");
        assert_eq!(report.user_count, 1);
        assert_eq!(report.questions.len(), 1);
        assert_eq!(report.questions["q1"].correct, 1);
    }

    #[test]
    fn compare_identical_reports() {
        let baseline = make_report(vec![("q1", 1.5), ("q2", 0.5)]);
        let current = make_report(vec![("q1", 1.5), ("q2", 0.5)]);

        let report = current.compare(&baseline, 0.25);
        assert!(report.declines.is_empty());
        assert!(report.improvements.is_empty());
        assert_eq!(report.unchanged, 2);
    }

    #[test]
    fn compare_with_decline() {
        let baseline = make_report(vec![("q1", 1.5)]);
        let current = make_report(vec![("q1", 0.5)]);

        let report = current.compare(&baseline, 0.25);
        assert!(report.has_declines());
        assert_eq!(report.declines.len(), 1);
        assert_eq!(report.declines[0].question, "q1");
        assert!((report.declines[0].delta + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn compare_within_threshold_is_unchanged() {
        let baseline = make_report(vec![("q1", 1.5)]);
        let current = make_report(vec![("q1", 1.4)]);

        let report = current.compare(&baseline, 0.25);
        assert!(!report.has_declines());
        assert_eq!(report.unchanged, 1);
    }

    #[test]
    fn compare_with_new_and_removed() {
        let baseline = make_report(vec![("old_q", 1.0)]);
        let current = make_report(vec![("new_q", 1.0)]);

        let report = current.compare(&baseline, 0.25);
        assert_eq!(report.new_questions, 1);
        assert_eq!(report.removed_questions, 1);
    }

    #[test]
    fn json_roundtrip() {
        let report = make_report(vec![("q1", 1.5)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = AnalyticsReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.title, "Test");
        assert_eq!(loaded.questions.len(), 1);
        assert!((loaded.questions["q1"].points.average - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn markdown_output() {
        let baseline = make_report(vec![("q1", 1.5), ("q2", 0.5)]);
        let current = make_report(vec![("q1", 0.5), ("q2", 1.5)]);

        let report = current.compare(&baseline, 0.25);
        let md = report.to_markdown();
        assert!(md.contains("Declines"));
        assert!(md.contains("Improvements"));
        assert!(md.contains("q1"));
        assert!(md.contains("+1.00"));
    }
}
