//! Core trait definitions for report rendering and charting.
//!
//! These traits are implemented by the `quizlens-report` crate.

use crate::results::{QuestionMap, QuestionSummary};

/// Trait for renderers that turn question statistics into a table document.
pub trait TableRenderer {
    /// Render all questions, one row per question.
    ///
    /// `detail` is invoked once per row in iteration order; markup it
    /// returns is attached to that row, `None` leaves the row bare. An
    /// error from the callback aborts the render.
    fn render(
        &self,
        questions: &QuestionMap,
        detail: &mut dyn FnMut(&QuestionSummary) -> anyhow::Result<Option<String>>,
    ) -> anyhow::Result<String>;
}

/// Trait for chart backends.
///
/// A surface produces self-contained chart documents: SVG markup, chart
/// library settings, whatever the backend emits. Callers decide where the
/// output goes.
pub trait ChartSurface {
    /// Chart one question: per-part correct and incorrect answer counts.
    fn render_question_detail(&self, question: &QuestionSummary) -> anyhow::Result<String>;

    /// Chart the whole run: minimum, average and maximum points per question.
    fn render_points_overview(&self, questions: &QuestionMap) -> anyhow::Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::PointsSummary;
    use std::collections::BTreeMap;

    struct CountingRenderer;

    impl TableRenderer for CountingRenderer {
        fn render(
            &self,
            questions: &QuestionMap,
            detail: &mut dyn FnMut(&QuestionSummary) -> anyhow::Result<Option<String>>,
        ) -> anyhow::Result<String> {
            let mut out = String::new();
            for question in questions.values() {
                out.push_str(&question.key);
                if let Some(markup) = detail(question)? {
                    out.push_str(&markup);
                }
                out.push('\n');
            }
            Ok(out)
        }
    }

    fn make_questions(keys: &[&str]) -> QuestionMap {
        keys.iter()
            .map(|key| {
                (
                    key.to_string(),
                    QuestionSummary {
                        key: key.to_string(),
                        title: format!("{key} Title"),
                        answers: BTreeMap::new(),
                        correct: 0,
                        total: 0,
                        points: PointsSummary {
                            min: 0,
                            max: 0,
                            average: 0.0,
                        },
                    },
                )
            })
            .collect()
    }

    #[test]
    fn detail_callback_runs_once_per_row() {
        let questions = make_questions(&["q1", "q2", "q3"]);
        let mut calls = 0;

        let out = CountingRenderer
            .render(&questions, &mut |_| {
                calls += 1;
                Ok(None)
            })
            .unwrap();

        assert_eq!(calls, 3);
        assert_eq!(out, "q1\nq2\nq3\n");
    }

    #[test]
    fn detail_markup_lands_on_its_row() {
        let questions = make_questions(&["q1", "q2"]);

        let out = CountingRenderer
            .render(&questions, &mut |q| {
                Ok((q.key == "q2").then(|| " <chart>".to_string()))
            })
            .unwrap();

        assert_eq!(out, "q1\nq2 <chart>\n");
    }

    #[test]
    fn detail_error_aborts_render() {
        let questions = make_questions(&["q1"]);

        let result = CountingRenderer.render(&questions, &mut |_| anyhow::bail!("chart failed"));
        assert!(result.is_err());
    }
}
