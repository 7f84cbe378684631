//! Markdown report generator.

use anyhow::Result;

use quizlens_core::results::{QuestionMap, QuestionSummary};
use quizlens_core::traits::TableRenderer;

/// Renders question statistics as a pipe table.
#[derive(Debug, Default)]
pub struct MarkdownRenderer;

impl TableRenderer for MarkdownRenderer {
    fn render(
        &self,
        questions: &QuestionMap,
        detail: &mut dyn FnMut(&QuestionSummary) -> Result<Option<String>>,
    ) -> Result<String> {
        let mut md = String::new();

        md.push_str("| Question | Title | Correct | Answered | Min | Avg | Max |\n");
        md.push_str("|----------|-------|---------|----------|-----|-----|-----|\n");

        for question in questions.values() {
            md.push_str(&format!(
                "| {} | {} | {}/{} | {} | {} | {} | {} |\n",
                question.key,
                question.title.replace('|', "\\|"),
                question.correct,
                question.total,
                question.total,
                question.points.min,
                question.points.format_average(),
                question.points.max,
            ));

            if let Some(markup) = detail(question)? {
                md.push('\n');
                md.push_str(&markup);
                md.push('\n');
            }
        }

        Ok(md)
    }
}
