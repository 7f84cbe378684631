//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use quizlens_core::report::AnalyticsReport;
use quizlens_core::results::{QuestionMap, QuestionSummary};
use quizlens_core::traits::{ChartSurface, TableRenderer};

/// Escape a string for safe HTML insertion.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Renders question statistics as an HTML table.
///
/// Markup returned by the detail callback lands in a collapsible
/// full-width row below its question.
#[derive(Debug, Default)]
pub struct HtmlRenderer;

impl TableRenderer for HtmlRenderer {
    fn render(
        &self,
        questions: &QuestionMap,
        detail: &mut dyn FnMut(&QuestionSummary) -> Result<Option<String>>,
    ) -> Result<String> {
        let mut html = String::new();

        html.push_str("<table class=\"questions\">\n");
        html.push_str(
            "<thead><tr><th>Question</th><th>Title</th><th>Correct</th><th>Answered</th>\
             <th>Min</th><th>Avg</th><th>Max</th></tr></thead>\n",
        );
        html.push_str("<tbody>\n");

        for question in questions.values() {
            let row_class = if question.correct * 2 >= question.total {
                "pass"
            } else {
                "fail"
            };

            html.push_str(&format!(
                "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}/{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                row_class,
                html_escape(&question.key),
                html_escape(&question.title),
                question.correct,
                question.total,
                question.total,
                question.points.min,
                question.points.format_average(),
                question.points.max,
            ));

            if let Some(markup) = detail(question)? {
                html.push_str("<tr class=\"detail\"><td colspan=\"7\">\n");
                html.push_str(&format!(
                    "<details>\n<summary>Answer breakdown</summary>\n{markup}\n</details>\n"
                ));
                html.push_str("</td></tr>\n");
            }
        }

        html.push_str("</tbody></table>\n");
        Ok(html)
    }
}

/// Generate a full HTML page from an analytics report.
///
/// One detail chart per question row plus a points overview, both drawn by
/// the given surface.
pub fn render_page(report: &AnalyticsReport, charts: &dyn ChartSurface) -> Result<String> {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizlens report — {}</title>\n",
        html_escape(&report.title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>quizlens report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Dataset: <strong>{}</strong> | {} users | {} questions | {}</p>\n",
        html_escape(&report.title),
        report.user_count,
        report.questions.len(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Points overview chart
    if !report.questions.is_empty() {
        html.push_str("<section class=\"dashboard\">\n");
        html.push_str("<h2>Points overview</h2>\n");
        html.push_str(&charts.render_points_overview(&report.questions)?);
        html.push_str("</section>\n");
    }

    // Per-question table with inline detail charts
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Questions</h2>\n");
    let table = HtmlRenderer.render(&report.questions, &mut |question| {
        charts.render_question_detail(question).map(Some)
    })?;
    html.push_str(&table);
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    Ok(html)
}

/// Write an HTML report to a file.
pub fn write_html_report(
    report: &AnalyticsReport,
    charts: &dyn ChartSurface,
    path: &Path,
) -> Result<()> {
    let html = render_page(report, charts)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
tr.detail td { background: var(--bg); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::SvgChartSurface;
    use quizlens_core::results::{AnswerSummary, PointsSummary};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn make_answer(key: &str, correct: u32, total: u32) -> (String, AnswerSummary) {
        (
            key.to_string(),
            AnswerSummary {
                key: key.into(),
                text: format!("Statement {key}"),
                solution: json!(true),
                inputs: BTreeMap::new(),
                correct,
                total,
            },
        )
    }

    fn make_question(key: &str, title: &str, correct: u32, total: u32) -> QuestionSummary {
        QuestionSummary {
            key: key.into(),
            title: title.into(),
            answers: [make_answer("a", correct, total), make_answer("b", 0, total)]
                .into_iter()
                .collect(),
            correct,
            total,
            points: PointsSummary {
                min: 0,
                max: 2,
                average: 1.0,
            },
        }
    }

    fn make_test_report() -> AnalyticsReport {
        AnalyticsReport {
            id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
            title: "Unit 3 Quiz".into(),
            user_count: 2,
            questions: [
                ("q1".to_string(), make_question("q1", "Q1 Ownership", 2, 2)),
                ("q2".to_string(), make_question("q2", "Q2 Borrowing", 0, 2)),
            ]
            .into_iter()
            .collect(),
        }
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = render_page(&report, &SvgChartSurface::default()).unwrap();

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Unit 3 Quiz"));
        assert!(html.contains("Q1 Ownership"));
        assert!(html.contains("2 users"));
        assert!(html.contains("Points overview"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn renderer_inlines_detail_markup() {
        let report = make_test_report();
        let html = HtmlRenderer
            .render(&report.questions, &mut |q| {
                Ok((q.key == "q2").then(|| "<svg id=\"marker\"></svg>".to_string()))
            })
            .unwrap();

        assert!(html.contains("<svg id=\"marker\">"));
        assert_eq!(html.matches("Answer breakdown").count(), 1);
    }

    #[test]
    fn renderer_escapes_titles() {
        let questions: QuestionMap = [(
            "q1".to_string(),
            make_question("q1", "<script>alert(1)</script>", 1, 1),
        )]
        .into_iter()
        .collect();

        let html = HtmlRenderer.render(&questions, &mut |_| Ok(None)).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        write_html_report(&report, &SvgChartSurface::default(), &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
