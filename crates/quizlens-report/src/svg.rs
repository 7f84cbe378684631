//! SVG chart surface.
//!
//! Draws self-contained SVG charts with no external assets, suitable for
//! inlining into the HTML report or writing straight to a file.

use anyhow::Result;

use quizlens_core::results::{QuestionMap, QuestionSummary};
use quizlens_core::traits::ChartSurface;

use crate::html::html_escape;

const MARGIN_LEFT: usize = 50;
const MARGIN_TOP: usize = 60;

// Question detail: one diverging column per part.
const BAR_WIDTH: usize = 40;
const BAR_GAP: usize = 24;
const PLOT_HALF: usize = 120;

// Points overview: three columns per question.
const GROUP_BAR: usize = 18;
const GROUP_INNER_GAP: usize = 4;
const GROUP_GAP: usize = 30;
const PLOT_HEIGHT: usize = 160;

const CORRECT_COLOR: &str = "limegreen";
const INCORRECT_COLOR: &str = "red";
const AVERAGE_COLOR: &str = "blue";

/// Chart backend that renders plain SVG markup.
#[derive(Debug, Default)]
pub struct SvgChartSurface;

impl ChartSurface for SvgChartSurface {
    /// Diverging stacked columns: correct answers grow up from the zero
    /// baseline, incorrect answers hang below it. A dot under each column
    /// marks whether the part's solution is affirmative.
    fn render_question_detail(&self, question: &QuestionSummary) -> Result<String> {
        let parts = question.answers.len();
        let width = MARGIN_LEFT + parts * (BAR_WIDTH + BAR_GAP) + 40;
        let height = MARGIN_TOP + 2 * PLOT_HALF + 56;
        let baseline = MARGIN_TOP + PLOT_HALF;

        let max_count = question
            .answers
            .values()
            .map(|a| a.correct.max(a.total.saturating_sub(a.correct)))
            .max()
            .unwrap_or(0)
            .max(1);
        let scale = PLOT_HALF as f64 / max_count as f64;

        let mut svg = format!(
            "<svg width=\"{width}\" height=\"{height}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
        );

        svg.push_str(&format!(
            "  <text x=\"{MARGIN_LEFT}\" y=\"24\" font-size=\"16\" font-weight=\"bold\" fill=\"currentColor\">{}</text>\n",
            html_escape(&question.title)
        ));
        svg.push_str(&format!(
            "  <text x=\"{MARGIN_LEFT}\" y=\"44\" font-size=\"12\" fill=\"#6b7280\">Answered by {} users.</text>\n",
            question.total
        ));

        // Zero baseline
        svg.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{baseline}\" x2=\"{}\" y2=\"{baseline}\" stroke=\"currentColor\" stroke-width=\"1\"/>\n",
            MARGIN_LEFT - 10,
            width - 30
        ));

        for (i, answer) in question.answers.values().enumerate() {
            let x = MARGIN_LEFT + i * (BAR_WIDTH + BAR_GAP);
            let center = x + BAR_WIDTH / 2;
            let incorrect = answer.total.saturating_sub(answer.correct);
            let correct_h = (answer.correct as f64 * scale).round() as usize;
            let incorrect_h = (incorrect as f64 * scale).round() as usize;
            let text = html_escape(&answer.text);

            svg.push_str(&format!(
                "  <rect x=\"{x}\" y=\"{}\" width=\"{BAR_WIDTH}\" height=\"{correct_h}\" fill=\"{CORRECT_COLOR}\">\n    <title>{text}: {} answered correctly</title>\n  </rect>\n",
                baseline - correct_h,
                answer.correct
            ));
            svg.push_str(&format!(
                "  <rect x=\"{x}\" y=\"{baseline}\" width=\"{BAR_WIDTH}\" height=\"{incorrect_h}\" fill=\"{INCORRECT_COLOR}\">\n    <title>{text}: {incorrect} answered incorrectly</title>\n  </rect>\n"
            ));

            svg.push_str(&format!(
                "  <text x=\"{center}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" text-anchor=\"middle\">A{}</text>\n",
                MARGIN_TOP + 2 * PLOT_HALF + 20,
                i + 1
            ));

            let marker = if answer.solution_checked() {
                CORRECT_COLOR
            } else {
                INCORRECT_COLOR
            };
            svg.push_str(&format!(
                "  <circle cx=\"{center}\" cy=\"{}\" r=\"5\" fill=\"{marker}\">\n    <title>{text}: solution is {}</title>\n  </circle>\n",
                MARGIN_TOP + 2 * PLOT_HALF + 36,
                answer.solution_checked()
            ));
        }

        svg.push_str("</svg>\n");
        Ok(svg)
    }

    /// Minimum, average and maximum points per question, grouped columns.
    fn render_points_overview(&self, questions: &QuestionMap) -> Result<String> {
        let group_width = 3 * GROUP_BAR + 2 * GROUP_INNER_GAP + GROUP_GAP;
        let width = MARGIN_LEFT + questions.len() * group_width + 40;
        let height = MARGIN_TOP + PLOT_HEIGHT + 44;
        let baseline = MARGIN_TOP + PLOT_HEIGHT;

        let max_points = questions
            .values()
            .map(|q| q.points.max)
            .max()
            .unwrap_or(0)
            .max(1);
        let scale = PLOT_HEIGHT as f64 / max_points as f64;

        let mut svg = format!(
            "<svg width=\"{width}\" height=\"{height}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
        );

        svg.push_str(&format!(
            "  <text x=\"{MARGIN_LEFT}\" y=\"24\" font-size=\"16\" font-weight=\"bold\" fill=\"currentColor\">Points achieved</text>\n"
        ));

        // Legend
        let legend = [
            ("Minimum", INCORRECT_COLOR),
            ("Average", AVERAGE_COLOR),
            ("Maximum", CORRECT_COLOR),
        ];
        for (i, (name, color)) in legend.iter().enumerate() {
            let x = MARGIN_LEFT + i * 100;
            svg.push_str(&format!(
                "  <rect x=\"{x}\" y=\"36\" width=\"10\" height=\"10\" fill=\"{color}\"/>\n"
            ));
            svg.push_str(&format!(
                "  <text x=\"{}\" y=\"45\" font-size=\"12\" fill=\"currentColor\">{name}</text>\n",
                x + 14
            ));
        }

        svg.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{baseline}\" x2=\"{}\" y2=\"{baseline}\" stroke=\"currentColor\" stroke-width=\"1\"/>\n",
            MARGIN_LEFT - 10,
            width - 30
        ));

        for (i, question) in questions.values().enumerate() {
            let group_x = MARGIN_LEFT + i * group_width;
            let title = html_escape(&question.title);
            let bars = [
                (
                    question.points.min as f64,
                    question.points.min.to_string(),
                    INCORRECT_COLOR,
                    "minimum",
                ),
                (
                    question.points.average,
                    question.points.format_average(),
                    AVERAGE_COLOR,
                    "average",
                ),
                (
                    question.points.max as f64,
                    question.points.max.to_string(),
                    CORRECT_COLOR,
                    "maximum",
                ),
            ];

            for (j, (value, label, color, name)) in bars.iter().enumerate() {
                let x = group_x + j * (GROUP_BAR + GROUP_INNER_GAP);
                let bar_h = (value * scale).round() as usize;

                svg.push_str(&format!(
                    "  <rect x=\"{x}\" y=\"{}\" width=\"{GROUP_BAR}\" height=\"{bar_h}\" fill=\"{color}\">\n    <title>{title}: {name} {label} points</title>\n  </rect>\n",
                    baseline - bar_h
                ));
                svg.push_str(&format!(
                    "  <text x=\"{}\" y=\"{}\" font-size=\"10\" fill=\"currentColor\" text-anchor=\"middle\">{label}</text>\n",
                    x + GROUP_BAR / 2,
                    baseline - bar_h - 4
                ));
            }

            svg.push_str(&format!(
                "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" text-anchor=\"middle\">{}</text>\n",
                group_x + (3 * GROUP_BAR + 2 * GROUP_INNER_GAP) / 2,
                baseline + 18,
                html_escape(question.leading_title_token())
            ));
        }

        svg.push_str("</svg>\n");
        Ok(svg)
    }
}
