//! Highcharts configuration surface.
//!
//! Emits column-chart settings as pretty-printed JSON for embedding in a
//! page that loads Highcharts itself. Only declarative settings are
//! produced; the interactive formatter hooks of a hand-written chart stay
//! out of the JSON.

use anyhow::Result;
use serde_json::json;

use quizlens_core::results::{QuestionMap, QuestionSummary};
use quizlens_core::traits::ChartSurface;

/// Chart backend that renders Highcharts JSON settings.
#[derive(Debug, Default)]
pub struct HighchartsSurface;

impl ChartSurface for HighchartsSurface {
    /// Stacked column chart of per-part answer counts.
    ///
    /// Incorrect counts are emitted as `correct - total`, at or below zero,
    /// so normal stacking mirrors the counts around the zero line. A second
    /// x-axis linked to the category axis carries a colored solution marker
    /// per part.
    fn render_question_detail(&self, question: &QuestionSummary) -> Result<String> {
        let categories: Vec<String> = (1..=question.answers.len())
            .map(|i| format!("A{i}"))
            .collect();
        let markers: Vec<String> = question
            .answers
            .values()
            .map(|answer| {
                let color = if answer.solution_checked() {
                    "green"
                } else {
                    "red"
                };
                format!("<span style=\"color:{color}\">\u{2022}</span>")
            })
            .collect();
        let correct: Vec<u32> = question.answers.values().map(|a| a.correct).collect();
        let incorrect: Vec<i64> = question
            .answers
            .values()
            .map(|a| i64::from(a.correct) - i64::from(a.total))
            .collect();

        let config = json!({
            "chart": { "type": "column" },
            "title": { "text": question.title },
            "subtitle": { "text": format!("Answered by {} users.", question.total) },
            "xAxis": [
                { "categories": categories },
                {
                    "opposite": true,
                    "reversed": false,
                    "categories": markers,
                    "linkedTo": 0
                }
            ],
            "yAxis": { "title": { "text": "Number of users" } },
            "plotOptions": {
                "series": {
                    "borderWidth": 0,
                    "dataLabels": { "enabled": true },
                    "stacking": "normal"
                }
            },
            "series": [
                { "name": "answered correctly", "data": correct, "color": "limegreen" },
                { "name": "answered incorrectly", "data": incorrect, "color": "red" }
            ]
        });

        Ok(serde_json::to_string_pretty(&config)?)
    }

    /// Column chart of minimum, average and maximum points per question.
    fn render_points_overview(&self, questions: &QuestionMap) -> Result<String> {
        let data: Vec<&QuestionSummary> = questions.values().collect();
        let categories: Vec<&str> = data.iter().map(|q| q.leading_title_token()).collect();
        let minimums: Vec<u32> = data.iter().map(|q| q.points.min).collect();
        // Averages rounded to one decimal, matching the data labels.
        let averages: Vec<f64> = data
            .iter()
            .map(|q| (q.points.average * 10.0).round() / 10.0)
            .collect();
        let maximums: Vec<u32> = data.iter().map(|q| q.points.max).collect();

        let config = json!({
            "chart": { "type": "column" },
            "title": { "text": "Average points achieved" },
            "xAxis": {
                "categories": categories,
                "title": { "text": "Questions" }
            },
            "yAxis": { "title": { "text": "Points achieved" } },
            "tooltip": { "valueSuffix": " points" },
            "plotOptions": {
                "column": { "dataLabels": { "enabled": true } }
            },
            "series": [
                { "name": "Minimum", "data": minimums, "color": "red" },
                { "name": "Average", "data": averages, "color": "blue" },
                { "name": "Maximum", "data": maximums, "color": "limegreen" }
            ]
        });

        Ok(serde_json::to_string_pretty(&config)?)
    }
}
