//! The `quizlens compare` command.

use std::path::PathBuf;

use anyhow::Result;

use quizlens_core::report::AnalyticsReport;

use crate::config::load_config_from;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: Option<f64>,
    fail_on_decline: bool,
    format: String,
) -> Result<()> {
    let threshold = match threshold {
        Some(t) => t,
        None => load_config_from(None)?.compare_threshold,
    };

    let baseline = AnalyticsReport::load_json(&baseline_path)?;
    let current = AnalyticsReport::load_json(&current_path)?;

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Comparison: {} declines, {} improvements, {} unchanged",
                report.declines.len(),
                report.improvements.len(),
                report.unchanged
            );

            if !report.declines.is_empty() {
                println!("\nDeclines:");
                for d in &report.declines {
                    println!(
                        "  {} ({}) {:.2} -> {:.2} ({:+.2} points)",
                        d.question, d.title, d.baseline_average, d.current_average, d.delta
                    );
                }
            }

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &report.improvements {
                    println!(
                        "  {} ({}) {:.2} -> {:.2} ({:+.2} points)",
                        i.question, i.title, i.baseline_average, i.current_average, i.delta
                    );
                }
            }

            if report.new_questions > 0 {
                println!("\n{} new question(s)", report.new_questions);
            }
            if report.removed_questions > 0 {
                println!("{} removed question(s)", report.removed_questions);
            }
        }
    }

    if fail_on_decline && report.has_declines() {
        std::process::exit(1);
    }

    Ok(())
}
