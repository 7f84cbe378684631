//! The `quizlens analyze` command.

use std::path::PathBuf;

use anyhow::Result;

use quizlens_core::parser;
use quizlens_core::report::AnalyticsReport;
use quizlens_core::traits::TableRenderer;
use quizlens_report::html::write_html_report;
use quizlens_report::markdown::MarkdownRenderer;
use quizlens_report::svg::SvgChartSurface;

use crate::commands::validate::warning_prefix;
use crate::config::load_config_from;

pub fn execute(
    input: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    strict: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    // Load config; flags override it
    let config = load_config_from(config_path.as_deref())?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let formats: Vec<String> = match &format {
        Some(f) => f.split(',').map(|s| s.trim().to_string()).collect(),
        None => config.formats.clone(),
    };
    let strict = strict || config.strict;

    // Load datasets
    let sets = if input.is_dir() {
        parser::load_submission_directory(&input)?
    } else {
        vec![parser::parse_submissions(&input)?]
    };
    anyhow::ensure!(!sets.is_empty(), "no .json datasets in {}", input.display());

    for set in &sets {
        // Surface validation warnings before aggregating
        let warnings = parser::validate_submissions(&set.submissions);
        for w in &warnings {
            eprintln!("{} WARNING: {}", warning_prefix(w), w.message);
        }
        if strict && !warnings.is_empty() {
            anyhow::bail!(
                "{} validation warning(s) in dataset '{}'",
                warnings.len(),
                set.title
            );
        }

        let report = AnalyticsReport::from_submissions(set.title.clone(), &set.submissions)?;

        eprintln!(
            "Aggregated {} submissions into {} questions ('{}')",
            report.user_count,
            report.questions.len(),
            report.title
        );
        print_summary(&report);

        // Save outputs
        std::fs::create_dir_all(&output)?;
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let slug = slugify(&report.title);

        let formats: Vec<&str> = if formats.iter().any(|f| f == "all") {
            vec!["json", "html", "md"]
        } else {
            formats.iter().map(|f| f.as_str()).collect()
        };

        for fmt in &formats {
            match *fmt {
                "json" => {
                    let path = output.join(format!("report-{slug}-{timestamp}.json"));
                    report.save_json(&path)?;
                    eprintln!("Results saved to: {}", path.display());
                }
                "html" => {
                    let path = output.join(format!("report-{slug}-{timestamp}.html"));
                    write_html_report(&report, &SvgChartSurface::default(), &path)?;
                    eprintln!("HTML report: {}", path.display());
                }
                "md" | "markdown" => {
                    let path = output.join(format!("report-{slug}-{timestamp}.md"));
                    let mut md = format!(
                        "# {} — quizlens report\n\nUsers: {}\n\n",
                        report.title, report.user_count
                    );
                    md.push_str(&MarkdownRenderer.render(&report.questions, &mut |_| Ok(None))?);
                    std::fs::write(&path, md)?;
                    eprintln!("Markdown report: {}", path.display());
                }
                _ => {
                    eprintln!("Unknown format: {fmt}");
                }
            }
        }
    }

    Ok(())
}

fn print_summary(report: &AnalyticsReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Question", "Title", "Correct", "Answered", "Min", "Avg", "Max",
    ]);

    for question in report.questions.values() {
        table.add_row(vec![
            Cell::new(&question.key),
            Cell::new(&question.title),
            Cell::new(format!("{}/{}", question.correct, question.total)),
            Cell::new(question.total),
            Cell::new(question.points.min),
            Cell::new(question.points.format_average()),
            Cell::new(question.points.max),
        ]);
    }

    eprintln!("\n{table}");
}

/// Lowercased title with anything non-alphanumeric folded into single dashes.
fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "dataset".to_string()
    } else {
        slug
    }
}
