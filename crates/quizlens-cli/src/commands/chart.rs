//! The `quizlens chart` command.

use std::path::PathBuf;

use anyhow::Result;

use quizlens_core::aggregate::aggregate;
use quizlens_core::parser;
use quizlens_core::traits::ChartSurface;
use quizlens_report::highcharts::HighchartsSurface;
use quizlens_report::svg::SvgChartSurface;

pub fn execute(
    input: PathBuf,
    question: Option<String>,
    points: bool,
    surface: String,
    output: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        question.is_some() != points,
        "specify exactly one of --question or --points"
    );
    anyhow::ensure!(
        !input.is_dir(),
        "expected a dataset file, got a directory: {}",
        input.display()
    );

    let set = parser::parse_submissions(&input)?;
    let questions = aggregate(&set.submissions)?;

    let surface: Box<dyn ChartSurface> = match surface.as_str() {
        "svg" => Box::new(SvgChartSurface),
        "config" | "highcharts" => Box::new(HighchartsSurface),
        other => anyhow::bail!("unknown surface '{other}': expected svg or config"),
    };

    let markup = if points {
        surface.render_points_overview(&questions)?
    } else {
        let key = question.unwrap_or_default();
        let summary = questions.get(&key).ok_or_else(|| {
            anyhow::anyhow!(
                "question '{}' not found in {}. Available: {:?}",
                key,
                input.display(),
                questions.keys().collect::<Vec<_>>()
            )
        })?;
        surface.render_question_detail(summary)?
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &markup)?;
            eprintln!("Chart written to: {}", path.display());
        }
        None => println!("{markup}"),
    }

    Ok(())
}
