//! The `quizlens validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizlens_core::parser::ValidationWarning;

pub fn execute(input: PathBuf) -> Result<()> {
    let sets = if input.is_dir() {
        quizlens_core::parser::load_submission_directory(&input)?
    } else {
        vec![quizlens_core::parser::parse_submissions(&input)?]
    };

    let mut total_warnings = 0;

    for set in &sets {
        println!("Dataset: {} ({} users)", set.title, set.submissions.len());

        let warnings = quizlens_core::parser::validate_submissions(&set.submissions);
        for w in &warnings {
            println!("{} WARNING: {}", warning_prefix(w), w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All datasets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

/// Location prefix for a warning: user key, question key, or both.
pub(crate) fn warning_prefix(warning: &ValidationWarning) -> String {
    match (&warning.user_key, &warning.question_key) {
        (Some(user), Some(question)) => format!("  [{user}/{question}]"),
        (Some(user), None) => format!("  [{user}]"),
        (None, Some(question)) => format!("  [{question}]"),
        (None, None) => "  ".to_string(),
    }
}
