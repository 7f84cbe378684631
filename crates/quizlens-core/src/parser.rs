//! JSON submission parser.
//!
//! Loads submission datasets from JSON files and directories, and validates
//! them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::model::SubmissionMap;

/// The dataset schema version this crate reads and writes.
pub const SCHEMA_VERSION: u32 = 1;

/// A parsed dataset: a display title plus the submissions keyed by user.
#[derive(Debug, Clone)]
pub struct SubmissionSet {
    /// Dataset title, from the envelope or the file stem.
    pub title: String,
    /// All user submissions in the dataset.
    pub submissions: SubmissionMap,
}

/// Intermediate envelope structure for parsing dataset files.
#[derive(Debug, Deserialize)]
struct SubmissionEnvelope {
    #[serde(default = "default_schema")]
    schema: u32,
    #[serde(default)]
    title: Option<String>,
    submissions: SubmissionMap,
}

fn default_schema() -> u32 {
    SCHEMA_VERSION
}

/// Parse a single JSON file into a `SubmissionSet`.
pub fn parse_submissions(path: &Path) -> Result<SubmissionSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read submission file: {}", path.display()))?;

    parse_submissions_str(&content, path)
}

/// Parse a JSON string into a `SubmissionSet` (useful for testing).
///
/// Accepts either the versioned envelope (`schema`, optional `title`,
/// `submissions`) or a bare user-keyed mapping, which is treated as
/// schema 1. The title falls back to the source file stem.
pub fn parse_submissions_str(content: &str, source_path: &Path) -> Result<SubmissionSet> {
    let value: Value = serde_json::from_str(content)
        .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?;

    let (title, submissions) = if value.get("submissions").is_some() {
        let envelope: SubmissionEnvelope = serde_json::from_value(value)
            .with_context(|| format!("malformed envelope: {}", source_path.display()))?;

        if envelope.schema != SCHEMA_VERSION {
            anyhow::bail!(
                "unsupported schema version {} in {}: this build reads version {}",
                envelope.schema,
                source_path.display(),
                SCHEMA_VERSION
            );
        }

        (envelope.title, envelope.submissions)
    } else {
        let submissions: SubmissionMap = serde_json::from_value(value)
            .with_context(|| format!("malformed submission mapping: {}", source_path.display()))?;

        (None, submissions)
    };

    let title = title.unwrap_or_else(|| {
        source_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("submissions")
            .to_string()
    });

    Ok(SubmissionSet { title, submissions })
}

/// Recursively load all `.json` datasets from a directory.
pub fn load_submission_directory(dir: &Path) -> Result<Vec<SubmissionSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_submission_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            match parse_submissions(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// A warning from dataset validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The user key (if applicable).
    pub user_key: Option<String>,
    /// The question key (if applicable).
    pub question_key: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a submission mapping for common issues.
///
/// Warnings never block aggregation; they flag datasets whose aggregate
/// output may not mean what the reader expects, plus the one shape
/// (a part key unknown to the first-seen definition) that aggregation
/// rejects outright.
pub fn validate_submissions(submissions: &SubmissionMap) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for mapping keys that disagree with the embedded user key
    for (map_key, user) in submissions {
        if *map_key != user.key {
            warnings.push(ValidationWarning {
                user_key: Some(map_key.clone()),
                question_key: None,
                message: format!(
                    "mapping key '{}' does not match submission key '{}'",
                    map_key, user.key
                ),
            });
        }
    }

    // Check for duplicate or empty questions within a single submission
    for user in submissions.values() {
        let mut seen_keys = std::collections::HashSet::new();
        for section in &user.sections {
            if !seen_keys.insert(&section.key) {
                warnings.push(ValidationWarning {
                    user_key: Some(user.key.clone()),
                    question_key: Some(section.key.clone()),
                    message: format!("duplicate question key: {}", section.key),
                });
            }
            if section.parts.is_empty() {
                warnings.push(ValidationWarning {
                    user_key: Some(user.key.clone()),
                    question_key: Some(section.key.clone()),
                    message: "question has no parts".into(),
                });
            }
        }
    }

    // Check question definitions for drift against the first-seen one
    let mut first_seen: std::collections::BTreeMap<&str, &crate::model::AnsweredSection> =
        std::collections::BTreeMap::new();
    for user in submissions.values() {
        for section in &user.sections {
            let Some(reference) = first_seen.get(section.key.as_str()) else {
                first_seen.insert(section.key.as_str(), section);
                continue;
            };

            if section.title != reference.title {
                warnings.push(ValidationWarning {
                    user_key: Some(user.key.clone()),
                    question_key: Some(section.key.clone()),
                    message: format!(
                        "title '{}' differs from first-seen '{}'",
                        section.title, reference.title
                    ),
                });
            }

            for part in &section.parts {
                match reference.parts.iter().find(|p| p.key == part.key) {
                    None => warnings.push(ValidationWarning {
                        user_key: Some(user.key.clone()),
                        question_key: Some(section.key.clone()),
                        message: format!(
                            "part '{}' is not in the first-seen definition; \
                             aggregation will fail",
                            part.key
                        ),
                    }),
                    Some(ref_part) => {
                        if part.text != ref_part.text {
                            warnings.push(ValidationWarning {
                                user_key: Some(user.key.clone()),
                                question_key: Some(section.key.clone()),
                                message: format!(
                                    "part '{}' text differs from the first-seen definition",
                                    part.key
                                ),
                            });
                        }
                        if part.solution != ref_part.solution {
                            warnings.push(ValidationWarning {
                                user_key: Some(user.key.clone()),
                                question_key: Some(section.key.clone()),
                                message: format!(
                                    "part '{}' solution differs from the first-seen definition",
                                    part.key
                                ),
                            });
                        }
                    }
                }
            }

            for ref_part in &reference.parts {
                if !section.parts.iter().any(|p| p.key == ref_part.key) {
                    warnings.push(ValidationWarning {
                        user_key: Some(user.key.clone()),
                        question_key: Some(section.key.clone()),
                        message: format!(
                            "part '{}' from the first-seen definition is missing",
                            ref_part.key
                        ),
                    });
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_JSON: &str = r#"
{
  "schema": 1,
  "title": "Unit 3 Quiz",
  "submissions": {
    "alice": {
      "key": "alice",
      "name": "Alice",
      "sections": [
        {
          "key": "q1",
          "title": "Q1 Ownership",
          "parts": [
            { "key": "a", "text": "Moves invalidate the source", "solution": true, "input": true },
            { "key": "b", "text": "All types copy implicitly", "solution": false, "input": true }
          ]
        }
      ]
    },
    "bob": {
      "key": "bob",
      "name": "Bob",
      "sections": [
        {
          "key": "q1",
          "title": "Q1 Ownership",
          "parts": [
            { "key": "a", "text": "Moves invalidate the source", "solution": true, "input": false },
            { "key": "b", "text": "All types copy implicitly", "solution": false, "input": false }
          ]
        }
      ]
    }
  }
}
"#;

    #[test]
    fn parse_valid_envelope() {
        let set = parse_submissions_str(VALID_JSON, &PathBuf::from("unit3.json")).unwrap();
        assert_eq!(set.title, "Unit 3 Quiz");
        assert_eq!(set.submissions.len(), 2);
        assert_eq!(set.submissions["alice"].sections[0].parts.len(), 2);
    }

    #[test]
    fn parse_bare_mapping_uses_file_stem() {
        let json = r#"{ "zoe": { "key": "zoe", "name": "Zoe", "sections": [] } }"#;
        let set = parse_submissions_str(json, &PathBuf::from("data/week-01.json")).unwrap();
        assert_eq!(set.title, "week-01");
        assert_eq!(set.submissions.len(), 1);
    }

    #[test]
    fn parse_envelope_without_schema_field() {
        let json = r#"{ "submissions": { "zoe": { "key": "zoe", "name": "Zoe", "sections": [] } } }"#;
        let set = parse_submissions_str(json, &PathBuf::from("loose.json")).unwrap();
        assert_eq!(set.title, "loose");
        assert_eq!(set.submissions.len(), 1);
    }

    #[test]
    fn parse_rejects_future_schema() {
        let json = r#"{ "schema": 2, "submissions": {} }"#;
        let err = parse_submissions_str(json, &PathBuf::from("future.json")).unwrap_err();
        assert!(err.to_string().contains("unsupported schema version 2"));
    }

    #[test]
    fn parse_malformed_json() {
        let bad = "this is not { valid json }{";
        let result = parse_submissions_str(bad, &PathBuf::from("bad.json"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_clean_dataset() {
        let set = parse_submissions_str(VALID_JSON, &PathBuf::from("unit3.json")).unwrap();
        let warnings = validate_submissions(&set.submissions);
        assert!(warnings.is_empty());
    }

    #[test]
    fn validate_mismatched_mapping_key() {
        let json = r#"{ "zed": { "key": "zoe", "name": "Zoe", "sections": [] } }"#;
        let set = parse_submissions_str(json, &PathBuf::from("t.json")).unwrap();
        let warnings = validate_submissions(&set.submissions);
        assert!(warnings.iter().any(|w| w.message.contains("does not match")));
    }

    #[test]
    fn validate_duplicate_question_keys() {
        let json = r#"
{
  "zoe": {
    "key": "zoe",
    "name": "Zoe",
    "sections": [
      { "key": "q1", "title": "Q1", "parts": [{ "key": "a", "text": "T", "solution": true, "input": true }] },
      { "key": "q1", "title": "Q1", "parts": [{ "key": "a", "text": "T", "solution": true, "input": false }] }
    ]
  }
}
"#;
        let set = parse_submissions_str(json, &PathBuf::from("t.json")).unwrap();
        let warnings = validate_submissions(&set.submissions);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
    }

    #[test]
    fn validate_empty_parts() {
        let json = r#"
{
  "zoe": {
    "key": "zoe",
    "name": "Zoe",
    "sections": [{ "key": "q1", "title": "Q1", "parts": [] }]
  }
}
"#;
        let set = parse_submissions_str(json, &PathBuf::from("t.json")).unwrap();
        let warnings = validate_submissions(&set.submissions);
        assert!(warnings.iter().any(|w| w.message.contains("no parts")));
    }

    #[test]
    fn validate_solution_drift() {
        let json = r#"
{
  "amy": {
    "key": "amy",
    "name": "Amy",
    "sections": [{ "key": "q1", "title": "Q1", "parts": [{ "key": "a", "text": "T", "solution": true, "input": true }] }]
  },
  "bob": {
    "key": "bob",
    "name": "Bob",
    "sections": [{ "key": "q1", "title": "Q1", "parts": [{ "key": "a", "text": "T", "solution": false, "input": true }] }]
  }
}
"#;
        let set = parse_submissions_str(json, &PathBuf::from("t.json")).unwrap();
        let warnings = validate_submissions(&set.submissions);
        assert!(warnings.iter().any(|w| w.message.contains("solution differs")));
        assert_eq!(warnings[0].user_key.as_deref(), Some("bob"));
    }

    #[test]
    fn validate_unknown_part_predicts_failure() {
        let json = r#"
{
  "amy": {
    "key": "amy",
    "name": "Amy",
    "sections": [{ "key": "q1", "title": "Q1", "parts": [{ "key": "a", "text": "T", "solution": true, "input": true }] }]
  },
  "bob": {
    "key": "bob",
    "name": "Bob",
    "sections": [{ "key": "q1", "title": "Q1", "parts": [{ "key": "c", "text": "X", "solution": true, "input": true }] }]
  }
}
"#;
        let set = parse_submissions_str(json, &PathBuf::from("t.json")).unwrap();
        let warnings = validate_submissions(&set.submissions);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("aggregation will fail")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("first-seen definition is missing")));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("unit3.json"), VALID_JSON).unwrap();
        std::fs::create_dir(dir.path().join("older")).unwrap();
        std::fs::write(
            dir.path().join("older").join("week-01.json"),
            r#"{ "zoe": { "key": "zoe", "name": "Zoe", "sections": [] } }"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a dataset").unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let sets = load_submission_directory(dir.path()).unwrap();
        assert_eq!(sets.len(), 2);
        assert!(sets.iter().any(|s| s.title == "Unit 3 Quiz"));
        assert!(sets.iter().any(|s| s.title == "week-01"));
    }

    #[test]
    fn load_directory_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("unit3.json");
        std::fs::write(&file, VALID_JSON).unwrap();

        let result = load_submission_directory(&file);
        assert!(result.is_err());
    }
}
