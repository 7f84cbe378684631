//! The `quizlens init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizlens.toml
    if std::path::Path::new("quizlens.toml").exists() {
        println!("quizlens.toml already exists, skipping.");
    } else {
        std::fs::write("quizlens.toml", SAMPLE_CONFIG)?;
        println!("Created quizlens.toml");
    }

    // Create example dataset
    std::fs::create_dir_all("submissions")?;
    let example_path = std::path::Path::new("submissions/example.json");
    if example_path.exists() {
        println!("submissions/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_SUBMISSIONS)?;
        println!("Created submissions/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Export quiz submissions as JSON into submissions/");
    println!("  2. Run: quizlens validate --input submissions/example.json");
    println!("  3. Run: quizlens analyze --input submissions/example.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizlens configuration

# Where analyze writes its report files
output_dir = "./quizlens-results"

# Formats written by analyze: json, html, md
formats = ["json", "html"]

# Treat validation warnings as errors
strict = false

# Decline threshold for compare, in points
compare_threshold = 0.25
"#;

const EXAMPLE_SUBMISSIONS: &str = r#"{
  "schema": 1,
  "title": "Example Quiz",
  "submissions": {
    "alice": {
      "key": "alice",
      "name": "Alice Example",
      "sections": [
        {
          "key": "q1",
          "title": "Q1 Photosynthesis",
          "parts": [
            { "key": "a", "text": "Plants produce oxygen", "solution": true, "input": true },
            { "key": "b", "text": "Plants consume oxygen at night", "solution": true, "input": false },
            { "key": "c", "text": "Chlorophyll is red", "solution": false, "input": false }
          ]
        },
        {
          "key": "q2",
          "title": "Q2 Cell biology",
          "parts": [
            { "key": "a", "text": "Mitochondria produce ATP", "solution": true, "input": true },
            { "key": "b", "text": "All cells have a nucleus", "solution": false, "input": true }
          ]
        }
      ]
    },
    "bob": {
      "key": "bob",
      "name": "Bob Example",
      "sections": [
        {
          "key": "q1",
          "title": "Q1 Photosynthesis",
          "parts": [
            { "key": "a", "text": "Plants produce oxygen", "solution": true, "input": true },
            { "key": "b", "text": "Plants consume oxygen at night", "solution": true, "input": true },
            { "key": "c", "text": "Chlorophyll is red", "solution": false, "input": false }
          ]
        },
        {
          "key": "q2",
          "title": "Q2 Cell biology",
          "parts": [
            { "key": "a", "text": "Mitochondria produce ATP", "solution": true, "input": false },
            { "key": "b", "text": "All cells have a nucleus", "solution": false, "input": false }
          ]
        }
      ]
    }
  }
}
"#;
