//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level quizlens configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizlensConfig {
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Report formats written by `analyze`.
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    /// Treat validation warnings as errors.
    #[serde(default)]
    pub strict: bool,
    /// Decline threshold for `compare`, in points.
    #[serde(default = "default_compare_threshold")]
    pub compare_threshold: f64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizlens-results")
}
fn default_formats() -> Vec<String> {
    vec!["json".to_string()]
}
fn default_compare_threshold() -> f64 {
    0.25
}

impl Default for QuizlensConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            formats: default_formats(),
            strict: false,
            compare_threshold: default_compare_threshold(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizlens.toml` in the current directory
/// 2. `~/.config/quizlens/config.toml`
///
/// Environment variable override: `QUIZLENS_OUTPUT_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizlensConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizlens.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizlensConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizlensConfig::default(),
    };

    if let Ok(dir) = std::env::var("QUIZLENS_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizlens"))
}
