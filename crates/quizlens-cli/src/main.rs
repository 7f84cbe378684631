//! quizlens CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "quizlens", version, about = "Multiple-choice quiz analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate submissions and write reports
    Analyze {
        /// Path to .json submission file or directory
        #[arg(long)]
        input: PathBuf,

        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, md, all
        #[arg(long)]
        format: Option<String>,

        /// Fail on validation warnings
        #[arg(long)]
        strict: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate submission datasets
    Validate {
        /// Path to submission file or directory
        #[arg(long)]
        input: PathBuf,
    },

    /// Render a chart for one question or the points overview
    Chart {
        /// Path to .json submission file
        #[arg(long)]
        input: PathBuf,

        /// Question key to chart
        #[arg(long)]
        question: Option<String>,

        /// Chart the points overview instead of a single question
        #[arg(long)]
        points: bool,

        /// Chart surface: svg, config
        #[arg(long, default_value = "svg")]
        surface: String,

        /// Output file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compare two analytics reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Decline threshold in points
        #[arg(long)]
        threshold: Option<f64>,

        /// Exit code 1 if declines found
        #[arg(long)]
        fail_on_decline: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example dataset
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizlens=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            input,
            output,
            format,
            strict,
            config,
        } => commands::analyze::execute(input, output, format, strict, config),
        Commands::Validate { input } => commands::validate::execute(input),
        Commands::Chart {
            input,
            question,
            points,
            surface,
            output,
        } => commands::chart::execute(input, question, points, surface, output),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_decline,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_decline, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
