//! quizrun CLI — run question banks interactively in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "quizrun", version, about = "Interactive terminal quiz runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz
    Run {
        /// Question bank path or URL, tried before configured sources
        #[arg(long)]
        questions: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Seed for a reproducible question order
        #[arg(long)]
        seed: Option<u64>,

        /// Keep questions in document order
        #[arg(long)]
        no_shuffle: bool,

        /// Output directory for saved reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report formats to save after submitting: json, html, all
        #[arg(long)]
        format: Option<String>,
    },

    /// Check a question bank for errors and suspicious content
    Validate {
        /// Path to a JSON or TOML question bank
        #[arg(long)]
        questions: PathBuf,
    },

    /// Show a saved JSON report
    Summary {
        /// Report JSON written by `quizrun run --format json`
        #[arg(long)]
        report: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter config and question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("warn,quizrun_core=info,quizrun_sources=info,quizrun_cli=info")
        }))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            questions,
            config,
            seed,
            no_shuffle,
            output,
            format,
        } => {
            commands::run::execute(commands::run::RunArgs {
                questions,
                config,
                seed,
                no_shuffle,
                output,
                format,
            })
            .await
        }
        Commands::Validate { questions } => commands::validate::execute(questions),
        Commands::Summary { report, format } => commands::summary::execute(report, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
