//! The `quizrun run` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizrun_core::loader::build_bank;
use quizrun_core::report::SummaryReport;
use quizrun_core::Session;
use quizrun_report::html::write_html_report;
use quizrun_sources::config::{build_chain, load_config_from, SourceConfig};

use crate::commands::summary::print_report;
use crate::terminal::{run_interactive, Outcome};

pub struct RunArgs {
    pub questions: Option<String>,
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub no_shuffle: bool,
    pub output: Option<PathBuf>,
    pub format: Option<String>,
}

pub async fn execute(args: RunArgs) -> Result<()> {
    let mut config = load_config_from(args.config.as_deref())?;
    if let Some(location) = &args.questions {
        config.prepend_source(SourceConfig::from_location(location));
    }
    if args.no_shuffle {
        config.shuffle = false;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let output = args.output.unwrap_or_else(|| config.output_dir.clone());

    let chain = build_chain(&config)?;
    let loaded = chain.load().await.context(
        "no question bank available; create one with `quizrun init` or pass --questions <path|url>",
    )?;
    tracing::info!(source = %loaded.source, "using question bank");

    let bank = build_bank(loaded.bank, config.invalid_questions)
        .with_context(|| format!("question bank from {} is unusable", loaded.source))?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut session = if config.shuffle {
        Session::start(bank, &mut rng)?
    } else {
        Session::in_order(bank)?
    };

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let outcome = run_interactive(&mut session, &mut rng, stdin.lock(), &mut stdout)?;

    let report = match outcome {
        Outcome::Submitted(report) => report,
        Outcome::Quit => {
            println!("Quiz abandoned.");
            return Ok(());
        }
    };

    print_report(&report);

    if let Some(format) = &args.format {
        save_report(&report, &output, format)?;
    }

    Ok(())
}

fn save_report(report: &SummaryReport, output: &Path, format: &str) -> Result<()> {
    std::fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("report-{timestamp}.html"));
                write_html_report(report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}
