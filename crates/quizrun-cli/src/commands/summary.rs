//! The `quizrun summary` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizrun_core::report::{format_points, SummaryReport};

pub fn execute(report_path: PathBuf, format: String) -> Result<()> {
    let report = SummaryReport::load_json(&report_path)?;

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => print_report(&report),
    }

    Ok(())
}

/// Print the headline and the per-question table.
pub fn print_report(report: &SummaryReport) {
    if let Some(title) = &report.title {
        println!("\n{title}");
    }
    println!("{}", report.headline());
    println!(
        "{} of {} questions fully correct",
        report.correct_count(),
        report.details.len()
    );

    let mut table = Table::new();
    table.set_header(vec![
        "#",
        "Question",
        "Your answer",
        "Correct answer",
        "Points",
        "Result",
    ]);

    for d in &report.details {
        let result = if d.is_correct {
            "correct"
        } else if d.awarded_points > 0.0 {
            "partial"
        } else {
            "wrong"
        };
        table.add_row(vec![
            Cell::new(d.index + 1),
            Cell::new(&d.prompt),
            Cell::new(&d.user_answer),
            Cell::new(&d.correct_answer),
            Cell::new(format!(
                "{}/{}",
                format_points(d.awarded_points),
                format_points(d.points)
            )),
            Cell::new(result),
        ]);
    }

    println!("\n{table}");
}
