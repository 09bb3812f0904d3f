//! The `quizrun validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizrun_core::model::QuestionBank;
use quizrun_core::parser::{convert_record, parse_question_bank, validate_question_bank};

pub fn execute(path: PathBuf) -> Result<()> {
    let raw = parse_question_bank(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let records = raw
        .questions
        .with_context(|| format!("{} has no `questions` list", path.display()))?;

    let mut questions = Vec::with_capacity(records.len());
    let mut invalid = 0;
    for (i, record) in records.into_iter().enumerate() {
        match convert_record(i + 1, record) {
            Ok(q) => questions.push(q),
            Err(e) => {
                println!("  ERROR: {e}");
                invalid += 1;
            }
        }
    }

    let bank = QuestionBank {
        title: raw.title,
        questions,
    };
    println!(
        "Question bank: {} ({} questions, {} points)",
        bank.title.as_deref().unwrap_or("untitled"),
        bank.questions.len(),
        quizrun_core::report::format_points(bank.total_points())
    );

    let warnings = validate_question_bank(&bank);
    for w in &warnings {
        let prefix = w
            .question
            .map(|n| format!("  [Q{n}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    anyhow::ensure!(invalid == 0, "{invalid} invalid question(s)");
    anyhow::ensure!(!bank.questions.is_empty(), "question bank contains no questions");

    if warnings.is_empty() {
        println!("All questions valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
