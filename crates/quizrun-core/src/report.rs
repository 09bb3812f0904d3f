//! Summary report types with JSON persistence and Markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::evaluator::evaluate;
use crate::model::{Answer, CheckState, Question, QuestionKind};
use crate::statistics::{compute_kind_stats, KindStats};

/// Rendering used for a question the user never answered.
pub const NO_ANSWER: &str = "No answer";

/// The final scored result of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Title of the question bank, if it has one.
    #[serde(default)]
    pub title: Option<String>,
    /// Points awarded across all questions.
    pub total_awarded: f64,
    /// Sum of all question points.
    pub total_possible: f64,
    /// `100 * awarded / possible`, rounded to two decimals.
    pub percentage: f64,
    /// One entry per question, in presentation order.
    pub details: Vec<QuestionResult>,
    /// Breakdown by question kind.
    #[serde(default)]
    pub per_kind: Vec<KindStats>,
}

/// How one question was graded at submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    /// 0-based position in the working list.
    pub index: usize,
    pub prompt: String,
    pub kind: String,
    pub points: f64,
    pub awarded_points: f64,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    /// Whether the user checked this question before submitting.
    pub checked: bool,
}

impl SummaryReport {
    /// Grade every question against its answer and assemble the report.
    pub fn build(
        title: Option<&str>,
        questions: &[Question],
        answers: &[Answer],
        checks: &[CheckState],
    ) -> Self {
        let details: Vec<QuestionResult> = questions
            .iter()
            .zip(answers)
            .enumerate()
            .map(|(index, (question, answer))| {
                let evaluation = evaluate(question, answer).unwrap_or_else(|e| {
                    tracing::warn!("grading question {} failed: {e}", index + 1);
                    crate::evaluator::Evaluation {
                        is_correct: false,
                        awarded_points: 0.0,
                    }
                });
                QuestionResult {
                    index,
                    prompt: question.prompt.clone(),
                    kind: question.kind.name().to_string(),
                    points: question.points,
                    awarded_points: evaluation.awarded_points,
                    user_answer: render_answer(question, answer),
                    correct_answer: render_correct_answer(question),
                    is_correct: evaluation.is_correct,
                    checked: checks.get(index).is_some_and(|c| c.is_checked()),
                }
            })
            .collect();

        let total_awarded: f64 = details.iter().map(|d| d.awarded_points).sum();
        let total_possible: f64 = questions.iter().map(|q| q.points).sum();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            title: title.map(str::to_string),
            total_awarded,
            total_possible,
            percentage: percentage(total_awarded, total_possible),
            per_kind: compute_kind_stats(&details),
            details,
        }
    }

    /// Number of fully correct questions.
    pub fn correct_count(&self) -> usize {
        self.details.iter().filter(|d| d.is_correct).count()
    }

    /// Headline line, e.g. `Your Score: 7/10 (70.00%)`.
    pub fn headline(&self) -> String {
        format!(
            "Your Score: {}/{} ({:.2}%)",
            format_points(self.total_awarded),
            format_points(self.total_possible),
            self.percentage
        )
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SummaryReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Render the report as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        if let Some(title) = &self.title {
            md.push_str(&format!("## {title}\n\n"));
        }
        md.push_str(&format!("**{}**\n\n", self.headline()));

        md.push_str("| # | Question | Your answer | Correct answer | Points |\n");
        md.push_str("|---|----------|-------------|----------------|--------|\n");
        for d in &self.details {
            let status = if d.is_correct { "✓" } else { "✗" };
            md.push_str(&format!(
                "| {status} Q{} | {} | {} | {} | {}/{} |\n",
                d.index + 1,
                escape_cell(&d.prompt),
                escape_cell(&d.user_answer),
                escape_cell(&d.correct_answer),
                format_points(d.awarded_points),
                format_points(d.points),
            ));
        }

        if !self.per_kind.is_empty() {
            md.push_str("\n### By kind\n\n");
            md.push_str("| Kind | Correct | Points |\n");
            md.push_str("|------|---------|--------|\n");
            for k in &self.per_kind {
                md.push_str(&format!(
                    "| {} | {}/{} | {}/{} |\n",
                    k.kind,
                    k.correct,
                    k.questions,
                    format_points(k.awarded_points),
                    format_points(k.possible_points)
                ));
            }
        }

        md
    }
}

/// `round(100 * awarded / possible, 2)`; zero when nothing is possible.
pub fn percentage(awarded: f64, possible: f64) -> f64 {
    if possible <= 0.0 {
        return 0.0;
    }
    (awarded / possible * 10_000.0).round() / 100.0
}

/// Format points without a trailing `.00` for whole numbers.
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{points:.0}")
    } else {
        let s = format!("{points:.2}");
        s.trim_end_matches('0').to_string()
    }
}

/// Render the user's answer the way a person would read it.
pub fn render_answer(question: &Question, answer: &Answer) -> String {
    if answer.is_empty() {
        return NO_ANSWER.to_string();
    }
    match (&question.kind, answer) {
        (QuestionKind::SingleChoice { options, .. }, Answer::SingleChoice(Some(i))) => {
            option_text(options, *i)
        }
        (QuestionKind::MultiChoice { options, .. }, Answer::MultiChoice(selected)) => selected
            .iter()
            .map(|&i| option_text(options, i))
            .collect::<Vec<_>>()
            .join(", "),
        (_, Answer::FreeText(text)) => text.clone(),
        _ => NO_ANSWER.to_string(),
    }
}

/// Render the expected answer of a question.
pub fn render_correct_answer(question: &Question) -> String {
    match &question.kind {
        QuestionKind::SingleChoice {
            options,
            correct_option,
        } => option_text(options, *correct_option),
        QuestionKind::FreeText { accepted, .. } => accepted.join(" / "),
        QuestionKind::MultiChoice {
            options,
            correct_options,
        } => correct_options
            .iter()
            .map(|&i| option_text(options, i))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn option_text(options: &[String], index: usize) -> String {
    options
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("option {}", index + 1))
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
