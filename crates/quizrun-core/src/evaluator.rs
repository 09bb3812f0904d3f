//! Answer evaluation.
//!
//! Grading is a pure function of a question and an answer. Single-choice and
//! free-text questions are all-or-nothing; multi-choice questions earn
//! partial credit, with half a hit deducted for every wrong selection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;
use crate::model::{Answer, Question, QuestionKind};

/// The outcome of grading one answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Whether the answer is fully correct.
    pub is_correct: bool,
    /// Points awarded, between 0 and the question's points.
    pub awarded_points: f64,
}

impl Evaluation {
    fn all_or_nothing(is_correct: bool, points: f64) -> Self {
        Self {
            is_correct,
            awarded_points: if is_correct { points } else { 0.0 },
        }
    }
}

/// Weight of a wrong multi-choice selection, in hits.
const MISS_PENALTY: f64 = 0.5;

/// Grade `answer` against `question`.
pub fn evaluate(question: &Question, answer: &Answer) -> Result<Evaluation, EvaluationError> {
    question.validate(0)?;

    let evaluation = match (&question.kind, answer) {
        (QuestionKind::SingleChoice { correct_option, .. }, Answer::SingleChoice(selected)) => {
            Evaluation::all_or_nothing(*selected == Some(*correct_option), question.points)
        }
        (QuestionKind::FreeText { accepted, .. }, Answer::FreeText(text)) => {
            Evaluation::all_or_nothing(matches_accepted(text, accepted), question.points)
        }
        (QuestionKind::MultiChoice { correct_options, .. }, Answer::MultiChoice(selected)) => {
            grade_multi_choice(selected, correct_options, question.points)
        }
        (kind, answer) => {
            return Err(EvaluationError::AnswerMismatch {
                question: kind.name(),
                answer: answer.name(),
            })
        }
    };

    Ok(evaluation)
}

/// Normalize free text for comparison.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn matches_accepted(text: &str, accepted: &[String]) -> bool {
    let given = normalize(text);
    if given.is_empty() {
        return false;
    }
    accepted.iter().any(|a| normalize(a) == given)
}

fn grade_multi_choice(
    selected: &BTreeSet<usize>,
    correct: &BTreeSet<usize>,
    points: f64,
) -> Evaluation {
    let has_all_correct = correct.iter().all(|i| selected.contains(i));
    let has_no_wrong = selected.iter().all(|i| correct.contains(i));

    if has_all_correct && has_no_wrong {
        return Evaluation {
            is_correct: true,
            awarded_points: points,
        };
    }

    let hits = selected.intersection(correct).count() as f64;
    let misses = selected.difference(correct).count() as f64;
    let per_hit = points / correct.len() as f64;

    Evaluation {
        is_correct: false,
        awarded_points: ((hits - MISS_PENALTY * misses) * per_hit).max(0.0),
    }
}
