//! Core data model types for quizrun.
//!
//! Questions are immutable once loaded. Answers and check states are the
//! mutable per-question stores a [`Session`](crate::session::Session) owns.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidQuestion;

/// A single quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// The text shown to the user.
    pub prompt: String,
    /// Points awarded for a fully correct answer.
    pub points: f64,
    /// Kind-specific fields.
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// The kinds of question a quiz can contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Exactly one correct option.
    SingleChoice {
        options: Vec<String>,
        correct_option: usize,
    },
    /// Graded by matching normalized text against accepted strings.
    FreeText {
        accepted: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hint: Option<String>,
    },
    /// A set of correct options, with partial credit.
    MultiChoice {
        options: Vec<String>,
        correct_options: BTreeSet<usize>,
    },
}

impl QuestionKind {
    /// Stable machine name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice { .. } => "single-choice",
            QuestionKind::FreeText { .. } => "free-text",
            QuestionKind::MultiChoice { .. } => "multi-choice",
        }
    }

    /// Section heading shown above questions of this kind.
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice { .. } => "Section I - MCQ",
            QuestionKind::FreeText { .. } => "Section II - Fill in the Blank",
            QuestionKind::MultiChoice { .. } => "Section III - Multiple Answers",
        }
    }

    /// Options for choice kinds, empty for free-text.
    pub fn options(&self) -> &[String] {
        match self {
            QuestionKind::SingleChoice { options, .. }
            | QuestionKind::MultiChoice { options, .. } => options,
            QuestionKind::FreeText { .. } => &[],
        }
    }
}

impl Question {
    /// Check that the question satisfies the shape of its kind.
    ///
    /// `index` is only used to label the error.
    pub fn validate(&self, index: usize) -> Result<(), InvalidQuestion> {
        if self.prompt.trim().is_empty() {
            return Err(InvalidQuestion::new(index, "prompt is empty"));
        }
        if !self.points.is_finite() || self.points <= 0.0 {
            return Err(InvalidQuestion::new(
                index,
                format!("points must be a positive number, got {}", self.points),
            ));
        }

        match &self.kind {
            QuestionKind::SingleChoice {
                options,
                correct_option,
            } => {
                if options.is_empty() {
                    return Err(InvalidQuestion::new(index, "single-choice question has no options"));
                }
                if *correct_option >= options.len() {
                    return Err(InvalidQuestion::new(
                        index,
                        format!(
                            "correct option {correct_option} is out of range for {} options",
                            options.len()
                        ),
                    ));
                }
            }
            QuestionKind::FreeText { accepted, .. } => {
                if accepted.is_empty() {
                    return Err(InvalidQuestion::new(index, "free-text question has no accepted answers"));
                }
            }
            QuestionKind::MultiChoice {
                options,
                correct_options,
            } => {
                if options.is_empty() {
                    return Err(InvalidQuestion::new(index, "multi-choice question has no options"));
                }
                if correct_options.is_empty() {
                    return Err(InvalidQuestion::new(index, "multi-choice question has no correct options"));
                }
                if let Some(bad) = correct_options.iter().find(|&&i| i >= options.len()) {
                    return Err(InvalidQuestion::new(
                        index,
                        format!("correct option {bad} is out of range for {} options", options.len()),
                    ));
                }
            }
        }

        Ok(())
    }
}

/// A question bank after every record has been converted to a [`Question`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Optional title of the bank.
    #[serde(default)]
    pub title: Option<String>,
    /// Questions in document order.
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// Sum of all question points.
    pub fn total_points(&self) -> f64 {
        self.questions.iter().map(|q| q.points).sum()
    }
}

/// The user's current answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Answer {
    SingleChoice(Option<usize>),
    FreeText(String),
    MultiChoice(BTreeSet<usize>),
}

impl Answer {
    /// The unanswered value for a question kind.
    pub fn empty_for(kind: &QuestionKind) -> Self {
        match kind {
            QuestionKind::SingleChoice { .. } => Answer::SingleChoice(None),
            QuestionKind::FreeText { .. } => Answer::FreeText(String::new()),
            QuestionKind::MultiChoice { .. } => Answer::MultiChoice(BTreeSet::new()),
        }
    }

    /// Whether the user has not answered yet.
    pub fn is_empty(&self) -> bool {
        match self {
            Answer::SingleChoice(choice) => choice.is_none(),
            Answer::FreeText(text) => text.is_empty(),
            Answer::MultiChoice(selected) => selected.is_empty(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Answer::SingleChoice(_) => "single-choice",
            Answer::FreeText(_) => "free-text",
            Answer::MultiChoice(_) => "multi-choice",
        }
    }
}

/// A user action that changes the current answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Pick (single-choice) or toggle (multi-choice) a 0-based option.
    Choice(usize),
    /// Replace the free-text answer.
    Text(String),
}

impl Selection {
    pub fn name(&self) -> &'static str {
        match self {
            Selection::Choice(_) => "choice",
            Selection::Text(_) => "text",
        }
    }
}

/// Whether and how a question has been graded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
    #[default]
    Unchecked,
    CheckedCorrect,
    CheckedIncorrect,
}

impl CheckState {
    pub fn is_checked(self) -> bool {
        !matches!(self, CheckState::Unchecked)
    }

    pub(crate) fn from_outcome(is_correct: bool) -> Self {
        if is_correct {
            CheckState::CheckedCorrect
        } else {
            CheckState::CheckedIncorrect
        }
    }
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckState::Unchecked => write!(f, "unchecked"),
            CheckState::CheckedCorrect => write!(f, "correct"),
            CheckState::CheckedIncorrect => write!(f, "incorrect"),
        }
    }
}

/// The kind names accepted in question bank documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindName {
    SingleChoice,
    FreeText,
    MultiChoice,
}

impl FromStr for KindName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single-choice" | "single_choice" | "mcq" => Ok(KindName::SingleChoice),
            "free-text" | "free_text" | "fill" => Ok(KindName::FreeText),
            "multi-choice" | "multi_choice" | "multiple" => Ok(KindName::MultiChoice),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}
