//! Error types for loading, grading, and navigating a quiz.
//!
//! Load failures are fatal to starting a session. Everything a user can
//! trigger from the keyboard is a [`SessionError`] and is recoverable: the
//! presentation layer shows it as guidance and keeps going.

use thiserror::Error;

/// A single question record that violates the shape of its kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("question #{index}: {reason}")]
pub struct InvalidQuestion {
    /// Position of the record in the document (1-based).
    pub index: usize,
    /// What is wrong with the record.
    pub reason: String,
}

impl InvalidQuestion {
    pub fn new(index: usize, reason: impl Into<String>) -> Self {
        Self {
            index,
            reason: reason.into(),
        }
    }
}

/// Errors that prevent a question bank from becoming a working list.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document has no `questions` list.
    #[error("question bank has no `questions` list")]
    Missing,

    /// The document could not be decoded.
    #[error("malformed question bank: {0}")]
    Malformed(String),

    /// The bank holds no usable questions.
    #[error("question bank contains no questions")]
    Empty,

    /// A record was invalid and the load policy is to fail.
    #[error(transparent)]
    InvalidQuestion(#[from] InvalidQuestion),

    /// Reading the document failed.
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    /// Every configured source failed.
    #[error("could not load questions from any source ({})", .attempts.join("; "))]
    Exhausted { attempts: Vec<String> },
}

/// Errors raised by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error(transparent)]
    InvalidQuestion(#[from] InvalidQuestion),

    /// The answer variant does not belong to the question's kind.
    #[error("a {answer} answer cannot grade a {question} question")]
    AnswerMismatch {
        question: &'static str,
        answer: &'static str,
    },
}

/// User-recoverable misuse of the session state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("please check your answer first")]
    NotChecked,

    #[error("this question has already been checked")]
    AlreadyChecked,

    #[error("already at the first question")]
    AtFirstQuestion,

    #[error("already at the last question")]
    AtLastQuestion,

    #[error("answers cannot be changed after checking")]
    AnswerLocked,

    /// `index` is 0-based; the message shows it 1-based.
    #[error("option {} does not exist (question has {len} options)", .index + 1)]
    OptionOutOfRange { index: usize, len: usize },

    #[error("a {selection} selection does not fit a {question} question")]
    SelectionMismatch {
        question: &'static str,
        selection: &'static str,
    },

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_lists_every_attempt() {
        let err = LoadError::Exhausted {
            attempts: vec!["file a: not found".into(), "embedded: empty".into()],
        };
        assert_eq!(
            err.to_string(),
            "could not load questions from any source (file a: not found; embedded: empty)"
        );
    }

    #[test]
    fn invalid_question_message_names_record() {
        let err = InvalidQuestion::new(3, "points must be positive");
        assert_eq!(err.to_string(), "question #3: points must be positive");
    }
}
