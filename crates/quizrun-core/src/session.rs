//! The quiz session: answer store, check states, and navigation.
//!
//! A [`Session`] owns every piece of mutable quiz state. All mutation goes
//! through its methods, and a method that fails leaves the session exactly
//! as it was. The live score is never stored; it is recomputed from the
//! answers of checked questions, which can no longer change.

use rand::Rng;

use crate::error::{LoadError, SessionError};
use crate::evaluator::{evaluate, Evaluation};
use crate::loader::shuffle;
use crate::model::{Answer, CheckState, Question, QuestionBank, QuestionKind, Selection};
use crate::report::SummaryReport;

/// Aggregated view of session progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 0-based position of the current question.
    pub current: usize,
    pub total: usize,
    pub checked: usize,
}

/// A single user's pass through a question bank.
#[derive(Debug, Clone)]
pub struct Session {
    bank: QuestionBank,
    shuffled: bool,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    checks: Vec<CheckState>,
    current: usize,
}

impl Session {
    /// Start a session with the bank's questions in a random order.
    pub fn start<R: Rng + ?Sized>(bank: QuestionBank, rng: &mut R) -> Result<Self, LoadError> {
        let questions = shuffle(&bank.questions, rng);
        Self::with_order(bank, questions, true)
    }

    /// Start a session with the bank's questions in document order.
    pub fn in_order(bank: QuestionBank) -> Result<Self, LoadError> {
        let questions = bank.questions.clone();
        Self::with_order(bank, questions, false)
    }

    fn with_order(
        bank: QuestionBank,
        questions: Vec<Question>,
        shuffled: bool,
    ) -> Result<Self, LoadError> {
        if questions.is_empty() {
            return Err(LoadError::Empty);
        }
        for (i, q) in questions.iter().enumerate() {
            q.validate(i + 1)?;
        }

        let answers = questions.iter().map(|q| Answer::empty_for(&q.kind)).collect();
        let checks = vec![CheckState::Unchecked; questions.len()];
        Ok(Self {
            bank,
            shuffled,
            questions,
            answers,
            checks,
            current: 0,
        })
    }

    /// Discard all progress and begin again with a fresh order.
    ///
    /// Sessions created with [`Session::in_order`] restart in document order.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.shuffled {
            self.questions = shuffle(&self.bank.questions, rng);
        }
        self.answers = self
            .questions
            .iter()
            .map(|q| Answer::empty_for(&q.kind))
            .collect();
        self.checks = vec![CheckState::Unchecked; self.questions.len()];
        self.current = 0;
        tracing::debug!(shuffled = self.shuffled, "session restarted");
    }

    pub fn title(&self) -> Option<&str> {
        self.bank.title.as_deref()
    }

    /// Number of questions in the session.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; sessions cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The working list, in presentation order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn current_answer(&self) -> &Answer {
        &self.answers[self.current]
    }

    pub fn current_check_state(&self) -> CheckState {
        self.checks[self.current]
    }

    pub fn answer(&self, index: usize) -> Option<&Answer> {
        self.answers.get(index)
    }

    pub fn check_state(&self, index: usize) -> Option<CheckState> {
        self.checks.get(index).copied()
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            current: self.current,
            total: self.questions.len(),
            checked: self.checks.iter().filter(|c| c.is_checked()).count(),
        }
    }

    /// Change the answer to the current question.
    ///
    /// Single-choice selections replace the pick, multi-choice selections
    /// toggle an option, and text replaces the free-text answer (trimmed).
    pub fn select_answer(&mut self, selection: Selection) -> Result<(), SessionError> {
        if self.current_check_state().is_checked() {
            return Err(SessionError::AnswerLocked);
        }

        let question = &self.questions[self.current];
        let updated = match (&question.kind, &self.answers[self.current], selection) {
            (QuestionKind::SingleChoice { options, .. }, _, Selection::Choice(index)) => {
                ensure_option(index, options.len())?;
                Answer::SingleChoice(Some(index))
            }
            (QuestionKind::MultiChoice { options, .. }, Answer::MultiChoice(selected), Selection::Choice(index)) => {
                ensure_option(index, options.len())?;
                let mut selected = selected.clone();
                if !selected.remove(&index) {
                    selected.insert(index);
                }
                Answer::MultiChoice(selected)
            }
            (QuestionKind::FreeText { .. }, _, Selection::Text(text)) => {
                Answer::FreeText(text.trim().to_string())
            }
            (kind, _, selection) => {
                return Err(SessionError::SelectionMismatch {
                    question: kind.name(),
                    selection: selection.name(),
                })
            }
        };

        self.answers[self.current] = updated;
        Ok(())
    }

    /// Grade the current question and lock its answer.
    pub fn check(&mut self) -> Result<Evaluation, SessionError> {
        if self.current_check_state().is_checked() {
            return Err(SessionError::AlreadyChecked);
        }

        let evaluation = evaluate(self.current_question(), self.current_answer())?;
        self.checks[self.current] = CheckState::from_outcome(evaluation.is_correct);
        tracing::debug!(
            index = self.current,
            correct = evaluation.is_correct,
            awarded = evaluation.awarded_points,
            "question checked"
        );
        Ok(evaluation)
    }

    /// Move to the next question. The current one must be checked first.
    pub fn next(&mut self) -> Result<usize, SessionError> {
        if !self.current_check_state().is_checked() {
            return Err(SessionError::NotChecked);
        }
        if self.is_last() {
            return Err(SessionError::AtLastQuestion);
        }
        self.current += 1;
        Ok(self.current)
    }

    /// Move back one question. Checked answers stay locked.
    pub fn previous(&mut self) -> Result<usize, SessionError> {
        if self.is_first() {
            return Err(SessionError::AtFirstQuestion);
        }
        self.current -= 1;
        Ok(self.current)
    }

    /// Grade of a checked question; `None` while it is unchecked.
    pub fn evaluation(&self, index: usize) -> Option<Evaluation> {
        if !self.check_state(index)?.is_checked() {
            return None;
        }
        evaluate(&self.questions[index], &self.answers[index]).ok()
    }

    /// Live score: points awarded for checked questions only.
    pub fn score(&self) -> f64 {
        (0..self.questions.len())
            .filter_map(|i| self.evaluation(i))
            .map(|e| e.awarded_points)
            .sum()
    }

    /// Sum of all question points.
    pub fn total_points(&self) -> f64 {
        self.questions.iter().map(|q| q.points).sum()
    }

    /// Grade every question as answered right now and build the summary.
    ///
    /// Questions that were never checked are graded too, so unanswered
    /// questions count as incorrect.
    pub fn finalize(&self) -> SummaryReport {
        SummaryReport::build(self.title(), &self.questions, &self.answers, &self.checks)
    }
}

fn ensure_option(index: usize, len: usize) -> Result<(), SessionError> {
    if index < len {
        Ok(())
    } else {
        Err(SessionError::OptionOutOfRange { index, len })
    }
}
