//! View-model for presentation layers.
//!
//! Everything here is a read-only projection of a [`Session`]. Grading has
//! already happened by the time a view shows a mark or a feedback message.

use serde::Serialize;

use crate::model::{Answer, CheckState, QuestionKind};
use crate::report::render_correct_answer;
use crate::session::Session;

/// Shown under multi-choice questions.
pub const PENALTY_NOTE: &str = "Wrong selections result in penalty";

/// What a presentation layer needs to draw the current question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    /// 0-based position in the working list.
    pub index: usize,
    pub total: usize,
    /// Machine name of the kind (`single-choice`, ...).
    pub kind: &'static str,
    /// Section heading for the kind.
    pub section: &'static str,
    pub prompt: String,
    pub points: f64,
    /// Empty for free-text questions.
    pub options: Vec<OptionView>,
    /// Current free-text answer, for free-text questions.
    pub text_answer: Option<String>,
    pub hint: Option<String>,
    pub note: Option<&'static str>,
    pub check_state: CheckState,
    /// Present once the question has been checked.
    pub feedback: Option<Feedback>,
    pub navigation: Navigation,
    /// Live score across checked questions.
    pub score: f64,
}

impl QuestionView {
    /// `Question 2 of 10`.
    pub fn progress_label(&self) -> String {
        format!("Question {} of {}", self.index + 1, self.total)
    }
}

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub text: String,
    pub selected: bool,
    /// Set only after checking.
    pub mark: Option<OptionMark>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionMark {
    /// A correct option.
    Correct,
    /// A selected option that is wrong.
    Incorrect,
}

/// Message shown after checking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub correct: bool,
    pub message: String,
}

/// Which controls a presentation layer should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub can_previous: bool,
    pub can_check: bool,
    pub forward: Forward,
}

/// The forward control for the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Forward {
    /// The question must be checked first.
    Hidden,
    Next,
    /// Checked and on the last question.
    Submit,
}

impl Session {
    /// Navigation affordances for the current question.
    pub fn navigation(&self) -> Navigation {
        let checked = self.current_check_state().is_checked();
        let forward = match (checked, self.is_last()) {
            (false, _) => Forward::Hidden,
            (true, false) => Forward::Next,
            (true, true) => Forward::Submit,
        };
        Navigation {
            can_previous: !self.is_first(),
            can_check: !checked,
            forward,
        }
    }

    /// Project the current question for display.
    pub fn view(&self) -> QuestionView {
        let question = self.current_question();
        let answer = self.current_answer();
        let state = self.current_check_state();
        let checked = state.is_checked();

        let options = match (&question.kind, answer) {
            (
                QuestionKind::SingleChoice {
                    options,
                    correct_option,
                },
                Answer::SingleChoice(selected),
            ) => options
                .iter()
                .enumerate()
                .map(|(i, text)| {
                    let is_selected = *selected == Some(i);
                    option_view(text, is_selected, i == *correct_option, checked)
                })
                .collect(),
            (
                QuestionKind::MultiChoice {
                    options,
                    correct_options,
                },
                Answer::MultiChoice(selected),
            ) => options
                .iter()
                .enumerate()
                .map(|(i, text)| {
                    option_view(text, selected.contains(&i), correct_options.contains(&i), checked)
                })
                .collect(),
            _ => Vec::new(),
        };

        let (text_answer, hint) = match (&question.kind, answer) {
            (QuestionKind::FreeText { hint, .. }, Answer::FreeText(text)) => {
                (Some(text.clone()), hint.clone())
            }
            _ => (None, None),
        };

        let note = matches!(question.kind, QuestionKind::MultiChoice { .. }).then_some(PENALTY_NOTE);

        QuestionView {
            index: self.current_index(),
            total: self.len(),
            kind: question.kind.name(),
            section: question.kind.label(),
            prompt: question.prompt.clone(),
            points: question.points,
            options,
            text_answer,
            hint,
            note,
            check_state: state,
            feedback: feedback(state, &question.kind, || render_correct_answer(question)),
            navigation: self.navigation(),
            score: self.score(),
        }
    }
}

fn option_view(text: &str, selected: bool, correct: bool, checked: bool) -> OptionView {
    let mark = match (checked, correct, selected) {
        (false, _, _) => None,
        (true, true, _) => Some(OptionMark::Correct),
        (true, false, true) => Some(OptionMark::Incorrect),
        (true, false, false) => None,
    };
    OptionView {
        text: text.to_string(),
        selected,
        mark,
    }
}

fn feedback(
    state: CheckState,
    kind: &QuestionKind,
    correct_answer: impl FnOnce() -> String,
) -> Option<Feedback> {
    let message = match (state, kind) {
        (CheckState::Unchecked, _) => return None,
        (CheckState::CheckedCorrect, _) => "Correct!".to_string(),
        (CheckState::CheckedIncorrect, QuestionKind::SingleChoice { .. }) => {
            "Wrong! Try to understand why.".to_string()
        }
        (CheckState::CheckedIncorrect, QuestionKind::FreeText { .. }) => {
            format!("Wrong! Correct answer: {}", correct_answer())
        }
        (CheckState::CheckedIncorrect, QuestionKind::MultiChoice { .. }) => {
            "Wrong! Review the correct answers highlighted above.".to_string()
        }
    };
    Some(Feedback {
        correct: state == CheckState::CheckedCorrect,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, QuestionBank, Selection};

    fn session() -> Session {
        Session::in_order(QuestionBank {
            title: None,
            questions: vec![
                Question {
                    prompt: "Pick the primes".into(),
                    points: 4.0,
                    kind: QuestionKind::MultiChoice {
                        options: vec!["2".into(), "4".into(), "5".into()],
                        correct_options: [0, 2].into_iter().collect(),
                    },
                },
                Question {
                    prompt: "Symbol for gold?".into(),
                    points: 3.0,
                    kind: QuestionKind::FreeText {
                        accepted: vec!["Au".into(), "Aurum".into()],
                        hint: Some("Latin".into()),
                    },
                },
            ],
        })
        .unwrap()
    }

    #[test]
    fn unchecked_view_hides_marks_and_forward() {
        let mut s = session();
        s.select_answer(Selection::Choice(1)).unwrap();
        let view = s.view();

        assert_eq!(view.progress_label(), "Question 1 of 2");
        assert_eq!(view.section, "Section III - Multiple Answers");
        assert_eq!(view.note, Some(PENALTY_NOTE));
        assert!(view.options[1].selected);
        assert!(view.options.iter().all(|o| o.mark.is_none()));
        assert!(view.feedback.is_none());
        assert_eq!(
            view.navigation,
            Navigation {
                can_previous: false,
                can_check: true,
                forward: Forward::Hidden,
            }
        );
    }

    #[test]
    fn checked_view_marks_options() {
        let mut s = session();
        s.select_answer(Selection::Choice(1)).unwrap();
        s.check().unwrap();
        let view = s.view();

        let marks: Vec<Option<OptionMark>> = view.options.iter().map(|o| o.mark).collect();
        assert_eq!(
            marks,
            vec![
                Some(OptionMark::Correct),
                Some(OptionMark::Incorrect),
                Some(OptionMark::Correct)
            ]
        );
        let feedback = view.feedback.unwrap();
        assert!(!feedback.correct);
        assert_eq!(
            feedback.message,
            "Wrong! Review the correct answers highlighted above."
        );
        assert_eq!(view.navigation.forward, Forward::Next);
        assert!(!view.navigation.can_check);
    }

    #[test]
    fn last_question_offers_submit() {
        let mut s = session();
        s.check().unwrap();
        s.next().unwrap();
        s.select_answer(Selection::Text("silver".into())).unwrap();
        s.check().unwrap();
        let view = s.view();

        assert_eq!(view.text_answer.as_deref(), Some("silver"));
        assert_eq!(view.hint.as_deref(), Some("Latin"));
        assert_eq!(
            view.feedback.map(|f| f.message),
            Some("Wrong! Correct answer: Au / Aurum".to_string())
        );
        assert_eq!(view.navigation.forward, Forward::Submit);
        assert!(view.navigation.can_previous);
        assert!(view.options.is_empty());
    }
}
