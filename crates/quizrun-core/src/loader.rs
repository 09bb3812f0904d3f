//! Turning decoded documents into working question lists.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::model::{Question, QuestionBank};
use crate::parser::{convert_record, RawQuestionBank};

/// What to do with a record that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidQuestionPolicy {
    /// Drop the record and log a warning.
    #[default]
    Skip,
    /// Abort the whole load.
    Fail,
}

/// Convert a raw document into a bank of validated questions.
pub fn build_bank(
    raw: RawQuestionBank,
    policy: InvalidQuestionPolicy,
) -> Result<QuestionBank, LoadError> {
    let records = raw.questions.ok_or(LoadError::Missing)?;
    let mut questions = Vec::with_capacity(records.len());

    for (i, record) in records.into_iter().enumerate() {
        match convert_record(i + 1, record) {
            Ok(question) => questions.push(question),
            Err(e) => match policy {
                InvalidQuestionPolicy::Fail => return Err(e.into()),
                InvalidQuestionPolicy::Skip => tracing::warn!("skipping {e}"),
            },
        }
    }

    if questions.is_empty() {
        return Err(LoadError::Empty);
    }

    tracing::debug!(count = questions.len(), "question bank built");
    Ok(QuestionBank {
        title: raw.title,
        questions,
    })
}

/// Return a uniformly shuffled copy of `questions` (Fisher–Yates).
pub fn shuffle<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Vec<Question> {
    let mut shuffled = questions.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Produce the working list for a session.
pub fn load<R: Rng + ?Sized>(bank: &QuestionBank, rng: &mut R) -> Result<Vec<Question>, LoadError> {
    if bank.questions.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(shuffle(&bank.questions, rng))
}
