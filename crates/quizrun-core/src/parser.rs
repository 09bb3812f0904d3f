//! Question bank parser.
//!
//! Decodes JSON or TOML question bank documents into raw records, converts
//! records into typed [`Question`]s, and lints banks for suspicious content.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidQuestion, LoadError};
use crate::evaluator::normalize;
use crate::model::{KindName, Question, QuestionBank, QuestionKind};

/// A question bank document before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawQuestionBank {
    #[serde(default)]
    pub title: Option<String>,
    /// `None` when the document has no `questions` key at all.
    ///
    /// Records stay untyped until [`decode_record`] so that one record with
    /// a wrongly typed field cannot fail the whole document.
    #[serde(default)]
    pub questions: Option<Vec<serde_json::Value>>,
}

/// One question record as written in a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
    #[serde(default, alias = "prompt")]
    pub question: Option<String>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default, alias = "correct_answer")]
    pub correct_answer: Option<usize>,
    #[serde(default, alias = "correct_answers")]
    pub correct_answers: Option<RawAnswers>,
    #[serde(default)]
    pub hint: Option<String>,
}

/// `correctAnswers` holds option indices for multi-choice questions and
/// accepted strings for free-text questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAnswers {
    Indices(Vec<usize>),
    Texts(Vec<String>),
}

/// Encoding of a question bank document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankFormat {
    Json,
    Toml,
}

impl BankFormat {
    /// Format implied by a file extension, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(BankFormat::Json),
            "toml" => Some(BankFormat::Toml),
            _ => None,
        }
    }

    /// Guess the format from the document itself.
    pub fn sniff(content: &str) -> Self {
        if content.trim_start().starts_with('{') {
            BankFormat::Json
        } else {
            BankFormat::Toml
        }
    }
}

/// Parse a question bank file, picking the format from its extension.
pub fn parse_question_bank(path: &Path) -> Result<RawQuestionBank, LoadError> {
    let content = std::fs::read_to_string(path)?;
    let format = BankFormat::from_path(path).unwrap_or_else(|| BankFormat::sniff(&content));
    parse_question_bank_str(&content, format)
}

/// Parse a question bank document held in memory.
pub fn parse_question_bank_str(
    content: &str,
    format: BankFormat,
) -> Result<RawQuestionBank, LoadError> {
    match format {
        BankFormat::Json => {
            serde_json::from_str(content).map_err(|e| LoadError::Malformed(e.to_string()))
        }
        BankFormat::Toml => toml::from_str(content).map_err(|e| LoadError::Malformed(e.to_string())),
    }
}

/// Decode one untyped record into its raw fields.
pub fn decode_record(index: usize, record: serde_json::Value) -> Result<RawQuestion, InvalidQuestion> {
    if !record.is_object() {
        return Err(InvalidQuestion::new(index, "record is not a table"));
    }
    serde_json::from_value(record).map_err(|e| InvalidQuestion::new(index, e.to_string()))
}

/// Decode and convert one untyped record.
pub fn convert_record(index: usize, record: serde_json::Value) -> Result<Question, InvalidQuestion> {
    convert_question(index, decode_record(index, record)?)
}

/// Convert one raw record into a validated question.
///
/// `index` is the 1-based position of the record, used in error messages.
pub fn convert_question(index: usize, raw: RawQuestion) -> Result<Question, InvalidQuestion> {
    let kind_name: KindName = raw
        .kind
        .as_deref()
        .ok_or_else(|| InvalidQuestion::new(index, "missing `kind`"))?
        .parse()
        .map_err(|e: String| InvalidQuestion::new(index, e))?;
    let prompt = raw
        .question
        .ok_or_else(|| InvalidQuestion::new(index, "missing `question`"))?;
    let points = raw
        .points
        .ok_or_else(|| InvalidQuestion::new(index, "missing `points`"))?;

    let kind = match kind_name {
        KindName::SingleChoice => QuestionKind::SingleChoice {
            options: raw
                .options
                .ok_or_else(|| InvalidQuestion::new(index, "missing `options`"))?,
            correct_option: raw
                .correct_answer
                .ok_or_else(|| InvalidQuestion::new(index, "missing `correctAnswer`"))?,
        },
        KindName::FreeText => {
            let accepted = match raw.correct_answers {
                Some(RawAnswers::Texts(texts)) => texts,
                // Numeric answers ("42") decode as indices; keep them as text.
                Some(RawAnswers::Indices(numbers)) => {
                    numbers.into_iter().map(|n| n.to_string()).collect()
                }
                None => return Err(InvalidQuestion::new(index, "missing `correctAnswers`")),
            };
            QuestionKind::FreeText {
                accepted,
                hint: raw.hint.filter(|h| !h.trim().is_empty()),
            }
        }
        KindName::MultiChoice => {
            let correct_options: BTreeSet<usize> = match raw.correct_answers {
                Some(RawAnswers::Indices(indices)) => indices.into_iter().collect(),
                Some(RawAnswers::Texts(_)) => {
                    return Err(InvalidQuestion::new(
                        index,
                        "`correctAnswers` must be option indices for a multi-choice question",
                    ))
                }
                None => return Err(InvalidQuestion::new(index, "missing `correctAnswers`")),
            };
            QuestionKind::MultiChoice {
                options: raw
                    .options
                    .ok_or_else(|| InvalidQuestion::new(index, "missing `options`"))?,
                correct_options,
            }
        }
    };

    let question = Question {
        prompt,
        points,
        kind,
    };
    question.validate(index)?;
    Ok(question)
}

/// A warning from question bank validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The 1-based question position (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn at(index: usize, message: impl Into<String>) -> Self {
        Self {
            question: Some(index + 1),
            message: message.into(),
        }
    }
}

/// Lint a bank for content that is legal but probably a mistake.
pub fn validate_question_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_prompts = HashSet::new();
    for (i, q) in bank.questions.iter().enumerate() {
        if !seen_prompts.insert(normalize(&q.prompt)) {
            warnings.push(ValidationWarning::at(i, "duplicate question prompt"));
        }
    }

    for (i, q) in bank.questions.iter().enumerate() {
        match &q.kind {
            QuestionKind::SingleChoice { options, .. } => {
                if options.len() < 2 {
                    warnings.push(ValidationWarning::at(i, "single-choice question has only one option"));
                }
                warn_duplicate_options(&mut warnings, i, options);
            }
            QuestionKind::MultiChoice {
                options,
                correct_options,
            } => {
                if correct_options.len() == options.len() {
                    warnings.push(ValidationWarning::at(i, "every option is marked correct"));
                }
                warn_duplicate_options(&mut warnings, i, options);
            }
            QuestionKind::FreeText { accepted, .. } => {
                if accepted.iter().any(|a| a.trim().is_empty()) {
                    warnings.push(ValidationWarning::at(
                        i,
                        "blank accepted answer can never match",
                    ));
                }
                let mut seen = HashSet::new();
                if accepted.iter().any(|a| !seen.insert(normalize(a))) {
                    warnings.push(ValidationWarning::at(
                        i,
                        "accepted answers repeat after case/whitespace normalization",
                    ));
                }
            }
        }
    }

    warnings
}

fn warn_duplicate_options(warnings: &mut Vec<ValidationWarning>, index: usize, options: &[String]) {
    let mut seen = HashSet::new();
    if options.iter().any(|o| !seen.insert(o.trim())) {
        warnings.push(ValidationWarning::at(index, "duplicate options"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_JSON: &str = r#"{
  "title": "General knowledge",
  "questions": [
    {
      "type": "mcq",
      "question": "Capital of France?",
      "points": 2,
      "options": ["Berlin", "Paris", "Rome"],
      "correctAnswer": 1
    },
    {
      "type": "fill",
      "question": "Chemical symbol for gold?",
      "points": 3,
      "correctAnswers": ["Au"],
      "hint": "Latin: aurum"
    },
    {
      "type": "multiple",
      "question": "Which are primes?",
      "points": 4,
      "options": ["2", "4", "5", "9"],
      "correctAnswers": [0, 2]
    }
  ]
}"#;

    const VALID_TOML: &str = r#"
title = "General knowledge"

[[questions]]
kind = "single-choice"
question = "Capital of France?"
points = 2
options = ["Berlin", "Paris", "Rome"]
correct_answer = 1

[[questions]]
kind = "free-text"
question = "Answer to everything?"
points = 1.5
correct_answers = [42]
"#;

    fn convert_all(raw: RawQuestionBank) -> Vec<Result<Question, InvalidQuestion>> {
        raw.questions
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, q)| convert_record(i + 1, q))
            .collect()
    }

    #[test]
    fn parse_json_bank() {
        let raw = parse_question_bank_str(VALID_JSON, BankFormat::Json).unwrap();
        assert_eq!(raw.title.as_deref(), Some("General knowledge"));

        let questions: Vec<Question> = convert_all(raw).into_iter().map(Result::unwrap).collect();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].kind.name(), "single-choice");
        assert_eq!(questions[1].points, 3.0);
        assert!(matches!(
            &questions[1].kind,
            QuestionKind::FreeText { hint: Some(h), .. } if h == "Latin: aurum"
        ));
        assert!(matches!(
            &questions[2].kind,
            QuestionKind::MultiChoice { correct_options, .. } if correct_options.len() == 2
        ));
    }

    #[test]
    fn parse_toml_bank_with_numeric_free_text_answer() {
        let raw = parse_question_bank_str(VALID_TOML, BankFormat::Toml).unwrap();
        let questions: Vec<Question> = convert_all(raw).into_iter().map(Result::unwrap).collect();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].points, 1.5);
        assert!(matches!(
            &questions[1].kind,
            QuestionKind::FreeText { accepted, .. } if accepted == &vec!["42".to_string()]
        ));
    }

    #[test]
    fn missing_questions_key_is_none() {
        let raw = parse_question_bank_str(r#"{"title": "x"}"#, BankFormat::Json).unwrap();
        assert!(raw.questions.is_none());
    }

    #[test]
    fn malformed_document_is_a_load_error() {
        let err = parse_question_bank_str("{ not json", BankFormat::Json).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
        let err = parse_question_bank_str("this is not [valid toml }{", BankFormat::Toml).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn unknown_kind_is_invalid() {
        let raw = RawQuestion {
            kind: Some("essay".into()),
            question: Some("Discuss".into()),
            points: Some(1.0),
            ..Default::default()
        };
        let err = convert_question(7, raw).unwrap_err();
        assert_eq!(err.index, 7);
        assert!(err.reason.contains("unknown question kind"));
    }

    #[test]
    fn multi_choice_with_text_answers_is_invalid() {
        let raw = RawQuestion {
            kind: Some("multiple".into()),
            question: Some("Pick".into()),
            points: Some(1.0),
            options: Some(vec!["a".into(), "b".into()]),
            correct_answers: Some(RawAnswers::Texts(vec!["a".into()])),
            ..Default::default()
        };
        assert!(convert_question(1, raw).is_err());
    }

    #[test]
    fn wrongly_typed_field_fails_only_its_record() {
        let doc = r#"{"questions": [
            {"type": "mcq", "question": "ok?", "points": 1, "options": ["a", "b"], "correctAnswer": 0},
            {"type": "mcq", "question": "bad points", "points": "two", "options": ["a", "b"], "correctAnswer": 0},
            {"type": "mcq", "question": "bad answer", "points": 1, "options": ["a", "b"], "correctAnswer": -1},
            "not a record"
        ]}"#;
        let results = convert_all(parse_question_bank_str(doc, BankFormat::Json).unwrap());

        assert_eq!(results.len(), 4);
        assert!(results[0].is_ok());
        let indices: Vec<usize> = results[1..]
            .iter()
            .map(|r| r.as_ref().unwrap_err().index)
            .collect();
        assert_eq!(indices, vec![2, 3, 4]);
        assert!(results[1].as_ref().unwrap_err().reason.contains("invalid type"));
    }

    #[test]
    fn format_detection() {
        assert_eq!(
            BankFormat::from_path(Path::new("bank.JSON")),
            Some(BankFormat::Json)
        );
        assert_eq!(
            BankFormat::from_path(Path::new("bank.toml")),
            Some(BankFormat::Toml)
        );
        assert_eq!(BankFormat::from_path(Path::new("bank")), None);
        assert_eq!(BankFormat::sniff("  {\"questions\": []}"), BankFormat::Json);
        assert_eq!(BankFormat::sniff("[[questions]]\nkind = \"mcq\""), BankFormat::Toml);
    }

    #[test]
    fn parse_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(&path, VALID_JSON).unwrap();

        let raw = parse_question_bank(&path).unwrap();
        assert_eq!(raw.questions.map(|q| q.len()), Some(3));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = parse_question_bank(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn validate_flags_duplicates_and_blank_answers() {
        let bank = QuestionBank {
            title: None,
            questions: vec![
                Question {
                    prompt: "Same?".into(),
                    points: 1.0,
                    kind: QuestionKind::FreeText {
                        accepted: vec!["Yes".into(), " yes ".into(), " ".into()],
                        hint: None,
                    },
                },
                Question {
                    prompt: "same?".into(),
                    points: 1.0,
                    kind: QuestionKind::SingleChoice {
                        options: vec!["a".into(), "a".into()],
                        correct_option: 0,
                    },
                },
            ],
        };

        let warnings = validate_question_bank(&bank);
        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert!(messages.contains(&"duplicate question prompt"));
        assert!(messages.contains(&"duplicate options"));
        assert!(messages.contains(&"blank accepted answer can never match"));
        assert!(messages
            .iter()
            .any(|m| m.contains("repeat after case/whitespace normalization")));
        assert_eq!(warnings[0].question, Some(2));
    }
}
