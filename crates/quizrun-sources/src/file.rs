//! Local file source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::instrument;

use quizrun_core::parser::{parse_question_bank_str, BankFormat, RawQuestionBank};
use quizrun_core::traits::QuestionSource;

use crate::error::SourceError;

/// Reads a question bank from a JSON or TOML file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> anyhow::Result<RawQuestionBank> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    SourceError::NotFound(self.path.display().to_string())
                }
                _ => SourceError::Io(e),
            })?;

        let format =
            BankFormat::from_path(&self.path).unwrap_or_else(|| BankFormat::sniff(&content));
        let bank = parse_question_bank_str(&content, format).map_err(|e| SourceError::Parse {
            location: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(bank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(
            &path,
            r#"{"questions": [{"type": "mcq", "question": "2+2?", "points": 1, "options": ["3", "4"], "correctAnswer": 1}]}"#,
        )
        .unwrap();

        let source = FileSource::new(&path);
        let bank = source.fetch().await.unwrap();
        assert_eq!(bank.questions.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.toml");
        std::fs::write(
            &path,
            r#"
title = "Capitals"

[[questions]]
kind = "free-text"
question = "Capital of France?"
points = 2
correct_answers = ["Paris"]
"#,
        )
        .unwrap();

        let bank = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(bank.title.as_deref(), Some("Capitals"));
        assert_eq!(bank.questions.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("nope.json"));

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SourceError>(),
            Some(SourceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileSource::new(&path).fetch().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SourceError>(),
            Some(SourceError::Parse { .. })
        ));
    }

    #[test]
    fn describe_names_the_path() {
        let source = FileSource::new("bank/questions.json");
        assert_eq!(source.describe(), "file bank/questions.json");
    }
}
