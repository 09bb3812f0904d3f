//! Question bank compiled into the binary.

use std::borrow::Cow;

use async_trait::async_trait;

use quizrun_core::parser::{parse_question_bank_str, BankFormat, RawQuestionBank};
use quizrun_core::traits::QuestionSource;

use crate::error::SourceError;

/// The bank shipped with quizrun, used when nothing else can be loaded.
pub const DEFAULT_BANK: &str = include_str!("../assets/questions.json");

/// Serves a document held in memory. Never touches the filesystem or network.
#[derive(Debug, Clone)]
pub struct EmbeddedSource {
    document: Cow<'static, str>,
}

impl EmbeddedSource {
    /// Serve a custom document instead of the built-in bank.
    pub fn from_document(document: impl Into<String>) -> Self {
        Self {
            document: Cow::Owned(document.into()),
        }
    }

    pub fn document(&self) -> &str {
        &self.document
    }
}

impl Default for EmbeddedSource {
    fn default() -> Self {
        Self {
            document: Cow::Borrowed(DEFAULT_BANK),
        }
    }
}

#[async_trait]
impl QuestionSource for EmbeddedSource {
    fn describe(&self) -> String {
        "embedded question bank".to_string()
    }

    async fn fetch(&self) -> anyhow::Result<RawQuestionBank> {
        let bank = parse_question_bank_str(&self.document, BankFormat::sniff(&self.document))
            .map_err(|e| SourceError::Parse {
                location: self.describe(),
                message: e.to_string(),
            })?;
        Ok(bank)
    }
}
