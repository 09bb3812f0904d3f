//! Core trait definitions for question sources.
//!
//! Sources are the I/O boundary of quizrun. They are implemented by the
//! `quizrun-sources` crate; the session itself never awaits.

use async_trait::async_trait;

use crate::parser::RawQuestionBank;

/// Somewhere a question bank document can be fetched from.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable description used in logs and error messages
    /// (e.g. `file questions.json`).
    fn describe(&self) -> String;

    /// Fetch and decode the document.
    async fn fetch(&self) -> anyhow::Result<RawQuestionBank>;
}
