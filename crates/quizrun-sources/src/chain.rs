//! Ordered fallback over several sources.

use async_trait::async_trait;
use tracing::{info, warn};

use quizrun_core::error::LoadError;
use quizrun_core::parser::RawQuestionBank;
use quizrun_core::traits::QuestionSource;

/// A document together with the source that produced it.
#[derive(Debug, Clone)]
pub struct LoadedBank {
    pub source: String,
    pub bank: RawQuestionBank,
}

/// Tries each source in order and keeps the first document that has a
/// `questions` list. A source that fails, or returns a document without
/// one, is logged and skipped. There are no retries.
#[derive(Default)]
pub struct FallbackChain {
    sources: Vec<Box<dyn QuestionSource>>,
}

impl FallbackChain {
    pub fn new(sources: Vec<Box<dyn QuestionSource>>) -> Self {
        Self { sources }
    }

    pub fn push(&mut self, source: Box<dyn QuestionSource>) {
        self.sources.push(source);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Descriptions of the sources in the order they are tried.
    pub fn describe_sources(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.describe()).collect()
    }

    pub async fn load(&self) -> Result<LoadedBank, LoadError> {
        let mut attempts = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let name = source.describe();
            match source.fetch().await {
                Ok(bank) if bank.questions.is_some() => {
                    info!(source = %name, "loaded question bank");
                    return Ok(LoadedBank { source: name, bank });
                }
                Ok(_) => {
                    warn!(source = %name, "document has no `questions` list");
                    attempts.push(format!("{name}: {}", LoadError::Missing));
                }
                Err(e) => {
                    warn!(source = %name, error = %format!("{e:#}"), "source failed");
                    attempts.push(format!("{name}: {e:#}"));
                }
            }
        }

        Err(LoadError::Exhausted { attempts })
    }
}

#[async_trait]
impl QuestionSource for FallbackChain {
    fn describe(&self) -> String {
        format!("fallback chain [{}]", self.describe_sources().join(", "))
    }

    async fn fetch(&self) -> anyhow::Result<RawQuestionBank> {
        Ok(self.load().await?.bank)
    }
}
