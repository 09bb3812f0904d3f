//! Mock source for testing.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use quizrun_core::parser::RawQuestionBank;
use quizrun_core::traits::QuestionSource;

/// A source with a canned outcome, for exercising chains and the CLI
/// without touching disk or network.
pub struct MockSource {
    name: String,
    outcome: Result<RawQuestionBank, String>,
    call_count: AtomicU32,
}

impl MockSource {
    /// A source that always returns `bank`.
    pub fn with_bank(name: &str, bank: RawQuestionBank) -> Self {
        Self {
            name: name.to_string(),
            outcome: Ok(bank),
            call_count: AtomicU32::new(0),
        }
    }

    /// A source that always fails with `message`.
    pub fn failing(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: Err(message.to_string()),
            call_count: AtomicU32::new(0),
        }
    }

    /// Number of fetches made against this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl QuestionSource for MockSource {
    fn describe(&self) -> String {
        format!("mock {}", self.name)
    }

    async fn fetch(&self) -> anyhow::Result<RawQuestionBank> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        match &self.outcome {
            Ok(bank) => Ok(bank.clone()),
            Err(message) => Err(anyhow::anyhow!("{message}")),
        }
    }
}
