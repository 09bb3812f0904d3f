//! HTTP question bank source.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::instrument;

use quizrun_core::parser::{parse_question_bank_str, BankFormat, RawQuestionBank};
use quizrun_core::traits::QuestionSource;

use crate::error::SourceError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Fetches a question bank document over HTTP(S).
///
/// Every request carries a `t=<unix millis>` query parameter so that
/// intermediate caches never serve a stale bank.
pub struct HttpSource {
    url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            url: url.to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Append the cache-busting `t` parameter to `url`.
pub fn cache_busted_url(url: &str, millis: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}t={millis}")
}

#[async_trait]
impl QuestionSource for HttpSource {
    fn describe(&self) -> String {
        format!("url {}", self.url)
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> anyhow::Result<RawQuestionBank> {
        let url = cache_busted_url(&self.url, chrono::Utc::now().timestamp_millis());

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout_secs)
            } else {
                SourceError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(SourceError::NotFound(self.url.clone()).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Http {
                status,
                message: body,
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        let bank = parse_question_bank_str(&body, BankFormat::sniff(&body)).map_err(|e| {
            SourceError::Parse {
                location: self.url.clone(),
                message: e.to_string(),
            }
        })?;

        Ok(bank)
    }
}
