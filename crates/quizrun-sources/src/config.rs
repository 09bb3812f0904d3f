//! quizrun configuration and source factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizrun_core::loader::InvalidQuestionPolicy;
use quizrun_core::traits::QuestionSource;

use crate::chain::FallbackChain;
use crate::embedded::EmbeddedSource;
use crate::file::FileSource;
use crate::http::{HttpSource, DEFAULT_TIMEOUT_SECS};

/// Environment variable naming an extra source tried before the configured ones.
pub const QUESTIONS_ENV: &str = "QUIZRUN_QUESTIONS";

/// Where a question bank may be loaded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    File { path: PathBuf },
    Http { url: String },
    Embedded,
}

impl SourceConfig {
    /// Interpret a command-line location: `http(s)://` URLs become HTTP
    /// sources, anything else is a file path.
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            SourceConfig::Http {
                url: location.to_string(),
            }
        } else {
            SourceConfig::File {
                path: PathBuf::from(location),
            }
        }
    }
}

/// Top-level quizrun configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Sources tried in order until one yields a question bank.
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
    /// Shuffle question order at session start.
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    /// Fixed seed for reproducible shuffles.
    #[serde(default)]
    pub seed: Option<u64>,
    /// What to do with records that fail validation.
    #[serde(default)]
    pub invalid_questions: InvalidQuestionPolicy,
    /// Timeout for HTTP sources.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Output directory for saved reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::File {
            path: PathBuf::from("questions.json"),
        },
        SourceConfig::Embedded,
    ]
}
fn default_shuffle() -> bool {
    true
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizrun-results")
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            shuffle: default_shuffle(),
            seed: None,
            invalid_questions: InvalidQuestionPolicy::default(),
            request_timeout_secs: default_timeout(),
            output_dir: default_output_dir(),
        }
    }
}

impl QuizConfig {
    /// Put `source` in front of the configured sources.
    pub fn prepend_source(&mut self, source: SourceConfig) {
        self.sources.insert(0, source);
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::File { path } => SourceConfig::File {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
        SourceConfig::Http { url } => SourceConfig::Http {
            url: resolve_env_vars(url),
        },
        SourceConfig::Embedded => SourceConfig::Embedded,
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizrun.toml` in the current directory
/// 2. `~/.config/quizrun/config.toml`
///
/// `QUIZRUN_QUESTIONS`, when set, is tried before every configured source.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizrun.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    if let Ok(location) = std::env::var(QUESTIONS_ENV) {
        if !location.trim().is_empty() {
            config.prepend_source(SourceConfig::from_location(location.trim()));
        }
    }

    config.sources = config.sources.iter().map(resolve_source_config).collect();

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizrun"))
}

/// Create a source instance from its configuration.
pub fn create_source(config: &SourceConfig, timeout_secs: u64) -> Result<Box<dyn QuestionSource>> {
    match config {
        SourceConfig::File { path } => Ok(Box::new(FileSource::new(path))),
        SourceConfig::Http { url } => Ok(Box::new(
            HttpSource::new(url, timeout_secs)
                .with_context(|| format!("failed to create HTTP source for {url}"))?,
        )),
        SourceConfig::Embedded => Ok(Box::new(EmbeddedSource::default())),
    }
}

/// Build the fallback chain described by `config`.
pub fn build_chain(config: &QuizConfig) -> Result<FallbackChain> {
    let mut chain = FallbackChain::default();
    for source in &config.sources {
        chain.push(create_source(source, config.request_timeout_secs)?);
    }
    Ok(chain)
}
