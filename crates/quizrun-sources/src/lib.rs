//! quizrun-sources — Where question banks come from.
//!
//! Implements the `QuestionSource` trait for local files, HTTP URLs, and a
//! bank compiled into the binary, plus an ordered fallback chain over them
//! and the `quizrun.toml` configuration that selects them.

pub mod chain;
pub mod config;
pub mod embedded;
pub mod error;
pub mod file;
pub mod http;
pub mod mock;

pub use chain::{FallbackChain, LoadedBank};
pub use config::{
    build_chain, create_source, load_config, load_config_from, QuizConfig, SourceConfig,
};
pub use embedded::EmbeddedSource;
pub use error::SourceError;
pub use file::FileSource;
pub use http::HttpSource;
