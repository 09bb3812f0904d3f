//! quizrun-report — Shareable renderings of a finished quiz.

pub mod html;

pub use html::{generate_html, write_html_report};
