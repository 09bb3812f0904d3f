//! quizrun-core — Question model, answer evaluation, and the quiz session.
//!
//! This crate owns every rule that decides a score: how answers are graded,
//! how a session moves between questions, and how the final summary is
//! computed. It performs no I/O beyond reading and writing report files;
//! question banks are handed in already decoded.

pub mod error;
pub mod evaluator;
pub mod loader;
pub mod model;
pub mod parser;
pub mod report;
pub mod session;
pub mod statistics;
pub mod traits;
pub mod view;

pub use error::{EvaluationError, InvalidQuestion, LoadError, SessionError};
pub use evaluator::{evaluate, Evaluation};
pub use loader::{build_bank, load, shuffle, InvalidQuestionPolicy};
pub use model::{Answer, CheckState, Question, QuestionBank, QuestionKind, Selection};
pub use report::SummaryReport;
pub use session::Session;
