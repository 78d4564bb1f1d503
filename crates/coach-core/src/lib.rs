//! Domain layer for the interview coach.
//!
//! Holds the session model (turns, transcript, scoring, modes), the shared
//! error type, the question bank, the configuration model and the
//! `Responder` interface. Orchestration lives in `coach-application`.

pub mod config;
pub mod error;
pub mod question_bank;
pub mod responder;
pub mod session;

// Re-export common types
pub use config::CoachConfig;
pub use error::{CoachError, Result};
pub use question_bank::QuestionBank;
pub use responder::{CoachReply, Responder};
