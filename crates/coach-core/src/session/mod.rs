//! Session domain module.
//!
//! This module contains all session-related domain models.
//!
//! # Module Structure
//!
//! - `turn`: Transcript message types (`Turn`, `Author`, `TurnKind`, `TurnId`)
//! - `transcript`: Append-only turn log (`Transcript`)
//! - `scoring`: Mock interview statistics (`ScoreBoard`)
//! - `mode`: Interview modes (`InterviewMode`)
//! - `model`: Core session model (`Session`)

mod mode;
mod model;
mod scoring;
mod transcript;
mod turn;

// Re-export public API
pub use mode::InterviewMode;
pub use model::Session;
pub use scoring::ScoreBoard;
pub use transcript::Transcript;
pub use turn::{Author, Turn, TurnId, TurnKind};
