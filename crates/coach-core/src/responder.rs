//! Reply generation interface.
//!
//! The session controller depends only on the `Responder` trait, so the
//! built-in stub can be replaced by a real backend without touching the
//! engine.

use crate::error::Result;
use crate::session::{InterviewMode, TurnKind};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A generated coach reply, before it becomes a transcript turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachReply {
    /// Text of the coach turn.
    pub content: String,
    /// Intent of the coach turn.
    pub kind: TurnKind,
    /// Score for the user's answer (mock mode feedback only).
    #[serde(default)]
    pub score: Option<f64>,
}

impl CoachReply {
    /// An unscored question.
    pub fn question(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: TurnKind::Question,
            score: None,
        }
    }

    /// Scored feedback.
    pub fn feedback(content: impl Into<String>, score: f64) -> Self {
        Self {
            content: content.into(),
            kind: TurnKind::Feedback,
            score: Some(score),
        }
    }

    /// The reply used in place of a failed or timed-out generation.
    pub fn apology(reason: &str) -> Self {
        Self::question(format!(
            "Sorry, I couldn't come up with a reply just now ({}). Could you repeat or rephrase your answer?",
            reason
        ))
    }
}

/// Produces a coach reply from the latest user input and the current mode.
///
/// Implementations must be safe to call concurrently; any mutable state
/// belongs to the session, not the responder.
///
/// # Implementation Notes
///
/// - In `Mock` mode a reply should be `Feedback` with a score.
/// - In `Chat` and `Practice` mode a reply should be an unscored `Question`.
/// - Failures are allowed; the controller turns them into an apology turn.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Generates the reply to `input`.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Responder` if the backend fails.
    async fn generate(&self, input: &str, mode: InterviewMode) -> Result<CoachReply>;
}
