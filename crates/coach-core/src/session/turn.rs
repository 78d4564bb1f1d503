//! Transcript turn types.
//!
//! This module contains types for representing the messages exchanged in a
//! coaching session, including their author and intent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequence-based turn identifier, unique within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(pub u64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    /// Turn typed (or dictated) by the user.
    User,
    /// Turn produced by the coach.
    Coach,
}

/// Classifies the intent of a turn.
///
/// User turns are always `Response`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    /// Opening or prompting question from the coach.
    Question,
    /// Scored feedback on an answer given in mock mode.
    Feedback,
    /// An unscored conversational reply.
    Response,
}

/// A single message in a session transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Identifier assigned by the transcript at append time.
    pub id: TurnId,
    /// The content of the turn.
    pub content: String,
    /// Who authored the turn.
    pub author: Author,
    /// When the turn was created.
    pub created_at: DateTime<Utc>,
    /// Intent of the turn.
    pub kind: TurnKind,
}

impl Turn {
    /// Creates a user turn. User turns are always of kind `Response`.
    pub fn user(id: TurnId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            author: Author::User,
            created_at: Utc::now(),
            kind: TurnKind::Response,
        }
    }

    /// Creates a coach turn of the given kind.
    pub fn coach(id: TurnId, content: impl Into<String>, kind: TurnKind) -> Self {
        Self {
            id,
            content: content.into(),
            author: Author::Coach,
            created_at: Utc::now(),
            kind,
        }
    }

    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }

    pub fn is_coach(&self) -> bool {
        self.author == Author::Coach
    }
}
