//! Interview mode types for session state management.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents the behavioral regime of a coaching session.
///
/// All transitions between modes are allowed and there is no terminal mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewMode {
    /// Free-form conversation with the coach.
    #[default]
    Chat,
    /// Structured interview where every answer is scored.
    Mock,
    /// Structured practice without scoring.
    Practice,
}

impl InterviewMode {
    /// Returns true if replies in this mode carry a score.
    pub fn is_scored(&self) -> bool {
        matches!(self, Self::Mock)
    }

    /// Human-readable label used by front ends.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Chat => "Practice Chat Mode",
            Self::Mock => "Mock Interview Mode",
            Self::Practice => "Structured Practice Mode",
        }
    }
}

impl fmt::Display for InterviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Chat => "chat",
            Self::Mock => "mock",
            Self::Practice => "practice",
        };
        f.write_str(name)
    }
}

impl FromStr for InterviewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chat" => Ok(Self::Chat),
            "mock" => Ok(Self::Mock),
            "practice" => Ok(Self::Practice),
            other => Err(format!("Unknown interview mode: {}", other)),
        }
    }
}
