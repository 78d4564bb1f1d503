//! Configuration model for the interview coach.
//!
//! Every field carries a serde default so a partial `config.toml` only needs
//! to mention what it overrides.

use crate::error::{CoachError, Result};
use crate::question_bank::QuestionBank;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_OPENING_GREETING: &str = "Hello! I'm your AI Interview Coach. I'm here to help you practice for your upcoming interviews. Would you like to start with a mock interview, or do you have specific questions you'd like to practice?";

pub const DEFAULT_RESET_GREETING: &str = "Session reset! I'm ready to help you practice for your interviews. What would you like to work on?";

pub const DEFAULT_MOCK_INTRODUCTION: &str = "Great! Let's start your mock interview. I'll ask you questions and provide feedback on your responses. Remember to use the STAR method (Situation, Task, Action, Result) for behavioral questions.";

pub const DEFAULT_TRANSCRIPTION_PLACEHOLDER: &str = "This is a simulated speech-to-text response. In a real implementation, this would be your spoken answer converted to text.";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct CoachConfig {
    #[serde(default)]
    pub reply: ReplyConfig,
    #[serde(default)]
    pub interview: InterviewConfig,
    #[serde(default)]
    pub messages: MessageConfig,
}

/// Timing of simulated coach replies.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReplyConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Upper bound on a single responder call.
    pub timeout_secs: u64,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1000,
            max_delay_ms: 2000,
            timeout_secs: 30,
        }
    }
}

impl ReplyConfig {
    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InterviewConfig {
    pub questions: QuestionBank,
    /// Lowest score the stub hands out (inclusive).
    pub score_min: u32,
    /// Highest score the stub hands out (inclusive).
    pub score_max: u32,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            questions: QuestionBank::default(),
            score_min: 70,
            score_max: 89,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MessageConfig {
    pub opening_greeting: String,
    pub reset_greeting: String,
    pub mock_introduction: String,
    pub transcription_placeholder: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            opening_greeting: DEFAULT_OPENING_GREETING.to_string(),
            reset_greeting: DEFAULT_RESET_GREETING.to_string(),
            mock_introduction: DEFAULT_MOCK_INTRODUCTION.to_string(),
            transcription_placeholder: DEFAULT_TRANSCRIPTION_PLACEHOLDER.to_string(),
        }
    }
}

impl CoachConfig {
    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.reply.min_delay_ms > self.reply.max_delay_ms {
            return Err(CoachError::config(format!(
                "reply.min_delay_ms ({}) is greater than reply.max_delay_ms ({})",
                self.reply.min_delay_ms, self.reply.max_delay_ms
            )));
        }
        if self.reply.timeout_secs == 0 {
            return Err(CoachError::config("reply.timeout_secs must be positive"));
        }
        if self.interview.score_min > self.interview.score_max {
            return Err(CoachError::config(format!(
                "interview.score_min ({}) is greater than interview.score_max ({})",
                self.interview.score_min, self.interview.score_max
            )));
        }
        if self.messages.opening_greeting.trim().is_empty()
            || self.messages.reset_greeting.trim().is_empty()
        {
            return Err(CoachError::config("Greetings must not be empty"));
        }
        Ok(())
    }
}
