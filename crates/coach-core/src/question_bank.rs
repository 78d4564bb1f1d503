//! The fixed, ordered list of interview prompts.

use crate::error::{CoachError, Result};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Default interview prompts, in the order a mock interview walks them.
pub const DEFAULT_QUESTIONS: [&str; 10] = [
    "Tell me about yourself and your background.",
    "What interests you most about this position?",
    "Describe a challenging project you've worked on.",
    "How do you handle working under pressure?",
    "Where do you see yourself in 5 years?",
    "What are your greatest strengths and weaknesses?",
    "Why are you looking to leave your current position?",
    "How do you stay updated with new technologies?",
    "Describe a time you had to work with a difficult team member.",
    "What questions do you have for us?",
];

/// A non-empty, ordered list of interview prompts.
///
/// Random selection is uniform over the full list and does not track which
/// prompts were already asked, so repeats are expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct QuestionBank {
    questions: Vec<String>,
}

impl QuestionBank {
    /// Builds a bank from a list of prompts.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Config` if the list is empty or contains a blank
    /// prompt.
    pub fn new(questions: Vec<String>) -> Result<Self> {
        if questions.is_empty() {
            return Err(CoachError::config("Question bank must not be empty"));
        }
        if let Some(index) = questions.iter().position(|q| q.trim().is_empty()) {
            return Err(CoachError::config(format!(
                "Question bank entry {} is blank",
                index
            )));
        }
        Ok(Self { questions })
    }

    /// The opening prompt of a mock interview.
    pub fn first(&self) -> &str {
        &self.questions[0]
    }

    /// A prompt drawn uniformly at random from the full list.
    pub fn random(&self) -> &str {
        self.questions
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or_else(|| self.first())
    }

    pub fn contains(&self, prompt: &str) -> bool {
        self.questions.iter().any(|q| q == prompt)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self {
            questions: DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for QuestionBank {
    type Error = CoachError;

    fn try_from(questions: Vec<String>) -> Result<Self> {
        Self::new(questions)
    }
}

impl From<QuestionBank> for Vec<String> {
    fn from(bank: QuestionBank) -> Self {
        bank.questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bank_order() {
        let bank = QuestionBank::default();
        assert_eq!(bank.len(), 10);
        assert_eq!(bank.first(), "Tell me about yourself and your background.");
    }

    #[test]
    fn test_random_draws_from_bank() {
        let bank = QuestionBank::default();
        for _ in 0..50 {
            assert!(bank.contains(bank.random()));
        }
    }

    #[test]
    fn test_empty_bank_is_rejected() {
        let err = QuestionBank::new(Vec::new()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_blank_prompt_is_rejected() {
        let err = QuestionBank::new(vec!["Why us?".to_string(), "  ".to_string()]).unwrap_err();
        assert_eq!(err, CoachError::config("Question bank entry 1 is blank"));
    }

    #[test]
    fn test_single_prompt_bank_always_repeats() {
        let bank = QuestionBank::new(vec!["Why us?".to_string()]).unwrap();
        assert_eq!(bank.random(), "Why us?");
        assert_eq!(bank.random(), "Why us?");
    }
}
