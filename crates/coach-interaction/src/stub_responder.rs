//! Canned stand-in for a real interview-feedback backend.

use async_trait::async_trait;
use coach_core::config::InterviewConfig;
use coach_core::session::InterviewMode;
use coach_core::{CoachError, CoachReply, QuestionBank, Responder, Result};
use rand::Rng;
use rand::seq::SliceRandom;
use std::ops::RangeInclusive;

const FEEDBACK_TEMPLATES: [&str; 4] = [
    "Great response! I particularly liked how you structured your answer.",
    "Good answer, but try to be more specific with examples.",
    "Excellent use of the STAR method in your response!",
    "Strong answer! Consider adding more quantifiable results.",
];

const ACKNOWLEDGEMENTS: [&str; 3] = [
    "That's a great point! Can you elaborate on that with a specific example?",
    "I understand. How would you handle a similar situation in the future?",
    "Interesting perspective! What do you think are the key skills needed for this role?",
];

const PRACTICE_LEAD_IN: &str = "Thank you for sharing that. Let's practice another common interview question: ";

/// Picks replies from fixed templates at random.
///
/// Holds no mutable state: every call draws from the thread-local RNG, so
/// one instance can serve any number of concurrent sessions.
#[derive(Debug, Clone)]
pub struct StubResponder {
    questions: QuestionBank,
    scores: RangeInclusive<u32>,
}

impl StubResponder {
    /// Creates a stub that scores mock answers within `scores` (inclusive).
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Config` if the range is empty.
    pub fn new(questions: QuestionBank, scores: RangeInclusive<u32>) -> Result<Self> {
        if scores.is_empty() {
            return Err(CoachError::config(format!(
                "Score range {}..={} is empty",
                scores.start(),
                scores.end()
            )));
        }
        Ok(Self { questions, scores })
    }

    pub fn from_config(config: &InterviewConfig) -> Result<Self> {
        Self::new(
            config.questions.clone(),
            config.score_min..=config.score_max,
        )
    }

    pub fn questions(&self) -> &QuestionBank {
        &self.questions
    }

    /// Builds a reply synchronously; the RNG never lives across an await.
    fn compose(&self, mode: InterviewMode) -> CoachReply {
        let mut rng = rand::thread_rng();

        match mode {
            InterviewMode::Mock => {
                let score = rng.gen_range(self.scores.clone());
                let feedback = FEEDBACK_TEMPLATES
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(FEEDBACK_TEMPLATES[0]);
                let content = format!(
                    "{} Score: {}/100\n\nNext question: {}",
                    feedback,
                    score,
                    self.questions.random()
                );
                CoachReply::feedback(content, f64::from(score))
            }
            InterviewMode::Chat | InterviewMode::Practice => {
                // The fourth template embeds a random prompt.
                let pick = rng.gen_range(0..=ACKNOWLEDGEMENTS.len());
                let content = match ACKNOWLEDGEMENTS.get(pick) {
                    Some(text) => text.to_string(),
                    None => format!("{}{}", PRACTICE_LEAD_IN, self.questions.random()),
                };
                CoachReply::question(content)
            }
        }
    }
}

impl Default for StubResponder {
    fn default() -> Self {
        let config = InterviewConfig::default();
        Self {
            questions: config.questions,
            scores: config.score_min..=config.score_max,
        }
    }
}

#[async_trait]
impl Responder for StubResponder {
    async fn generate(&self, input: &str, mode: InterviewMode) -> Result<CoachReply> {
        tracing::debug!(
            "[StubResponder] Generating {} reply to {} chars of input",
            mode,
            input.chars().count()
        );
        Ok(self.compose(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_core::session::TurnKind;

    fn score_in_text(content: &str) -> u32 {
        let start = content.find("Score: ").unwrap() + "Score: ".len();
        let end = content[start..].find("/100").unwrap() + start;
        content[start..end].parse().unwrap()
    }

    #[tokio::test]
    async fn test_mock_reply_is_scored_feedback() {
        let stub = StubResponder::default();

        for _ in 0..50 {
            let reply = stub.generate("I shipped it on time.", InterviewMode::Mock).await.unwrap();
            assert_eq!(reply.kind, TurnKind::Feedback);

            let score = reply.score.unwrap();
            assert!((70.0..=89.0).contains(&score), "score out of range: {}", score);
            assert_eq!(score_in_text(&reply.content) as f64, score);

            let (_, next) = reply.content.split_once("\n\nNext question: ").unwrap();
            assert!(stub.questions().contains(next), "unexpected prompt: {}", next);
        }
    }

    #[tokio::test]
    async fn test_chat_and_practice_replies_are_unscored_questions() {
        let stub = StubResponder::default();

        for mode in [InterviewMode::Chat, InterviewMode::Practice] {
            for _ in 0..50 {
                let reply = stub.generate("hello", mode).await.unwrap();
                assert_eq!(reply.kind, TurnKind::Question);
                assert_eq!(reply.score, None);

                let known = ACKNOWLEDGEMENTS.contains(&reply.content.as_str())
                    || reply
                        .content
                        .strip_prefix(PRACTICE_LEAD_IN)
                        .is_some_and(|prompt| stub.questions().contains(prompt));
                assert!(known, "unexpected reply: {}", reply.content);
            }
        }
    }

    #[tokio::test]
    async fn test_fixed_score_range() {
        let bank = QuestionBank::new(vec!["Why us?".to_string()]).unwrap();
        let stub = StubResponder::new(bank, 85..=85).unwrap();

        let reply = stub.generate("Because.", InterviewMode::Mock).await.unwrap();
        assert_eq!(reply.score, Some(85.0));
        assert!(reply.content.ends_with("Next question: Why us?"));
    }

    #[test]
    fn test_empty_score_range_is_rejected() {
        #[allow(clippy::reversed_empty_ranges)]
        let result = StubResponder::new(QuestionBank::default(), 90..=70);
        assert!(result.unwrap_err().is_config());
    }

    #[tokio::test]
    async fn test_concurrent_calls_share_one_stub() {
        let stub = std::sync::Arc::new(StubResponder::default());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let stub = stub.clone();
            handles.push(tokio::spawn(async move {
                stub.generate("answer", InterviewMode::Mock).await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
    }
}
