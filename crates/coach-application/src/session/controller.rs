//! Session controller: the only stateful orchestrator of a coaching session.
//!
//! Every inbound operation mutates the owned `Session` behind a lock and then
//! publishes a fresh snapshot on a `watch` channel. Coach replies run as
//! spawned tokio tasks tagged with the session generation; a reply whose
//! generation no longer matches when it resolves is dropped.

use super::delay::{ReplyDelay, UniformDelay};
use coach_core::config::MessageConfig;
use coach_core::session::{InterviewMode, Session, TurnId, TurnKind};
use coach_core::{CoachConfig, CoachError, CoachReply, QuestionBank, Responder, Result};
use coach_interaction::StubResponder;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;

/// How a scheduled coach reply ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The coach turn was appended to the transcript.
    Appended(TurnId),
    /// The session moved to a newer generation first; nothing was appended.
    Discarded {
        /// Generation the reply was scheduled under.
        generation: u64,
    },
}

/// Handle to the reply scheduled by an accepted submission.
///
/// Dropping the handle detaches the task; it still runs to completion.
#[derive(Debug)]
pub struct PendingReply {
    turn_id: TurnId,
    generation: u64,
    handle: JoinHandle<ReplyOutcome>,
}

impl PendingReply {
    /// Id of the user turn that triggered the reply.
    pub fn turn_id(&self) -> TurnId {
        self.turn_id
    }

    /// Generation the reply belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Waits for the reply task to resolve.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Internal` if the task panicked or was aborted.
    pub async fn outcome(self) -> Result<ReplyOutcome> {
        self.handle
            .await
            .map_err(|e| CoachError::internal(format!("Reply task failed: {}", e)))
    }
}

/// Orchestrates one coaching session.
///
/// `SessionController` is responsible for:
/// - Accepting user turns and scheduling exactly one coach reply at a time
/// - Mode transitions, including the mock interview opening
/// - Session reset and invalidation of in-flight replies
/// - The recording affordance and its simulated transcription
/// - Publishing a snapshot after every change
pub struct SessionController {
    /// The live session
    session: Arc<RwLock<Session>>,
    /// Reply backend
    responder: Arc<dyn Responder>,
    /// Delay before each reply
    delay: Arc<dyn ReplyDelay>,
    /// Upper bound on a single responder call
    reply_timeout: Duration,
    /// Fixed interview prompts
    questions: QuestionBank,
    /// Greetings and canned texts
    messages: MessageConfig,
    /// Snapshot channel for observers
    updates: Arc<watch::Sender<Session>>,
}

impl SessionController {
    /// Creates a controller with a freshly seeded session.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Config` if the configuration is invalid.
    pub fn new(config: &CoachConfig, responder: Arc<dyn Responder>) -> Result<Self> {
        config.validate()?;

        let session = Session::new(&config.messages.opening_greeting, 0);
        let (updates, _) = watch::channel(session.clone());

        Ok(Self {
            session: Arc::new(RwLock::new(session)),
            responder,
            delay: Arc::new(UniformDelay::from_config(&config.reply)?),
            reply_timeout: config.reply.timeout(),
            questions: config.interview.questions.clone(),
            messages: config.messages.clone(),
            updates: Arc::new(updates),
        })
    }

    /// Creates a controller backed by the canned `StubResponder`.
    pub fn with_stub(config: &CoachConfig) -> Result<Self> {
        let responder = StubResponder::from_config(&config.interview)?;
        Self::new(config, Arc::new(responder))
    }

    /// Replaces the reply delay policy.
    pub fn with_delay(mut self, delay: Arc<dyn ReplyDelay>) -> Self {
        self.delay = delay;
        self
    }

    // ============================================================================
    // Observation
    // ============================================================================

    /// Returns a copy of the current session.
    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Subscribes to session snapshots, published after every change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.updates.subscribe()
    }

    /// Running average of mock interview scores (0 when nothing is scored).
    pub async fn average_score(&self) -> f64 {
        self.session.read().await.average_score()
    }

    // ============================================================================
    // Commands
    // ============================================================================

    /// Appends a user turn and schedules the coach reply.
    ///
    /// # Errors
    ///
    /// - `CoachError::EmptyInput` if `text` is blank
    /// - `CoachError::SessionBusy` if a reply is still pending
    ///
    /// Neither error mutates the session.
    pub async fn submit_user_turn(&self, text: &str) -> Result<PendingReply> {
        if text.trim().is_empty() {
            tracing::debug!("[SessionController] Ignoring blank submission");
            return Err(CoachError::EmptyInput);
        }

        let (turn_id, generation, mode) = {
            let mut session = self.session.write().await;
            if session.awaiting_response() {
                tracing::debug!("[SessionController] Rejecting submission while a reply is pending");
                return Err(CoachError::SessionBusy);
            }

            let turn_id = session.append_user_turn(text);
            session.begin_reply();
            self.publish(&session);
            (turn_id, session.generation(), session.mode())
        };

        let task = ReplyTask {
            session: Arc::clone(&self.session),
            responder: Arc::clone(&self.responder),
            updates: Arc::clone(&self.updates),
            delay: self.delay.next_delay(),
            timeout: self.reply_timeout,
            generation,
            mode,
            input: text.to_string(),
        };

        tracing::info!(
            "[SessionController] Accepted turn {} (generation {}, mode {}), reply in {:?}",
            turn_id,
            generation,
            mode,
            task.delay
        );

        Ok(PendingReply {
            turn_id,
            generation,
            handle: tokio::spawn(task.run()),
        })
    }

    /// Enters mock interview mode and asks the first question.
    ///
    /// Returns false without touching the session if it is already in mock
    /// mode.
    pub async fn start_mock_interview(&self) -> bool {
        let mut session = self.session.write().await;
        if !session.switch_mode(InterviewMode::Mock) {
            tracing::debug!("[SessionController] Mock interview already running");
            return false;
        }

        let opening = format!(
            "{}\n\nFirst question: {}",
            self.messages.mock_introduction,
            self.questions.first()
        );
        session.append_coach_turn(opening, TurnKind::Question, None);
        self.publish(&session);

        tracing::info!(
            "[SessionController] Mock interview started (generation {})",
            session.generation()
        );
        true
    }

    /// Switches mode without the mock interview opening.
    ///
    /// Returns false if the session is already in `mode`. Entering `Mock`
    /// still clears the score accumulators.
    pub async fn set_mode(&self, mode: InterviewMode) -> bool {
        let mut session = self.session.write().await;
        if !session.switch_mode(mode) {
            return false;
        }
        self.publish(&session);

        tracing::info!(
            "[SessionController] Mode set to {} (generation {})",
            mode,
            session.generation()
        );
        true
    }

    /// Replaces the session with a freshly seeded one in chat mode.
    ///
    /// Any reply still pending is discarded when it resolves.
    pub async fn reset_session(&self) {
        let mut session = self.session.write().await;
        session.reset(&self.messages.reset_greeting);
        self.publish(&session);

        tracing::info!(
            "[SessionController] Session reset (generation {})",
            session.generation()
        );
    }

    /// Flips the recording flag and returns the new value.
    ///
    /// Stopping a recording fills the input buffer with a placeholder
    /// transcription.
    pub async fn toggle_recording(&self) -> bool {
        let mut session = self.session.write().await;
        let recording = session.toggle_recording(&self.messages.transcription_placeholder);
        self.publish(&session);

        tracing::debug!("[SessionController] Recording: {}", recording);
        recording
    }

    /// Takes the text waiting in the input buffer, if any.
    pub async fn take_input_buffer(&self) -> Option<String> {
        let mut session = self.session.write().await;
        let text = session.take_input_buffer();
        if text.is_some() {
            self.publish(&session);
        }
        text
    }

    fn publish(&self, session: &Session) {
        self.updates.send_replace(session.clone());
    }
}

/// Everything a scheduled reply needs, captured at submission time.
struct ReplyTask {
    session: Arc<RwLock<Session>>,
    responder: Arc<dyn Responder>,
    updates: Arc<watch::Sender<Session>>,
    delay: Duration,
    timeout: Duration,
    generation: u64,
    mode: InterviewMode,
    input: String,
}

impl ReplyTask {
    async fn run(self) -> ReplyOutcome {
        tokio::time::sleep(self.delay).await;

        let reply = match tokio::time::timeout(
            self.timeout,
            self.responder.generate(&self.input, self.mode),
        )
        .await
        {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                tracing::warn!("[ReplyTask] Responder failed: {}", e);
                CoachReply::apology("the coach backend returned an error")
            }
            Err(_) => {
                tracing::warn!("[ReplyTask] Responder timed out after {:?}", self.timeout);
                CoachReply::apology("the request timed out")
            }
        };

        let mut session = self.session.write().await;
        if session.generation() != self.generation {
            tracing::debug!(
                "[ReplyTask] Discarding stale reply from generation {} (current {})",
                self.generation,
                session.generation()
            );
            return ReplyOutcome::Discarded {
                generation: self.generation,
            };
        }

        let turn_id = session.append_coach_turn(reply.content, reply.kind, reply.score);
        session.finish_reply();
        self.updates.send_replace(session.clone());

        tracing::debug!(
            "[ReplyTask] Appended {:?} turn {} (score: {:?})",
            reply.kind,
            turn_id,
            reply.score
        );
        ReplyOutcome::Appended(turn_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::delay::FixedDelay;
    use async_trait::async_trait;
    use coach_core::session::Author;

    struct EchoResponder;

    #[async_trait]
    impl Responder for EchoResponder {
        async fn generate(&self, input: &str, mode: InterviewMode) -> Result<CoachReply> {
            Ok(match mode {
                InterviewMode::Mock => CoachReply::feedback(format!("Score: 80/100 for {}", input), 80.0),
                _ => CoachReply::question(format!("You said: {}", input)),
            })
        }
    }

    struct FailingResponder;

    #[async_trait]
    impl Responder for FailingResponder {
        async fn generate(&self, _input: &str, _mode: InterviewMode) -> Result<CoachReply> {
            Err(CoachError::responder("backend unavailable"))
        }
    }

    struct HangingResponder;

    #[async_trait]
    impl Responder for HangingResponder {
        async fn generate(&self, _input: &str, _mode: InterviewMode) -> Result<CoachReply> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(CoachReply::question("too late"))
        }
    }

    fn controller(responder: Arc<dyn Responder>) -> SessionController {
        SessionController::new(&CoachConfig::default(), responder)
            .unwrap()
            .with_delay(Arc::new(FixedDelay(Duration::from_millis(1500))))
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_marks_session_busy_until_reply() {
        let controller = controller(Arc::new(EchoResponder));

        let pending = controller.submit_user_turn("hello").await.unwrap();
        let session = controller.snapshot().await;
        assert!(session.awaiting_response());
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(pending.turn_id(), TurnId(2));

        let outcome = pending.outcome().await.unwrap();
        assert_eq!(outcome, ReplyOutcome::Appended(TurnId(3)));

        let session = controller.snapshot().await;
        assert!(!session.awaiting_response());
        let reply = session.transcript().last().unwrap();
        assert_eq!(reply.author, Author::Coach);
        assert_eq!(reply.content, "You said: hello");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_waits_for_delay() {
        let controller = controller(Arc::new(EchoResponder));
        let _pending = controller.submit_user_turn("hello").await.unwrap();

        tokio::time::sleep(Duration::from_millis(1499)).await;
        assert_eq!(controller.snapshot().await.transcript().len(), 2);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(controller.snapshot().await.transcript().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_input_is_rejected_without_mutation() {
        let controller = controller(Arc::new(EchoResponder));
        let before = controller.snapshot().await;

        let err = controller.submit_user_turn("   ").await.unwrap_err();
        assert_eq!(err, CoachError::EmptyInput);
        assert_eq!(controller.snapshot().await, before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submission_while_pending_is_busy() {
        let controller = controller(Arc::new(EchoResponder));
        let pending = controller.submit_user_turn("first").await.unwrap();

        let err = controller.submit_user_turn("second").await.unwrap_err();
        assert_eq!(err, CoachError::SessionBusy);
        assert_eq!(controller.snapshot().await.transcript().len(), 2);

        pending.outcome().await.unwrap();
        assert!(controller.submit_user_turn("second").await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_responder_failure_becomes_apology() {
        let controller = controller(Arc::new(FailingResponder));
        controller.submit_user_turn("hello").await.unwrap().outcome().await.unwrap();

        let session = controller.snapshot().await;
        assert!(!session.awaiting_response());
        let reply = session.transcript().last().unwrap();
        assert_eq!(reply.kind, TurnKind::Question);
        assert!(reply.content.starts_with("Sorry"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_responder_timeout_becomes_apology() {
        let controller = controller(Arc::new(HangingResponder));
        controller.submit_user_turn("hello").await.unwrap().outcome().await.unwrap();

        let session = controller.snapshot().await;
        assert!(!session.awaiting_response());
        assert!(session.transcript().last().unwrap().content.contains("timed out"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mode_change_discards_pending_reply() {
        let controller = controller(Arc::new(EchoResponder));
        let pending = controller.submit_user_turn("hello").await.unwrap();

        assert!(controller.set_mode(InterviewMode::Practice).await);
        assert!(!controller.snapshot().await.awaiting_response());

        let outcome = pending.outcome().await.unwrap();
        assert_eq!(outcome, ReplyOutcome::Discarded { generation: 0 });
        assert_eq!(controller.snapshot().await.transcript().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_same_mode_is_noop() {
        let controller = controller(Arc::new(EchoResponder));
        let pending = controller.submit_user_turn("hello").await.unwrap();

        assert!(!controller.set_mode(InterviewMode::Chat).await);
        assert!(matches!(pending.outcome().await.unwrap(), ReplyOutcome::Appended(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_mock_interview_asks_first_question() {
        let controller = controller(Arc::new(EchoResponder));
        assert!(controller.start_mock_interview().await);

        let session = controller.snapshot().await;
        assert_eq!(session.mode(), InterviewMode::Mock);
        let opening = session.transcript().last().unwrap();
        assert_eq!(opening.kind, TurnKind::Question);
        assert!(opening
            .content
            .ends_with("First question: Tell me about yourself and your background."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_recording_and_take_buffer() {
        let controller = controller(Arc::new(EchoResponder));
        assert!(controller.toggle_recording().await);
        assert_eq!(controller.take_input_buffer().await, None);

        assert!(!controller.toggle_recording().await);
        let text = controller.take_input_buffer().await.unwrap();
        assert!(text.contains("simulated speech-to-text"));
        assert_eq!(controller.take_input_buffer().await, None);
        assert_eq!(controller.snapshot().await.transcript().len(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = CoachConfig::default();
        config.reply.min_delay_ms = 10_000;
        let result = SessionController::new(&config, Arc::new(EchoResponder));
        assert!(matches!(result, Err(CoachError::Config(_))));
    }
}
