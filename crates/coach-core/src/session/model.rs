//! Session domain model.
//!
//! This module contains the core `Session` entity: the full state of one
//! coaching interaction. It is a plain owned value; the live instance is
//! mutated only by the session controller, and observers receive clones.

use super::mode::InterviewMode;
use super::scoring::ScoreBoard;
use super::transcript::Transcript;
use super::turn::{Turn, TurnId, TurnKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents one coaching interaction.
///
/// A session contains:
/// - The transcript, seeded with exactly one coach greeting
/// - The current interview mode
/// - Whether a coach reply is pending
/// - Score accumulators for mock interviews
/// - The recording affordance and the input buffer it fills
/// - The generation tag used to discard stale replies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier
    id: Uuid,
    /// Generation tag; a pending reply only lands if this is unchanged
    generation: u64,
    /// Timestamp when this session instance was created
    created_at: DateTime<Utc>,
    /// Ordered transcript
    transcript: Transcript,
    /// Current interview mode
    mode: InterviewMode,
    /// True while a coach reply is pending
    awaiting_response: bool,
    /// Mock interview statistics
    #[serde(flatten)]
    scores: ScoreBoard,
    /// Input capture affordance
    recording: bool,
    /// Text offered back to the input field (simulated transcription)
    #[serde(default)]
    input_buffer: Option<String>,
}

impl Session {
    /// Creates a session in `chat` mode seeded with a single greeting turn.
    pub fn new(greeting: &str, generation: u64) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            generation,
            created_at: Utc::now(),
            transcript: Transcript::new(),
            mode: InterviewMode::Chat,
            awaiting_response: false,
            scores: ScoreBoard::new(),
            recording: false,
            input_buffer: None,
        };
        session.append_coach_turn(greeting, TurnKind::Question, None);
        session
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn mode(&self) -> InterviewMode {
        self.mode
    }

    pub fn awaiting_response(&self) -> bool {
        self.awaiting_response
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn score_total(&self) -> f64 {
        self.scores.score_total
    }

    pub fn scored_turn_count(&self) -> u32 {
        self.scores.scored_turn_count
    }

    pub fn average_score(&self) -> f64 {
        self.scores.average()
    }

    pub fn recording(&self) -> bool {
        self.recording
    }

    pub fn input_buffer(&self) -> Option<&str> {
        self.input_buffer.as_deref()
    }

    /// Whether mock statistics should be shown: in mock mode with at least
    /// one scored answer.
    pub fn shows_statistics(&self) -> bool {
        self.mode.is_scored() && self.scores.scored_turn_count > 0
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Appends a user turn and returns its id.
    pub fn append_user_turn(&mut self, content: impl Into<String>) -> TurnId {
        let id = self.transcript.next_id();
        self.transcript.append(Turn::user(id, content));
        id
    }

    /// Appends a coach turn and returns its id.
    ///
    /// A score is recorded only for `Feedback` turns.
    pub fn append_coach_turn(
        &mut self,
        content: impl Into<String>,
        kind: TurnKind,
        score: Option<f64>,
    ) -> TurnId {
        let id = self.transcript.next_id();
        self.transcript.append(Turn::coach(id, content, kind));

        match (kind, score) {
            (TurnKind::Feedback, Some(score)) => self.scores.record(score),
            (_, Some(score)) => {
                tracing::debug!("[Session] Dropping score {} on non-feedback turn {}", score, id);
            }
            _ => {}
        }

        id
    }

    /// Marks a coach reply as pending.
    pub fn begin_reply(&mut self) {
        self.awaiting_response = true;
    }

    /// Marks the pending coach reply as resolved.
    pub fn finish_reply(&mut self) {
        self.awaiting_response = false;
    }

    /// Switches to `mode`.
    ///
    /// Returns false (and changes nothing) if the session is already in that
    /// mode. An effective change advances the generation, which releases any
    /// pending reply, and entering `Mock` clears the score accumulators.
    pub fn switch_mode(&mut self, mode: InterviewMode) -> bool {
        if self.mode == mode {
            return false;
        }

        self.mode = mode;
        if mode == InterviewMode::Mock {
            self.scores.reset();
        }
        self.advance_generation();
        true
    }

    /// Returns to a freshly seeded `Chat` session under the next generation.
    ///
    /// The transcript is cleared and re-seeded with `greeting`, the score
    /// accumulators and recording state are dropped, and the session gets a
    /// new id so observers can tell a reset apart from ordinary updates.
    pub fn reset(&mut self, greeting: &str) {
        self.transcript.clear();
        self.append_coach_turn(greeting, TurnKind::Question, None);

        self.id = Uuid::new_v4();
        self.created_at = Utc::now();
        self.mode = InterviewMode::Chat;
        self.scores.reset();
        self.recording = false;
        self.input_buffer = None;
        self.advance_generation();
    }

    /// Invalidates any pending reply by moving to the next generation.
    pub fn advance_generation(&mut self) {
        self.generation += 1;
        self.awaiting_response = false;
    }

    /// Flips the recording flag and returns the new value.
    ///
    /// Stopping a recording stores `transcription` in the input buffer.
    pub fn toggle_recording(&mut self, transcription: &str) -> bool {
        self.recording = !self.recording;
        if !self.recording {
            self.input_buffer = Some(transcription.to_string());
        }
        self.recording
    }

    /// Takes the pending input buffer, leaving it empty.
    pub fn take_input_buffer(&mut self) -> Option<String> {
        self.input_buffer.take()
    }
}
