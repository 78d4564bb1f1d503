//! Terminal rendering of session snapshots.

use colored::Colorize;
use coach_core::session::{Author, InterviewMode, Session, Turn, TurnKind};
use tokio::sync::watch;
use uuid::Uuid;

/// Something the terminal should show in response to a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The session entered a mode (or started fresh in one).
    ModeHeader(InterviewMode),
    /// A coach turn landed.
    CoachTurn(Turn),
    /// A reply has just become pending.
    Thinking,
    /// Mock interview figures changed.
    Statistics { questions_asked: u32, average: i64 },
}

/// Tracks what has already been shown so each snapshot only yields what is new.
///
/// User turns are echoed by the input loop and never produce a notice.
#[derive(Debug, Default)]
pub struct SnapshotTracker {
    session_id: Option<Uuid>,
    mode: Option<InterviewMode>,
    printed: usize,
    scored: u32,
    awaiting: bool,
}

impl SnapshotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, session: &Session) -> Vec<Notice> {
        let mut notices = Vec::new();

        // A new session id means a reset: start over from its seed turn.
        if self.session_id != Some(session.id()) {
            self.session_id = Some(session.id());
            self.mode = None;
            self.printed = 0;
            self.scored = 0;
            self.awaiting = false;
        }

        if self.mode != Some(session.mode()) {
            self.mode = Some(session.mode());
            notices.push(Notice::ModeHeader(session.mode()));
        }

        notices.extend(
            session
                .transcript()
                .all()
                .skip(self.printed)
                .filter(|turn| turn.is_coach())
                .cloned()
                .map(Notice::CoachTurn),
        );
        self.printed = session.transcript().len();

        if session.awaiting_response() && !self.awaiting {
            notices.push(Notice::Thinking);
        }
        self.awaiting = session.awaiting_response();

        if session.shows_statistics() && session.scored_turn_count() != self.scored {
            notices.push(Notice::Statistics {
                questions_asked: session.scored_turn_count(),
                average: session.scores().display_average(),
            });
        }
        self.scored = session.scored_turn_count();

        notices
    }
}

pub fn print_mode_header(mode: InterviewMode) {
    println!("{}", format!("=== {} ===", mode.label()).bright_magenta().bold());
}

/// Prints one turn with author-specific colouring.
pub fn print_turn(turn: &Turn) {
    match turn.author {
        Author::User => println!("{}", format!("> {}", turn.content).green()),
        Author::Coach => {
            let label = match turn.kind {
                TurnKind::Feedback => "[Coach · feedback]",
                _ => "[Coach]",
            };
            println!("{}", label.bright_magenta());
            for line in turn.content.lines() {
                println!("{}", line.bright_blue());
            }
            println!();
        }
    }
}

fn print_figures(questions_asked: u32, average: i64) {
    println!(
        "{}   {}",
        format!("Questions Asked: {}", questions_asked).bright_yellow(),
        format!("Average Score: {}/100", average).bright_yellow()
    );
}

/// Prints the mock interview figures, if there is anything to show.
pub fn print_statistics(session: &Session) {
    if session.scored_turn_count() == 0 {
        println!("{}", "No scored answers yet. Try /mock.".bright_black());
        return;
    }
    print_figures(session.scored_turn_count(), session.scores().display_average());
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::ModeHeader(mode) => print_mode_header(*mode),
        Notice::CoachTurn(turn) => print_turn(turn),
        Notice::Thinking => println!("{}", "Coach is thinking...".dimmed()),
        Notice::Statistics {
            questions_asked,
            average,
        } => print_figures(*questions_asked, *average),
    }
}

/// Watches the snapshot channel and prints whatever each update adds.
pub async fn render_updates(mut updates: watch::Receiver<Session>) {
    let mut tracker = SnapshotTracker::new();

    loop {
        let notices = tracker.observe(&updates.borrow_and_update());
        for notice in &notices {
            print_notice(notice);
        }

        if updates.changed().await.is_err() {
            tracing::debug!("[Render] Snapshot channel closed");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(notices: &[Notice]) -> Vec<InterviewMode> {
        notices
            .iter()
            .filter_map(|n| match n {
                Notice::ModeHeader(mode) => Some(*mode),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_first_snapshot_shows_header_and_greeting() {
        let session = Session::new("Hello!", 0);
        let notices = SnapshotTracker::new().observe(&session);

        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0], Notice::ModeHeader(InterviewMode::Chat));
        assert!(matches!(&notices[1], Notice::CoachTurn(turn) if turn.content == "Hello!"));
    }

    #[test]
    fn test_thinking_is_shown_once_per_pending_reply() {
        let mut session = Session::new("Hello!", 0);
        let mut tracker = SnapshotTracker::new();
        tracker.observe(&session);

        session.append_user_turn("My answer");
        session.begin_reply();
        assert_eq!(tracker.observe(&session), vec![Notice::Thinking]);
        assert!(tracker.observe(&session).is_empty());

        session.append_coach_turn("Tell me more.", TurnKind::Question, None);
        session.finish_reply();
        let notices = tracker.observe(&session);
        assert_eq!(notices.len(), 1);
        assert!(matches!(&notices[0], Notice::CoachTurn(_)));

        session.append_user_turn("Another answer");
        session.begin_reply();
        assert_eq!(tracker.observe(&session), vec![Notice::Thinking]);
    }

    #[test]
    fn test_mode_change_shows_header_before_opening_question() {
        let mut session = Session::new("Hello!", 0);
        let mut tracker = SnapshotTracker::new();
        tracker.observe(&session);

        session.switch_mode(InterviewMode::Mock);
        session.append_coach_turn("First question: Why us?", TurnKind::Question, None);
        let notices = tracker.observe(&session);

        assert_eq!(notices[0], Notice::ModeHeader(InterviewMode::Mock));
        assert!(matches!(&notices[1], Notice::CoachTurn(_)));
        assert_eq!(InterviewMode::Mock.label(), "Mock Interview Mode");
    }

    #[test]
    fn test_statistics_follow_scored_feedback() {
        let mut session = Session::new("Hello!", 0);
        let mut tracker = SnapshotTracker::new();
        session.switch_mode(InterviewMode::Mock);
        tracker.observe(&session);

        session.append_user_turn("Answer");
        session.append_coach_turn("Score: 85/100", TurnKind::Feedback, Some(85.0));
        let notices = tracker.observe(&session);
        assert_eq!(
            notices.last(),
            Some(&Notice::Statistics {
                questions_asked: 1,
                average: 85
            })
        );
    }

    #[test]
    fn test_reset_starts_over_with_chat_header() {
        let mut session = Session::new("Hello!", 0);
        let mut tracker = SnapshotTracker::new();
        session.switch_mode(InterviewMode::Practice);
        tracker.observe(&session);

        session.reset("Session reset!");
        let notices = tracker.observe(&session);
        assert_eq!(headers(&notices), vec![InterviewMode::Chat]);
        assert!(matches!(&notices[1], Notice::CoachTurn(turn) if turn.content == "Session reset!"));
    }
}
