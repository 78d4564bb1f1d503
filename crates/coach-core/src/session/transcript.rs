//! Ordered turn log for one session.

use super::turn::{Turn, TurnId};
use serde::{Deserialize, Serialize};

/// Append-only log of turns in creation order.
///
/// Turns are never mutated or removed individually; only a session reset
/// clears the whole log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier the next appended turn should carry.
    pub fn next_id(&self) -> TurnId {
        TurnId(self.turns.len() as u64 + 1)
    }

    /// Appends a turn at the end of the log.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Iterates over all turns in creation order.
    ///
    /// The iterator is lazy and can be cloned or re-created at will without
    /// side effects.
    pub fn all(&self) -> impl ExactSizeIterator<Item = &Turn> + Clone + '_ {
        self.turns.iter()
    }

    /// Removes every turn; ids restart at 1.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::turn::TurnKind;

    fn sample() -> Transcript {
        let mut transcript = Transcript::new();
        let id = transcript.next_id();
        transcript.append(Turn::coach(id, "Hello!", TurnKind::Question));
        let id = transcript.next_id();
        transcript.append(Turn::user(id, "Hi"));
        transcript
    }

    #[test]
    fn test_append_preserves_order_and_ids() {
        let transcript = sample();
        let ids: Vec<u64> = transcript.all().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(transcript.last().unwrap().content, "Hi");
    }

    #[test]
    fn test_all_is_restartable() {
        let transcript = sample();
        let iter = transcript.all();
        let first_pass: Vec<_> = iter.clone().map(|t| t.content.clone()).collect();
        let second_pass: Vec<_> = iter.map(|t| t.content.clone()).collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(transcript.all().len(), 2);
    }

    #[test]
    fn test_clear_resets_ids() {
        let mut transcript = sample();
        transcript.clear();
        assert!(transcript.is_empty());
        assert_eq!(transcript.next_id(), TurnId(1));
    }
}
