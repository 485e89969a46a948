//! Suggestion session: the candidate list currently shown for one editor.
//!
//! Invariants:
//! * `visible` implies `candidates` is non-empty.
//! * `active`, when set, indexes into `candidates`.
//!
//! Navigation freezes at the boundaries instead of cycling: `move_next` on the
//! last entry and `move_previous` on the first are no-ops. From the unset state
//! `move_next` lands on the first entry and `move_previous` on the last.

use crate::CandidateList;
use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionSession {
    candidates: CandidateList,
    active: Option<usize>,
    visible: bool,
}

impl SuggestionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list wholesale and clear the highlight. An empty list closes the session.
    /// Returns whether the session is visible afterwards.
    pub fn open(&mut self, candidates: CandidateList) -> bool {
        if candidates.is_empty() {
            self.close();
            return false;
        }
        trace!(target: "suggest.session", count = candidates.len(), "open");
        self.candidates = candidates;
        self.active = None;
        self.visible = true;
        true
    }

    pub fn close(&mut self) {
        if self.visible {
            trace!(target: "suggest.session", "close");
        }
        self.candidates.clear();
        self.active = None;
        self.visible = false;
    }

    pub fn move_next(&mut self) -> Option<usize> {
        if !self.visible {
            return None;
        }
        let next = match self.active {
            None => Some(0),
            Some(i) if i + 1 < self.candidates.len() => Some(i + 1),
            Some(_) => None,
        };
        if let Some(n) = next {
            self.active = Some(n);
        }
        trace!(target: "suggest.session", active = ?self.active, "move_next");
        self.active
    }

    pub fn move_previous(&mut self) -> Option<usize> {
        if !self.visible {
            return None;
        }
        let prev = match self.active {
            None => Some(self.candidates.len() - 1),
            Some(i) if i > 0 => Some(i - 1),
            Some(_) => None,
        };
        if let Some(p) = prev {
            self.active = Some(p);
        }
        trace!(target: "suggest.session", active = ?self.active, "move_previous");
        self.active
    }

    /// Highlight a specific entry (pointer selection). Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if self.visible && index < self.candidates.len() {
            self.active = Some(index);
        }
        self.active
    }

    /// Remove and return the highlighted candidate, closing the session.
    pub fn take_active(&mut self) -> Option<String> {
        let idx = self.active?;
        let chosen = self.candidates.get(idx).cloned();
        self.close();
        chosen
    }

    pub fn active_candidate(&self) -> Option<&str> {
        self.active
            .and_then(|i| self.candidates.get(i))
            .map(String::as_str)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
