//! Trigger detector: routes one key press either to the open session or to classification.
//!
//! Keys consumed by a visible session (Down, Up, Enter with a highlight,
//! Escape) suppress their default editing behavior; the caller must not also
//! move the text cursor or insert a newline. A trigger char is NOT consumed:
//! the caller applies it to the buffer first and runs the classification after
//! `delay`, so the classifier reads a buffer that already contains it.

use crate::session::SuggestionSession;
use crate::{TriggerChar, TriggerSet};
use core_events::{KeyCode, KeyEvent};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerAction {
    NavigateNext,
    NavigatePrevious,
    CommitSelection(String),
    CloseSession,
    RequestClassification {
        trigger: TriggerChar,
        delay: Duration,
    },
    PassThrough,
}

impl TriggerAction {
    /// Whether the key's default text-editing effect must be skipped.
    pub fn suppresses_default(&self) -> bool {
        matches!(
            self,
            TriggerAction::NavigateNext
                | TriggerAction::NavigatePrevious
                | TriggerAction::CommitSelection(_)
                | TriggerAction::CloseSession
        )
    }
}

pub fn on_key_down(
    key: &KeyEvent,
    session: &SuggestionSession,
    triggers: &TriggerSet,
    delay: Duration,
) -> TriggerAction {
    if session.is_visible() && !key.is_chord() {
        match key.code {
            KeyCode::Down => return TriggerAction::NavigateNext,
            KeyCode::Up => return TriggerAction::NavigatePrevious,
            KeyCode::Enter => {
                if let Some(active) = session.active_candidate() {
                    return TriggerAction::CommitSelection(active.to_string());
                }
            }
            KeyCode::Esc => return TriggerAction::CloseSession,
            _ => {}
        }
    }
    if let KeyCode::Char(c) = key.code
        && !key.is_chord()
        && let Some(trigger) = triggers.lookup(c)
    {
        return TriggerAction::RequestClassification { trigger, delay };
    }
    TriggerAction::PassThrough
}
