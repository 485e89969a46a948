//! core-suggest: keyword autocomplete for the three playground editors.
//!
//! Pipeline (one editor, one keystroke at a time):
//! 1. [`trigger::on_key_down`] decides whether a key drives the open session
//!    (navigate / commit / close) or requests a deferred classification.
//! 2. [`classifier::classify`] maps the text before the cursor + trigger char
//!    to a candidate list drawn from the static [`catalog`] lists.
//! 3. [`session::SuggestionSession`] holds the list and the highlighted entry.
//! 4. [`insertion::insert`] splices the chosen candidate over the span since the
//!    last trigger character.
//!
//! Everything here is pure and synchronous: no rendering, no timers, no I/O.
//! The only logging is at DEBUG/TRACE under the `suggest.*` targets.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod catalog;
pub mod classifier;
pub mod insertion;
pub mod session;
pub mod trigger;

pub use classifier::{ClassifierOptions, classify, classify_with};
pub use insertion::{Insertion, insert, replacement_range};
pub use session::SuggestionSession;
pub use trigger::{TriggerAction, on_key_down};

/// Fresh, ordered candidate list produced per classification. Empty means "no suggestions".
pub type CandidateList = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("'{0}' is not a trigger character (expected one of `<`, `.`, `:` or space)")]
    NotATrigger(char),
    #[error("unknown editor kind `{0}` (expected markup, style or script)")]
    UnknownEditorKind(String),
}

/// Language of an editor surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
    Markup,
    Style,
    Script,
}

impl EditorKind {
    pub const ALL: [EditorKind; 3] = [EditorKind::Markup, EditorKind::Style, EditorKind::Script];

    /// Stable slot index (tab order).
    pub const fn index(self) -> usize {
        match self {
            EditorKind::Markup => 0,
            EditorKind::Style => 1,
            EditorKind::Script => 2,
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub const fn label(self) -> &'static str {
        match self {
            EditorKind::Markup => "markup",
            EditorKind::Style => "style",
            EditorKind::Script => "script",
        }
    }

    /// Trigger characters an editor of this kind listens to when nothing is configured.
    pub fn default_triggers(self) -> TriggerSet {
        match self {
            EditorKind::Markup => TriggerSet::new([TriggerChar::Angle, TriggerChar::Space]),
            EditorKind::Style => TriggerSet::new([TriggerChar::Colon, TriggerChar::Space]),
            EditorKind::Script => TriggerSet::new([TriggerChar::Dot]),
        }
    }
}

impl fmt::Display for EditorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EditorKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markup" | "html" => Ok(EditorKind::Markup),
            "style" | "css" => Ok(EditorKind::Style),
            "script" | "js" | "javascript" => Ok(EditorKind::Script),
            other => Err(ParseError::UnknownEditorKind(other.to_string())),
        }
    }
}

/// Characters that open a suggestion context. The same set bounds the span replaced on insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerChar {
    Angle,
    Dot,
    Colon,
    Space,
}

impl TriggerChar {
    pub const ALL: [TriggerChar; 4] = [
        TriggerChar::Angle,
        TriggerChar::Dot,
        TriggerChar::Colon,
        TriggerChar::Space,
    ];

    pub const fn as_char(self) -> char {
        match self {
            TriggerChar::Angle => '<',
            TriggerChar::Dot => '.',
            TriggerChar::Colon => ':',
            TriggerChar::Space => ' ',
        }
    }

    pub fn is_trigger(c: char) -> bool {
        TriggerChar::try_from(c).is_ok()
    }
}

impl TryFrom<char> for TriggerChar {
    type Error = ParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '<' => Ok(TriggerChar::Angle),
            '.' => Ok(TriggerChar::Dot),
            ':' => Ok(TriggerChar::Colon),
            ' ' => Ok(TriggerChar::Space),
            other => Err(ParseError::NotATrigger(other)),
        }
    }
}

impl fmt::Display for TriggerChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_char())
    }
}

/// Subset of trigger characters one editor listens to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TriggerSet {
    chars: Vec<TriggerChar>,
}

impl TriggerSet {
    pub fn new(chars: impl IntoIterator<Item = TriggerChar>) -> Self {
        let mut out: Vec<TriggerChar> = Vec::new();
        for c in chars {
            if !out.contains(&c) {
                out.push(c);
            }
        }
        Self { chars: out }
    }

    /// The trigger this key character stands for, if the set listens to it.
    pub fn lookup(&self, c: char) -> Option<TriggerChar> {
        self.chars.iter().copied().find(|t| t.as_char() == c)
    }

    pub fn contains(&self, t: TriggerChar) -> bool {
        self.chars.contains(&t)
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TriggerChar> + '_ {
        self.chars.iter().copied()
    }
}
