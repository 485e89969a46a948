//! Keystroke-to-insertion scenarios driving the public API the way an editor surface would.

use core_events::{KeyCode, KeyEvent};
use core_suggest::{
    EditorKind, SuggestionSession, TriggerAction, TriggerChar, classify, insert, on_key_down,
};
use core_text::Buffer;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::Level;
use tracing::subscriber::with_default;
use tracing_subscriber::fmt::MakeWriter;

const DELAY: Duration = Duration::from_millis(10);

/// Minimal editor surface: buffer + cursor + session, applying trigger actions the way the
/// playground does (default edits for pass-through keys, deferred classification run inline).
struct Surface {
    kind: EditorKind,
    buffer: Buffer,
    cursor: usize,
    session: SuggestionSession,
}

impl Surface {
    fn new(kind: EditorKind, text: &str) -> Self {
        let buffer = Buffer::new(kind.label(), text);
        let cursor = buffer.len_chars();
        Self {
            kind,
            buffer,
            cursor,
            session: SuggestionSession::new(),
        }
    }

    fn press(&mut self, key: KeyEvent) {
        let triggers = self.kind.default_triggers();
        match on_key_down(&key, &self.session, &triggers, DELAY) {
            TriggerAction::NavigateNext => {
                self.session.move_next();
            }
            TriggerAction::NavigatePrevious => {
                self.session.move_previous();
            }
            TriggerAction::CommitSelection(text) => {
                let out = insert(&self.buffer, self.cursor, &text);
                self.buffer = out.buffer;
                self.cursor = out.cursor;
                self.session.close();
            }
            TriggerAction::CloseSession => self.session.close(),
            TriggerAction::RequestClassification { trigger, .. } => {
                self.cursor = self.buffer.insert_char(self.cursor, trigger.as_char());
                let before = self.buffer.text_before(self.cursor);
                if self.session.open(classify(&before, trigger, self.kind)) {
                    self.session.move_next();
                }
            }
            TriggerAction::PassThrough => {
                if let KeyCode::Char(c) = key.code {
                    self.cursor = self.buffer.insert_char(self.cursor, c);
                }
            }
        }
    }

    fn type_str(&mut self, s: &str) {
        for c in s.chars() {
            self.press(KeyEvent::char(c));
        }
    }
}

#[test]
fn markup_tag_completion_end_to_end() {
    let mut ed = Surface::new(EditorKind::Markup, "");
    ed.press(KeyEvent::char('<'));
    assert!(ed.session.is_visible());
    assert_eq!(ed.session.active_candidate(), Some("div>"));
    ed.type_str("sp");
    ed.press(KeyEvent::plain(KeyCode::Down));
    assert_eq!(ed.session.active_candidate(), Some("span>"));
    ed.press(KeyEvent::plain(KeyCode::Enter));
    assert_eq!(ed.buffer.to_string(), "<span>");
    assert_eq!(ed.cursor, 6);
    assert!(!ed.session.is_visible());
}

#[test]
fn attribute_completion_inside_open_tag() {
    let mut ed = Surface::new(EditorKind::Markup, "<a");
    ed.press(KeyEvent::char(' '));
    assert_eq!(ed.session.active_candidate(), Some("class=\"\""));
    ed.press(KeyEvent::plain(KeyCode::Enter));
    assert_eq!(ed.buffer.to_string(), "<a class=\"\"");
}

#[test]
fn style_value_completion_replaces_typed_fragment() {
    let mut ed = Surface::new(EditorKind::Style, "h1 {\n  color");
    ed.press(KeyEvent::char(':'));
    assert!(ed.session.candidates().iter().any(|v| v == "red"));
    ed.type_str("bl");
    // red, blue, ...
    ed.press(KeyEvent::plain(KeyCode::Down));
    ed.press(KeyEvent::plain(KeyCode::Enter));
    assert_eq!(ed.buffer.to_string(), "h1 {\n  color:blue");
}

#[test]
fn fresh_block_space_shows_nothing() {
    let mut ed = Surface::new(EditorKind::Style, "body {");
    ed.press(KeyEvent::char(' '));
    assert!(!ed.session.is_visible());
    assert_eq!(ed.buffer.to_string(), "body { ");
}

#[test]
fn escape_closes_and_arrows_return_to_editing() {
    let mut ed = Surface::new(EditorKind::Script, "document");
    ed.press(KeyEvent::char('.'));
    assert!(ed.session.is_visible());
    assert!(
        ed.session
            .candidates()
            .iter()
            .all(|m| !m.starts_with("add"))
    );
    ed.press(KeyEvent::plain(KeyCode::Esc));
    assert!(!ed.session.is_visible());
    ed.press(KeyEvent::plain(KeyCode::Down));
    assert_eq!(ed.buffer.to_string(), "document.");
}

#[test]
fn retrigger_replaces_list_wholesale() {
    let mut ed = Surface::new(EditorKind::Script, "el");
    ed.press(KeyEvent::char('.'));
    let first = ed.session.len();
    ed.type_str("classList");
    ed.press(KeyEvent::char('.'));
    assert_ne!(ed.session.len(), first);
    assert_eq!(ed.session.len(), 4);
    assert_eq!(ed.session.active_index(), Some(0));
}

#[test]
fn trigger_set_constant_covers_insertion_boundaries() {
    for t in TriggerChar::ALL {
        let b = Buffer::new("t", &format!("ab{}cd", t.as_char()));
        let out = insert(&b, 5, "X");
        assert_eq!(out.buffer.to_string(), format!("ab{}X", t.as_char()));
    }
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

struct CaptureGuard<'a>(std::sync::MutexGuard<'a, Vec<u8>>);

impl std::io::Write for CaptureGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = CaptureGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureGuard(self.0.lock().expect("log buffer poisoned"))
    }
}

#[test]
fn classification_logs_context_under_suggest_target() {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_ansi(false)
        .without_time()
        .with_writer(capture.clone())
        .finish();
    with_default(subscriber, || {
        classify("document.", TriggerChar::Dot, EditorKind::Script);
    });
    let out = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    assert!(out.contains("suggest.classify"));
    assert!(out.contains("dom_query"));
    assert!(out.contains("classified"));
}
