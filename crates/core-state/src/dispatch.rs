//! Reducer: applies one input or timer event to the playground and returns effects.
//!
//! Key routing order:
//! 1. A pending clear confirmation consumes the next key (`y` confirms).
//! 2. Global chords (Ctrl-Q quit, Ctrl-T theme, Ctrl-R run, Ctrl-E export,
//!    Ctrl-L clear, Ctrl-Left/Right and F1..F4 switch view).
//! 3. In the preview view, Up/Down/Home scroll the document.
//! 4. In an editor, the trigger detector gets first look; keys it does not
//!    consume fall through to plain text editing.

use crate::{Effect, Playground, STATUS_TTL, View};
use core_config::Theme;
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_preview::{EXPORT_FILE_NAME, Sources, compose_export};
use core_suggest::{EditorKind, TriggerAction, TriggerChar, classify_with, insert, on_key_down};
use tracing::{debug, info, trace, warn};

impl Playground {
    pub fn handle_key(&mut self, key: &KeyEvent) -> Vec<Effect> {
        if self.confirm_clear {
            return self.answer_clear(key);
        }
        if let Some(effects) = self.global_key(key) {
            return effects;
        }
        match self.view {
            View::Preview => self.preview_key(key),
            View::Editor(kind) => self.editor_key(kind, key),
        }
    }

    fn global_key(&mut self, key: &KeyEvent) -> Option<Vec<Effect>> {
        if key.mods.contains(KeyModifiers::CTRL) {
            let effects = match key.code {
                KeyCode::Char(c) => match c.to_ascii_lowercase() {
                    'q' => vec![Effect::Quit],
                    't' => self.toggle_theme(),
                    'r' => {
                        self.run_preview();
                        self.set_ephemeral("Preview updated", STATUS_TTL);
                        vec![Effect::Redraw]
                    }
                    'e' => self.export(),
                    'l' => {
                        self.confirm_clear = true;
                        vec![Effect::Redraw]
                    }
                    _ => return None,
                },
                KeyCode::Left => self.switch_view(self.view.previous()),
                KeyCode::Right => self.switch_view(self.view.next()),
                _ => return None,
            };
            return Some(effects);
        }
        match key.code {
            KeyCode::F(n @ 1..=4) => Some(self.switch_view(View::ORDER[usize::from(n) - 1])),
            _ => None,
        }
    }

    pub fn switch_view(&mut self, view: View) -> Vec<Effect> {
        if self.view == view {
            return Vec::new();
        }
        debug!(target: "runtime", from = self.view.label(), to = view.label(), "view_switched");
        self.view = view;
        vec![Effect::Redraw]
    }

    fn toggle_theme(&mut self) -> Vec<Effect> {
        self.theme = self.theme.toggled();
        info!(target: "prefs", theme = self.theme.as_str(), "theme_toggled");
        let label = match self.theme {
            Theme::Dark => "Dark mode",
            Theme::Light => "Light mode",
        };
        self.set_ephemeral(label, STATUS_TTL);
        vec![Effect::PersistTheme(self.theme), Effect::Redraw]
    }

    fn export(&mut self) -> Vec<Effect> {
        let [markup, style, script] = self.sources();
        let page = compose_export(Sources::new(&markup, &style, &script));
        info!(target: "runtime", bytes = page.len(), "export_requested");
        self.set_ephemeral(
            format!("Export captured as {EXPORT_FILE_NAME}; printed on exit"),
            STATUS_TTL,
        );
        vec![Effect::Export(page), Effect::Redraw]
    }

    fn answer_clear(&mut self, key: &KeyEvent) -> Vec<Effect> {
        self.confirm_clear = false;
        if !key.is_chord() && matches!(key.code, KeyCode::Char('y' | 'Y')) {
            self.clear_all();
            self.set_ephemeral("All editors cleared", STATUS_TTL);
        } else {
            trace!(target: "runtime", "clear_cancelled");
        }
        vec![Effect::Redraw]
    }

    /// Empty all three editors, close their sessions and recompose the preview.
    pub fn clear_all(&mut self) {
        for ed in &mut self.editors {
            ed.clear();
        }
        self.preview_scroll = 0;
        self.run_preview();
        info!(target: "runtime", "editors_cleared");
    }

    fn preview_key(&mut self, key: &KeyEvent) -> Vec<Effect> {
        let lines = self.preview().lines().count();
        match key.code {
            KeyCode::Down if self.preview_scroll + 1 < lines => self.preview_scroll += 1,
            KeyCode::Up if self.preview_scroll > 0 => self.preview_scroll -= 1,
            KeyCode::Home => self.preview_scroll = 0,
            _ => return Vec::new(),
        }
        vec![Effect::Redraw]
    }

    fn editor_key(&mut self, kind: EditorKind, key: &KeyEvent) -> Vec<Effect> {
        let slot = kind.index();
        let action = {
            let ed = &self.editors[slot];
            on_key_down(
                key,
                &ed.session,
                &self.settings.triggers[slot],
                self.settings.classify_delay,
            )
        };
        let ed = &mut self.editors[slot];
        let mut effects = Vec::new();
        let edited = match action {
            TriggerAction::NavigateNext => {
                ed.session.move_next();
                false
            }
            TriggerAction::NavigatePrevious => {
                ed.session.move_previous();
                false
            }
            TriggerAction::CommitSelection(text) => {
                ed.apply(insert(&ed.buffer, ed.cursor(), &text));
                ed.session.close();
                true
            }
            TriggerAction::CloseSession => {
                ed.session.close();
                false
            }
            TriggerAction::RequestClassification { trigger, delay } => {
                ed.insert_char(trigger.as_char());
                let ticket = ed.issue_ticket();
                effects.push(Effect::ScheduleClassification {
                    slot,
                    trigger,
                    ticket,
                    delay,
                    supersede: self.settings.supersede_pending,
                });
                true
            }
            TriggerAction::PassThrough => match apply_default_edit(ed, key) {
                Some(edited) => edited,
                None => return Vec::new(),
            },
        };
        let height = self.text_height();
        self.editors[slot].scroll_to_cursor(height);
        if edited && self.settings.auto_run {
            effects.push(Effect::RestartPreviewTimer(self.settings.preview_debounce));
        }
        effects.push(Effect::Redraw);
        effects
    }

    /// Insert pasted text verbatim. Trigger chars inside a paste do not classify.
    pub fn handle_paste(&mut self, text: &str) -> Vec<Effect> {
        let View::Editor(kind) = self.view else {
            return Vec::new();
        };
        if self.confirm_clear || text.is_empty() {
            return Vec::new();
        }
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let height = self.text_height();
        let ed = self.editor_mut(kind);
        ed.insert_str(&normalized);
        ed.scroll_to_cursor(height);
        debug!(target: "input.event", editor = kind.label(), chars = normalized.chars().count(), "paste_applied");
        let mut effects = Vec::new();
        if self.settings.auto_run {
            effects.push(Effect::RestartPreviewTimer(self.settings.preview_debounce));
        }
        effects.push(Effect::Redraw);
        effects
    }

    /// A deferred classification fired for `slot`.
    pub fn on_classify_due(&mut self, slot: usize, trigger: char, ticket: u64) -> Vec<Effect> {
        let Some(kind) = EditorKind::from_index(slot) else {
            warn!(target: "suggest.session", slot, "classify_due_unknown_slot");
            return Vec::new();
        };
        let trigger = match TriggerChar::try_from(trigger) {
            Ok(t) => t,
            Err(err) => {
                warn!(target: "suggest.session", %err, "classify_due_bad_trigger");
                return Vec::new();
            }
        };
        let opts = self.settings.classifier;
        let highlight_first = self.settings.highlight_first;
        let supersede = self.settings.supersede_pending;
        let ed = self.editor_mut(kind);
        if supersede && ticket != ed.current_ticket() {
            trace!(target: "suggest.session", editor = kind.label(), ticket, current = ed.current_ticket(), "classification_superseded");
            return Vec::new();
        }
        let list = classify_with(&ed.text_before_cursor(), trigger, kind, &opts);
        if ed.session.open(list) && highlight_first {
            ed.session.move_next();
        }
        vec![Effect::Redraw]
    }

    /// The preview debounce elapsed.
    pub fn on_preview_due(&mut self) -> Vec<Effect> {
        self.run_preview();
        trace!(target: "runtime", generation = self.preview_generation(), "preview_regenerated");
        vec![Effect::Redraw]
    }

    /// Pointer selection of overlay row `index` in the active editor: select then commit.
    pub fn click_candidate(&mut self, index: usize) -> Vec<Effect> {
        let View::Editor(kind) = self.view else {
            return Vec::new();
        };
        let ed = self.editor_mut(kind);
        if ed.session.select(index) != Some(index) {
            return Vec::new();
        }
        let Some(text) = ed.session.take_active() else {
            return Vec::new();
        };
        ed.apply(insert(&ed.buffer, ed.cursor(), &text));
        let mut effects = Vec::new();
        if self.settings.auto_run {
            effects.push(Effect::RestartPreviewTimer(self.settings.preview_debounce));
        }
        effects.push(Effect::Redraw);
        effects
    }
}

/// Plain editing for keys the trigger detector passed through.
/// `Some(true)` = text changed, `Some(false)` = cursor only, `None` = key ignored.
fn apply_default_edit(ed: &mut crate::EditorState, key: &KeyEvent) -> Option<bool> {
    if key.is_chord() {
        return None;
    }
    let edited = match key.code {
        KeyCode::Char(c) => {
            ed.insert_char(c);
            true
        }
        KeyCode::Enter => {
            ed.newline();
            true
        }
        KeyCode::Tab => {
            ed.insert_str(crate::editor::TAB_TEXT);
            true
        }
        KeyCode::Backspace => ed.backspace(),
        KeyCode::Delete => ed.delete_forward(),
        KeyCode::Left => {
            ed.move_left();
            false
        }
        KeyCode::Right => {
            ed.move_right();
            false
        }
        KeyCode::Up => {
            ed.move_up();
            false
        }
        KeyCode::Down => {
            ed.move_down();
            false
        }
        KeyCode::Home => {
            ed.move_home();
            false
        }
        KeyCode::End => {
            ed.move_end();
            false
        }
        KeyCode::Esc | KeyCode::F(_) => return None,
    };
    Some(edited)
}
