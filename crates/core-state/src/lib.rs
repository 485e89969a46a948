//! Playground state: three editors, the active view, theme and the composed preview.
//!
//! State changes happen only through the reducer in [`dispatch`], which returns
//! a list of [`Effect`]s for the runtime to carry out (timers, persistence,
//! export, redraw, quit). Nothing in this crate touches the terminal, the clock
//! or the filesystem, so whole keystroke scenarios can be replayed in tests.

use core_config::{Config, Theme};
use core_preview::{Sources, compose_preview};
use core_suggest::{ClassifierOptions, EditorKind, TriggerChar, TriggerSet};
use std::time::{Duration, Instant};

pub mod dispatch;
pub mod editor;

pub use editor::EditorState;

/// How long a status line message stays visible.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

/// Runtime knobs resolved once from the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub triggers: [TriggerSet; 3],
    pub classify_delay: Duration,
    pub classifier: ClassifierOptions,
    pub highlight_first: bool,
    pub supersede_pending: bool,
    pub preview_debounce: Duration,
    pub auto_run: bool,
}

impl Settings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            triggers: EditorKind::ALL.map(|kind| cfg.triggers_for(kind)),
            classify_delay: cfg.classify_delay(),
            classifier: cfg.classifier_options(),
            highlight_first: cfg.file.suggest.highlight_first,
            supersede_pending: cfg.file.suggest.supersede_pending,
            preview_debounce: cfg.preview_debounce(),
            auto_run: cfg.file.preview.auto_run,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// What the main pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Editor(EditorKind),
    Preview,
}

impl View {
    pub const ORDER: [View; 4] = [
        View::Editor(EditorKind::Markup),
        View::Editor(EditorKind::Style),
        View::Editor(EditorKind::Script),
        View::Preview,
    ];

    pub fn label(self) -> &'static str {
        match self {
            View::Editor(kind) => kind.label(),
            View::Preview => "preview",
        }
    }

    fn position(self) -> usize {
        Self::ORDER.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Event::ClassifyDue` for `slot` after `delay`. With `supersede`, any still
    /// pending classification for the same slot is cancelled first.
    ScheduleClassification {
        slot: usize,
        trigger: TriggerChar,
        ticket: u64,
        delay: Duration,
        supersede: bool,
    },
    /// (Re)start the preview debounce.
    RestartPreviewTimer(Duration),
    PersistTheme(Theme),
    /// Hand a finished export page to the runtime.
    Export(String),
    Redraw,
    Quit,
}

/// Ephemeral status message container.
#[derive(Debug, Clone)]
pub struct EphemeralMessage {
    pub text: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Playground {
    pub editors: [EditorState; 3],
    pub view: View,
    pub theme: Theme,
    pub settings: Settings,
    /// Set while the clear-all confirmation prompt is showing.
    pub confirm_clear: bool,
    preview: String,
    preview_generation: u64,
    pub preview_scroll: usize,
    pub ephemeral_status: Option<EphemeralMessage>,
    text_height: usize,
}

impl Playground {
    /// Build the playground and compose the initial preview.
    pub fn new(settings: Settings, theme: Theme, sources: [&str; 3]) -> Self {
        let editors = EditorKind::ALL.map(|kind| EditorState::new(kind, sources[kind.index()]));
        let mut pg = Self {
            editors,
            view: View::Editor(EditorKind::Markup),
            theme,
            settings,
            confirm_clear: false,
            preview: String::new(),
            preview_generation: 0,
            preview_scroll: 0,
            ephemeral_status: None,
            text_height: 0,
        };
        pg.run_preview();
        pg
    }

    pub fn editor(&self, kind: EditorKind) -> &EditorState {
        &self.editors[kind.index()]
    }

    pub fn editor_mut(&mut self, kind: EditorKind) -> &mut EditorState {
        &mut self.editors[kind.index()]
    }

    /// The editor under the active tab, if the preview is not showing.
    pub fn active_editor(&self) -> Option<&EditorState> {
        match self.view {
            View::Editor(kind) => Some(self.editor(kind)),
            View::Preview => None,
        }
    }

    pub fn sources(&self) -> [String; 3] {
        EditorKind::ALL.map(|kind| self.editor(kind).text())
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn preview_generation(&self) -> u64 {
        self.preview_generation
    }

    /// Recompose the preview document from the current buffers.
    pub fn run_preview(&mut self) {
        let [markup, style, script] = self.sources();
        self.preview = compose_preview(Sources::new(&markup, &style, &script));
        self.preview_generation += 1;
    }

    /// Rows available for editor text; keeps the cursor line on screen.
    pub fn set_text_height(&mut self, h: usize) {
        self.text_height = h;
        for ed in &mut self.editors {
            ed.scroll_to_cursor(h);
        }
    }

    pub fn text_height(&self) -> usize {
        self.text_height
    }

    pub fn set_ephemeral<S: Into<String>>(&mut self, msg: S, ttl: Duration) {
        self.ephemeral_status = Some(EphemeralMessage {
            text: msg.into(),
            expires_at: Instant::now() + ttl,
        });
    }

    /// Tick ephemeral status; returns true if the message expired and was cleared.
    pub fn tick_ephemeral(&mut self) -> bool {
        if let Some(m) = &self.ephemeral_status
            && Instant::now() >= m.expires_at
        {
            self.ephemeral_status = None;
            return true;
        }
        false
    }
}
