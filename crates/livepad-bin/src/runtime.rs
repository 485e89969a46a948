//! Interactive event loop.
//!
//! One task owns the playground. Input events and timer deliveries arrive on a
//! single channel; each is reduced to a list of effects which are carried out
//! here (timers, theme persistence, export capture) before the next render.

use crate::timers::TimerBank;
use anyhow::Result;
use core_config::PreferenceStore;
use core_events::{Event, InputEvent};
use core_render::RenderEngine;
use core_render::layout::Layout;
use core_state::{Effect, Playground, STATUS_TTL};
use core_terminal::TerminalGuard;
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

/// Poll period for expiring status messages.
const STATUS_TICK: Duration = Duration::from_millis(250);

enum LoopControl {
    Continue,
    Break(ShutdownReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownReason {
    CtrlC,
    Quit,
    ShutdownEvent,
    ChannelClosed,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::CtrlC => "ctrl_c",
            ShutdownReason::Quit => "quit",
            ShutdownReason::ShutdownEvent => "shutdown_event",
            ShutdownReason::ChannelClosed => "channel_closed",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn log_shutdown_stage(reason: ShutdownReason, stage: &'static str) {
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        stage = stage,
        "shutdown_stage"
    );
}

pub struct Runtime<'a> {
    pg: Playground,
    engine: RenderEngine,
    prefs: Option<PreferenceStore>,
    timers: TimerBank,
    size: (u16, u16),
    needs_render: bool,
    export: Option<String>,
    rx: mpsc::Receiver<Event>,
    tx: Option<mpsc::Sender<Event>>,
    input_task: Option<JoinHandle<()>>,
    input_shutdown: Option<core_input::AsyncInputShutdown>,
    terminal_guard: Option<TerminalGuard<'a>>,
}

pub struct RuntimeParts<'a> {
    pub playground: Playground,
    pub engine: RenderEngine,
    pub prefs: Option<PreferenceStore>,
    pub size: (u16, u16),
    pub terminal_guard: TerminalGuard<'a>,
}

impl<'a> Runtime<'a> {
    pub fn new(parts: RuntimeParts<'a>, tx: mpsc::Sender<Event>, rx: mpsc::Receiver<Event>) -> Self {
        let (input_task, input_shutdown) = core_input::spawn_async_input(tx.clone());
        let RuntimeParts {
            mut playground,
            engine,
            prefs,
            size,
            terminal_guard,
        } = parts;
        playground.set_text_height(usize::from(Layout::new(size.0, size.1).text_height()));
        let timers = TimerBank::new(playground.settings.preview_debounce);
        Self {
            pg: playground,
            engine,
            prefs,
            timers,
            size,
            needs_render: true,
            export: None,
            rx,
            tx: Some(tx),
            input_task: Some(input_task),
            input_shutdown: Some(input_shutdown),
            terminal_guard: Some(terminal_guard),
        }
    }

    /// Run until quit; restores the terminal and returns the captured export page, if any.
    pub async fn run(mut self) -> Result<Option<String>> {
        self.render();
        let loop_span = tracing::debug_span!(target: "runtime", "event_loop");
        let _enter = loop_span.enter();

        let mut tick = tokio::time::interval(STATUS_TICK);
        let reason = loop {
            let control = tokio::select! {
                ev = self.rx.recv() => match ev {
                    Some(event) => self.handle_event(event),
                    None => LoopControl::Break(ShutdownReason::ChannelClosed),
                },
                _ = tick.tick() => {
                    if self.pg.tick_ephemeral() {
                        self.needs_render = true;
                    }
                    LoopControl::Continue
                }
            };
            match control {
                LoopControl::Break(reason) => break reason,
                LoopControl::Continue => {
                    if self.needs_render {
                        self.render();
                    }
                }
            }
        };

        self.rx.close();
        self.finalize_shutdown(reason).await;
        if let Some(guard) = self.terminal_guard.take() {
            guard.release()?;
        }
        Ok(self.export)
    }

    fn handle_event(&mut self, event: Event) -> LoopControl {
        let effects = match event {
            Event::Input(input) => match input {
                InputEvent::CtrlC => return LoopControl::Break(ShutdownReason::CtrlC),
                InputEvent::Key(key) => self.pg.handle_key(&key),
                InputEvent::Paste(text) => self.pg.handle_paste(&text),
                InputEvent::Click { column, row } => self.handle_click(column, row),
                InputEvent::Resize(w, h) => {
                    self.handle_resize(w, h);
                    Vec::new()
                }
            },
            Event::ClassifyDue {
                slot,
                trigger,
                ticket,
            } => self.pg.on_classify_due(slot, trigger, ticket),
            Event::PreviewDue => self.pg.on_preview_due(),
            Event::Shutdown => return LoopControl::Break(ShutdownReason::ShutdownEvent),
        };
        self.apply_effects(effects)
    }

    fn handle_click(&mut self, column: u16, row: u16) -> Vec<Effect> {
        match self.engine.overlay_hit(column, row) {
            Some(index) => {
                debug!(target: "input.event", index, "overlay_click");
                self.pg.click_candidate(index)
            }
            None => Vec::new(),
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        let layout = Layout::new(width, height);
        self.pg.set_text_height(usize::from(layout.text_height()));
        debug!(target: "runtime", width, height, usable = layout.is_usable(), "resize");
        self.needs_render = true;
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) -> LoopControl {
        for effect in effects {
            match effect {
                Effect::ScheduleClassification {
                    slot,
                    trigger,
                    ticket,
                    delay,
                    supersede,
                } => {
                    if let Some(tx) = &self.tx {
                        self.timers.schedule_classification(
                            tx, slot, trigger, ticket, delay, supersede,
                        );
                    }
                }
                Effect::RestartPreviewTimer(delay) => {
                    if let Some(tx) = &self.tx {
                        self.timers.restart_preview(tx, delay);
                    }
                }
                Effect::PersistTheme(theme) => self.persist_theme(theme),
                Effect::Export(page) => {
                    debug!(target: "runtime", bytes = page.len(), "export_captured");
                    self.export = Some(page);
                }
                Effect::Redraw => self.needs_render = true,
                Effect::Quit => return LoopControl::Break(ShutdownReason::Quit),
            }
        }
        LoopControl::Continue
    }

    fn persist_theme(&mut self, theme: core_config::Theme) {
        let Some(store) = &self.prefs else {
            trace!(target: "prefs", "no_preference_store");
            return;
        };
        if let Err(e) = store.save_theme(theme) {
            warn!(target: "prefs", error = %e, "theme_save_failed");
            self.pg.set_ephemeral("Could not save theme preference", STATUS_TTL);
            self.needs_render = true;
        }
    }

    fn render(&mut self) {
        let (w, h) = self.size;
        if let Err(e) = self.engine.render(&self.pg, w, h) {
            error!(target: "render", ?e, "render_error");
        }
        self.needs_render = false;
    }

    async fn finalize_shutdown(&mut self, reason: ShutdownReason) {
        log_shutdown_stage(reason, "begin");
        self.timers.cancel_all();
        if let Some(tx) = self.tx.take() {
            trace!(
                target: "runtime.shutdown",
                reason = reason.as_str(),
                "dropping_runtime_sender"
            );
            drop(tx);
        }

        if let Some(shutdown) = self.input_shutdown.take() {
            trace!(
                target: "runtime.shutdown",
                reason = reason.as_str(),
                "input_task_shutdown_signal"
            );
            shutdown.signal();
        }

        if let Some(handle) = self.input_task.take() {
            match tokio::time::timeout(Duration::from_millis(200), handle).await {
                Ok(Ok(())) => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "input_task_joined"
                ),
                Ok(Err(err)) if err.is_cancelled() => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "input_task_cancelled"
                ),
                Ok(Err(err)) => error!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    ?err,
                    "input_task_join_failed"
                ),
                Err(_) => warn!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "input_task_timeout"
                ),
            }
        }

        let m = self.engine.metrics_snapshot();
        debug!(
            target: "runtime.shutdown",
            full_frames = m.full_frames,
            partial_frames = m.partial_frames,
            rows_repainted = m.rows_repainted,
            rows_skipped = m.rows_skipped,
            "render_totals"
        );
        log_shutdown_stage(reason, "complete");
    }
}
