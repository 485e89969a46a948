//! Background task draining `crossterm::event::EventStream`.
//!
//! Each terminal event is translated by [`translate`] and forwarded on the
//! runtime channel. The task stops on the first of: shutdown signal, closed
//! channel, end of stream, stream error. Whichever happened is counted in the
//! matching `ASYNC_INPUT_STOP_*` counter and logged once.

use crate::keys::map_key_event;
use core_events::{
    ASYNC_INPUT_STARTS, ASYNC_INPUT_STOP_CHANNEL, ASYNC_INPUT_STOP_ERROR, ASYNC_INPUT_STOP_SIGNAL,
    ASYNC_INPUT_STOP_STREAM, CHANNEL_SEND_FAILURES, Event, InputEvent, KEYPRESS_TOTAL,
};
use crossterm::event::{
    Event as CEvent, EventStream, KeyCode as CKeyCode, KeyModifiers as CKeyModifiers,
    MouseButton, MouseEventKind,
};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Notify, mpsc::Sender};
use tokio::task::JoinHandle;
use tokio_stream::{Stream, StreamExt};
use tracing::{info, trace, warn};

/// Handle asking the input task to stop.
#[derive(Clone, Debug)]
pub struct AsyncInputShutdown {
    notify: Arc<Notify>,
}

impl AsyncInputShutdown {
    pub fn signal(&self) {
        // notify_one stores a permit, so a signal sent before the task awaits is not lost
        self.notify.notify_one();
    }
}

pub(crate) fn spawn_async_event_task(sender: Sender<Event>) -> (JoinHandle<()>, AsyncInputShutdown) {
    let notify = Arc::new(Notify::new());
    let shutdown = AsyncInputShutdown {
        notify: notify.clone(),
    };
    let handle = tokio::spawn(async move {
        let span = tracing::debug_span!(target: "input.thread", "input_task");
        let _enter = span.enter();
        pump(EventStream::new(), sender, notify).await;
    });
    (handle, shutdown)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StopReason {
    Signal,
    ChannelClosed,
    StreamEnded,
    StreamError,
}

impl StopReason {
    fn as_str(self) -> &'static str {
        match self {
            StopReason::Signal => "shutdown_signal",
            StopReason::ChannelClosed => "channel_closed",
            StopReason::StreamEnded => "stream_ended",
            StopReason::StreamError => "stream_error",
        }
    }

    fn counter(self) -> &'static AtomicU64 {
        match self {
            StopReason::Signal => &ASYNC_INPUT_STOP_SIGNAL,
            StopReason::ChannelClosed => &ASYNC_INPUT_STOP_CHANNEL,
            StopReason::StreamEnded => &ASYNC_INPUT_STOP_STREAM,
            StopReason::StreamError => &ASYNC_INPUT_STOP_ERROR,
        }
    }
}

/// Map one terminal event to a playground input. `None` means "not interesting".
///
/// Ctrl-C is split out before key mapping so the runtime can quit even when a
/// confirmation prompt would otherwise swallow the key.
pub(crate) fn translate(event: CEvent) -> Option<InputEvent> {
    match event {
        CEvent::Key(key)
            if key.code == CKeyCode::Char('c') && key.modifiers.contains(CKeyModifiers::CONTROL) =>
        {
            Some(InputEvent::CtrlC)
        }
        CEvent::Key(key) => map_key_event(&key).map(InputEvent::Key),
        CEvent::Mouse(m) if m.kind == MouseEventKind::Down(MouseButton::Left) => {
            Some(InputEvent::Click {
                column: m.column,
                row: m.row,
            })
        }
        CEvent::Resize(w, h) => Some(InputEvent::Resize(w, h)),
        CEvent::Paste(text) => Some(InputEvent::Paste(text)),
        _ => None,
    }
}

fn log_forward(input: &InputEvent) {
    match input {
        // key text is never logged, only its shape
        InputEvent::Key(k) => {
            trace!(target: "input.event", kind = "keypress", mods = ?k.mods, chord = k.is_chord())
        }
        InputEvent::Click { column, row } => {
            trace!(target: "input.event", column, row, "click")
        }
        InputEvent::Resize(w, h) => trace!(target: "input.event", w, h, "resize"),
        InputEvent::Paste(text) => trace!(target: "input.event", len = text.len(), "paste"),
        InputEvent::CtrlC => trace!(target: "input.event", "ctrl_c"),
    }
}

async fn pump<S>(mut stream: S, sender: Sender<Event>, shutdown: Arc<Notify>)
where
    S: Stream<Item = io::Result<CEvent>> + Unpin,
{
    info!(target: "input.thread", "input_task_started");
    ASYNC_INPUT_STARTS.fetch_add(1, Ordering::Relaxed);

    let mut error_kind = None;
    let reason = loop {
        let next = tokio::select! {
            biased;
            _ = shutdown.notified() => break StopReason::Signal,
            next = stream.next() => next,
        };
        let input = match next {
            None => break StopReason::StreamEnded,
            Some(Err(err)) => {
                error_kind = Some(err.kind());
                break StopReason::StreamError;
            }
            Some(Ok(ev)) => match translate(ev) {
                Some(input) => input,
                None => continue,
            },
        };
        log_forward(&input);
        let is_key = matches!(input, InputEvent::Key(_));
        if sender.send(Event::Input(input)).await.is_err() {
            CHANNEL_SEND_FAILURES.fetch_add(1, Ordering::Relaxed);
            break StopReason::ChannelClosed;
        }
        if is_key {
            KEYPRESS_TOTAL.fetch_add(1, Ordering::Relaxed);
        }
    };

    reason.counter().fetch_add(1, Ordering::Relaxed);
    if reason == StopReason::StreamError {
        warn!(target: "input.thread", error_kind = ?error_kind, "input_task_stream_error");
    }
    info!(target: "input.thread", reason = reason.as_str(), "input_task_stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::{KeyCode, KeyEvent};
    use crossterm::event::{KeyEvent as CKeyEvent, MouseEvent};
    use std::io::Write;
    use std::sync::Mutex;
    use tokio::sync::mpsc;
    use tokio::time::{Duration, timeout};
    use tokio_stream::wrappers::UnboundedReceiverStream;
    use tracing_subscriber::fmt::MakeWriter;

    fn key(code: CKeyCode, mods: CKeyModifiers) -> CEvent {
        CEvent::Key(CKeyEvent::new(code, mods))
    }

    fn mouse(kind: MouseEventKind) -> CEvent {
        CEvent::Mouse(MouseEvent {
            kind,
            column: 7,
            row: 3,
            modifiers: CKeyModifiers::NONE,
        })
    }

    async fn collect(events: Vec<CEvent>) -> Vec<Event> {
        let (tx, mut rx) = mpsc::channel(64);
        let stream = tokio_stream::iter(events.into_iter().map(Ok));
        pump(stream, tx, Arc::new(Notify::new())).await;
        let mut out = Vec::new();
        while let Some(ev) = rx.recv().await {
            out.push(ev);
        }
        out
    }

    #[test]
    fn translate_covers_playground_inputs() {
        assert_eq!(
            translate(key(CKeyCode::Char('c'), CKeyModifiers::CONTROL)),
            Some(InputEvent::CtrlC)
        );
        assert_eq!(
            translate(key(CKeyCode::Char('<'), CKeyModifiers::NONE)),
            Some(InputEvent::Key(KeyEvent::char('<')))
        );
        assert_eq!(
            translate(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(InputEvent::Click { column: 7, row: 3 })
        );
        assert_eq!(translate(mouse(MouseEventKind::Moved)), None);
        assert_eq!(
            translate(mouse(MouseEventKind::Down(MouseButton::Right))),
            None
        );
        assert_eq!(translate(CEvent::FocusGained), None);
        assert_eq!(
            translate(CEvent::Paste("a.b".into())),
            Some(InputEvent::Paste("a.b".into()))
        );
    }

    #[tokio::test]
    async fn forwards_in_order_and_counts_keys() {
        let before = KEYPRESS_TOTAL.load(Ordering::Relaxed);
        let out = collect(vec![
            CEvent::Resize(120, 48),
            mouse(MouseEventKind::Moved),
            key(CKeyCode::Down, CKeyModifiers::NONE),
        ])
        .await;
        assert_eq!(
            out,
            vec![
                Event::Input(InputEvent::Resize(120, 48)),
                Event::Input(InputEvent::Key(KeyEvent::plain(KeyCode::Down))),
            ]
        );
        assert!(KEYPRESS_TOTAL.load(Ordering::Relaxed) > before);
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer poisoned").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for SharedBuf {
        type Writer = SharedBuf;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn keypress_log_omits_typed_text() {
        let buf = SharedBuf::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buf.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();
        let (tx, mut rx) = mpsc::channel(8);
        let stream = tokio_stream::iter(vec![Ok(key(CKeyCode::Char('z'), CKeyModifiers::NONE))]);
        {
            let _default = tracing::subscriber::set_default(subscriber);
            pump(stream, tx, Arc::new(Notify::new())).await;
        }
        assert_eq!(
            rx.recv().await,
            Some(Event::Input(InputEvent::Key(KeyEvent::char('z'))))
        );
        let logs = String::from_utf8(buf.0.lock().expect("log buffer poisoned").clone())
            .expect("utf8 logs");
        let keypress = logs
            .lines()
            .find(|l| l.contains("keypress"))
            .expect("keypress line");
        assert!(!keypress.contains('z'), "{keypress}");
        assert!(logs.contains("input_task_stopped"));
        assert!(logs.contains("stream_ended"));
    }

    #[tokio::test]
    async fn closed_channel_stops_task() {
        let before = ASYNC_INPUT_STOP_CHANNEL.load(Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let stream = tokio_stream::iter(vec![Ok(CEvent::Resize(10, 10))]);
        pump(stream, tx, Arc::new(Notify::new())).await;
        assert!(ASYNC_INPUT_STOP_CHANNEL.load(Ordering::Relaxed) > before);
    }

    #[tokio::test]
    async fn stream_error_is_counted() {
        let before = ASYNC_INPUT_STOP_ERROR.load(Ordering::Relaxed);
        let (tx, _rx) = mpsc::channel(1);
        let stream = tokio_stream::iter(vec![Err(io::Error::other("tty gone"))]);
        pump(stream, tx, Arc::new(Notify::new())).await;
        assert!(ASYNC_INPUT_STOP_ERROR.load(Ordering::Relaxed) > before);
    }

    #[tokio::test]
    async fn shutdown_signal_stops_idle_task() {
        let (tx, mut rx) = mpsc::channel(1);
        let (_keep_open, events) = mpsc::unbounded_channel::<io::Result<CEvent>>();
        let notify = Arc::new(Notify::new());
        let shutdown = AsyncInputShutdown {
            notify: notify.clone(),
        };
        let task = tokio::spawn(pump(UnboundedReceiverStream::new(events), tx, notify));
        shutdown.signal();
        timeout(Duration::from_millis(100), task)
            .await
            .expect("task stops promptly")
            .expect("task joined");
        assert!(rx.recv().await.is_none());
    }
}
