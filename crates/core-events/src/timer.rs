//! Deferred event delivery.
//!
//! Two shapes are needed by the runtime:
//! * [`schedule`]: one-shot delivery of an event after a delay, returning a
//!   [`ScheduledTask`] handle that can cancel it. Dropping the handle does NOT
//!   cancel; a detached task still fires.
//! * [`Debouncer`]: at most one pending delivery; every `restart` cancels the
//!   previous one so the event fires once, `delay` after the last restart.
//!
//! Both spawn on the ambient tokio runtime and stop quietly when the event
//! channel has been closed.

use crate::{CHANNEL_SEND_FAILURES, Event, TIMERS_CANCELLED, TIMERS_SCHEDULED};
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tracing::trace;

/// Handle to a pending deferred event.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Cancel delivery. No-op if the event was already sent.
    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            TIMERS_CANCELLED.fetch_add(1, Ordering::Relaxed);
            self.handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Deliver `event` on `tx` after `delay`.
pub fn schedule(tx: &Sender<Event>, delay: Duration, event: Event) -> ScheduledTask {
    TIMERS_SCHEDULED.fetch_add(1, Ordering::Relaxed);
    let tx = tx.clone();
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if tx.send(event).await.is_err() {
            CHANNEL_SEND_FAILURES.fetch_add(1, Ordering::Relaxed);
            trace!(target: "runtime.timer", "deferred_send_channel_closed");
        }
    });
    ScheduledTask { handle }
}

/// Restartable single-slot timer.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<ScheduledTask>,
    restarts: u64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            restarts: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of times a still-pending delivery was superseded.
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// Cancel any pending delivery and schedule a fresh one.
    pub fn restart(&mut self, tx: &Sender<Event>, event: Event) {
        if let Some(prev) = self.pending.take()
            && !prev.is_finished()
        {
            prev.cancel();
            self.restarts += 1;
        }
        self.pending = Some(schedule(tx, self.delay, event));
    }

    pub fn cancel(&mut self) {
        if let Some(prev) = self.pending.take() {
            prev.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|t| !t.is_finished())
    }
}
