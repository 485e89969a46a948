//! Deferred work owned by the runtime: one classification slot per editor and
//! the preview debounce.

use core_events::{Debouncer, Event, ScheduledTask, schedule};
use core_suggest::TriggerChar;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tracing::trace;

pub struct TimerBank {
    classify: [Option<ScheduledTask>; 3],
    preview: Debouncer,
}

impl TimerBank {
    pub fn new(preview_debounce: Duration) -> Self {
        Self {
            classify: [None, None, None],
            preview: Debouncer::new(preview_debounce),
        }
    }

    /// Schedule `Event::ClassifyDue` for `slot`. With `supersede` a still pending request for the
    /// same slot is aborted first; without it both fire and the reducer sorts them out.
    pub fn schedule_classification(
        &mut self,
        tx: &Sender<Event>,
        slot: usize,
        trigger: TriggerChar,
        ticket: u64,
        delay: Duration,
        supersede: bool,
    ) {
        let Some(entry) = self.classify.get_mut(slot) else {
            return;
        };
        if supersede
            && let Some(prev) = entry.take()
            && !prev.is_finished()
        {
            prev.cancel();
            trace!(target: "runtime.timer", slot, ticket, "classification_cancelled");
        }
        *entry = Some(schedule(
            tx,
            delay,
            Event::ClassifyDue {
                slot,
                trigger: trigger.as_char(),
                ticket,
            },
        ));
    }

    pub fn restart_preview(&mut self, tx: &Sender<Event>, delay: Duration) {
        if self.preview.delay() != delay {
            self.preview.cancel();
            self.preview = Debouncer::new(delay);
        }
        self.preview.restart(tx, Event::PreviewDue);
    }

    pub fn preview_pending(&self) -> bool {
        self.preview.is_pending()
    }

    pub fn cancel_all(&mut self) {
        for task in self.classify.iter_mut().filter_map(Option::take) {
            task.cancel();
        }
        self.preview.cancel();
    }
}
