//! Terminal input for the playground: crossterm events in, `core_events::Event`s out.

mod async_service;
mod keys;

pub use async_service::AsyncInputShutdown;

use core_events::Event;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

/// Start reading terminal input on the ambient tokio runtime.
///
/// The task runs until [`AsyncInputShutdown::signal`] is called, the receiver
/// side of `sender` is dropped, or the terminal stream ends.
pub fn spawn_async_input(sender: Sender<Event>) -> (JoinHandle<()>, AsyncInputShutdown) {
    async_service::spawn_async_event_task(sender)
}
