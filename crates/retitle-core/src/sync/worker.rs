//! Dedicated worker thread for rename passes.
//!
//! Subprocess-backed renames block on I/O, so the host queues events here
//! instead of running them on its own dispatch path. Events are processed
//! strictly in arrival order; there is no cancellation and no retry beyond
//! what the next event does naturally.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::JoinHandle;

use tracing::{error, info, warn};

use crate::sync::handler::TitleSync;
use crate::sync::types::SyncEvent;

/// Owning handle for the worker thread.
///
/// Dropping it without [`SyncWorker::shutdown`] closes the channel, which
/// stops the thread after the queue drains, but does not wait for it.
pub struct SyncWorker {
    sender: Sender<SyncEvent>,
    thread: Option<JoinHandle<()>>,
}

impl SyncWorker {
    /// Start the worker thread over a shared engine.
    pub fn spawn(sync: Arc<TitleSync>) -> Self {
        let (sender, receiver) = channel();
        let thread = std::thread::spawn(move || {
            run_loop(sync, receiver);
        });
        Self {
            sender,
            thread: Some(thread),
        }
    }

    /// Queue one event. Fire-and-forget: a worker that has already stopped
    /// logs the drop and the event is lost.
    pub fn submit(&self, event: SyncEvent) {
        if self.sender.send(event).is_err() {
            warn!(
                event = "core.sync.worker_send_failed",
                "Sync worker is no longer running - event dropped"
            );
        }
    }

    /// Stop the worker once the queue has drained, then wait for it.
    pub fn shutdown(mut self) {
        let _ = self.sender.send(SyncEvent::Shutdown);
        if let Some(thread) = self.thread.take()
            && let Err(e) = thread.join()
        {
            error!(event = "core.sync.worker_panicked", error = ?e);
        }
    }
}

fn run_loop(sync: Arc<TitleSync>, receiver: Receiver<SyncEvent>) {
    info!(event = "core.sync.worker_started");

    loop {
        let event = match receiver.recv() {
            Ok(event) => event,
            // Every sender is gone; nothing further can arrive.
            Err(_) => break,
        };

        let trigger = event.label();
        let result = match event {
            SyncEvent::Shutdown => break,
            SyncEvent::HostReady(views) => sync.on_host_ready(&views).map(|_| ()),
            SyncEvent::Activated(view) => sync.on_activated(&view).map(|_| ()),
            SyncEvent::Modified(view) => sync.on_modified(&view).map(|_| ()),
            SyncEvent::PostSave(view) => sync.on_post_save(&view).map(|_| ()),
        };

        if let Err(e) = result {
            error!(
                event = "core.sync.event_failed",
                trigger = trigger,
                error = %e
            );
        }
    }

    info!(event = "core.sync.worker_stopped");
}
