//! Types shared by the sync handler and its worker.

use std::fmt;

use crate::title::ViewSnapshot;

/// What one sync pass did for one view.
///
/// Backend trouble is folded into [`SyncOutcome::BackendFailed`] rather than
/// an error: the pass is abandoned and the next host event retries with
/// fresh state. Only a malformed template reaches the caller as an `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The host has not signalled readiness; nothing was done.
    NotReady,
    /// Dirty flag identical to the last applied pass for this window.
    Unchanged,
    /// `windows` native windows were retitled. `from_cache` is true when a
    /// previously resolved handle was used without searching.
    Renamed { windows: usize, from_cache: bool },
    /// No native window currently carries the official title.
    NoMatch,
    /// The platform backend failed; logged and dropped.
    BackendFailed,
}

impl SyncOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncOutcome::NotReady => "not_ready",
            SyncOutcome::Unchanged => "unchanged",
            SyncOutcome::Renamed { .. } => "renamed",
            SyncOutcome::NoMatch => "no_match",
            SyncOutcome::BackendFailed => "backend_failed",
        }
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Host callbacks as queueable values for the worker thread.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// Host finished starting; sweep every open view once.
    HostReady(Vec<ViewSnapshot>),
    /// A view gained focus.
    Activated(ViewSnapshot),
    /// A view's content changed.
    Modified(ViewSnapshot),
    /// A view was written to disk.
    PostSave(ViewSnapshot),
    /// Stop the worker once earlier events have drained.
    Shutdown,
}

impl SyncEvent {
    /// Stable name for log fields.
    pub fn label(&self) -> &'static str {
        match self {
            SyncEvent::HostReady(_) => "host_ready",
            SyncEvent::Activated(_) => "activated",
            SyncEvent::Modified(_) => "modified",
            SyncEvent::PostSave(_) => "post_save",
            SyncEvent::Shutdown => "shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::title::WindowId;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(SyncOutcome::NotReady.as_str(), "not_ready");
        assert_eq!(SyncOutcome::Unchanged.as_str(), "unchanged");
        assert_eq!(
            SyncOutcome::Renamed {
                windows: 2,
                from_cache: false
            }
            .as_str(),
            "renamed"
        );
        assert_eq!(SyncOutcome::NoMatch.as_str(), "no_match");
        assert_eq!(SyncOutcome::BackendFailed.to_string(), "backend_failed");
    }

    #[test]
    fn test_event_labels() {
        let view = ViewSnapshot::new(WindowId(1));
        assert_eq!(SyncEvent::HostReady(vec![]).label(), "host_ready");
        assert_eq!(SyncEvent::Activated(view.clone()).label(), "activated");
        assert_eq!(SyncEvent::Modified(view.clone()).label(), "modified");
        assert_eq!(SyncEvent::PostSave(view).label(), "post_save");
        assert_eq!(SyncEvent::Shutdown.label(), "shutdown");
    }
}
