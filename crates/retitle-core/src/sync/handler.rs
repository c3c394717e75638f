//! Orchestrates one rename pass per host event.
//!
//! Ties template rendering, the identity cache and the platform backend
//! together. Every entry point takes a fresh [`ViewSnapshot`] and reports
//! what happened; backend failures never escape as errors.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, info, warn};

use crate::config::{RetitleConfig, TitleSettings};
use crate::sync::types::SyncOutcome;
use crate::title::{self, RenamePlan, TitleError, ViewSnapshot, WindowId};
use crate::window::{WindowBackend, WindowHandle, WindowIdentityCache};

/// Per-process rename engine, one instance for every window of the host.
///
/// Entry points may be called from any thread. Shared state is atomic per
/// entry with no cross-entry invariants. A window moves from unresolved to
/// resolved on its first unambiguous search match and never back; a cached
/// handle that has gone stale keeps failing until the process restarts
/// (see [`WindowIdentityCache`]).
pub struct TitleSync {
    settings: TitleSettings,
    backend: Box<dyn WindowBackend>,
    cache: WindowIdentityCache,
    home: Option<String>,
    ready: AtomicBool,
    dirty_seen: Mutex<HashMap<WindowId, bool>>,
}

impl TitleSync {
    /// Build the engine from loaded configuration and a detected backend.
    ///
    /// Starts gated: events are no-ops until [`TitleSync::on_host_ready`].
    pub fn new(config: &RetitleConfig, backend: Box<dyn WindowBackend>) -> Self {
        Self {
            settings: config.title.clone(),
            backend,
            cache: WindowIdentityCache::new(),
            home: title::host_home(),
            ready: AtomicBool::new(false),
            dirty_seen: Mutex::new(HashMap::new()),
        }
    }

    /// Whether the startup gate has been lifted.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Startup pass: lift the event gate, prepare the backend once, then
    /// sync every open view.
    ///
    /// A backend that fails to prepare is kept; each later pass surfaces its
    /// own failure. A malformed template aborts the sweep on the first view
    /// since every view would fail identically.
    pub fn on_host_ready(&self, views: &[ViewSnapshot]) -> Result<Vec<SyncOutcome>, TitleError> {
        let start_time = std::time::Instant::now();
        info!(
            event = "core.sync.startup_sweep_started",
            backend = self.backend.name(),
            views = views.len()
        );

        self.ready.store(true, Ordering::SeqCst);

        if let Err(e) = self.backend.prepare() {
            warn!(
                event = "core.sync.backend_prepare_failed",
                backend = self.backend.name(),
                error = %e,
                "Backend preparation failed - renames will fail until it recovers"
            );
        }

        let mut outcomes = Vec::with_capacity(views.len());
        for view in views {
            outcomes.push(self.sync_view(view, "host_ready")?);
        }

        info!(
            event = "core.sync.startup_sweep_completed",
            views = views.len(),
            duration_ms = start_time.elapsed().as_millis()
        );
        Ok(outcomes)
    }

    /// A view gained focus.
    pub fn on_activated(&self, view: &ViewSnapshot) -> Result<SyncOutcome, TitleError> {
        self.sync_view(view, "activated")
    }

    /// A view's content changed. Hosts fire this on every keystroke; the
    /// dirty short-circuit inside the pass reduces it to flag flips.
    pub fn on_modified(&self, view: &ViewSnapshot) -> Result<SyncOutcome, TitleError> {
        self.sync_view(view, "modified")
    }

    /// A view was written to disk.
    pub fn on_post_save(&self, view: &ViewSnapshot) -> Result<SyncOutcome, TitleError> {
        self.sync_view(view, "post_save")
    }

    /// One full pass for one view.
    fn sync_view(&self, view: &ViewSnapshot, trigger: &str) -> Result<SyncOutcome, TitleError> {
        // 1. Gate until the host has finished starting up.
        if !self.is_ready() {
            debug!(
                event = "core.sync.not_ready",
                window_id = %view.window_id,
                trigger = trigger
            );
            return Ok(SyncOutcome::NotReady);
        }

        // 2. Compute both titles. A malformed template surfaces to the
        //    caller and aborts this event only.
        let plan = match title::compute_rename_plan(view, &self.settings, self.home.as_deref()) {
            Ok(plan) => plan,
            Err(e) => {
                error!(
                    event = "core.sync.plan_failed",
                    window_id = %view.window_id,
                    trigger = trigger,
                    error = %e
                );
                return Err(e);
            }
        };

        // 3. Skip when the dirty flag matches the last applied pass for
        //    this window. Path and project changes arrive via activation
        //    and save events, which run a full pass whenever the flag
        //    differs or the window has no applied pass yet.
        if self.last_dirty(view.window_id) == Some(view.is_dirty) {
            debug!(
                event = "core.sync.dirty_unchanged",
                window_id = %view.window_id,
                trigger = trigger,
                is_dirty = view.is_dirty
            );
            return Ok(SyncOutcome::Unchanged);
        }

        // 4. A cached handle is renamed directly, no search.
        if let Some(handle) = self.cache.get(view.window_id) {
            return Ok(self.rename_cached(view, &plan, handle, trigger));
        }

        // 5. No cached handle yet: search by the official title.
        Ok(self.rename_found(view, &plan, trigger))
    }

    fn rename_cached(
        &self,
        view: &ViewSnapshot,
        plan: &RenamePlan,
        handle: WindowHandle,
        trigger: &str,
    ) -> SyncOutcome {
        match self.backend.set_title(handle, &plan.new_title) {
            Ok(()) => {
                info!(
                    event = "core.sync.rename_completed",
                    window_id = %view.window_id,
                    handle = %handle,
                    trigger = trigger,
                    from_cache = true,
                    new_title = %plan.new_title
                );
                self.record_dirty(view);
                SyncOutcome::Renamed {
                    windows: 1,
                    from_cache: true,
                }
            }
            Err(e) => {
                warn!(
                    event = "core.sync.rename_failed",
                    window_id = %view.window_id,
                    handle = %handle,
                    trigger = trigger,
                    error = %e,
                    "Rename via cached handle failed - the handle may refer to a closed window"
                );
                SyncOutcome::BackendFailed
            }
        }
    }

    fn rename_found(&self, view: &ViewSnapshot, plan: &RenamePlan, trigger: &str) -> SyncOutcome {
        let handles = match self.backend.find_windows(&plan.official_title) {
            Ok(handles) => handles,
            Err(e) => {
                warn!(
                    event = "core.sync.find_failed",
                    window_id = %view.window_id,
                    trigger = trigger,
                    error = %e
                );
                return SyncOutcome::BackendFailed;
            }
        };

        match handles.as_slice() {
            [] => {
                // Valid and silent: the window may not exist yet, or its
                // visible title no longer ends with the search key. The
                // next event searches again.
                debug!(
                    event = "core.sync.no_match",
                    window_id = %view.window_id,
                    trigger = trigger,
                    official_title = %plan.official_title
                );
                SyncOutcome::NoMatch
            }
            [handle] => {
                // Exactly one match pins the identity for this window.
                self.cache.insert(view.window_id, *handle);
                match self.backend.set_title(*handle, &plan.new_title) {
                    Ok(()) => {
                        info!(
                            event = "core.sync.rename_completed",
                            window_id = %view.window_id,
                            handle = %handle,
                            trigger = trigger,
                            from_cache = false,
                            new_title = %plan.new_title
                        );
                        self.record_dirty(view);
                        SyncOutcome::Renamed {
                            windows: 1,
                            from_cache: false,
                        }
                    }
                    Err(e) => {
                        warn!(
                            event = "core.sync.rename_failed",
                            window_id = %view.window_id,
                            handle = %handle,
                            trigger = trigger,
                            error = %e
                        );
                        SyncOutcome::BackendFailed
                    }
                }
            }
            many => {
                // Several windows show the same suffix. All of them are
                // renamed and none is cached; the next unique title
                // disambiguates.
                let mut renamed = 0;
                for handle in many {
                    match self.backend.set_title(*handle, &plan.new_title) {
                        Ok(()) => renamed += 1,
                        Err(e) => {
                            warn!(
                                event = "core.sync.rename_failed",
                                window_id = %view.window_id,
                                handle = %handle,
                                trigger = trigger,
                                error = %e
                            );
                        }
                    }
                }
                if renamed == 0 {
                    return SyncOutcome::BackendFailed;
                }
                info!(
                    event = "core.sync.rename_completed",
                    window_id = %view.window_id,
                    trigger = trigger,
                    windows = renamed,
                    matches = many.len(),
                    from_cache = false,
                    new_title = %plan.new_title
                );
                self.record_dirty(view);
                SyncOutcome::Renamed {
                    windows: renamed,
                    from_cache: false,
                }
            }
        }
    }

    fn last_dirty(&self, window_id: WindowId) -> Option<bool> {
        self.dirty_seen.lock().unwrap().get(&window_id).copied()
    }

    /// Record the dirty flag a pass ran with, once it has renamed
    /// something. Failed and matchless passes leave the record untouched,
    /// so the next event runs in full.
    fn record_dirty(&self, view: &ViewSnapshot) {
        self.dirty_seen
            .lock()
            .unwrap()
            .insert(view.window_id, view.is_dirty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowError;
    use std::sync::Arc;

    #[derive(Default)]
    struct MockState {
        find_calls: usize,
        renames: Vec<(WindowHandle, String)>,
        fail_find: bool,
        fail_set_title: bool,
    }

    struct MockBackend {
        matches: Vec<WindowHandle>,
        state: Arc<Mutex<MockState>>,
    }

    impl MockBackend {
        fn new(matches: Vec<WindowHandle>) -> (Self, Arc<Mutex<MockState>>) {
            let state = Arc::new(Mutex::new(MockState::default()));
            (
                Self {
                    matches,
                    state: state.clone(),
                },
                state,
            )
        }
    }

    impl WindowBackend for MockBackend {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn display_name(&self) -> &'static str {
            "Mock"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn prepare(&self) -> Result<(), WindowError> {
            Ok(())
        }

        fn find_windows(&self, _official_title: &str) -> Result<Vec<WindowHandle>, WindowError> {
            let mut state = self.state.lock().unwrap();
            state.find_calls += 1;
            if state.fail_find {
                return Err(WindowError::CommandFailed {
                    command: "mock".to_string(),
                    message: "forced find failure".to_string(),
                });
            }
            Ok(self.matches.clone())
        }

        fn set_title(&self, handle: WindowHandle, new_title: &str) -> Result<(), WindowError> {
            let mut state = self.state.lock().unwrap();
            if state.fail_set_title {
                return Err(WindowError::ApiFailed {
                    message: "forced set_title failure".to_string(),
                });
            }
            state.renames.push((handle, new_title.to_string()));
            Ok(())
        }
    }

    fn engine_with(matches: Vec<WindowHandle>) -> (TitleSync, Arc<Mutex<MockState>>) {
        let (backend, state) = MockBackend::new(matches);
        let sync = TitleSync::new(&RetitleConfig::default(), Box::new(backend));
        (sync, state)
    }

    fn ready_engine(matches: Vec<WindowHandle>) -> (TitleSync, Arc<Mutex<MockState>>) {
        let (sync, state) = engine_with(matches);
        sync.on_host_ready(&[]).unwrap();
        (sync, state)
    }

    fn view(window_id: u64) -> ViewSnapshot {
        ViewSnapshot::new(WindowId(window_id))
            .with_file("/work/proj/src/main.rs")
            .with_folder("/work/proj")
    }

    #[test]
    fn test_events_are_gated_until_host_ready() {
        let (sync, state) = engine_with(vec![WindowHandle::X11(7)]);
        assert!(!sync.is_ready());

        let outcome = sync.on_activated(&view(1)).unwrap();
        assert_eq!(outcome, SyncOutcome::NotReady);

        let state = state.lock().unwrap();
        assert_eq!(state.find_calls, 0);
        assert!(state.renames.is_empty());
    }

    #[test]
    fn test_startup_sweep_covers_every_view() {
        let (sync, state) = engine_with(vec![WindowHandle::X11(7)]);

        let outcomes = sync.on_host_ready(&[view(1), view(2)]).unwrap();
        assert!(sync.is_ready());
        assert_eq!(
            outcomes,
            vec![
                SyncOutcome::Renamed {
                    windows: 1,
                    from_cache: false
                },
                SyncOutcome::Renamed {
                    windows: 1,
                    from_cache: false
                },
            ]
        );
        assert_eq!(state.lock().unwrap().renames.len(), 2);
    }

    #[test]
    fn test_unique_match_is_cached_and_skips_later_searches() {
        let (sync, state) = ready_engine(vec![WindowHandle::X11(7)]);

        let first = sync.on_activated(&view(1)).unwrap();
        assert_eq!(
            first,
            SyncOutcome::Renamed {
                windows: 1,
                from_cache: false
            }
        );
        assert_eq!(state.lock().unwrap().find_calls, 1);

        // Dirty flip forces a second full pass; it must reuse the handle.
        let second = sync.on_modified(&view(1).dirty(true)).unwrap();
        assert_eq!(
            second,
            SyncOutcome::Renamed {
                windows: 1,
                from_cache: true
            }
        );
        assert_eq!(state.lock().unwrap().find_calls, 1);
        assert_eq!(state.lock().unwrap().renames.len(), 2);
    }

    #[test]
    fn test_unchanged_dirty_flag_runs_at_most_one_rename() {
        let (sync, state) = ready_engine(vec![WindowHandle::X11(7)]);

        assert!(matches!(
            sync.on_activated(&view(1)).unwrap(),
            SyncOutcome::Renamed { .. }
        ));
        assert_eq!(sync.on_activated(&view(1)).unwrap(), SyncOutcome::Unchanged);
        assert_eq!(state.lock().unwrap().renames.len(), 1);
    }

    #[test]
    fn test_modified_only_acts_on_dirty_transitions() {
        let (sync, state) = ready_engine(vec![WindowHandle::X11(7)]);

        let dirty = view(1).dirty(true);
        assert!(matches!(
            sync.on_modified(&dirty).unwrap(),
            SyncOutcome::Renamed { .. }
        ));
        // Keystrokes keep arriving with the flag already set.
        assert_eq!(sync.on_modified(&dirty).unwrap(), SyncOutcome::Unchanged);
        assert_eq!(sync.on_modified(&dirty).unwrap(), SyncOutcome::Unchanged);
        assert_eq!(state.lock().unwrap().renames.len(), 1);
    }

    #[test]
    fn test_save_runs_a_pass_and_reactivation_skips() {
        let (sync, state) = ready_engine(vec![WindowHandle::X11(7)]);

        sync.on_modified(&view(1).dirty(true)).unwrap();
        let saved = sync.on_post_save(&view(1)).unwrap();
        assert_eq!(
            saved,
            SyncOutcome::Renamed {
                windows: 1,
                from_cache: true
            }
        );
        // Re-activating the freshly saved view changes nothing further.
        assert_eq!(sync.on_activated(&view(1)).unwrap(), SyncOutcome::Unchanged);
        assert_eq!(state.lock().unwrap().renames.len(), 2);
    }

    #[test]
    fn test_ambiguous_matches_rename_all_and_cache_none() {
        let (sync, state) = ready_engine(vec![WindowHandle::X11(1), WindowHandle::X11(2)]);

        let outcome = sync.on_activated(&view(1)).unwrap();
        assert_eq!(
            outcome,
            SyncOutcome::Renamed {
                windows: 2,
                from_cache: false
            }
        );
        assert_eq!(state.lock().unwrap().renames.len(), 2);

        // Nothing was cached, so the next pass searches again.
        let again = sync.on_modified(&view(1).dirty(true)).unwrap();
        assert_eq!(
            again,
            SyncOutcome::Renamed {
                windows: 2,
                from_cache: false
            }
        );
        assert_eq!(state.lock().unwrap().find_calls, 2);
    }

    #[test]
    fn test_zero_matches_is_silent_and_retried() {
        let (sync, state) = ready_engine(vec![]);

        assert_eq!(sync.on_activated(&view(1)).unwrap(), SyncOutcome::NoMatch);
        // A matchless pass records nothing, so an identical event searches
        // again instead of short-circuiting.
        assert_eq!(sync.on_activated(&view(1)).unwrap(), SyncOutcome::NoMatch);
        assert_eq!(state.lock().unwrap().find_calls, 2);
        assert!(state.lock().unwrap().renames.is_empty());
    }

    #[test]
    fn test_find_failure_is_contained_and_retried() {
        let (sync, state) = ready_engine(vec![WindowHandle::X11(7)]);
        state.lock().unwrap().fail_find = true;

        assert_eq!(
            sync.on_activated(&view(1)).unwrap(),
            SyncOutcome::BackendFailed
        );

        // The next event runs the full pass again.
        state.lock().unwrap().fail_find = false;
        assert!(matches!(
            sync.on_activated(&view(1)).unwrap(),
            SyncOutcome::Renamed { .. }
        ));
    }

    #[test]
    fn test_set_title_failure_keeps_handle_cached() {
        let (sync, state) = ready_engine(vec![WindowHandle::X11(7)]);

        assert!(matches!(
            sync.on_activated(&view(1)).unwrap(),
            SyncOutcome::Renamed { .. }
        ));

        state.lock().unwrap().fail_set_title = true;
        assert_eq!(
            sync.on_modified(&view(1).dirty(true)).unwrap(),
            SyncOutcome::BackendFailed
        );

        // Still resolved: recovery goes through the cached handle, not a
        // fresh search.
        state.lock().unwrap().fail_set_title = false;
        assert_eq!(
            sync.on_modified(&view(1).dirty(true)).unwrap(),
            SyncOutcome::Renamed {
                windows: 1,
                from_cache: true
            }
        );
        assert_eq!(state.lock().unwrap().find_calls, 1);
    }

    #[test]
    fn test_malformed_template_surfaces_per_event() {
        let mut config = RetitleConfig::default();
        config.title.template = "{path".to_string();
        let (backend, state) = MockBackend::new(vec![WindowHandle::X11(7)]);
        let sync = TitleSync::new(&config, Box::new(backend));

        sync.on_host_ready(&[]).unwrap();
        let result = sync.on_activated(&view(1));
        assert!(matches!(
            result,
            Err(TitleError::UnclosedPlaceholder { .. })
        ));
        assert_eq!(state.lock().unwrap().find_calls, 0);

        // A sweep over real views aborts on the first one.
        assert!(sync.on_host_ready(&[view(1), view(2)]).is_err());
        assert!(state.lock().unwrap().renames.is_empty());
    }
}
