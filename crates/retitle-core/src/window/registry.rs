//! Backend selection.
//!
//! The backend is chosen once at startup by a runtime platform check;
//! all native OS calls stay behind the `WindowBackend` boundary from then
//! on.

use tracing::{debug, warn};

use crate::config::RetitleConfig;

use super::backends::{Win32Backend, X11Backend};
use super::errors::WindowError;
use super::traits::WindowBackend;
use super::types::BackendKind;

/// Every backend this build knows about, in the order `backends` listings
/// print them.
pub fn backend_candidates() -> &'static [BackendKind] {
    &[BackendKind::X11, BackendKind::Win32]
}

/// Construct a concrete backend.
pub fn create_backend(kind: BackendKind, config: &RetitleConfig) -> Box<dyn WindowBackend> {
    match kind {
        BackendKind::X11 => Box::new(X11Backend::new(config)),
        BackendKind::Win32 => Box::new(Win32Backend::new(config)),
    }
}

/// Pick the backend for the current platform, verifying it can actually
/// run here.
pub fn detect_backend(config: &RetitleConfig) -> Result<Box<dyn WindowBackend>, WindowError> {
    debug!(
        event = "core.window.backend_detection_started",
        platform = std::env::consts::OS
    );

    let candidates: &[BackendKind] = match std::env::consts::OS {
        "windows" => &[BackendKind::Win32],
        _ => &[BackendKind::X11],
    };

    for kind in candidates {
        let backend = create_backend(*kind, config);
        if backend.is_available() {
            debug!(event = "core.window.backend_detected", backend = backend.name());
            return Ok(backend);
        }
    }

    warn!(
        event = "core.window.backend_none_found",
        platform = std::env::consts::OS
    );
    Err(WindowError::NoBackendFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_backend_names() {
        let config = RetitleConfig::default();
        assert_eq!(create_backend(BackendKind::X11, &config).name(), "x11");
        assert_eq!(create_backend(BackendKind::Win32, &config).name(), "win32");
    }

    #[test]
    fn test_backend_candidates_order() {
        assert_eq!(
            backend_candidates(),
            &[BackendKind::X11, BackendKind::Win32]
        );
    }

    #[test]
    fn test_detect_backend_does_not_panic() {
        // This test depends on the system, but should never panic
        let _result = detect_backend(&RetitleConfig::default());
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_detect_backend_never_picks_win32_off_windows() {
        if let Ok(backend) = detect_backend(&RetitleConfig::default()) {
            assert_eq!(backend.name(), "x11");
        }
    }
}
