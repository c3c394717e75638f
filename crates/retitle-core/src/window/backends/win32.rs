//! Win32 window backend implementation.
//!
//! Uses the native window-enumeration API directly: every top-level
//! window's title is read with the UTF-16 length-then-buffer pattern and
//! compared against the search suffix, and titles are set with a direct
//! call. No subprocess is involved.

use tracing::debug;

use crate::config::RetitleConfig;
use crate::window::{errors::WindowError, traits::WindowBackend, types::WindowHandle};

/// Backend implementation for Win32.
pub struct Win32Backend;

impl Win32Backend {
    pub fn new(_config: &RetitleConfig) -> Self {
        Self
    }
}

#[cfg(target_os = "windows")]
struct EnumContext {
    suffix: String,
    matches: Vec<isize>,
}

/// Collects every top-level window whose title ends with the suffix.
/// Always returns TRUE so enumeration visits all windows.
#[cfg(target_os = "windows")]
unsafe extern "system" fn enum_windows_callback(
    hwnd: windows::Win32::Foundation::HWND,
    lparam: windows::Win32::Foundation::LPARAM,
) -> windows::Win32::Foundation::BOOL {
    use windows::Win32::Foundation::TRUE;
    use windows::Win32::UI::WindowsAndMessaging::{GetWindowTextLengthW, GetWindowTextW};

    let context = unsafe { &mut *(lparam.0 as *mut EnumContext) };

    let len = unsafe { GetWindowTextLengthW(hwnd) };
    if len > 0 {
        let mut buf = vec![0u16; len as usize + 1];
        let copied = unsafe { GetWindowTextW(hwnd, &mut buf) };
        if copied > 0 {
            let title = String::from_utf16_lossy(&buf[..copied as usize]);
            if title.ends_with(&context.suffix) {
                context.matches.push(hwnd.0 as isize);
            }
        }
    }

    TRUE
}

impl WindowBackend for Win32Backend {
    fn name(&self) -> &'static str {
        "win32"
    }

    fn display_name(&self) -> &'static str {
        "Win32 (native)"
    }

    fn is_available(&self) -> bool {
        cfg!(target_os = "windows")
    }

    fn prepare(&self) -> Result<(), WindowError> {
        Ok(())
    }

    #[cfg(target_os = "windows")]
    fn find_windows(&self, official_title: &str) -> Result<Vec<WindowHandle>, WindowError> {
        use windows::Win32::Foundation::LPARAM;
        use windows::Win32::UI::WindowsAndMessaging::EnumWindows;

        debug!(
            event = "core.window.find_started",
            backend = "win32",
            title = %official_title
        );

        let mut context = EnumContext {
            suffix: official_title.to_string(),
            matches: Vec::new(),
        };
        unsafe {
            EnumWindows(
                Some(enum_windows_callback),
                LPARAM(&mut context as *mut EnumContext as isize),
            )
        }
        .map_err(|e| WindowError::ApiFailed {
            message: format!("EnumWindows: {}", e),
        })?;

        debug!(
            event = "core.window.find_completed",
            backend = "win32",
            match_count = context.matches.len()
        );
        Ok(context
            .matches
            .into_iter()
            .map(WindowHandle::Win32)
            .collect())
    }

    #[cfg(not(target_os = "windows"))]
    fn find_windows(&self, _official_title: &str) -> Result<Vec<WindowHandle>, WindowError> {
        debug!(
            event = "core.window.win32_not_supported",
            platform = std::env::consts::OS
        );
        Err(WindowError::ApiFailed {
            message: "win32 backend is only available on Windows".to_string(),
        })
    }

    #[cfg(target_os = "windows")]
    fn set_title(&self, handle: WindowHandle, new_title: &str) -> Result<(), WindowError> {
        use windows::Win32::Foundation::HWND;
        use windows::Win32::UI::WindowsAndMessaging::SetWindowTextW;
        use windows::core::PCWSTR;

        let WindowHandle::Win32(raw) = handle else {
            return Err(WindowError::ApiFailed {
                message: format!("handle {} does not belong to the win32 backend", handle),
            });
        };

        debug!(
            event = "core.window.set_title_started",
            backend = "win32",
            handle = %handle,
            title = %new_title
        );

        let hwnd = HWND(raw as *mut core::ffi::c_void);
        let wide: Vec<u16> = new_title.encode_utf16().chain(std::iter::once(0)).collect();
        unsafe { SetWindowTextW(hwnd, PCWSTR(wide.as_ptr())) }.map_err(|e| {
            WindowError::ApiFailed {
                message: format!("SetWindowText on {}: {}", handle, e),
            }
        })?;

        debug!(
            event = "core.window.set_title_completed",
            backend = "win32",
            handle = %handle
        );
        Ok(())
    }

    #[cfg(not(target_os = "windows"))]
    fn set_title(&self, _handle: WindowHandle, _new_title: &str) -> Result<(), WindowError> {
        debug!(
            event = "core.window.win32_not_supported",
            platform = std::env::consts::OS
        );
        Err(WindowError::ApiFailed {
            message: "win32 backend is only available on Windows".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_names() {
        let backend = Win32Backend::new(&RetitleConfig::default());
        assert_eq!(backend.name(), "win32");
        assert_eq!(backend.display_name(), "Win32 (native)");
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_unavailable_off_windows() {
        let backend = Win32Backend::new(&RetitleConfig::default());
        assert!(!backend.is_available());
        assert!(backend.find_windows("x.py - Sublime Text").is_err());
        assert!(backend.set_title(WindowHandle::Win32(1), "title").is_err());
    }

    #[test]
    fn test_prepare_is_a_no_op() {
        let backend = Win32Backend::new(&RetitleConfig::default());
        assert!(backend.prepare().is_ok());
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn test_find_windows_does_not_panic() {
        let backend = Win32Backend::new(&RetitleConfig::default());
        // Enumeration over real windows; result depends on the desktop
        let _ = backend.find_windows("retitle-no-such-title-436f");
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn test_set_title_rejects_foreign_handle() {
        let backend = Win32Backend::new(&RetitleConfig::default());
        let result = backend.set_title(WindowHandle::X11(1), "title");
        assert!(matches!(result, Err(WindowError::ApiFailed { .. })));
    }
}
