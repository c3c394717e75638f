use std::fmt;

/// Which native windowing backend is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// X11 via the xdotool utility.
    X11,
    /// Win32 via the native window-enumeration API.
    Win32,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::X11 => write!(f, "x11"),
            BackendKind::Win32 => write!(f, "win32"),
        }
    }
}

/// Handle to one real OS window, owned by the backend that produced it.
///
/// The identity cache stores copies of these; a handle is never proof the
/// window still exists, only that it existed when the backend last
/// enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowHandle {
    /// X11 window id as printed by the enumeration script.
    X11(u32),
    /// Win32 top-level window handle (HWND).
    Win32(isize),
}

impl WindowHandle {
    pub fn kind(&self) -> BackendKind {
        match self {
            WindowHandle::X11(_) => BackendKind::X11,
            WindowHandle::Win32(_) => BackendKind::Win32,
        }
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowHandle::X11(id) => write!(f, "x11:{}", id),
            WindowHandle::Win32(hwnd) => write!(f, "win32:{:#x}", hwnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_display() {
        assert_eq!(BackendKind::X11.to_string(), "x11");
        assert_eq!(BackendKind::Win32.to_string(), "win32");
    }

    #[test]
    fn test_window_handle_display() {
        assert_eq!(WindowHandle::X11(46137349).to_string(), "x11:46137349");
        assert_eq!(WindowHandle::Win32(0x1a2b).to_string(), "win32:0x1a2b");
    }

    #[test]
    fn test_window_handle_kind() {
        assert_eq!(WindowHandle::X11(1).kind(), BackendKind::X11);
        assert_eq!(WindowHandle::Win32(1).kind(), BackendKind::Win32);
    }

    #[test]
    fn test_window_handle_equality() {
        assert_eq!(WindowHandle::X11(7), WindowHandle::X11(7));
        assert_ne!(WindowHandle::X11(7), WindowHandle::X11(8));
        assert_ne!(WindowHandle::X11(7), WindowHandle::Win32(7));
    }
}
