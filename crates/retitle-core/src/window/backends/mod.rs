pub mod win32;
pub mod x11;

pub use win32::Win32Backend;
pub use x11::X11Backend;
