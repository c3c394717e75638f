//! Native window lookup and renaming.
//!
//! The host never exposes a direct OS window handle, so windows are
//! located by searching current titles for a known suffix. Each platform
//! implements that search and the title mutation behind the
//! `WindowBackend` trait; everything above this module is
//! platform-independent.

pub mod backends;
pub mod cache;
pub mod common;
pub mod errors;
pub mod registry;
pub mod traits;
pub mod types;

// Re-export commonly used types and functions
pub use cache::WindowIdentityCache;
pub use errors::WindowError;
pub use registry::{backend_candidates, create_backend, detect_backend};
pub use traits::WindowBackend;
pub use types::{BackendKind, WindowHandle};
