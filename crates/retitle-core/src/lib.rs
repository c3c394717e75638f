//! retitle-core: Core library for native window title synchronization
//!
//! This library keeps an OS window's title in sync with the state of the
//! editor view inside it. The host exposes no native window handle, so the
//! engine locates the window by searching for the deterministic title the
//! host itself would display, caches the match, and rewrites the title
//! through a platform backend. It is used by both the CLI and host glue.
//!
//! # Main Entry Points
//!
//! - [`sync`] - Per-event rename orchestration and the worker thread
//! - [`title`] - Official/new title rendering and path display
//! - [`window`] - Platform backends, window search and the identity cache
//! - [`config`] - Configuration management

pub mod config;
pub mod errors;
pub mod events;
pub mod logging;
pub mod sync;
pub mod title;
pub mod window;

// Re-export commonly used types at crate root for convenience
pub use config::{PathDisplay, RetitleConfig, TitleSettings, WindowSettings};
pub use sync::{SyncEvent, SyncOutcome, SyncWorker, TitleSync};
pub use title::{RenamePlan, TitleError, ViewSnapshot, WindowId};
pub use window::{BackendKind, WindowBackend, WindowError, WindowHandle, WindowIdentityCache};

// Re-export logging initialization
pub use logging::init_logging;
