//! Event-driven title synchronization.
//!
//! The host reports view lifecycle events; this module turns each one into
//! at most one rename of the matching native windows. [`TitleSync`] is the
//! per-process engine, [`SyncWorker`] runs it on a dedicated thread so
//! blocking backend calls stay off the host's dispatch path.

pub mod handler;
pub mod types;
pub mod worker;

pub use handler::TitleSync;
pub use types::{SyncEvent, SyncOutcome};
pub use worker::SyncWorker;
