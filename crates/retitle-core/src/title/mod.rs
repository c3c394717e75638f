//! Title computation for Sublime Text windows.
//!
//! Takes a snapshot of what the host reports about a view (name, file,
//! dirty flag, project, folders) and produces the pair of titles a rename
//! needs: the official title the host is currently showing, and the new
//! title the user's template asks for.

pub mod errors;
pub mod paths;
pub mod template;
pub mod types;

pub use errors::TitleError;
pub use paths::{host_home, resolve_display_path};
pub use template::{
    compute_rename_plan, render_new_title, render_official_title, validate_template,
};
pub use types::{RenamePlan, ViewSnapshot, WindowId};
