//! Title rendering.
//!
//! Two titles are produced per view: the official title, reconstructed
//! exactly as the host would display it (used as the search key when
//! locating the native window), and the new title rendered from the
//! user's template.
//!
//! Rendering is a two-pass affair. The first pass textually replaces the
//! conditional tokens `{has_project}` and `{is_dirty}` with their
//! configured true/false text. The second pass scans for value tokens
//! (`{path}`, `{project}`, `{file}`, `{folder}`), which also resolves any
//! value tokens the conditional text introduced.

use crate::config::types::TitleSettings;
use crate::title::errors::TitleError;
use crate::title::paths::resolve_display_path;
use crate::title::types::{RenamePlan, ViewSnapshot, base_name, parent_portion};

/// Fixed suffix the host appends to every window title.
pub(crate) const OFFICIAL_SUFFIX: &str = " - Sublime Text";

/// Marker the host appends after the file name of a modified buffer
/// (a space and U+2022 BULLET).
pub(crate) const OFFICIAL_DIRTY_MARK: &str = " \u{2022}";

/// Marker unregistered host builds append after the application name.
pub(crate) const UNREGISTERED_SUFFIX: &str = " (UNREGISTERED)";

/// Reconstruct the title the host itself displays for `view`.
///
/// This string is later used as a substring match key against live window
/// titles, so it must mirror the host byte-for-byte: base name only (the
/// host shortens paths in its own titles), dirty marker, project in
/// parentheses, fixed application suffix.
pub fn render_official_title(view: &ViewSnapshot, unregistered: bool) -> String {
    let display = view
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .or_else(|| view.file_path.as_deref().filter(|file| !file.is_empty()));

    let mut title = match display {
        Some(display) => base_name(display).to_string(),
        None => "untitled".to_string(),
    };
    if view.is_dirty {
        title.push_str(OFFICIAL_DIRTY_MARK);
    }
    let project = view.project_name();
    if !project.is_empty() {
        title.push_str(&format!(" ({project})"));
    }
    title.push_str(OFFICIAL_SUFFIX);
    if unregistered {
        title.push_str(UNREGISTERED_SUFFIX);
    }
    title
}

/// Render the user-facing title for `view` from the configured template.
pub fn render_new_title(
    view: &ViewSnapshot,
    settings: &TitleSettings,
    home: Option<&str>,
) -> Result<String, TitleError> {
    let project = view.project_name();
    let path = resolve_display_path(view, settings.path_display, &settings.untitled, home);
    let staged = apply_conditionals(settings, !project.is_empty(), view.is_dirty);
    let mut title = substitute_values(&staged, &path, &project)?;
    if settings.unregistered {
        title.push_str(UNREGISTERED_SUFFIX);
    }
    Ok(title)
}

/// Compute both titles for a rename in one shot.
pub fn compute_rename_plan(
    view: &ViewSnapshot,
    settings: &TitleSettings,
    home: Option<&str>,
) -> Result<RenamePlan, TitleError> {
    Ok(RenamePlan {
        official_title: render_official_title(view, settings.unregistered),
        new_title: render_new_title(view, settings, home)?,
    })
}

/// Check a template (or conditional replacement text) for unclosed
/// placeholders without rendering real values.
pub fn validate_template(template: &str) -> Result<(), TitleError> {
    substitute_values(template, "", "").map(|_| ())
}

/// First pass: conditional tokens become their configured text.
fn apply_conditionals(settings: &TitleSettings, has_project: bool, is_dirty: bool) -> String {
    let project_text = if has_project {
        settings.has_project_true.as_str()
    } else {
        settings.has_project_false.as_str()
    };
    let dirty_text = if is_dirty {
        settings.is_dirty_true.as_str()
    } else {
        settings.is_dirty_false.as_str()
    };
    settings
        .template
        .replace("{has_project}", project_text)
        .replace("{is_dirty}", dirty_text)
}

/// Second pass: substitute value tokens, honoring `{{` and `}}` escapes.
///
/// Unknown tokens pass through verbatim so a typo degrades visibly in the
/// title instead of erroring. The one hard error is a `{` that never
/// closes, including a `{` that runs into another `{`.
pub(crate) fn substitute_values(
    template: &str,
    path: &str,
    project: &str,
) -> Result<String, TitleError> {
    let mut out = String::with_capacity(template.len());
    let mut i = 0;
    while let Some(offset) = template[i..].find(['{', '}']) {
        let pos = i + offset;
        out.push_str(&template[i..pos]);
        if template[pos..].starts_with("{{") {
            out.push('{');
            i = pos + 2;
        } else if template[pos..].starts_with("}}") {
            out.push('}');
            i = pos + 2;
        } else if template[pos..].starts_with('}') {
            out.push('}');
            i = pos + 1;
        } else {
            let name = match template[pos + 1..].find(['{', '}']) {
                Some(end) if template.as_bytes()[pos + 1 + end] == b'}' => {
                    &template[pos + 1..pos + 1 + end]
                }
                _ => return Err(TitleError::UnclosedPlaceholder { position: pos }),
            };
            match name {
                "path" => out.push_str(path),
                "project" => out.push_str(project),
                "file" => out.push_str(base_name(path)),
                "folder" => out.push_str(parent_portion(path)),
                _ => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
            i = pos + 1 + name.len() + 1;
        }
    }
    out.push_str(&template[i..]);
    Ok(out)
}
