//! Display-path resolution for the `{path}` template token.
//!
//! Everything here is lexical string work on host-reported paths; no
//! filesystem access. The host shortens paths with `~` in its own titles,
//! so the full form collapses the home prefix the same way.

use crate::config::types::PathDisplay;
use crate::title::types::ViewSnapshot;

/// Compute the path string shown in rendered titles.
///
/// Precedence: an explicit host-assigned view name is returned unchanged;
/// a view with no backing file gets the configured untitled placeholder;
/// otherwise the path is rendered per `mode`.
///
/// `home` is the user's home directory as a literal string prefix, passed
/// in so callers control it (and tests can pin it).
pub fn resolve_display_path(
    view: &ViewSnapshot,
    mode: PathDisplay,
    untitled: &str,
    home: Option<&str>,
) -> String {
    if let Some(name) = view.name.as_deref().filter(|name| !name.is_empty()) {
        return name.to_string();
    }

    let file = match view.file_path.as_deref().filter(|f| !f.is_empty()) {
        Some(file) => file,
        None => return untitled.to_string(),
    };

    let full = collapse_home(file, home);
    if mode == PathDisplay::Full {
        return full;
    }

    // Relative form falls back to the full form when there is no root
    // folder or the drives differ; cross-volume input must never error.
    let relative = match view.folders.first().filter(|root| !root.is_empty()) {
        Some(root) if same_drive(file, root) => relative_to(file, root),
        _ => full.clone(),
    };

    match mode {
        PathDisplay::Relative => relative,
        // Ties go to the relative form.
        PathDisplay::Shortest => {
            if relative.chars().count() <= full.chars().count() {
                relative
            } else {
                full
            }
        }
        PathDisplay::Full => unreachable!("handled above"),
    }
}

/// Home directory as the string the resolver compares against.
pub fn host_home() -> Option<String> {
    dirs::home_dir().map(|home| home.to_string_lossy().into_owned())
}

/// Replace a literal home prefix with `~`.
fn collapse_home(path: &str, home: Option<&str>) -> String {
    match home {
        Some(home) if !home.is_empty() => match path.strip_prefix(home) {
            Some(rest) => format!("~{rest}"),
            None => path.to_string(),
        },
        _ => path.to_string(),
    }
}

/// Windows-style `X:` drive prefix, if the path starts with one.
fn drive_prefix(path: &str) -> Option<&str> {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        Some(&path[..2])
    } else {
        None
    }
}

/// Whether two paths live on the same drive. Paths without a drive prefix
/// (POSIX) always share one.
pub(crate) fn same_drive(a: &str, b: &str) -> bool {
    drive_prefix(a) == drive_prefix(b)
}

/// Lexical relative path from `root` to `path`, like the classic relpath:
/// shared leading components are dropped, each remaining root component
/// becomes `..`, and the rest of `path` follows.
fn relative_to(path: &str, root: &str) -> String {
    let path_parts = components(path);
    let root_parts = components(root);

    let common = path_parts
        .iter()
        .zip(root_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out: Vec<&str> = Vec::new();
    for _ in common..root_parts.len() {
        out.push("..");
    }
    out.extend(&path_parts[common..]);

    if out.is_empty() {
        ".".to_string()
    } else {
        out.join(std::path::MAIN_SEPARATOR_STR)
    }
}

fn components(path: &str) -> Vec<&str> {
    path.split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != ".")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::title::types::WindowId;

    const HOME: Option<&str> = Some("/home/hacker");

    fn view(file: &str, root: Option<&str>) -> ViewSnapshot {
        let mut view = ViewSnapshot::new(WindowId(1)).with_file(file);
        if let Some(root) = root {
            view = view.with_folder(root);
        }
        view
    }

    #[test]
    fn test_same_drive_posix() {
        assert!(same_drive(
            "/home/hacker/Github/Project",
            "/home/hacker/Github/AnotherProject"
        ));
    }

    #[test]
    fn test_same_drive_windows_letters() {
        assert!(same_drive(
            "c:/home/hacker/Github/Project",
            "c:/home/hacker/Github/AnotherProject"
        ));
        assert!(!same_drive(
            "c:/home/hacker/Github/Project",
            "d:/home/hacker/Github/AnotherProject"
        ));
    }

    #[test]
    fn test_relative_inside_project() {
        let view = view(
            "/home/hacker/Github/Project/hacking_like_a_boss.py",
            Some("/home/hacker/Github/Project"),
        );
        assert_eq!(
            resolve_display_path(&view, PathDisplay::Relative, "untitled", HOME),
            "hacking_like_a_boss.py"
        );
    }

    #[test]
    fn test_relative_sibling_project() {
        let view = view(
            "/home/hacker/Github/Project/hacking_like_a_boss.py",
            Some("/home/hacker/Github/AnotherProject"),
        );
        assert_eq!(
            resolve_display_path(&view, PathDisplay::Relative, "untitled", HOME),
            "../Project/hacking_like_a_boss.py"
        );
    }

    #[test]
    fn test_relative_on_different_drive_returns_file_unchanged() {
        let view = view(
            "D:/somewhere_else/hacking_like_a_boss.py",
            Some("C:/home/hacker/Github/Project"),
        );
        assert_eq!(
            resolve_display_path(&view, PathDisplay::Relative, "untitled", HOME),
            "D:/somewhere_else/hacking_like_a_boss.py"
        );
    }

    #[test]
    fn test_relative_without_root_falls_back_to_full() {
        let view = view("/home/hacker/Github/Project/hacking_like_a_boss.py", None);
        assert_eq!(
            resolve_display_path(&view, PathDisplay::Relative, "untitled", HOME),
            "~/Github/Project/hacking_like_a_boss.py"
        );
    }

    #[test]
    fn test_view_name_wins_in_every_mode() {
        for mode in [PathDisplay::Full, PathDisplay::Relative, PathDisplay::Shortest] {
            let view = view(
                "/home/hacker/Github/Project/hacking_like_a_boss.py",
                Some("/home/hacker/Github/Project"),
            )
            .with_name("H4CK3D");
            assert_eq!(resolve_display_path(&view, mode, "untitled", HOME), "H4CK3D");
        }
    }

    #[test]
    fn test_full_collapses_home() {
        let view = view("/home/hacker/Github/Project/hacking_like_a_boss.py", None);
        assert_eq!(
            resolve_display_path(&view, PathDisplay::Full, "untitled", HOME),
            "~/Github/Project/hacking_like_a_boss.py"
        );
    }

    #[test]
    fn test_full_outside_home_unchanged() {
        let view = view("/srv/data/report.txt", None);
        assert_eq!(
            resolve_display_path(&view, PathDisplay::Full, "untitled", HOME),
            "/srv/data/report.txt"
        );
    }

    #[test]
    fn test_untitled_placeholder() {
        let view = ViewSnapshot::new(WindowId(1));
        assert_eq!(
            resolve_display_path(&view, PathDisplay::Relative, "scratch", HOME),
            "scratch"
        );
    }

    #[test]
    fn test_shortest_chooses_full() {
        // relative would be ../../another_place/hacking_like_a_boss.py
        let view = view(
            "/home/hacker/another_place/hacking_like_a_boss.py",
            Some("/home/hacker/Github/Project"),
        );
        assert_eq!(
            resolve_display_path(&view, PathDisplay::Shortest, "untitled", HOME),
            "~/another_place/hacking_like_a_boss.py"
        );
    }

    #[test]
    fn test_shortest_chooses_relative() {
        let view = view(
            "/home/hacker/Github/AnotherProject/hacking_like_a_boss.py",
            Some("/home/hacker/Github/Project"),
        );
        assert_eq!(
            resolve_display_path(&view, PathDisplay::Shortest, "untitled", HOME),
            "../AnotherProject/hacking_like_a_boss.py"
        );
    }

    #[test]
    fn test_shortest_tie_favors_relative() {
        // full "/p/ab.py" and relative "../ab.py" are both 8 chars
        let view = view("/p/ab.py", Some("/p/zz"));
        assert_eq!(
            resolve_display_path(&view, PathDisplay::Shortest, "untitled", None),
            "../ab.py"
        );
    }

    #[test]
    fn test_relative_to_same_directory() {
        assert_eq!(relative_to("/a/b", "/a/b"), ".");
    }

    #[test]
    fn test_collapse_home_is_a_plain_prefix() {
        assert_eq!(collapse_home("/home/hacker/x.py", HOME), "~/x.py");
        assert_eq!(collapse_home("/home/hack/x.py", HOME), "/home/hack/x.py");
        assert_eq!(collapse_home("/home/hacker", HOME), "~");
        assert_eq!(collapse_home("/x.py", None), "/x.py");
    }
}
