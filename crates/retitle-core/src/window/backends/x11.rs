//! X11 window backend implementation.
//!
//! Windows are located by a generated shell script that walks every
//! window of the editor's X11 class via xdotool and prints the ids whose
//! title ends with the requested suffix. Titles are set by invoking
//! xdotool directly. Both paths are blocking subprocess calls bounded by
//! the configured timeout.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::RetitleConfig;
use crate::window::{
    common::subprocess::{CommandOutput, run_with_timeout},
    errors::WindowError,
    traits::WindowBackend,
    types::WindowHandle,
};

/// X11 WM_CLASS instance name of Sublime Text windows.
const WINDOW_CLASS: &str = "sublime_text";

/// Default location for the generated enumeration script.
pub fn default_script_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("retitle")
        .join("find_windows.sh")
}

/// The enumeration script, rendered fresh for each installation.
///
/// Contract: invoked as `sh script TITLE_SUFFIX`, prints the X11 window id
/// of every matching editor window to stdout, one per line, and exits 0
/// even when nothing matches.
pub fn script_body() -> String {
    format!(
        r#"#!/bin/sh
# Generated by retitle {version} at {generated_at}.
# Regenerated on every start; local edits will be lost.
#
# Usage: find_windows.sh TITLE_SUFFIX
# Prints the X11 window id of every Sublime Text window whose current
# title ends with TITLE_SUFFIX, one id per line.

suffix="$1"
for id in $(xdotool search --classname "{window_class}" 2>/dev/null); do
  name=$(xdotool getwindowname "$id" 2>/dev/null) || continue
  case "$name" in
    *"$suffix") echo "$id" ;;
  esac
done
exit 0
"#,
        version = env!("CARGO_PKG_VERSION"),
        generated_at = chrono::Utc::now().to_rfc3339(),
        window_class = WINDOW_CLASS,
    )
}

/// Write the enumeration script to `path`, replacing any previous copy.
///
/// The script lands in a temp file next to the destination and is persisted
/// over it, so a concurrent reader never sees a half-written script.
pub fn install_script(path: &Path) -> Result<(), WindowError> {
    debug!(event = "core.window.script_install_started", path = %path.display());

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(script_body().as_bytes())?;
    make_executable(temp_file.path())?;
    temp_file
        .persist(path)
        .map_err(|e| WindowError::IoError { source: e.error })?;

    debug!(event = "core.window.script_install_completed", path = %path.display());
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Backend implementation for X11 via xdotool.
pub struct X11Backend {
    script_path: PathBuf,
    timeout: Duration,
    echo_commands: bool,
}

impl X11Backend {
    pub fn new(config: &RetitleConfig) -> Self {
        Self {
            script_path: config
                .window
                .script_path
                .clone()
                .unwrap_or_else(default_script_path),
            timeout: config.window.command_timeout(),
            echo_commands: config.title.debug,
        }
    }

    pub fn script_path(&self) -> &Path {
        &self.script_path
    }

    fn echo(&self, command: &str, output: &CommandOutput) {
        if self.echo_commands {
            info!(
                event = "core.window.command_echo",
                command = %command,
                exit_code = ?output.exit_code,
                stdout = %output.stdout.trim_end(),
                stderr = %output.stderr.trim_end()
            );
        }
    }
}

impl WindowBackend for X11Backend {
    fn name(&self) -> &'static str {
        "x11"
    }

    fn display_name(&self) -> &'static str {
        "X11 (xdotool)"
    }

    fn is_available(&self) -> bool {
        which::which("xdotool").is_ok()
    }

    fn prepare(&self) -> Result<(), WindowError> {
        install_script(&self.script_path)
    }

    fn find_windows(&self, official_title: &str) -> Result<Vec<WindowHandle>, WindowError> {
        debug!(
            event = "core.window.find_started",
            backend = "x11",
            title = %official_title
        );

        let mut command = Command::new("sh");
        command.arg(&self.script_path).arg(official_title);
        let output = run_with_timeout(command, self.timeout)?;
        self.echo("sh find_windows.sh", &output);

        if !output.success() {
            return Err(WindowError::CommandFailed {
                command: format!("sh {}", self.script_path.display()),
                message: format!(
                    "exit code {:?}: {}",
                    output.exit_code,
                    output.stderr.trim()
                ),
            });
        }

        let handles = parse_window_ids(&output.stdout)?;
        debug!(
            event = "core.window.find_completed",
            backend = "x11",
            match_count = handles.len()
        );
        Ok(handles)
    }

    fn set_title(&self, handle: WindowHandle, new_title: &str) -> Result<(), WindowError> {
        let WindowHandle::X11(window_id) = handle else {
            return Err(WindowError::ApiFailed {
                message: format!("handle {} does not belong to the x11 backend", handle),
            });
        };

        debug!(
            event = "core.window.set_title_started",
            backend = "x11",
            handle = %handle,
            title = %new_title
        );

        let mut command = Command::new("xdotool");
        command
            .arg("set_window")
            .arg("--name")
            .arg(new_title)
            .arg(window_id.to_string());
        let output = run_with_timeout(command, self.timeout)?;
        self.echo("xdotool set_window", &output);

        if !output.success() {
            return Err(WindowError::CommandFailed {
                command: "xdotool set_window".to_string(),
                message: format!(
                    "exit code {:?}: {}",
                    output.exit_code,
                    output.stderr.trim()
                ),
            });
        }

        debug!(
            event = "core.window.set_title_completed",
            backend = "x11",
            handle = %handle
        );
        Ok(())
    }
}

/// Parse the script's stdout: one decimal window id per line.
///
/// Anything else on stdout means the script is broken or shadowed, which
/// is a backend failure rather than "no matches".
fn parse_window_ids(stdout: &str) -> Result<Vec<WindowHandle>, WindowError> {
    let mut handles = Vec::new();
    for line in stdout.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let id: u32 = line.parse().map_err(|_| WindowError::OutputParseFailed {
            message: format!("expected a window id, got '{}'", line),
        })?;
        handles.push(WindowHandle::X11(id));
    }
    Ok(handles)
}
