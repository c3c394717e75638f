//! Blocking subprocess execution with a hard timeout.
//!
//! Window utilities are external programs that can hang (X server gone,
//! script waiting on a dead pipe). Every invocation goes through
//! `run_with_timeout` so a stuck utility costs one bounded wait, never an
//! indefinite hang.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::window::errors::WindowError;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured result of a finished subprocess.
#[derive(Debug)]
pub struct CommandOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run `command` to completion, killing it if it exceeds `timeout`.
///
/// stdout and stderr are drained on dedicated threads; draining after the
/// wait would deadlock once a pipe buffer fills.
pub fn run_with_timeout(
    mut command: Command,
    timeout: Duration,
) -> Result<CommandOutput, WindowError> {
    let label = command_label(&command);
    debug!(event = "core.window.subprocess_started", command = %label);

    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| WindowError::SpawnFailed {
            message: format!("{}: {}", label, e),
        })?;

    let stdout_reader = spawn_pipe_reader(child.stdout.take());
    let stderr_reader = spawn_pipe_reader(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let exit_code = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status.code(),
            Ok(None) => {
                if Instant::now() >= deadline {
                    kill_child(&mut child, &label);
                    let _ = stdout_reader.join();
                    let _ = stderr_reader.join();
                    warn!(
                        event = "core.window.subprocess_timeout",
                        command = %label,
                        timeout_ms = timeout.as_millis() as u64
                    );
                    return Err(WindowError::CommandTimeout {
                        command: label,
                        timeout_ms: timeout.as_millis() as u64,
                    });
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                kill_child(&mut child, &label);
                let _ = stdout_reader.join();
                let _ = stderr_reader.join();
                return Err(WindowError::IoError { source: e });
            }
        }
    };

    let stdout = join_pipe_reader(stdout_reader, "stdout");
    let stderr = join_pipe_reader(stderr_reader, "stderr");

    debug!(
        event = "core.window.subprocess_completed",
        command = %label,
        exit_code = ?exit_code
    );

    Ok(CommandOutput {
        exit_code,
        stdout,
        stderr,
    })
}

fn spawn_pipe_reader<R: Read + Send + 'static>(pipe: Option<R>) -> std::thread::JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_pipe_reader(handle: std::thread::JoinHandle<String>, stream: &str) -> String {
    match handle.join() {
        Ok(buf) => buf,
        Err(_) => {
            warn!(event = "core.window.pipe_reader_panicked", stream = stream);
            String::new()
        }
    }
}

fn kill_child(child: &mut Child, label: &str) {
    if let Err(e) = child.kill() {
        warn!(event = "core.window.subprocess_kill_failed", command = %label, error = %e);
    }
    // Reap the killed process so it does not linger as a zombie
    let _ = child.wait();
}

/// Program name plus first argument, for logs and error messages.
/// Later arguments carry window titles and are deliberately left out.
fn command_label(command: &Command) -> String {
    let mut label = command.get_program().to_string_lossy().into_owned();
    if let Some(arg) = command.get_args().next() {
        label.push(' ');
        label.push_str(&arg.to_string_lossy());
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_label_includes_first_arg_only() {
        let mut command = Command::new("xdotool");
        command.arg("set_window").arg("--name").arg("secret title");
        assert_eq!(command_label(&command), "xdotool set_window");
    }

    #[test]
    fn test_missing_program_is_spawn_failure() {
        let command = Command::new("retitle-no-such-program-436f");
        let result = run_with_timeout(command, Duration::from_secs(1));
        assert!(matches!(result, Err(WindowError::SpawnFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout() {
        let mut command = Command::new("sh");
        command.arg("-c").arg("printf 'one\\ntwo\\n'");
        let output = run_with_timeout(command, Duration::from_secs(5)).unwrap();
        assert!(output.success());
        assert_eq!(output.stdout, "one\ntwo\n");
        assert_eq!(output.stderr, "");
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stderr_and_exit_code() {
        let mut command = Command::new("sh");
        command.arg("-c").arg("echo oops >&2; exit 3");
        let output = run_with_timeout(command, Duration::from_secs(5)).unwrap();
        assert!(!output.success());
        assert_eq!(output.exit_code, Some(3));
        assert!(output.stderr.contains("oops"));
    }

    #[cfg(unix)]
    #[test]
    fn test_slow_command_is_killed() {
        let mut command = Command::new("sh");
        command.arg("-c").arg("sleep 30");
        let started = Instant::now();
        let result = run_with_timeout(command, Duration::from_millis(100));
        assert!(matches!(result, Err(WindowError::CommandTimeout { .. })));
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "kill should not wait for the full sleep"
        );
    }
}
