use crate::errors::RetitleError;

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("No supported window backend found (tried: x11, win32)")]
    NoBackendFound,

    #[error("Required utility '{utility}' not found in PATH")]
    UtilityNotFound { utility: String },

    #[error("Failed to spawn window utility: {message}")]
    SpawnFailed { message: String },

    #[error("Window utility '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("Window utility '{command}' did not finish within {timeout_ms}ms")]
    CommandTimeout { command: String, timeout_ms: u64 },

    #[error("Unexpected output from window utility: {message}")]
    OutputParseFailed { message: String },

    #[error("Native window API call failed: {message}")]
    ApiFailed { message: String },

    #[error("IO error during window operation: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl RetitleError for WindowError {
    fn error_code(&self) -> &'static str {
        match self {
            WindowError::NoBackendFound => "NO_BACKEND_FOUND",
            WindowError::UtilityNotFound { .. } => "WINDOW_UTILITY_NOT_FOUND",
            WindowError::SpawnFailed { .. } => "WINDOW_SPAWN_FAILED",
            WindowError::CommandFailed { .. } => "WINDOW_COMMAND_FAILED",
            WindowError::CommandTimeout { .. } => "WINDOW_COMMAND_TIMEOUT",
            WindowError::OutputParseFailed { .. } => "WINDOW_OUTPUT_PARSE_FAILED",
            WindowError::ApiFailed { .. } => "WINDOW_API_FAILED",
            WindowError::IoError { .. } => "WINDOW_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            WindowError::NoBackendFound | WindowError::UtilityNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_backend_found() {
        let error = WindowError::NoBackendFound;
        assert_eq!(
            error.to_string(),
            "No supported window backend found (tried: x11, win32)"
        );
        assert_eq!(error.error_code(), "NO_BACKEND_FOUND");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_utility_not_found() {
        let error = WindowError::UtilityNotFound {
            utility: "xdotool".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Required utility 'xdotool' not found in PATH"
        );
        assert_eq!(error.error_code(), "WINDOW_UTILITY_NOT_FOUND");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_command_timeout() {
        let error = WindowError::CommandTimeout {
            command: "xdotool".to_string(),
            timeout_ms: 5000,
        };
        assert_eq!(
            error.to_string(),
            "Window utility 'xdotool' did not finish within 5000ms"
        );
        assert_eq!(error.error_code(), "WINDOW_COMMAND_TIMEOUT");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_command_failed() {
        let error = WindowError::CommandFailed {
            command: "xdotool set_window".to_string(),
            message: "exit code 1: no such window".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Window utility 'xdotool set_window' failed: exit code 1: no such window"
        );
        assert_eq!(error.error_code(), "WINDOW_COMMAND_FAILED");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: WindowError = io_error.into();
        assert_eq!(error.error_code(), "WINDOW_IO_ERROR");
        assert!(!error.is_user_error());
    }
}
