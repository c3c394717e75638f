//! Logging initialization.
//!
//! Output is JSON lines on stderr, keeping stdout free for command output
//! and for whatever console an embedding plugin host owns. `RUST_LOG`
//! overrides the crate-level default chosen here.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with optional quiet mode.
///
/// When `quiet` is true, only error-level events are emitted.
/// When `quiet` is false, info-level and above events are emitted (default).
/// Backend command echoing (the `debug` config flag) logs at info level, so
/// it is visible without changing the filter.
pub fn init_logging(quiet: bool) {
    let directive = if quiet { "retitle=error" } else { "retitle=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(
            EnvFilter::from_default_env()
                .add_directive(directive.parse().expect("Invalid log directive")),
        )
        .init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_logging() {
        // Test that init_logging doesn't panic
        // Note: Can only call once per test process, so we can't actually test it here.
        // The function is tested via the CLI integration tests.
    }
}
