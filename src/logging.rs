//! Logging setup
//!
//! The picker draws on the whole terminal, so interactive runs only log when
//! a file is given. `RUST_LOG` overrides the default level either way.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log records go for this run
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    /// Append to a file, default level `info`
    File(&'a Path),
    /// Standard error, default level `warn`
    Stderr,
    /// No subscriber
    Disabled,
}

/// Install the global subscriber.
///
/// Returns `Ok(false)` when logging stays disabled or a subscriber was
/// already installed.
pub fn init(target: LogTarget<'_>) -> std::io::Result<bool> {
    match target {
        LogTarget::Disabled => Ok(false),
        LogTarget::Stderr => Ok(tracing_subscriber::fmt()
            .with_env_filter(filter("warn"))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .is_ok()),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Ok(tracing_subscriber::fmt()
                .with_env_filter(filter("info"))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .try_init()
                .is_ok())
        }
    }
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_installs_nothing() {
        assert!(!init(LogTarget::Disabled).unwrap());
    }

    #[test]
    fn test_unwritable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("gkit.log");
        assert!(init(LogTarget::File(&missing)).is_err());
    }

    #[test]
    fn test_file_target_creates_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gkit.log");
        init(LogTarget::File(&path)).unwrap();
        assert!(path.exists());
    }
}
