//! Logging setup.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LOG_FILE: &str = "stockdash.log";

/// Setup logging with the given level.
///
/// Console output goes to stderr so command output on stdout stays clean.
/// When `file` is set, a plain-text copy is appended there as well; keep the
/// returned guard alive until exit so buffered lines are flushed.
pub fn setup_logging(level: &str, json: bool, file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match file {
        Some(path) => {
            let (dir, name) = log_file_parts(path);
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }

    guard
}

fn log_file_parts(path: &Path) -> (PathBuf, OsString) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from(DEFAULT_LOG_FILE));
    (dir, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_parts() {
        let (dir, name) = log_file_parts(Path::new("logs/dash.log"));
        assert_eq!(dir, PathBuf::from("logs"));
        assert_eq!(name, OsString::from("dash.log"));

        let (dir, name) = log_file_parts(Path::new("dash.log"));
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, OsString::from("dash.log"));

        let (_, name) = log_file_parts(Path::new("/"));
        assert_eq!(name, OsString::from(DEFAULT_LOG_FILE));
    }
}
