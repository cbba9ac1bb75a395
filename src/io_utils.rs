use std::fmt;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.msg.fmt(f)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Format a user friendly I/O error message with suggestions.
pub fn format_io_error(operation: &str, path: &Path, err: &io::Error) -> String {
    use io::ErrorKind::*;
    let suggestion = match err.kind() {
        NotFound => "Check that the file exists and the path is correct.",
        PermissionDenied => "Check permissions or run as a different user.",
        InvalidData => "The file does not contain valid UTF-8 text.",
        _ => "Check the path and permissions.",
    };
    format!(
        "Error {} '{}': {}. {}",
        operation,
        path.display(),
        err,
        suggestion
    )
}

/// Convert an I/O error into a CLI error with context.
pub fn io_cli_error(operation: &str, path: &Path, err: io::Error) -> CliError {
    CliError {
        msg: format_io_error(operation, path, &err),
        source: Some(Box::new(err)),
    }
}

/// Simple CLI error from string.
pub fn simple_cli_error(msg: &str) -> CliError {
    CliError {
        msg: msg.to_string(),
        source: None,
    }
}

/// Convert a library error into a CLI error with a hint.
pub fn itree_cli_error(context: &str, err: impl Into<crate::ItreeError>) -> CliError {
    let err = err.into();
    CliError {
        msg: format!("{}: {}", context, cli_hint(&err)),
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for an error variant.
pub fn cli_hint(err: &crate::ItreeError) -> String {
    use crate::ItreeError::*;
    match err {
        Decode(e) => format!("{e}. Paths look like 1.2.300 with 1..=16 segments."),
        Capacity(e) => format!("{e}. Shorten one of the paths."),
        Range(e) => format!("{e}. Check the offsets against the path level."),
        Index(e) => format!("{e}. Use descendant-of (1) or ancestor-of (2)."),
        Record(e) => format!("{e}. Expected 36 hex digits of a canonical record."),
        Config(msg) => format!("{msg}. Invalid configuration."),
        Snapshot(msg) => format!("{msg}. The index snapshot is unreadable."),
        Io(io) => format!("{io}"),
    }
}
