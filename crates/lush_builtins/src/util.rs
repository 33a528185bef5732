//! Shared helpers for builtin error reporting.

use std::fmt;
use std::io;

use lush_core::{ErrorKind, ShellError};

/// Map an I/O failure to a POSIX-flavored message prefixed with the
/// command name, e.g. `cat: /x: No such file or directory`.
pub(crate) fn io_error(command: &str, path: impl fmt::Display, err: io::Error) -> ShellError {
    match err.kind() {
        io::ErrorKind::NotFound => ShellError::new(
            ErrorKind::NotFound,
            format!("{command}: {path}: No such file or directory"),
        ),
        io::ErrorKind::PermissionDenied => ShellError::new(
            ErrorKind::PermissionDenied,
            format!("{command}: {path}: Permission denied"),
        ),
        _ => ShellError::new(ErrorKind::Io, format!("{command}: {path}: {err}")),
    }
}

pub(crate) fn missing_operand(command: &str) -> ShellError {
    ShellError::invalid_argument(format!("{command}: missing operand"))
}
