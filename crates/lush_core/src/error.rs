//! Error types shared by every LumenShell operation.
//!
//! Command failures are values, not panics: fallible operations return
//! [`ShellResult`], and the dispatcher folds errors into a user-visible
//! [`Status`](crate::status::Status) without any unwinding crossing the
//! dispatcher boundary.

use std::fmt;
use std::io;

/// Result type for all LumenShell operations.
pub type ShellResult<T> = Result<T, ShellError>;

/// Error value carried by failed shell operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Categories of errors a shell operation can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No command registered under the requested name.
    CommandNotFound,
    /// Two commands registered under one name. A startup defect: the process
    /// must abort rather than dispatch with an ambiguous registry.
    DuplicateRegistration,
    /// An argument failed to parse or violated a command's contract.
    InvalidArgument,
    /// A path did not name an existing file or directory.
    NotFound,
    /// A directory operation reached a non-directory path.
    NotADirectory,
    PermissionDenied,
    /// Background work was cancelled before it finished.
    Interrupted,
    /// Any other OS-level I/O failure.
    Io,
}

impl ShellError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn command_not_found(name: &str) -> Self {
        Self::new(ErrorKind::CommandNotFound, format!("{name}: command not found"))
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub fn not_found(path: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::NotFound,
            format!("{path}: No such file or directory"),
        )
    }

    pub fn not_a_directory(path: impl fmt::Display) -> Self {
        Self::new(ErrorKind::NotADirectory, format!("{path}: Not a directory"))
    }

    pub fn permission_denied(path: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::PermissionDenied,
            format!("{path}: Permission denied"),
        )
    }

    /// Whether the REPL may report this error and keep going.
    /// Only a duplicate registration is fatal; it denotes a build defect,
    /// not a runtime user error.
    pub fn is_recoverable(&self) -> bool {
        self.kind != ErrorKind::DuplicateRegistration
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::CommandNotFound => "command not found",
            ErrorKind::DuplicateRegistration => "duplicate registration",
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::NotFound => "not found",
            ErrorKind::NotADirectory => "not a directory",
            ErrorKind::PermissionDenied => "permission denied",
            ErrorKind::Interrupted => "interrupted",
            ErrorKind::Io => "I/O error",
        };
        f.write_str(name)
    }
}

impl std::error::Error for ShellError {}

impl From<io::Error> for ShellError {
    fn from(err: io::Error) -> Self {
        let kind = match err.kind() {
            io::ErrorKind::NotFound => ErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            io::ErrorKind::Interrupted => ErrorKind::Interrupted,
            _ => ErrorKind::Io,
        };
        ShellError::new(kind, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_kinds_map_to_shell_kinds() {
        let err: ShellError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err: ShellError = io::Error::new(io::ErrorKind::PermissionDenied, "no").into();
        assert_eq!(err.kind, ErrorKind::PermissionDenied);

        let err: ShellError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe").into();
        assert_eq!(err.kind, ErrorKind::Io);
    }

    #[test]
    fn only_duplicate_registration_is_fatal() {
        assert!(ShellError::command_not_found("x").is_recoverable());
        assert!(ShellError::not_found("/y").is_recoverable());
        let dup = ShellError::new(ErrorKind::DuplicateRegistration, "dup");
        assert!(!dup.is_recoverable());
    }

    #[test]
    fn display_is_the_user_message() {
        let err = ShellError::not_found("/tmp/missing");
        assert_eq!(err.to_string(), "/tmp/missing: No such file or directory");
    }
}
