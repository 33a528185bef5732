//! Tri-state outcome returned by every command invocation.

use crate::error::{ShellError, ShellResult};

/// Outcome of a single command invocation.
///
/// Exactly one variant is ever active, the value is created fresh per
/// invocation and consumed immediately by the caller. `Exit` is a control
/// signal, not an error: the REPL ends its loop instead of printing a
/// message, and no command may be dispatched after observing it.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Ok,
    Error(ShellError),
    Exit,
}

impl Status {
    pub fn is_ok(&self) -> bool {
        matches!(self, Status::Ok)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Status::Exit)
    }
}

/// Command bodies are written as `ShellResult<()>` helpers; the trait
/// boundary converts at the end with `.into()`.
impl From<ShellResult<()>> for Status {
    fn from(result: ShellResult<()>) -> Self {
        match result {
            Ok(()) => Status::Ok,
            Err(err) => Status::Error(err),
        }
    }
}
