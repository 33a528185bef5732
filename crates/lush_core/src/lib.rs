//! LumenShell core library.
//!
//! The architectural backbone of the shell: the [`Status`] outcome type,
//! the [`CommandContext`] handed to every invocation, the [`Vfs`] logical
//! directory tracker, the [`Command`] capability trait, and the
//! [`Registry`] dispatcher with its background [`JobManager`]. Every
//! concrete command is a plug-in against this contract.

pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod job;
pub mod logging;
pub mod registry;
pub mod status;
pub mod vfs;

pub use command::{Command, CommandKind};
pub use config::Config;
pub use context::{CancelToken, CommandContext};
pub use error::{ErrorKind, ShellError, ShellResult};
pub use job::{JobCompletion, JobId, JobInfo, JobManager};
pub use registry::{CommandInfo, Dispatch, Registry};
pub use status::Status;
pub use vfs::Vfs;
