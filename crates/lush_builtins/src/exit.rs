//! `exit` builtin - request shell termination.
//!
//! Returns the exit control status unconditionally; the REPL, not the
//! command, ends the process. Arguments are accepted and ignored.

use lush_core::{Command, CommandContext, Status};

pub struct ExitCommand;

impl Command for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static str {
        "Exit the shell"
    }

    fn usage(&self) -> &'static str {
        "exit"
    }

    fn execute(&self, _ctx: &CommandContext) -> Status {
        Status::Exit
    }
}
