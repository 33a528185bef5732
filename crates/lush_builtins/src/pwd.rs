//! `pwd` builtin - print the shell's logical working directory.
//!
//! Supported options:
//!   -L : logical path as tracked by the shell (default)
//!   -P : physical path with symlinks resolved

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

use crate::util::io_error;

pub struct PwdCommand;

impl Command for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn description(&self) -> &'static str {
        "Print the current working directory"
    }

    fn usage(&self) -> &'static str {
        "pwd [-L|-P]"
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let mut physical = false;
    for arg in &ctx.args {
        match arg.as_str() {
            "-P" => physical = true,
            "-L" => physical = false,
            other => {
                return Err(ShellError::invalid_argument(format!(
                    "pwd: invalid option: {other}"
                )))
            }
        }
    }
    let logical = ctx.vfs.current_dir();
    let path = if physical {
        logical
            .canonicalize()
            .map_err(|err| io_error("pwd", logical.display(), err))?
    } else {
        logical
    };
    println!("{}", path.display());
    Ok(())
}
