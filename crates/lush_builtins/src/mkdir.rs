//! `mkdir` builtin - create directories.
//!
//! Supported subset: `mkdir [-p] DIR...`; -p creates missing parents and
//! tolerates existing directories.

use std::fs;
use std::io;

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

use crate::util::{io_error, missing_operand};

pub struct MkdirCommand;

impl Command for MkdirCommand {
    fn name(&self) -> &'static str {
        "mkdir"
    }

    fn description(&self) -> &'static str {
        "Create directories"
    }

    fn usage(&self) -> &'static str {
        "mkdir [-p] DIR..."
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let mut parents = false;
    let mut dirs = Vec::new();
    for arg in &ctx.args {
        match arg.as_str() {
            "-p" => parents = true,
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(ShellError::invalid_argument(format!(
                    "mkdir: invalid option: {s}"
                )));
            }
            _ => dirs.push(arg),
        }
    }
    if dirs.is_empty() {
        return Err(missing_operand("mkdir"));
    }

    for name in dirs {
        let path = ctx.vfs.resolve(name.as_str());
        let result = if parents {
            fs::create_dir_all(&path)
        } else {
            fs::create_dir(&path)
        };
        match result {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(ShellError::invalid_argument(format!(
                    "mkdir: cannot create directory '{name}': File exists"
                )));
            }
            Err(err) => return Err(io_error("mkdir", name, err)),
        }
    }
    Ok(())
}
