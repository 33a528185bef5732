//! `touch` builtin - create files or update their timestamps.
//!
//! Existing files get their modification time set to now; missing files
//! are created empty. No option flags are implemented.

use std::fs::OpenOptions;

use filetime::FileTime;

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

use crate::util::{io_error, missing_operand};

pub struct TouchCommand;

impl Command for TouchCommand {
    fn name(&self) -> &'static str {
        "touch"
    }

    fn description(&self) -> &'static str {
        "Create files or update their timestamps"
    }

    fn usage(&self) -> &'static str {
        "touch FILE..."
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    if ctx.args.is_empty() {
        return Err(missing_operand("touch"));
    }
    for name in &ctx.args {
        if name.starts_with('-') {
            return Err(ShellError::invalid_argument(format!(
                "touch: invalid option: {name}"
            )));
        }
        let path = ctx.vfs.resolve(name.as_str());
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| io_error("touch", name, err))?;
        filetime::set_file_mtime(&path, FileTime::now())
            .map_err(|err| io_error("touch", name, err))?;
    }
    Ok(())
}
