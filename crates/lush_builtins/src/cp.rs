//! `cp` builtin - copy files and directories.
//!
//! Supported subset:
//!   cp [-r] SOURCE... DEST
//!   -r : copy directories recursively
//!
//! With multiple sources, DEST must be an existing directory. Copying a
//! file onto an existing directory target places it inside, like the
//! classic tool.

use std::fs;
use std::path::Path;

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

use crate::util::{io_error, missing_operand};

pub struct CpCommand;

impl Command for CpCommand {
    fn name(&self) -> &'static str {
        "cp"
    }

    fn description(&self) -> &'static str {
        "Copy files and directories"
    }

    fn usage(&self) -> &'static str {
        "cp [-r] SOURCE... DEST"
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let mut recursive = false;
    let mut operands = Vec::new();
    for arg in &ctx.args {
        match arg.as_str() {
            "-r" | "-R" => recursive = true,
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(ShellError::invalid_argument(format!(
                    "cp: invalid option: {s}"
                )));
            }
            _ => operands.push(arg),
        }
    }
    let Some((dest_name, sources)) = operands.split_last() else {
        return Err(missing_operand("cp"));
    };
    if sources.is_empty() {
        return Err(missing_operand("cp"));
    }
    let dest = ctx.vfs.resolve(dest_name.as_str());
    let dest_is_dir = dest.is_dir();
    if sources.len() > 1 && !dest_is_dir {
        return Err(ShellError::invalid_argument(format!(
            "cp: target '{dest_name}' is not a directory"
        )));
    }

    for name in sources {
        let source = ctx.vfs.resolve(name.as_str());
        let meta = fs::metadata(&source).map_err(|err| io_error("cp", name, err))?;
        let target = if dest_is_dir {
            match source.file_name() {
                Some(base) => dest.join(base),
                None => {
                    return Err(ShellError::invalid_argument(format!(
                        "cp: cannot copy '{name}' into '{dest_name}'"
                    )))
                }
            }
        } else {
            dest.clone()
        };

        if meta.is_dir() {
            if !recursive {
                return Err(ShellError::invalid_argument(format!(
                    "cp: -r not specified; omitting directory '{name}'"
                )));
            }
            copy_tree(&source, &target).map_err(|err| io_error("cp", name, err))?;
        } else {
            fs::copy(&source, &target).map_err(|err| io_error("cp", name, err))?;
        }
    }
    Ok(())
}

fn copy_tree(source: &Path, target: &Path) -> std::io::Result<()> {
    fs::create_dir_all(target)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let from = entry.path();
        let to = target.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to)?;
        }
    }
    Ok(())
}
