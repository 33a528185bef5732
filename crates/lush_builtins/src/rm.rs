//! `rm` builtin - remove files and directories.
//!
//! Supported subset:
//!   rm [-r] [-f] PATH...
//!   -r : remove directories and their contents recursively
//!   -f : ignore missing operands, never prompt

use std::fs;
use std::io;

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

use crate::util::{io_error, missing_operand};

pub struct RmCommand;

impl Command for RmCommand {
    fn name(&self) -> &'static str {
        "rm"
    }

    fn description(&self) -> &'static str {
        "Remove files and directories"
    }

    fn usage(&self) -> &'static str {
        "rm [-r] [-f] PATH..."
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let mut recursive = false;
    let mut force = false;
    let mut paths = Vec::new();
    for arg in &ctx.args {
        match arg.as_str() {
            "-r" | "-R" => recursive = true,
            "-f" => force = true,
            "-rf" | "-fr" => {
                recursive = true;
                force = true;
            }
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(ShellError::invalid_argument(format!(
                    "rm: invalid option: {s}"
                )));
            }
            _ => paths.push(arg),
        }
    }
    if paths.is_empty() && !force {
        return Err(missing_operand("rm"));
    }

    for name in paths {
        let path = ctx.vfs.resolve(name.as_str());
        let meta = match fs::symlink_metadata(&path) {
            Ok(meta) => meta,
            Err(err) if err.kind() == io::ErrorKind::NotFound && force => continue,
            Err(err) => return Err(io_error("rm", name, err)),
        };

        let result = if meta.is_dir() {
            if !recursive {
                return Err(ShellError::invalid_argument(format!(
                    "rm: cannot remove '{name}': Is a directory"
                )));
            }
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        result.map_err(|err| io_error("rm", name, err))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lush_core::ErrorKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn removes_a_file() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("gone.txt"), "x").unwrap();
        let ctx = crate::test_support::context(vec!["gone.txt".into()], root.path());
        run(&ctx).unwrap();
        assert!(!root.path().join("gone.txt").exists());
    }

    #[test]
    fn directory_needs_recursive() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("d")).unwrap();
        let ctx = crate::test_support::context(vec!["d".into()], root.path());
        let err = run(&ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert!(root.path().join("d").is_dir());

        let ctx = crate::test_support::context(vec!["-r".into(), "d".into()], root.path());
        run(&ctx).unwrap();
        assert!(!root.path().join("d").exists());
    }

    #[test]
    fn force_swallows_missing_operands() {
        let root = tempdir().unwrap();
        let ctx = crate::test_support::context(vec!["nothing".into()], root.path());
        assert!(run(&ctx).is_err());

        let ctx =
            crate::test_support::context(vec!["-f".into(), "nothing".into()], root.path());
        run(&ctx).unwrap();
    }
}
