//! `mv` builtin - move or rename files.
//!
//! `rename` does the work when source and destination share a filesystem;
//! for plain files a copy-and-remove fallback covers the cross-device
//! case. Moving a directory across filesystems is not supported.

use std::fs;

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

use crate::util::{io_error, missing_operand};

pub struct MvCommand;

impl Command for MvCommand {
    fn name(&self) -> &'static str {
        "mv"
    }

    fn description(&self) -> &'static str {
        "Move or rename files"
    }

    fn usage(&self) -> &'static str {
        "mv SOURCE DEST"
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let [source_name, dest_name] = ctx.args.as_slice() else {
        if ctx.args.len() < 2 {
            return Err(missing_operand("mv"));
        }
        return Err(ShellError::invalid_argument(format!(
            "mv: extra operand '{}'",
            ctx.args[2]
        )));
    };

    let source = ctx.vfs.resolve(source_name.as_str());
    let meta = fs::metadata(&source).map_err(|err| io_error("mv", source_name, err))?;

    let mut dest = ctx.vfs.resolve(dest_name.as_str());
    if dest.is_dir() {
        if let Some(base) = source.file_name() {
            dest = dest.join(base);
        }
    }

    if fs::rename(&source, &dest).is_ok() {
        return Ok(());
    }
    if meta.is_dir() {
        return Err(ShellError::invalid_argument(format!(
            "mv: cannot move directory '{source_name}' across filesystems"
        )));
    }
    fs::copy(&source, &dest).map_err(|err| io_error("mv", dest_name, err))?;
    fs::remove_file(&source).map_err(|err| io_error("mv", source_name, err))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lush_core::ErrorKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn renames_within_a_directory() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("old"), "v").unwrap();
        let ctx = crate::test_support::context(vec!["old".into(), "new".into()], root.path());
        run(&ctx).unwrap();
        assert!(!root.path().join("old").exists());
        assert_eq!(fs::read_to_string(root.path().join("new")).unwrap(), "v");
    }

    #[test]
    fn moving_into_a_directory_keeps_the_base_name() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("f"), "v").unwrap();
        fs::create_dir(root.path().join("sub")).unwrap();
        let ctx = crate::test_support::context(vec!["f".into(), "sub".into()], root.path());
        run(&ctx).unwrap();
        assert!(root.path().join("sub/f").is_file());
    }

    #[test]
    fn missing_source_reports_not_found() {
        let root = tempdir().unwrap();
        let ctx = crate::test_support::context(vec!["ghost".into(), "x".into()], root.path());
        let err = run(&ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
