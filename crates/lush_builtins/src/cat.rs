//! `cat` builtin - concatenate files to standard output.
//!
//! Supported subset: `cat [-n] FILE...`; -n numbers output lines.
//! Standard input is not consumed - the shell owns the terminal and
//! pipelines are not part of the command surface.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use lush_core::{Command, CommandContext, ShellResult, Status};

use crate::util::{io_error, missing_operand};

pub struct CatCommand;

impl Command for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn description(&self) -> &'static str {
        "Concatenate files to standard output"
    }

    fn usage(&self) -> &'static str {
        "cat [-n] FILE..."
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let mut number = false;
    let mut files = Vec::new();
    for arg in &ctx.args {
        match arg.as_str() {
            "-n" => number = true,
            _ => files.push(arg),
        }
    }
    if files.is_empty() {
        return Err(missing_operand("cat"));
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut line_no = 1u64;
    for name in files {
        let path = ctx.vfs.resolve(name);
        let file = File::open(&path).map_err(|err| io_error("cat", name, err))?;
        let mut reader = BufReader::new(file);
        if number {
            let mut line = String::new();
            loop {
                line.clear();
                if reader
                    .read_line(&mut line)
                    .map_err(|err| io_error("cat", name, err))?
                    == 0
                {
                    break;
                }
                write!(out, "{line_no:>6}\t{line}").map_err(|err| io_error("cat", name, err))?;
                if !line.ends_with('\n') {
                    writeln!(out).map_err(|err| io_error("cat", name, err))?;
                }
                line_no += 1;
            }
        } else {
            io::copy(&mut reader, &mut out).map_err(|err| io_error("cat", name, err))?;
        }
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
    fn relative_paths_resolve_through_the_vfs() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("note.txt"), "hi\n").unwrap();
        let ctx = crate::test_support::context(vec!["note.txt".into()], root.path());
        run(&ctx).unwrap();
    }

    #[test]
    fn missing_file_reports_not_found() {
        let root = tempdir().unwrap();
        let ctx = crate::test_support::context(vec!["absent".into()], root.path());
        let err = run(&ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn no_operand_is_invalid() {
        let ctx = crate::test_support::context(vec![], "/");
        let err = run(&ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }
}
