//! `grep` builtin - print lines matching a pattern.
//!
//! Supported subset:
//!   grep [-i] [-n] [-v] PATTERN FILE...
//!   -i : case-insensitive match
//!   -n : prefix each line with its line number
//!   -v : select non-matching lines
//!
//! PATTERN is a Rust regular expression, which covers the POSIX extended
//! syntax used in practice.

use std::fs::File;
use std::io::{BufRead, BufReader};

use regex::RegexBuilder;

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

use crate::util::{io_error, missing_operand};

pub struct GrepCommand;

impl Command for GrepCommand {
    fn name(&self) -> &'static str {
        "grep"
    }

    fn description(&self) -> &'static str {
        "Print lines matching a pattern"
    }

    fn usage(&self) -> &'static str {
        "grep [-i] [-n] [-v] PATTERN FILE..."
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let mut case_insensitive = false;
    let mut number = false;
    let mut invert = false;
    let mut operands = Vec::new();
    for arg in &ctx.args {
        match arg.as_str() {
            "-i" => case_insensitive = true,
            "-n" => number = true,
            "-v" => invert = true,
            s if s.starts_with('-') && s.len() > 1 && operands.is_empty() => {
                return Err(ShellError::invalid_argument(format!(
                    "grep: invalid option: {s}"
                )));
            }
            _ => operands.push(arg),
        }
    }
    let (pattern, files) = match operands.split_first() {
        Some((pattern, files)) if !files.is_empty() => (pattern, files),
        _ => return Err(missing_operand("grep")),
    };

    let regex = RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|err| ShellError::invalid_argument(format!("grep: invalid pattern: {err}")))?;

    let show_name = files.len() > 1;
    for name in files {
        let path = ctx.vfs.resolve(name.as_str());
        let file = File::open(&path).map_err(|err| io_error("grep", name, err))?;
        let reader = BufReader::new(file);
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|err| io_error("grep", name, err))?;
            if regex.is_match(&line) == invert {
                continue;
            }
            match (show_name, number) {
                (true, true) => println!("{name}:{}:{line}", index + 1),
                (true, false) => println!("{name}:{line}"),
                (false, true) => println!("{}:{line}", index + 1),
                (false, false) => println!("{line}"),
            }
        }
    }
    Ok(())
}
