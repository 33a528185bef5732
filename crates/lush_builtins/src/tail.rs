//! `tail` builtin - output the last part of files.
//!
//! Supported subset: `tail [-n NUM] FILE...` (default 10 lines). Follow
//! mode is not implemented.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

use crate::util::{io_error, missing_operand};

pub struct TailCommand;

impl Command for TailCommand {
    fn name(&self) -> &'static str {
        "tail"
    }

    fn description(&self) -> &'static str {
        "Output the last part of files"
    }

    fn usage(&self) -> &'static str {
        "tail [-n NUM] FILE..."
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let mut count = 10usize;
    let mut files = Vec::new();
    let mut idx = 0;
    while idx < ctx.args.len() {
        let arg = &ctx.args[idx];
        match arg.as_str() {
            "-n" => {
                idx += 1;
                let value = ctx.args.get(idx).ok_or_else(|| {
                    ShellError::invalid_argument("tail: option requires an argument -- n")
                })?;
                count = value.parse().map_err(|_| {
                    ShellError::invalid_argument(format!("tail: invalid number of lines: '{value}'"))
                })?;
            }
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(ShellError::invalid_argument(format!(
                    "tail: invalid option: {s}"
                )));
            }
            _ => files.push(arg),
        }
        idx += 1;
    }
    if files.is_empty() {
        return Err(missing_operand("tail"));
    }

    let many = files.len() > 1;
    for (index, name) in files.iter().enumerate() {
        if many {
            if index > 0 {
                println!();
            }
            println!("==> {name} <==");
        }
        for line in last_lines(ctx, name.as_str(), count)? {
            println!("{line}");
        }
    }
    Ok(())
}

fn last_lines(ctx: &CommandContext, name: &str, count: usize) -> ShellResult<VecDeque<String>> {
    let path = ctx.vfs.resolve(name);
    let file = File::open(&path).map_err(|err| io_error("tail", name, err))?;
    let reader = BufReader::new(file);
    let mut ring: VecDeque<String> = VecDeque::with_capacity(count);
    for line in reader.lines() {
        let line = line.map_err(|err| io_error("tail", name, err))?;
        if count == 0 {
            break;
        }
        if ring.len() == count {
            ring.pop_front();
        }
        ring.push_back(line);
    }
    Ok(ring)
}
