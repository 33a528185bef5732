//! `head` builtin - output the first part of files.
//!
//! Supported subset:
//!   head [-n NUM] FILE...
//!   -n NUM : print first NUM lines (default 10); combined -nNUM works too

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

use crate::util::{io_error, missing_operand};

pub struct HeadCommand;

impl Command for HeadCommand {
    fn name(&self) -> &'static str {
        "head"
    }

    fn description(&self) -> &'static str {
        "Output the first part of files"
    }

    fn usage(&self) -> &'static str {
        "head [-n NUM] FILE..."
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let (count, files) = parse_args(&ctx.args)?;
    if files.is_empty() {
        return Err(missing_operand("head"));
    }
    let many = files.len() > 1;
    for (index, name) in files.iter().enumerate() {
        if many {
            if index > 0 {
                println!();
            }
            println!("==> {name} <==");
        }
        print_head(ctx, name.as_str(), count)?;
    }
    Ok(())
}

fn parse_args<'a>(args: &'a [String]) -> ShellResult<(usize, Vec<&'a String>)> {
    let mut count = 10usize;
    let mut files = Vec::new();
    let mut idx = 0;
    while idx < args.len() {
        let arg = &args[idx];
        match arg.as_str() {
            "-n" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| {
                    ShellError::invalid_argument("head: option requires an argument -- n")
                })?;
                count = parse_count(value)?;
            }
            s if s.starts_with("-n") && s.len() > 2 => {
                count = parse_count(&s[2..])?;
            }
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(ShellError::invalid_argument(format!(
                    "head: invalid option: {s}"
                )));
            }
            _ => files.push(arg),
        }
        idx += 1;
    }
    Ok((count, files))
}

fn parse_count(text: &str) -> ShellResult<usize> {
    text.parse()
        .map_err(|_| ShellError::invalid_argument(format!("head: invalid number of lines: '{text}'")))
}

fn print_head(ctx: &CommandContext, name: &str, count: usize) -> ShellResult<()> {
    let path = ctx.vfs.resolve(name);
    let file = File::open(&path).map_err(|err| io_error("head", name, err))?;
    let mut reader = BufReader::new(file);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut line = String::new();
    let mut printed = 0;
    while printed < count {
        line.clear();
        if reader
            .read_line(&mut line)
            .map_err(|err| io_error("head", name, err))?
            == 0
        {
            break;
        }
        out.write_all(line.as_bytes())
            .map_err(|err| io_error("head", name, err))?;
        printed += 1;
    }
    Ok(())
}
