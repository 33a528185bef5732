//! `sort` builtin - sort lines of text files.
//!
//! Supported subset:
//!   sort [-r] [-n] [-u] FILE...
//!   -r : reverse the comparison
//!   -n : compare by leading numeric value
//!   -u : drop duplicate lines after sorting

use std::cmp::Ordering;
use std::fs;

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

use crate::util::{io_error, missing_operand};

pub struct SortCommand;

impl Command for SortCommand {
    fn name(&self) -> &'static str {
        "sort"
    }

    fn description(&self) -> &'static str {
        "Sort lines of text files"
    }

    fn usage(&self) -> &'static str {
        "sort [-r] [-n] [-u] FILE..."
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let mut reverse = false;
    let mut numeric = false;
    let mut unique = false;
    let mut files = Vec::new();
    for arg in &ctx.args {
        match arg.as_str() {
            "-r" => reverse = true,
            "-n" => numeric = true,
            "-u" => unique = true,
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(ShellError::invalid_argument(format!(
                    "sort: invalid option: {s}"
                )));
            }
            _ => files.push(arg),
        }
    }
    if files.is_empty() {
        return Err(missing_operand("sort"));
    }

    let mut lines = Vec::new();
    for name in &files {
        let path = ctx.vfs.resolve(name.as_str());
        let text = fs::read_to_string(&path).map_err(|err| io_error("sort", name, err))?;
        lines.extend(text.lines().map(str::to_string));
    }

    sort_lines(&mut lines, numeric, reverse, unique);
    for line in &lines {
        println!("{line}");
    }
    Ok(())
}

fn sort_lines(lines: &mut Vec<String>, numeric: bool, reverse: bool, unique: bool) {
    if numeric {
        lines.sort_by(|a, b| compare_numeric(a, b));
    } else {
        lines.sort();
    }
    if reverse {
        lines.reverse();
    }
    if unique {
        lines.dedup();
    }
}

/// GNU-style numeric compare: the leading number decides, the full text
/// breaks ties. Lines without a number sort as zero.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let (na, nb) = (leading_number(a), leading_number(b));
    na.partial_cmp(&nb)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.cmp(b))
}

fn leading_number(line: &str) -> f64 {
    let trimmed = line.trim_start();
    let end = trimmed
        .char_indices()
        .take_while(|(i, c)| {
            c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+'))
        })
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);
    trimmed[..end].parse().unwrap_or(0.0)
}
