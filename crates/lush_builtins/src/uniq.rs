//! `uniq` builtin - filter adjacent duplicate lines.
//!
//! Supported subset:
//!   uniq [-c] [-d] [-u] FILE
//!   -c : prefix each line with its occurrence count
//!   -d : only print repeated lines
//!   -u : only print lines that are not repeated
//!
//! As with the classic tool, only *adjacent* duplicates collapse; sort
//! first for global dedup.

use std::fs;

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

use crate::util::{io_error, missing_operand};

pub struct UniqCommand;

impl Command for UniqCommand {
    fn name(&self) -> &'static str {
        "uniq"
    }

    fn description(&self) -> &'static str {
        "Filter adjacent duplicate lines"
    }

    fn usage(&self) -> &'static str {
        "uniq [-c] [-d] [-u] FILE"
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

#[derive(Default, Clone, Copy)]
struct Options {
    count: bool,
    only_repeated: bool,
    only_unique: bool,
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let mut options = Options::default();
    let mut file = None;
    for arg in &ctx.args {
        match arg.as_str() {
            "-c" => options.count = true,
            "-d" => options.only_repeated = true,
            "-u" => options.only_unique = true,
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(ShellError::invalid_argument(format!(
                    "uniq: invalid option: {s}"
                )));
            }
            _ => {
                if file.is_some() {
                    return Err(ShellError::invalid_argument(format!(
                        "uniq: extra operand '{arg}'"
                    )));
                }
                file = Some(arg);
            }
        }
    }
    let name = file.ok_or_else(|| missing_operand("uniq"))?;

    let path = ctx.vfs.resolve(name.as_str());
    let text = fs::read_to_string(&path).map_err(|err| io_error("uniq", name, err))?;
    for (count, line) in group_adjacent(text.lines()) {
        let repeated = count > 1;
        if options.only_repeated && !repeated {
            continue;
        }
        if options.only_unique && repeated {
            continue;
        }
        if options.count {
            println!("{count:>7} {line}");
        } else {
            println!("{line}");
        }
    }
    Ok(())
}

fn group_adjacent<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<(usize, String)> {
    let mut groups: Vec<(usize, String)> = Vec::new();
    for line in lines {
        match groups.last_mut() {
            Some((count, last)) if last == line => *count += 1,
            _ => groups.push((1, line.to_string())),
        }
    }
    groups
}
