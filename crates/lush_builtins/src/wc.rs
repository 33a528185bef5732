//! `wc` builtin - print newline, word, and byte counts.
//!
//! Supported subset:
//!   wc [-lwmc] FILE...
//!   -l : newline count
//!   -w : word count (runs of non-whitespace)
//!   -m : character count (UTF-8 aware)
//!   -c : byte count
//!   With no option, defaults to -lwc like GNU coreutils.

use std::fs;

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

use crate::util::{io_error, missing_operand};

bitflags::bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq)]
    struct Mode: u8 {
        const LINES = 0b0001;
        const WORDS = 0b0010;
        const BYTES = 0b0100;
        const CHARS = 0b1000;
    }
}

#[derive(Default, Clone, Copy)]
struct Counts {
    lines: usize,
    words: usize,
    bytes: usize,
    chars: usize,
}

pub struct WcCommand;

impl Command for WcCommand {
    fn name(&self) -> &'static str {
        "wc"
    }

    fn description(&self) -> &'static str {
        "Print newline, word, and byte counts"
    }

    fn usage(&self) -> &'static str {
        "wc [-lwmc] FILE..."
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let mut mode = Mode::empty();
    let mut files = Vec::new();
    for arg in &ctx.args {
        if let Some(flags) = arg.strip_prefix('-').filter(|f| !f.is_empty()) {
            for ch in flags.chars() {
                match ch {
                    'l' => mode |= Mode::LINES,
                    'w' => mode |= Mode::WORDS,
                    'c' => mode |= Mode::BYTES,
                    'm' => mode |= Mode::CHARS,
                    _ => {
                        return Err(ShellError::invalid_argument(format!(
                            "wc: invalid option -- '{ch}'"
                        )))
                    }
                }
            }
        } else {
            files.push(arg);
        }
    }
    if mode.is_empty() {
        mode = Mode::LINES | Mode::WORDS | Mode::BYTES;
    }
    if files.is_empty() {
        return Err(missing_operand("wc"));
    }

    let mut total = Counts::default();
    for name in &files {
        let counts = count_file(ctx, name.as_str())?;
        print_counts(&counts, mode, name.as_str());
        accumulate(&mut total, &counts);
    }
    if files.len() > 1 {
        print_counts(&total, mode, "total");
    }
    Ok(())
}

fn count_file(ctx: &CommandContext, name: &str) -> ShellResult<Counts> {
    let path = ctx.vfs.resolve(name);
    let bytes = fs::read(&path).map_err(|err| io_error("wc", name, err))?;
    Ok(count_bytes(&bytes))
}

fn count_bytes(bytes: &[u8]) -> Counts {
    let text = String::from_utf8_lossy(bytes);
    Counts {
        lines: bytes.iter().filter(|&&b| b == b'\n').count(),
        words: text.split_whitespace().count(),
        bytes: bytes.len(),
        chars: text.chars().count(),
    }
}

fn accumulate(total: &mut Counts, add: &Counts) {
    total.lines += add.lines;
    total.words += add.words;
    total.bytes += add.bytes;
    total.chars += add.chars;
}

fn print_counts(counts: &Counts, mode: Mode, label: &str) {
    let mut fields = Vec::new();
    if mode.contains(Mode::LINES) {
        fields.push(counts.lines);
    }
    if mode.contains(Mode::WORDS) {
        fields.push(counts.words);
    }
    if mode.contains(Mode::CHARS) {
        fields.push(counts.chars);
    }
    if mode.contains(Mode::BYTES) {
        fields.push(counts.bytes);
    }
    let mut row = String::new();
    for field in fields {
        row.push_str(&format!("{field:>8}"));
    }
    println!("{row} {label}");
}
