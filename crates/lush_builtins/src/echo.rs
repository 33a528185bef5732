//! `echo` builtin - write arguments to standard output.
//!
//! Supported subset:
//!   echo [-n] [-e] [TEXT...]
//!   -n : no trailing newline
//!   -e : interpret \n, \t, \r, \\ and \c (stop output)
//!
//! Flags are only recognized at the front; anything after the first
//! non-flag word is printed literally. Always succeeds.

use lush_core::{Command, CommandContext, Status};

pub struct EchoCommand;

impl Command for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn description(&self) -> &'static str {
        "Write arguments to standard output"
    }

    fn usage(&self) -> &'static str {
        "echo [-n] [-e] [TEXT...]"
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        let (text, newline) = render(&ctx.args);
        if newline {
            println!("{text}");
        } else {
            print!("{text}");
        }
        Status::Ok
    }
}

fn render(args: &[String]) -> (String, bool) {
    let mut newline = true;
    let mut escapes = false;
    let mut start = 0;
    for arg in args {
        match arg.as_str() {
            "-n" => newline = false,
            "-e" => escapes = true,
            "-E" => escapes = false,
            _ => break,
        }
        start += 1;
    }

    let joined = args[start..].join(" ");
    if !escapes {
        return (joined, newline);
    }

    let mut out = String::with_capacity(joined.len());
    let mut chars = joined.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('c') => return (out, false),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    (out, newline)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn joins_with_single_spaces() {
        let (text, newline) = render(&args(&["hello", "wide", "world"]));
        assert_eq!(text, "hello wide world");
        assert!(newline);
    }

    #[test]
    fn minus_n_suppresses_the_newline() {
        let (text, newline) = render(&args(&["-n", "x"]));
        assert_eq!(text, "x");
        assert!(!newline);
    }

    #[test]
    fn escapes_only_with_minus_e() {
        let (plain, _) = render(&args(&["a\\nb"]));
        assert_eq!(plain, "a\\nb");
        let (cooked, _) = render(&args(&["-e", "a\\nb"]));
        assert_eq!(cooked, "a\nb");
    }

    #[test]
    fn backslash_c_stops_output() {
        let (text, newline) = render(&args(&["-e", "ab\\cde"]));
        assert_eq!(text, "ab");
        assert!(!newline);
    }

    #[test]
    fn flags_after_text_are_literal() {
        let (text, _) = render(&args(&["hi", "-n"]));
        assert_eq!(text, "hi -n");
    }
}
