//! `date` builtin - print the current date and time.
//!
//! Supported subset:
//!   date          # default format, e.g. "Wed Aug  6 14:03:59 2025"
//!   date +FORMAT  # chrono strftime format string

use chrono::format::{Item, StrftimeItems};
use chrono::Local;

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

const DEFAULT_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

pub struct DateCommand;

impl Command for DateCommand {
    fn name(&self) -> &'static str {
        "date"
    }

    fn description(&self) -> &'static str {
        "Print the current date and time"
    }

    fn usage(&self) -> &'static str {
        "date [+FORMAT]"
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let format = match ctx.args.as_slice() {
        [] => DEFAULT_FORMAT,
        [spec] => spec.strip_prefix('+').ok_or_else(|| {
            ShellError::invalid_argument(format!("date: invalid argument: {spec}"))
        })?,
        _ => {
            return Err(ShellError::invalid_argument(
                "date: too many arguments".to_string(),
            ))
        }
    };
    // A bad specifier must fail up front; chrono reports it lazily
    // through the Display impl otherwise.
    let items: Vec<Item> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(ShellError::invalid_argument(format!(
            "date: invalid format: '{format}'"
        )));
    }
    println!("{}", Local::now().format_with_items(items.into_iter()));
    Ok(())
}
