//! `hostname` builtin - print the system host name.
//!
//! `-s` prints the short form (segment before the first dot). Setting the
//! hostname is not supported.

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

pub struct HostnameCommand;

impl Command for HostnameCommand {
    fn name(&self) -> &'static str {
        "hostname"
    }

    fn description(&self) -> &'static str {
        "Print the system host name"
    }

    fn usage(&self) -> &'static str {
        "hostname [-s]"
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let short = match ctx.args.as_slice() {
        [] => false,
        [flag] if flag == "-s" => true,
        _ => {
            return Err(ShellError::invalid_argument(
                "hostname: invalid arguments".to_string(),
            ))
        }
    };
    let name = hostname::get()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string());
    if short {
        println!("{}", name.split('.').next().unwrap_or(&name));
    } else {
        println!("{name}");
    }
    Ok(())
}
