//! `whoami` builtin - print the effective user name.

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

pub struct WhoamiCommand;

impl Command for WhoamiCommand {
    fn name(&self) -> &'static str {
        "whoami"
    }

    fn description(&self) -> &'static str {
        "Print the effective user name"
    }

    fn usage(&self) -> &'static str {
        "whoami"
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    if let Some(extra) = ctx.args.first() {
        return Err(ShellError::invalid_argument(format!(
            "whoami: extra operand '{extra}'"
        )));
    }
    // Prefer the environment the shell was started with; fall back to the
    // OS account database.
    let name = ctx
        .var("USER")
        .map(str::to_string)
        .unwrap_or_else(whoami::username);
    println!("{name}");
    Ok(())
}
