//! `help` builtin - list commands or show one command's usage.
//!
//! The catalog is captured from the registry at startup, so the listing
//! always matches what is actually dispatchable.

use lush_core::{Command, CommandContext, CommandInfo, ShellError, ShellResult, Status};

pub struct HelpCommand {
    catalog: Vec<CommandInfo>,
}

impl HelpCommand {
    pub fn new(catalog: Vec<CommandInfo>) -> Self {
        Self { catalog }
    }

    /// The catalog row for `help` itself; the registry cannot supply it
    /// because `help` registers last.
    pub fn info() -> CommandInfo {
        CommandInfo {
            name: "help",
            description: "List commands or show usage for one",
            usage: "help [COMMAND]",
        }
    }
}

impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "List commands or show usage for one"
    }

    fn usage(&self) -> &'static str {
        "help [COMMAND]"
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(self, ctx).into()
    }
}

fn run(cmd: &HelpCommand, ctx: &CommandContext) -> ShellResult<()> {
    match ctx.args.as_slice() {
        [] => {
            for row in &cmd.catalog {
                println!("{:<10} {}", row.name, row.description);
            }
            Ok(())
        }
        [name] => match cmd.catalog.iter().find(|row| row.name == name.as_str()) {
            Some(row) => {
                println!("{} - {}", row.name, row.description);
                println!("usage: {}", row.usage);
                Ok(())
            }
            None => Err(ShellError::command_not_found(name)),
        },
        _ => Err(ShellError::invalid_argument(
            "help: too many arguments".to_string(),
        )),
    }
}
