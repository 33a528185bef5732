//! `env` builtin - display environment variables.
//!
//! Usage:
//!   env        # list all variables in KEY=VALUE form, sorted
//!   env KEY    # print the value of KEY
//!
//! The listing reflects the snapshot taken at dispatch time, not the live
//! process environment.

use lush_core::{Command, CommandContext, ErrorKind, ShellError, ShellResult, Status};

pub struct EnvCommand;

impl Command for EnvCommand {
    fn name(&self) -> &'static str {
        "env"
    }

    fn description(&self) -> &'static str {
        "Display environment variables"
    }

    fn usage(&self) -> &'static str {
        "env [KEY]"
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    match ctx.args.as_slice() {
        [] => {
            let mut vars: Vec<(&String, &String)> = ctx.env.iter().collect();
            vars.sort_by(|a, b| a.0.cmp(b.0));
            for (key, value) in vars {
                println!("{key}={value}");
            }
            Ok(())
        }
        [key] => match ctx.var(key) {
            Some(value) => {
                println!("{value}");
                Ok(())
            }
            None => Err(ShellError::new(
                ErrorKind::NotFound,
                format!("env: {key}: not set"),
            )),
        },
        _ => Err(ShellError::invalid_argument(
            "env: too many arguments".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn single_key_lookup_hits_the_snapshot() {
        let mut env = HashMap::new();
        env.insert("LANG".to_string(), "C".to_string());
        let ctx = crate::test_support::context_with_env(vec!["LANG".into()], "/", env);
        run(&ctx).unwrap();
    }

    #[test]
    fn unset_key_is_not_found() {
        let ctx = crate::test_support::context(vec!["NOPE".into()], "/");
        let err = run(&ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
