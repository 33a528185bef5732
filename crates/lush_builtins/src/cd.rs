//! `cd` builtin - change the shell's logical directory.
//!
//! `cd DIR` resolves DIR against the current logical directory; `cd` with
//! no argument goes to `$HOME`; `cd -` returns to the previous directory
//! and prints it. The process working directory is never touched - every
//! other command resolves paths through the same shared state, which is
//! how a `cd` here is visible to a later `pwd`.

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

pub struct CdCommand;

impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn description(&self) -> &'static str {
        "Change the current working directory"
    }

    fn usage(&self) -> &'static str {
        "cd [DIR]"
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    if ctx.args.len() > 1 {
        return Err(ShellError::invalid_argument("cd: too many arguments"));
    }
    let target = match ctx.args.first().map(String::as_str) {
        None => ctx
            .var("HOME")
            .ok_or_else(|| ShellError::invalid_argument("cd: HOME not set"))?
            .to_string(),
        Some("-") => {
            let previous = ctx
                .vfs
                .previous_dir()
                .ok_or_else(|| ShellError::invalid_argument("cd: no previous directory"))?;
            // bash prints the directory it lands in.
            println!("{}", previous.display());
            previous.to_string_lossy().into_owned()
        }
        Some(dir) => dir.to_string(),
    };
    ctx.vfs.change_dir(&target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lush_core::ErrorKind;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn relative_target_moves_the_vfs() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("work")).unwrap();
        let ctx = crate::test_support::context(vec!["work".into()], root.path());
        run(&ctx).unwrap();
        assert!(ctx.vfs.current_dir().ends_with("work"));
    }

    #[test]
    fn missing_target_is_not_found_and_state_is_kept() {
        let root = tempdir().unwrap();
        let ctx = crate::test_support::context(vec!["missing".into()], root.path());
        let before = ctx.vfs.current_dir();
        let err = run(&ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(ctx.vfs.current_dir(), before);
    }

    #[test]
    fn no_argument_goes_home() {
        let root = tempdir().unwrap();
        let home = root.path().join("home");
        fs::create_dir(&home).unwrap();
        let mut env = HashMap::new();
        env.insert("HOME".to_string(), home.to_string_lossy().into_owned());
        let ctx = crate::test_support::context_with_env(vec![], root.path(), env);
        run(&ctx).unwrap();
        assert!(ctx.vfs.current_dir().ends_with("home"));
    }

    #[test]
    fn dash_returns_to_previous_directory() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("a")).unwrap();
        let ctx = crate::test_support::context(vec!["a".into()], root.path());
        run(&ctx).unwrap();
        let in_a = ctx.vfs.current_dir();

        // same vfs, new invocation of `cd -`
        let ctx2 = lush_core::CommandContext::new(
            vec!["-".into()],
            HashMap::new(),
            ctx.vfs.clone(),
            ctx.config.clone(),
            ctx.jobs.clone(),
        );
        run(&ctx2).unwrap();
        assert_ne!(ctx2.vfs.current_dir(), in_a);
        assert_eq!(ctx2.vfs.previous_dir().unwrap(), in_a);
    }

    #[test]
    fn dash_without_history_is_an_error() {
        let root = tempdir().unwrap();
        let ctx = crate::test_support::context(vec!["-".into()], root.path());
        let err = run(&ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }
}
