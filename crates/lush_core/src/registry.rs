//! Command registry and dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use crate::command::{Command, CommandKind};
use crate::context::CommandContext;
use crate::error::{ErrorKind, ShellError, ShellResult};
use crate::job::JobId;
use crate::status::Status;

/// Outcome of a dispatch. Synchronous commands complete in place;
/// asynchronous ones are accepted immediately, with the real [`Status`]
/// delivered later through the job-completion channel. `Accepted` is
/// deliberately distinct from any `Status` variant so the REPL cannot
/// confuse "scheduled" with "succeeded".
#[derive(Debug)]
pub enum Dispatch {
    Completed(Status),
    Accepted(JobId),
}

/// One row of the registry catalog, as rendered by `help`.
#[derive(Debug, Clone)]
pub struct CommandInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
}

/// Owns the name-to-command mapping and drives the execute protocol.
///
/// Dispatch of a synchronous command fully completes, including any Vfs
/// mutation it performs, before the caller can issue the next dispatch;
/// the registry itself never runs two synchronous commands in parallel.
#[derive(Default)]
pub struct Registry {
    commands: HashMap<&'static str, Arc<dyn Command>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a command under its own name. Names are case-sensitive and
    /// unique; a collision is a configuration defect surfaced at startup,
    /// never at dispatch time.
    pub fn register(&mut self, command: Arc<dyn Command>) -> ShellResult<()> {
        let name = command.name();
        if self.commands.contains_key(name) {
            return Err(ShellError::new(
                ErrorKind::DuplicateRegistration,
                format!("duplicate command registration: {name}"),
            ));
        }
        self.commands.insert(name, command);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Command>> {
        self.commands.get(name)
    }

    /// Metadata for every registered command, ordered by name.
    pub fn catalog(&self) -> Vec<CommandInfo> {
        let mut rows: Vec<CommandInfo> = self
            .commands
            .values()
            .map(|command| CommandInfo {
                name: command.name(),
                description: command.description(),
                usage: command.usage(),
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(b.name));
        rows
    }

    /// Resolve `name` and drive execution according to the command's kind.
    ///
    /// An unknown name is a recoverable `CommandNotFound` error, reported
    /// like any other command failure.
    pub fn dispatch(&self, name: &str, ctx: CommandContext) -> Dispatch {
        let Some(command) = self.commands.get(name) else {
            return Dispatch::Completed(Status::Error(ShellError::command_not_found(name)));
        };
        tracing::debug!(command = name, kind = ?command.kind(), "dispatch");
        match command.kind() {
            CommandKind::Synchronous => Dispatch::Completed(command.execute(&ctx)),
            CommandKind::Asynchronous => {
                let command = Arc::clone(command);
                let cancel = ctx.cancel.clone();
                let jobs = Arc::clone(&ctx.jobs);
                let line = command_line(name, &ctx.args);
                match jobs.spawn(line, cancel, move || command.execute(&ctx)) {
                    Ok(id) => Dispatch::Accepted(id),
                    Err(err) => Dispatch::Completed(Status::Error(err)),
                }
            }
        }
    }
}

fn command_line(name: &str, args: &[String]) -> String {
    if args.is_empty() {
        name.to_string()
    } else {
        format!("{name} {}", args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::job::JobManager;
    use crate::vfs::Vfs;
    use std::collections::HashMap as Env;
    use std::thread;
    use std::time::{Duration, Instant};

    struct Stub {
        name: &'static str,
        kind: CommandKind,
        result: fn() -> Status,
    }

    impl Command for Stub {
        fn name(&self) -> &'static str {
            self.name
        }
        fn description(&self) -> &'static str {
            "stub"
        }
        fn usage(&self) -> &'static str {
            "stub"
        }
        fn kind(&self) -> CommandKind {
            self.kind
        }
        fn execute(&self, _ctx: &CommandContext) -> Status {
            (self.result)()
        }
    }

    fn context(jobs: Arc<JobManager>) -> CommandContext {
        CommandContext::new(
            Vec::new(),
            Env::new(),
            Arc::new(Vfs::with_current_dir("/")),
            Arc::new(Config::default()),
            jobs,
        )
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = Registry::new();
        registry
            .register(Arc::new(Stub {
                name: "noop",
                kind: CommandKind::Synchronous,
                result: || Status::Ok,
            }))
            .unwrap();
        let err = registry
            .register(Arc::new(Stub {
                name: "noop",
                kind: CommandKind::Synchronous,
                result: || Status::Ok,
            }))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateRegistration);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn unknown_command_is_a_recoverable_error_and_touches_nothing() {
        let registry = Registry::new();
        let jobs = Arc::new(JobManager::new());
        let ctx = context(Arc::clone(&jobs));
        let vfs = Arc::clone(&ctx.vfs);
        let before = vfs.current_dir();

        match registry.dispatch("no-such-command", ctx) {
            Dispatch::Completed(Status::Error(err)) => {
                assert_eq!(err.kind, ErrorKind::CommandNotFound);
                assert!(err.is_recoverable());
            }
            other => panic!("expected command-not-found, got {other:?}"),
        }
        assert_eq!(vfs.current_dir(), before);
        assert!(jobs.running_jobs().is_empty());
    }

    #[test]
    fn exit_status_propagates_unchanged() {
        let mut registry = Registry::new();
        registry
            .register(Arc::new(Stub {
                name: "exit",
                kind: CommandKind::Synchronous,
                result: || Status::Exit,
            }))
            .unwrap();

        let ctx = context(Arc::new(JobManager::new()));
        match registry.dispatch("exit", ctx) {
            Dispatch::Completed(status) => assert!(status.is_exit()),
            other => panic!("expected completed exit, got {other:?}"),
        }
    }

    #[test]
    fn asynchronous_dispatch_is_accepted_and_completes_later() {
        let mut registry = Registry::new();
        registry
            .register(Arc::new(Stub {
                name: "bg",
                kind: CommandKind::Asynchronous,
                result: || Status::Ok,
            }))
            .unwrap();

        let jobs = Arc::new(JobManager::new());
        let ctx = context(Arc::clone(&jobs));
        let id = match registry.dispatch("bg", ctx) {
            Dispatch::Accepted(id) => id,
            other => panic!("expected accepted, got {other:?}"),
        };

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut finished = Vec::new();
        while finished.is_empty() && Instant::now() < deadline {
            finished.extend(jobs.poll_completions());
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].id, id);
        assert!(finished[0].status.is_ok());
    }

    #[test]
    fn catalog_is_sorted_by_name() {
        let mut registry = Registry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry
                .register(Arc::new(Stub {
                    name,
                    kind: CommandKind::Synchronous,
                    result: || Status::Ok,
                }))
                .unwrap();
        }
        let names: Vec<&str> = registry.catalog().iter().map(|row| row.name).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }
}
