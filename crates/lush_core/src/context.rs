//! Per-invocation execution context.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::job::JobManager;
use crate::vfs::Vfs;

/// Cooperative cancellation flag observed by command bodies.
///
/// Synchronous commands receive an inert token. For asynchronous commands
/// the dispatcher shares the token with the job handle, so a later
/// `jobs -k` becomes visible mid-run. Cancellation is best effort: bodies
/// poll at their own pace.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Bundle handed to every [`Command::execute`](crate::command::Command::execute)
/// call: parsed arguments, an environment snapshot, and shared handles to the
/// process-wide collaborators.
///
/// `args[0]` is the first *argument*; the command's own name is not
/// included. This convention is uniform across all commands. The environment
/// is snapshotted at dispatch time and read-only from the command's point of
/// view. The context is built fresh for each dispatch, moved to a worker
/// thread for asynchronous commands, and dropped when the call returns.
pub struct CommandContext {
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
    pub vfs: Arc<Vfs>,
    pub config: Arc<Config>,
    pub jobs: Arc<JobManager>,
    pub cancel: CancelToken,
}

impl CommandContext {
    pub fn new(
        args: Vec<String>,
        env: HashMap<String, String>,
        vfs: Arc<Vfs>,
        config: Arc<Config>,
        jobs: Arc<JobManager>,
    ) -> Self {
        Self {
            args,
            env,
            vfs,
            config,
            jobs,
            cancel: CancelToken::new(),
        }
    }

    /// Context carrying a snapshot of the process environment.
    pub fn with_process_env(
        args: Vec<String>,
        vfs: Arc<Vfs>,
        config: Arc<Config>,
        jobs: Arc<JobManager>,
    ) -> Self {
        Self::new(args, std::env::vars().collect(), vfs, config, jobs)
    }

    /// Look up a variable in the environment snapshot.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_token_flips_once_and_stays() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());

        // Clones observe the same flag.
        let clone = token.clone();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn var_reads_the_snapshot_not_the_process() {
        let mut env = HashMap::new();
        env.insert("HOME".to_string(), "/home/test".to_string());
        let ctx = CommandContext::new(
            vec!["arg".to_string()],
            env,
            Arc::new(Vfs::with_current_dir("/")),
            Arc::new(Config::default()),
            Arc::new(JobManager::new()),
        );
        assert_eq!(ctx.var("HOME"), Some("/home/test"));
        assert_eq!(ctx.var("DEFINITELY_NOT_SET_ANYWHERE"), None);
    }
}
