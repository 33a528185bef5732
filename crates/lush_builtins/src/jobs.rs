//! `jobs` builtin - list and cancel background jobs.
//!
//! Usage:
//!   jobs         # list running background jobs
//!   jobs -k ID   # request best-effort cancellation of job ID
//!
//! Finished jobs are not listed here; their completions are reported by
//! the shell between commands.

use lush_core::{Command, CommandContext, ErrorKind, ShellError, ShellResult, Status};

pub struct JobsCommand;

impl Command for JobsCommand {
    fn name(&self) -> &'static str {
        "jobs"
    }

    fn description(&self) -> &'static str {
        "List or cancel background jobs"
    }

    fn usage(&self) -> &'static str {
        "jobs [-k ID]"
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    match ctx.args.as_slice() {
        [] => {
            for job in ctx.jobs.running_jobs() {
                println!(
                    "[{}] running {:>7.1}s  {}",
                    job.id,
                    job.elapsed.as_secs_f64(),
                    job.command
                );
            }
            Ok(())
        }
        [flag, id] if flag == "-k" => {
            let id: u32 = id.parse().map_err(|_| {
                ShellError::invalid_argument(format!("jobs: invalid job id: '{id}'"))
            })?;
            if ctx.jobs.cancel(id) {
                Ok(())
            } else {
                Err(ShellError::new(
                    ErrorKind::NotFound,
                    format!("jobs: no such job: {id}"),
                ))
            }
        }
        _ => Err(ShellError::invalid_argument(
            "jobs: invalid arguments".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lush_core::CancelToken;

    #[test]
    fn empty_listing_succeeds() {
        let ctx = crate::test_support::context(vec![], "/");
        run(&ctx).unwrap();
    }

    #[test]
    fn cancel_unknown_job_is_not_found() {
        let ctx = crate::test_support::context(vec!["-k".into(), "9".into()], "/");
        let err = run(&ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn cancel_running_job_flips_its_token() {
        let ctx = crate::test_support::context(vec![], "/");
        let token = CancelToken::new();
        let observed = token.clone();
        let id = ctx
            .jobs
            .spawn("stub".to_string(), token, move || {
                while !observed.is_cancelled() {
                    std::thread::sleep(std::time::Duration::from_millis(5));
                }
                Status::Ok
            })
            .unwrap();

        let cancel_ctx = lush_core::CommandContext::new(
            vec!["-k".into(), id.to_string()],
            Default::default(),
            ctx.vfs.clone(),
            ctx.config.clone(),
            ctx.jobs.clone(),
        );
        run(&cancel_ctx).unwrap();

        // the body exits once it observes the flag
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while !ctx.jobs.running_jobs().is_empty() && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(ctx.jobs.running_jobs().is_empty());
    }

    #[test]
    fn bad_job_id_is_invalid_argument() {
        let ctx = crate::test_support::context(vec!["-k".into(), "zero".into()], "/");
        let err = run(&ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }
}
