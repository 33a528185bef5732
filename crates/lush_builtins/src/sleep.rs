//! `sleep` builtin - pause for a duration.
//!
//! The one asynchronous command in the roster: dispatch returns
//! immediately with a job id and the real outcome arrives through the
//! job-completion channel. DURATION is a number with an optional `s`,
//! `m` or `h` suffix; fractions work (`sleep 0.5`).
//!
//! The body sleeps in short slices and checks its cancel token between
//! them, so `jobs -k` interrupts within about 50ms.

use std::thread;
use std::time::{Duration, Instant};

use lush_core::{
    Command, CommandContext, CommandKind, ErrorKind, ShellError, ShellResult, Status,
};

const POLL_SLICE: Duration = Duration::from_millis(50);

pub struct SleepCommand;

impl Command for SleepCommand {
    fn name(&self) -> &'static str {
        "sleep"
    }

    fn description(&self) -> &'static str {
        "Pause for a duration in the background"
    }

    fn usage(&self) -> &'static str {
        "sleep DURATION[s|m|h]"
    }

    fn kind(&self) -> CommandKind {
        CommandKind::Asynchronous
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        let total = match parse_args(&ctx.args) {
            Ok(total) => total,
            Err(err) => return Status::Error(err),
        };

        let deadline = Instant::now() + total;
        loop {
            if ctx.cancel.is_cancelled() {
                return Status::Error(ShellError::new(
                    ErrorKind::Interrupted,
                    "sleep: cancelled",
                ));
            }
            let now = Instant::now();
            if now >= deadline {
                return Status::Ok;
            }
            thread::sleep((deadline - now).min(POLL_SLICE));
        }
    }
}

fn parse_args(args: &[String]) -> ShellResult<Duration> {
    match args {
        [spec] => parse_duration(spec),
        [] => Err(ShellError::invalid_argument(
            "sleep: missing operand".to_string(),
        )),
        [_, extra, ..] => Err(ShellError::invalid_argument(format!(
            "sleep: extra operand '{extra}'"
        ))),
    }
}

fn parse_duration(spec: &str) -> ShellResult<Duration> {
    let (number, unit) = match spec.char_indices().last() {
        Some((idx, 's')) => (&spec[..idx], 1.0),
        Some((idx, 'm')) => (&spec[..idx], 60.0),
        Some((idx, 'h')) => (&spec[..idx], 3600.0),
        _ => (spec, 1.0),
    };
    let value: f64 = number
        .parse()
        .map_err(|_| ShellError::invalid_argument(format!("sleep: invalid time interval '{spec}'")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ShellError::invalid_argument(format!(
            "sleep: invalid time interval '{spec}'"
        )));
    }
    Ok(Duration::from_secs_f64(value * unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_scale_the_value() {
        assert_eq!(parse_duration("2").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("1m").unwrap(), Duration::from_secs(60));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("0.5").unwrap(), Duration::from_millis(500));
    }

    #[test]
    fn garbage_is_rejected() {
        for bad in ["", "abc", "-1", "1d"] {
            assert!(parse_duration(bad).is_err(), "{bad:?} parsed");
        }
    }

    #[test]
    fn cancelled_context_interrupts_promptly() {
        let ctx = crate::test_support::context(vec!["30".into()], "/");
        ctx.cancel.cancel();
        let started = Instant::now();
        let status = SleepCommand.execute(&ctx);
        assert!(started.elapsed() < Duration::from_secs(5));
        match status {
            Status::Error(err) => assert_eq!(err.kind, ErrorKind::Interrupted),
            other => panic!("expected interrupted, got {other:?}"),
        }
    }

    #[test]
    fn short_sleep_completes_ok() {
        let ctx = crate::test_support::context(vec!["0.01".into()], "/");
        assert!(SleepCommand.execute(&ctx).is_ok());
    }
}
