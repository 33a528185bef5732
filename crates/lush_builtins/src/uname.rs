//! `uname` builtin - print system information.
//!
//! Supported flags:
//!   -s   kernel/OS name (default)
//!   -r   release (distribution string)
//!   -n   nodename (hostname)
//!   -m   machine hardware name
//!   -a   all of the above

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

pub struct UnameCommand;

impl Command for UnameCommand {
    fn name(&self) -> &'static str {
        "uname"
    }

    fn description(&self) -> &'static str {
        "Print system information"
    }

    fn usage(&self) -> &'static str {
        "uname [-srnma]"
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let mut show_s = false;
    let mut show_r = false;
    let mut show_n = false;
    let mut show_m = false;
    for arg in &ctx.args {
        let Some(flags) = arg.strip_prefix('-').filter(|f| !f.is_empty()) else {
            return Err(ShellError::invalid_argument(format!(
                "uname: invalid argument: {arg}"
            )));
        };
        for ch in flags.chars() {
            match ch {
                's' => show_s = true,
                'r' => show_r = true,
                'n' => show_n = true,
                'm' => show_m = true,
                'a' => {
                    show_s = true;
                    show_r = true;
                    show_n = true;
                    show_m = true;
                }
                _ => {
                    return Err(ShellError::invalid_argument(format!(
                        "uname: invalid option -- '{ch}'"
                    )))
                }
            }
        }
    }
    if !(show_s || show_r || show_n || show_m) {
        show_s = true;
    }

    let mut fields = Vec::new();
    if show_s {
        fields.push(std::env::consts::OS.to_string());
    }
    if show_n {
        fields.push(node_name());
    }
    if show_r {
        fields.push(whoami::distro());
    }
    if show_m {
        fields.push(std::env::consts::ARCH.to_string());
    }
    println!("{}", fields.join(" "));
    Ok(())
}

fn node_name() -> String {
    hostname::get()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lush_core::ErrorKind;

    #[test]
    fn default_prints_only_the_os_name() {
        let ctx = crate::test_support::context(vec![], "/");
        run(&ctx).unwrap();
    }

    #[test]
    fn combined_flags_parse() {
        let ctx = crate::test_support::context(vec!["-sm".into()], "/");
        run(&ctx).unwrap();
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let ctx = crate::test_support::context(vec!["-z".into()], "/");
        let err = run(&ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }
}
