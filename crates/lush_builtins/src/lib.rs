//! Built-in commands for LumenShell.
//!
//! Each module implements one command against the
//! [`Command`](lush_core::Command) contract. [`register_all`] wires the
//! whole roster into a registry; a name collision there is a startup
//! defect and aborts the process with a non-zero exit code.

use std::sync::Arc;

use lush_core::{Registry, ShellResult};

pub mod cat;
pub mod cd;
pub mod chmod;
pub mod cp;
pub mod date;
pub mod echo;
pub mod env;
pub mod exit;
pub mod grep;
pub mod head;
pub mod help;
pub mod hostname;
pub mod jobs;
pub mod ls;
pub mod mkdir;
pub mod mv;
pub mod pwd;
pub mod rm;
pub mod sleep;
pub mod sort;
pub mod tail;
pub mod touch;
pub mod uname;
pub mod uniq;
pub mod wc;
pub mod whoami;

mod util;


/// Register every builtin.
///
/// `help` is registered last so its catalog covers the full roster,
/// itself included.
pub fn register_all(registry: &mut Registry) -> ShellResult<()> {
    registry.register(Arc::new(cat::CatCommand))?;
    registry.register(Arc::new(cd::CdCommand))?;
    registry.register(Arc::new(chmod::ChmodCommand))?;
    registry.register(Arc::new(cp::CpCommand))?;
    registry.register(Arc::new(date::DateCommand))?;
    registry.register(Arc::new(echo::EchoCommand))?;
    registry.register(Arc::new(env::EnvCommand))?;
    registry.register(Arc::new(exit::ExitCommand))?;
    registry.register(Arc::new(grep::GrepCommand))?;
    registry.register(Arc::new(head::HeadCommand))?;
    registry.register(Arc::new(hostname::HostnameCommand))?;
    registry.register(Arc::new(jobs::JobsCommand))?;
    registry.register(Arc::new(ls::LsCommand))?;
    registry.register(Arc::new(mkdir::MkdirCommand))?;
    registry.register(Arc::new(mv::MvCommand))?;
    registry.register(Arc::new(pwd::PwdCommand))?;
    registry.register(Arc::new(rm::RmCommand))?;
    registry.register(Arc::new(sleep::SleepCommand))?;
    registry.register(Arc::new(sort::SortCommand))?;
    registry.register(Arc::new(tail::TailCommand))?;
    registry.register(Arc::new(touch::TouchCommand))?;
    registry.register(Arc::new(uname::UnameCommand))?;
    registry.register(Arc::new(uniq::UniqCommand))?;
    registry.register(Arc::new(wc::WcCommand))?;
    registry.register(Arc::new(whoami::WhoamiCommand))?;

    let mut catalog = registry.catalog();
    catalog.push(help::HelpCommand::info());
    catalog.sort_by(|a, b| a.name.cmp(b.name));
    registry.register(Arc::new(help::HelpCommand::new(catalog)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_roster_registers_without_collisions() {
        let mut registry = Registry::new();
        register_all(&mut registry).unwrap();
        for name in ["cd", "pwd", "chmod", "exit", "help", "jobs", "sleep"] {
            assert!(registry.get(name).is_some(), "{name} missing from registry");
        }
        // help's catalog row count matches the registry.
        assert_eq!(registry.catalog().len(), 26);
    }
}
