//! `ls` builtin - list directory contents.
//!
//! Supported subset:
//!   ls [-a] [-l] [PATH...]
//!   -a : include entries whose names start with '.'
//!   -l : long format (mode, size, mtime, name)
//!
//! Entries are sorted by name. Directory names are colored when the
//! config enables color.

use std::fs;

use chrono::{DateTime, Local};
use nu_ansi_term::Color;

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

use crate::util::io_error;

pub struct LsCommand;

impl Command for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn description(&self) -> &'static str {
        "List directory contents"
    }

    fn usage(&self) -> &'static str {
        "ls [-a] [-l] [PATH...]"
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let mut all = false;
    let mut long = false;
    let mut paths = Vec::new();
    for arg in &ctx.args {
        match arg.as_str() {
            "-a" => all = true,
            "-l" => long = true,
            "-al" | "-la" => {
                all = true;
                long = true;
            }
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(ShellError::invalid_argument(format!(
                    "ls: invalid option: {s}"
                )));
            }
            _ => paths.push(arg.as_str()),
        }
    }
    if paths.is_empty() {
        paths.push(".");
    }

    let many = paths.len() > 1;
    for (index, name) in paths.iter().enumerate() {
        if many {
            if index > 0 {
                println!();
            }
            println!("{name}:");
        }
        list_path(ctx, name, all, long)?;
    }
    Ok(())
}

fn list_path(ctx: &CommandContext, name: &str, all: bool, long: bool) -> ShellResult<()> {
    let path = ctx.vfs.resolve(name);
    let meta = fs::metadata(&path).map_err(|err| io_error("ls", name, err))?;
    if !meta.is_dir() {
        print_entry(ctx, name, &meta, long);
        return Ok(());
    }

    let mut entries: Vec<(String, fs::Metadata)> = Vec::new();
    let reader = fs::read_dir(&path).map_err(|err| io_error("ls", name, err))?;
    for entry in reader {
        let entry = entry.map_err(|err| io_error("ls", name, err))?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !all && file_name.starts_with('.') {
            continue;
        }
        let meta = entry.metadata().map_err(|err| io_error("ls", name, err))?;
        entries.push((file_name, meta));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (file_name, meta) in &entries {
        print_entry(ctx, file_name, meta, long);
    }
    Ok(())
}

fn print_entry(ctx: &CommandContext, name: &str, meta: &fs::Metadata, long: bool) {
    let display = if meta.is_dir() && ctx.config.color {
        Color::Blue.bold().paint(name).to_string()
    } else {
        name.to_string()
    };
    if !long {
        println!("{display}");
        return;
    }

    let mtime = meta
        .modified()
        .map(|time| {
            let stamp: DateTime<Local> = time.into();
            stamp.format("%b %e %H:%M").to_string()
        })
        .unwrap_or_else(|_| "?".to_string());
    println!(
        "{} {:>10} {} {}",
        mode_string(meta),
        meta.len(),
        mtime,
        display
    );
}

#[cfg(unix)]
fn mode_string(meta: &fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let mode = meta.permissions().mode();
    let kind = if meta.is_dir() { 'd' } else { '-' };
    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

#[cfg(not(unix))]
fn mode_string(meta: &fs::Metadata) -> String {
    let kind = if meta.is_dir() { 'd' } else { '-' };
    let writable = if meta.permissions().readonly() { '-' } else { 'w' };
    format!("{kind}r{writable}-------")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lush_core::ErrorKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn lists_a_directory_resolved_through_the_vfs() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("b.txt"), "").unwrap();
        fs::create_dir(root.path().join("a")).unwrap();
        let ctx = crate::test_support::context(vec![], root.path());
        run(&ctx).unwrap();
    }

    #[test]
    fn missing_path_reports_not_found() {
        let root = tempdir().unwrap();
        let ctx = crate::test_support::context(vec!["gone".into()], root.path());
        let err = run(&ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn mode_string_renders_rwx_triplets() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempdir().unwrap();
        let file = root.path().join("f");
        fs::write(&file, "").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o754)).unwrap();
        let meta = fs::metadata(&file).unwrap();
        assert_eq!(mode_string(&meta), "-rwxr-xr--");
    }
}
