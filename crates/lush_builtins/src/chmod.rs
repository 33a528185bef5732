//! `chmod` builtin - change file mode bits.
//!
//! A mode is either octal (one to four digits, `chmod 755 file`) or a
//! comma-separated list of symbolic clauses `[ugoa]*[+-=][rwxst]*`
//! applied left to right against the file's current bits (`chmod u+x,g-w
//! file`). A string matching neither grammar is rejected before any file
//! is touched. Recursion and the `X`/`u=g` copy forms are not
//! implemented.
//!
//! On Windows only the write bit is meaningful and maps to the read-only
//! attribute.

use std::fs;

use lush_core::{Command, CommandContext, ShellError, ShellResult, Status};

use crate::util::{io_error, missing_operand};

pub struct ChmodCommand;

impl Command for ChmodCommand {
    fn name(&self) -> &'static str {
        "chmod"
    }

    fn description(&self) -> &'static str {
        "Change file mode bits"
    }

    fn usage(&self) -> &'static str {
        "chmod MODE FILE..."
    }

    fn execute(&self, ctx: &CommandContext) -> Status {
        run(ctx).into()
    }
}

fn run(ctx: &CommandContext) -> ShellResult<()> {
    let (mode_text, files) = match ctx.args.split_first() {
        Some((mode, files)) if !files.is_empty() => (mode, files),
        _ => return Err(missing_operand("chmod")),
    };

    for name in files {
        let path = ctx.vfs.resolve(name.as_str());
        let meta = fs::metadata(&path).map_err(|err| io_error("chmod", name, err))?;
        let current = mode_bits(&meta);
        let next = parse_mode(mode_text, current)?;
        apply_mode(&path, meta, next).map_err(|err| io_error("chmod", name, err))?;
        tracing::debug!(path = %path.display(), mode = format_args!("{next:04o}"), "chmod");
    }
    Ok(())
}

/// Parse `text` against the file's current permission bits. Octal wins
/// when the whole string is octal digits; otherwise the symbolic grammar
/// is tried, and failure of both is `InvalidArgument`.
pub fn parse_mode(text: &str, current: u32) -> ShellResult<u32> {
    if !text.is_empty() && text.len() <= 4 && text.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
        return u32::from_str_radix(text, 8)
            .map_err(|_| invalid_mode(text));
    }
    parse_symbolic(text, current)
}

fn parse_symbolic(text: &str, current: u32) -> ShellResult<u32> {
    let mut mode = current & 0o7777;
    if text.is_empty() {
        return Err(invalid_mode(text));
    }
    for clause in text.split(',') {
        let mut chars = clause.chars().peekable();
        let mut whos = Vec::new();
        while let Some(&c) = chars.peek() {
            match c {
                'u' | 'g' | 'o' | 'a' => {
                    whos.push(c);
                    chars.next();
                }
                _ => break,
            }
        }
        if whos.is_empty() || whos.contains(&'a') {
            whos = vec!['u', 'g', 'o'];
        }

        let op = chars.next().ok_or_else(|| invalid_mode(text))?;
        if !matches!(op, '+' | '-' | '=') {
            return Err(invalid_mode(text));
        }

        let mut bits = 0u32;
        for c in chars {
            match c {
                'r' => bits |= spread(0o4, &whos),
                'w' => bits |= spread(0o2, &whos),
                'x' => bits |= spread(0o1, &whos),
                's' => {
                    for &who in &whos {
                        bits |= match who {
                            'u' => 0o4000,
                            'g' => 0o2000,
                            _ => 0,
                        };
                    }
                }
                't' => bits |= 0o1000,
                _ => return Err(invalid_mode(text)),
            }
        }

        match op {
            '+' => mode |= bits,
            '-' => mode &= !bits,
            '=' => {
                let mut clear = 0u32;
                for &who in &whos {
                    clear |= 0o7 << shift(who);
                    clear |= match who {
                        'u' => 0o4000,
                        'g' => 0o2000,
                        'o' => 0o1000,
                        _ => 0,
                    };
                }
                mode = (mode & !clear) | bits;
            }
            _ => unreachable!("operator validated above"),
        }
    }
    Ok(mode)
}

fn spread(perm: u32, whos: &[char]) -> u32 {
    whos.iter().fold(0, |acc, &who| acc | (perm << shift(who)))
}

fn shift(who: char) -> u32 {
    match who {
        'u' => 6,
        'g' => 3,
        _ => 0,
    }
}

fn invalid_mode(text: &str) -> ShellError {
    ShellError::invalid_argument(format!("chmod: invalid mode: '{text}'"))
}

#[cfg(unix)]
fn mode_bits(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_bits(meta: &fs::Metadata) -> u32 {
    if meta.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

#[cfg(unix)]
fn apply_mode(path: &std::path::Path, meta: fs::Metadata, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = meta.permissions();
    perms.set_mode(mode);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn apply_mode(path: &std::path::Path, meta: fs::Metadata, mode: u32) -> std::io::Result<()> {
    let mut perms = meta.permissions();
    perms.set_readonly(mode & 0o200 == 0);
    fs::set_permissions(path, perms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lush_core::ErrorKind;

    #[test]
    fn octal_modes_parse_directly() {
        assert_eq!(parse_mode("755", 0).unwrap(), 0o755);
        assert_eq!(parse_mode("0644", 0o777).unwrap(), 0o644);
        assert_eq!(parse_mode("7", 0).unwrap(), 0o7);
    }

    #[test]
    fn symbolic_composition_matches_posix() {
        assert_eq!(parse_mode("u+x", 0o644).unwrap(), 0o744);
        assert_eq!(parse_mode("a-w", 0o666).unwrap(), 0o444);
        assert_eq!(parse_mode("go-rwx", 0o777).unwrap(), 0o700);
        assert_eq!(parse_mode("u=rw,go=r", 0o777).unwrap(), 0o644);
        assert_eq!(parse_mode("+x", 0o600).unwrap(), 0o711);
        assert_eq!(parse_mode("u=", 0o755).unwrap(), 0o055);
        assert_eq!(parse_mode("u+s", 0o755).unwrap(), 0o4755);
        assert_eq!(parse_mode("+t", 0o777).unwrap(), 0o1777);
    }

    #[test]
    fn clauses_apply_left_to_right() {
        assert_eq!(parse_mode("a=rw,u+x,o-w", 0o000).unwrap(), 0o764);
    }

    #[test]
    fn neither_grammar_is_invalid_argument() {
        for bad in ["abc", "u*x", "8", "u+q", "", "u", "99999"] {
            let err = parse_mode(bad, 0o644).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidArgument, "mode {bad:?}");
        }
    }

    #[cfg(unix)]
    mod on_disk {
        use super::*;
        use std::collections::HashMap;
        use std::fs;
        use tempfile::tempdir;

        fn mode_of(path: &std::path::Path) -> u32 {
            use std::os::unix::fs::PermissionsExt;
            fs::metadata(path).unwrap().permissions().mode() & 0o777
        }

        fn chmod(root: &std::path::Path, mode: &str, file: &str) -> lush_core::ShellResult<()> {
            let ctx = crate::test_support::context_with_env(
                vec![mode.to_string(), file.to_string()],
                root,
                HashMap::new(),
            );
            run(&ctx)
        }

        #[test]
        fn octal_round_trip() {
            let root = tempdir().unwrap();
            fs::write(root.path().join("f"), "").unwrap();

            chmod(root.path(), "755", "f").unwrap();
            assert_eq!(mode_of(&root.path().join("f")), 0o755);

            chmod(root.path(), "000", "f").unwrap();
            chmod(root.path(), "644", "f").unwrap();
            assert_eq!(mode_of(&root.path().join("f")), 0o644);
        }

        #[test]
        fn symbolic_builds_on_current_bits() {
            let root = tempdir().unwrap();
            fs::write(root.path().join("f"), "").unwrap();

            chmod(root.path(), "644", "f").unwrap();
            chmod(root.path(), "u+x", "f").unwrap();
            assert_eq!(mode_of(&root.path().join("f")), 0o744);

            chmod(root.path(), "666", "f").unwrap();
            chmod(root.path(), "a-w", "f").unwrap();
            assert_eq!(mode_of(&root.path().join("f")), 0o444);
        }

        #[test]
        fn bad_mode_leaves_the_file_unchanged() {
            let root = tempdir().unwrap();
            fs::write(root.path().join("f"), "").unwrap();
            chmod(root.path(), "640", "f").unwrap();

            let err = chmod(root.path(), "abc", "f").unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidArgument);
            assert_eq!(mode_of(&root.path().join("f")), 0o640);
        }

        #[test]
        fn missing_file_is_not_found() {
            let root = tempdir().unwrap();
            let err = chmod(root.path(), "755", "ghost").unwrap_err();
            assert_eq!(err.kind, ErrorKind::NotFound);
        }
    }
}
