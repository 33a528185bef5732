//! Logical current-directory tracking and path resolution.
//!
//! The shell's notion of "where we are" lives here rather than in the
//! process working directory: `cd` mutates this state, `pwd` reads it, and
//! every path-accepting command turns user input into a real filesystem
//! path through [`Vfs::resolve`]. Centralizing resolution keeps all of them
//! agreeing on one set of semantics.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::error::{ShellError, ShellResult};

/// Shared logical-directory state.
///
/// Constructed once at startup and handed to every [`CommandContext`]
/// (`crate::context::CommandContext`) by shared reference. The stored path
/// is always absolute and normalized: no `.` or `..` segments, no trailing
/// separator except for the root itself. Only [`Vfs::change_dir`] mutates
/// it, and the swap happens entirely under the write lock, so concurrent
/// readers on background job threads never observe a half-updated path.
#[derive(Debug)]
pub struct Vfs {
    state: RwLock<DirState>,
}

#[derive(Debug)]
struct DirState {
    current: PathBuf,
    previous: Option<PathBuf>,
}

impl Vfs {
    /// Construct from the working directory of the process.
    pub fn new() -> ShellResult<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::with_current_dir(cwd))
    }

    /// Construct rooted at an explicit absolute directory. The path is
    /// normalized but not verified; tests use this to build independent
    /// instances without touching process state.
    pub fn with_current_dir(dir: impl Into<PathBuf>) -> Self {
        let current = normalize(&dir.into());
        Self {
            state: RwLock::new(DirState {
                current,
                previous: None,
            }),
        }
    }

    /// The current logical directory. No side effects, never fails.
    pub fn current_dir(&self) -> PathBuf {
        self.read().current.clone()
    }

    /// The directory that was current before the last successful
    /// [`Vfs::change_dir`], if any. Serves `cd -`.
    pub fn previous_dir(&self) -> Option<PathBuf> {
        self.read().previous.clone()
    }

    /// Resolve `input` against the current directory without touching state
    /// or the filesystem: absolute input replaces the base, relative input
    /// is joined, and `.`/`..` segments collapse lexically. Idempotent on
    /// already-absolute, already-normalized input.
    pub fn resolve(&self, input: impl AsRef<Path>) -> PathBuf {
        let input = input.as_ref();
        if input.as_os_str().is_empty() {
            return self.current_dir();
        }
        if input.is_absolute() {
            normalize(input)
        } else {
            normalize(&self.current_dir().join(input))
        }
    }

    /// Change the logical directory.
    ///
    /// The target is resolved with the same rule as [`Vfs::resolve`], then
    /// verified to denote an existing, readable directory. Only on success
    /// is the stored path replaced; any failure leaves the state exactly as
    /// it was, with a `NotFound`, `NotADirectory` or `PermissionDenied`
    /// error kind describing the reason.
    pub fn change_dir(&self, target: impl AsRef<Path>) -> ShellResult<()> {
        let target = target.as_ref();
        let mut state = self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let resolved = if target.is_absolute() {
            normalize(target)
        } else {
            normalize(&state.current.join(target))
        };
        verify_directory(&resolved)?;
        tracing::debug!(from = %state.current.display(), to = %resolved.display(), "cd");
        state.previous = Some(std::mem::replace(&mut state.current, resolved));
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, DirState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Check that `path` is an existing directory we can actually enter.
/// `read_dir` is the portable readability probe.
fn verify_directory(path: &Path) -> ShellResult<()> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ShellError::not_found(path.display()));
        }
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
            return Err(ShellError::permission_denied(path.display()));
        }
        Err(err) => return Err(err.into()),
    };
    if !meta.is_dir() {
        return Err(ShellError::not_a_directory(path.display()));
    }
    match fs::read_dir(path) {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
            Err(ShellError::permission_denied(path.display()))
        }
        Err(err) => Err(err.into()),
    }
}

/// Lexical normalization: collapse `.` and `..`, drop trailing separators.
/// `..` at the root stays at the root, as POSIX resolves `/..` to `/`.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(name) => out.push(name),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(Component::RootDir.as_os_str());
    }
    out
}
