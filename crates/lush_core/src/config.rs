//! Shared shell configuration.
//!
//! Loaded once at startup from a TOML file and handed read-only to every
//! command through the context. Missing file means defaults; a file that
//! exists but fails to parse is a real error, so typos do not silently
//! reset the configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ErrorKind, ShellError, ShellResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Colored output toggle; commands consult this when formatting.
    pub color: bool,
    /// Prompt template. `{cwd}` expands to the logical directory.
    pub prompt: String,
    /// History file name, relative to the config directory.
    pub history_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: true,
            prompt: "{cwd}> ".to_string(),
            history_file: "history.txt".to_string(),
        }
    }
}

impl Config {
    /// Conventional location: `<user config dir>/lumenshell/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| dir.join("lumenshell").join("config.toml"))
    }

    /// Directory holding the config file and the history file.
    pub fn state_dir() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| dir.join("lumenshell"))
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> ShellResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        toml::from_str(&text).map_err(|err| {
            ShellError::new(
                ErrorKind::InvalidArgument,
                format!("{}: {err}", path.display()),
            )
        })
    }
}
