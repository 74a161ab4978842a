use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use engine_core::EngineError;
use serde::{Deserialize, Serialize};

use crate::protocol::DEFAULT_TABLE_SIZE;

/// How to reach the backend and where to leave its files.
///
/// Every field has a default, so an empty TOML table is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalEngineConfig {
    /// Name reported to the harness
    pub name: String,
    /// Backend executable; a leading `~/` is the user's home directory
    pub command: PathBuf,
    /// Extra arguments passed to the backend
    pub args: Vec<String>,
    /// Where `input-<n>.txt` / `output-<n>.txt` are written
    pub scratch_dir: PathBuf,
    /// Value of `setoption table_size`
    pub table_size: u64,
}

impl Default for ExternalEngineConfig {
    fn default() -> Self {
        Self {
            name: "Engine".to_string(),
            command: PathBuf::from("~/bin/engine"),
            args: Vec::new(),
            scratch_dir: PathBuf::from("temp"),
            table_size: DEFAULT_TABLE_SIZE,
        }
    }
}

impl ExternalEngineConfig {
    pub fn with_command(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    /// The backend path with `~/` expanded against `$HOME`.
    pub fn resolved_command(&self) -> Result<PathBuf, EngineError> {
        expand_home(&self.command, env::var_os("HOME"))
    }
}

fn expand_home(path: &Path, home: Option<OsString>) -> Result<PathBuf, EngineError> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };
    let home = home.filter(|h| !h.is_empty()).ok_or_else(|| {
        EngineError::Configuration(format!(
            "{} refers to the home directory but HOME is not set",
            path.display()
        ))
    })?;
    Ok(PathBuf::from(home).join(rest))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
