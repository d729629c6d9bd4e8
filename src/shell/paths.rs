use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::WorkspaceId;
use crate::shell::session::SessionError;

pub const DEFAULT_STATE_ROOT_DIR: &str = ".crewdeck";

/// Filesystem layout under the shell state root. Session snapshots and the
/// event log both hang off one directory so a single bootstrap pass can
/// prepare everything the shell writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellPaths {
    pub root: PathBuf,
}

impl ShellPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn required_directories(&self) -> Vec<PathBuf> {
        vec![self.logs_dir(), self.session_dir()]
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join(crate::config::GLOBAL_SETTINGS_FILE_NAME)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn shell_log_path(&self) -> PathBuf {
        crate::shared::logging::shell_log_path(&self.root)
    }

    pub fn session_dir(&self) -> PathBuf {
        self.root.join("session")
    }

    pub fn session_path(&self, workspace: &WorkspaceId) -> PathBuf {
        self.session_dir()
            .join(format!("{}.json", workspace.as_str()))
    }
}

pub fn default_state_root_path() -> Result<PathBuf, SessionError> {
    let home = std::env::var_os("HOME").ok_or(SessionError::HomeDirectoryUnavailable)?;
    Ok(Path::new(&home).join(DEFAULT_STATE_ROOT_DIR))
}

pub fn bootstrap_state_root(paths: &ShellPaths) -> Result<(), SessionError> {
    for dir in paths.required_directories() {
        fs::create_dir_all(&dir).map_err(|source| SessionError::CreateDir {
            path: dir.display().to_string(),
            source,
        })?;
    }
    Ok(())
}
