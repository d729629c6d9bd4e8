use std::fs;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::{atomic_write_file, ViewId, WorkspaceId};
use crate::shell::paths::ShellPaths;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to create state path {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to resolve home directory for state root")]
    HomeDirectoryUnavailable,
    #[error("failed to read session state {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse session state {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("failed to encode session state {path}: {source}")]
    Encode {
        path: String,
        source: serde_json::Error,
    },
    #[error("failed to write session state {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Last shell position for one workspace, written on exit and offered as the
/// starting view on the next open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub workspace: WorkspaceId,
    pub active_view: ViewId,
    #[serde(default)]
    pub history: Vec<ViewId>,
    pub saved_at: i64,
}

pub fn save_session(paths: &ShellPaths, snapshot: &SessionSnapshot) -> Result<(), SessionError> {
    let path = paths.session_path(&snapshot.workspace);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| SessionError::CreateDir {
            path: parent.display().to_string(),
            source,
        })?;
    }
    let bytes = serde_json::to_vec_pretty(snapshot).map_err(|source| SessionError::Encode {
        path: path.display().to_string(),
        source,
    })?;
    atomic_write_file(&path, &bytes).map_err(|source| SessionError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}

pub fn load_session(
    paths: &ShellPaths,
    workspace: &WorkspaceId,
) -> Result<Option<SessionSnapshot>, SessionError> {
    let path = paths.session_path(workspace);
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path).map_err(|source| SessionError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let snapshot = serde_json::from_str(&raw).map_err(|source| SessionError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Some(snapshot))
}
