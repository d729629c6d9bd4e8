use crate::shared::time::now_secs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn shell_log_path(state_root: &Path) -> PathBuf {
    state_root.join("logs/shell.log")
}

/// Appends one JSON event line to the shell log. Logging failures are
/// swallowed; the shell must keep running without its log.
pub fn append_shell_log(state_root: &Path, level: &str, event: &str, message: &str) {
    let payload = serde_json::json!({
        "timestamp": now_secs(),
        "level": level,
        "event": event,
        "message": message,
    });

    let Ok(line) = serde_json::to_string(&payload) else {
        return;
    };

    let path = shell_log_path(state_root);
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let _ = writeln!(file, "{line}");
}
