use crate::config::{default_global_config_path, load_global_settings};
use crate::templates::starter_settings_yaml;
use std::fs;

pub fn cmd_init() -> Result<String, String> {
    let path = default_global_config_path().map_err(|e| e.to_string())?;
    if path.exists() {
        return Ok(format!("settings already exist at {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }
    fs::write(&path, starter_settings_yaml())
        .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    Ok(format!("wrote starter settings to {}", path.display()))
}

pub fn cmd_check() -> Result<String, String> {
    let path = default_global_config_path().map_err(|e| e.to_string())?;
    let settings = load_global_settings().map_err(|e| e.to_string())?;

    let view_count: usize = settings
        .workspaces
        .values()
        .map(|workspace| workspace.views.len())
        .sum();
    let gated_count: usize = settings
        .workspaces
        .values()
        .flat_map(|workspace| workspace.views.iter())
        .filter(|view| view.requires_tier.is_some())
        .count();

    Ok(format!(
        "settings at {} are valid\n{} workspace(s), {} view(s) ({} gated), {} form(s), {} gated feature(s)\nsubscription: {} ({})",
        path.display(),
        settings.workspaces.len(),
        view_count,
        gated_count,
        settings.forms.len(),
        settings.features.len(),
        settings.subscription.tier,
        settings.subscription.status,
    ))
}
