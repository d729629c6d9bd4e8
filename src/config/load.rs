use super::{default_global_config_path, ConfigError, Settings, WorkspaceConfig};
use crate::shared::WorkspaceId;

pub fn load_global_settings() -> Result<Settings, ConfigError> {
    let path = default_global_config_path()?;
    let settings = Settings::from_path(&path)?;
    settings.validate()?;
    Ok(settings)
}

pub fn load_workspace<'a>(
    settings: &'a Settings,
    workspace_id: &str,
) -> Result<(WorkspaceId, &'a WorkspaceConfig), ConfigError> {
    let id = WorkspaceId::parse(workspace_id).map_err(ConfigError::Settings)?;
    let workspace =
        settings
            .workspaces
            .get(&id)
            .ok_or_else(|| ConfigError::MissingWorkspace {
                workspace_id: workspace_id.to_string(),
            })?;
    Ok((id, workspace))
}
