use super::ConfigError;
use crate::gate::{FeaturePolicy, SubscriptionState};
use crate::modal::FormSchema;
use crate::shared::{FormId, ViewId, WorkspaceId};
use crate::workspace::{RegistryError, ViewDescriptor, ViewRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The whole settings file. Workspaces and the subscription snapshot are
/// required; the feature table and form catalog may be absent.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub workspaces: BTreeMap<WorkspaceId, WorkspaceConfig>,
    #[serde(default)]
    pub features: FeaturePolicy,
    #[serde(default)]
    pub forms: BTreeMap<FormId, FormSchema>,
    pub subscription: SubscriptionState,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkspaceConfig {
    pub label: String,
    pub default_view: ViewId,
    pub views: Vec<ViewDescriptor>,
    #[serde(default)]
    pub creation_form: Option<FormId>,
}

impl WorkspaceConfig {
    /// Builds the sidebar registry for this workspace, in configured order.
    pub fn build_registry(&self) -> Result<ViewRegistry, RegistryError> {
        ViewRegistry::new(self.views.clone(), &self.default_view)
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workspaces.is_empty() {
            return Err(ConfigError::Settings(
                "`workspaces` must configure at least one workspace".to_string(),
            ));
        }

        for (workspace_id, workspace) in &self.workspaces {
            if workspace.label.trim().is_empty() {
                return Err(ConfigError::Settings(format!(
                    "workspace `{workspace_id}` must have a non-empty label"
                )));
            }
            if workspace.views.is_empty() {
                return Err(ConfigError::Settings(format!(
                    "workspace `{workspace_id}` must declare at least one view"
                )));
            }
            workspace.build_registry().map_err(|err| {
                ConfigError::Settings(format!("workspace `{workspace_id}`: {err}"))
            })?;
            if let Some(form_id) = &workspace.creation_form {
                if !self.forms.contains_key(form_id) {
                    return Err(ConfigError::Settings(format!(
                        "workspace `{workspace_id}` references unknown form `{form_id}`"
                    )));
                }
            }
        }

        for (form_id, schema) in &self.forms {
            schema
                .validate()
                .map_err(|err| ConfigError::Settings(format!("form `{form_id}`: {err}")))?;
        }

        if self.subscription.renews_at < 0 {
            return Err(ConfigError::Settings(
                "`subscription.renews_at` must be a unix timestamp >= 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn form(&self, form_id: &FormId) -> Option<&FormSchema> {
        self.forms.get(form_id)
    }
}
