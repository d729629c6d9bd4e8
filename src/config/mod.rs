pub mod error;
pub mod load;
pub mod paths;
pub mod save;
pub mod settings;

pub use error::ConfigError;
pub use load::{load_global_settings, load_workspace};
pub use paths::{default_global_config_path, GLOBAL_SETTINGS_FILE_NAME, GLOBAL_STATE_DIR};
pub use save::save_settings;
pub use settings::{Settings, WorkspaceConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{SubscriptionStatus, Tier};
    use crate::shared::{FeatureId, FormId, ViewId};
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const FIXTURE: &str = r#"
workspaces:
  hiring:
    label: Hiring
    default_view: posted-jobs
    views:
      - id: posted-jobs
        label: Posted jobs
        icon: briefcase
      - id: invitations
        label: Invitations
        icon: envelope
        requires_tier: premium
    creation_form: job-posting
features:
  applicant-insights: premium
  bulk-invitations: executive
forms:
  job-posting:
    title: New job posting
    fields:
      - name: title
        label: Title
        required: true
        kind: { type: text, min_len: 3, max_len: 120 }
      - name: seniority
        label: Seniority
        required: true
        kind: { type: choice, options: [junior, mid, senior] }
subscription:
  tier: free
  status: active
  renews_at: 1772323200
"#;

    #[test]
    fn fixture_parses_and_validates() {
        let settings: Settings = serde_yaml::from_str(FIXTURE).expect("parse settings");
        settings.validate().expect("validate settings");

        let hiring = settings
            .workspaces
            .values()
            .next()
            .expect("hiring workspace");
        assert_eq!(hiring.label, "Hiring");
        assert_eq!(hiring.default_view.as_str(), "posted-jobs");
        assert_eq!(hiring.views.len(), 2);
        assert_eq!(hiring.views[1].requires_tier, Some(Tier::Premium));
        assert_eq!(settings.subscription.tier, Tier::Free);
        assert_eq!(settings.subscription.status, SubscriptionStatus::Active);

        let feature = FeatureId::parse("bulk-invitations").expect("feature id");
        assert_eq!(
            settings.features.required_tier(&feature),
            Some(Tier::Executive)
        );
        let form_id = FormId::parse("job-posting").expect("form id");
        assert_eq!(
            settings.form(&form_id).map(|form| form.title.as_str()),
            Some("New job posting")
        );
    }

    #[test]
    fn build_registry_preserves_configured_order() {
        let settings: Settings = serde_yaml::from_str(FIXTURE).expect("parse settings");
        let hiring = settings.workspaces.values().next().expect("workspace");
        let registry = hiring.build_registry().expect("build registry");
        let ids: Vec<&str> = registry.views().map(|view| view.id.as_str()).collect();
        assert_eq!(ids, vec!["posted-jobs", "invitations"]);
        assert_eq!(registry.default_view().id.as_str(), "posted-jobs");
    }

    #[test]
    fn invalid_workspace_key_fails_to_parse() {
        let raw = FIXTURE.replace("  hiring:", "  \"hiring team\":");
        let err = serde_yaml::from_str::<Settings>(&raw).expect_err("bad key");
        assert!(err.to_string().contains("invalid workspace id"));
    }

    #[test]
    fn validate_rejects_missing_default_view() {
        let raw = FIXTURE.replace("default_view: posted-jobs", "default_view: pipeline");
        let settings: Settings = serde_yaml::from_str(&raw).expect("parse settings");
        let err = settings.validate().expect_err("missing default");
        assert!(err
            .to_string()
            .contains("default view `pipeline` is not among the registered views"));
    }

    #[test]
    fn validate_rejects_gated_default_view() {
        let raw = FIXTURE.replace("default_view: posted-jobs", "default_view: invitations");
        let settings: Settings = serde_yaml::from_str(&raw).expect("parse settings");
        let err = settings.validate().expect_err("gated default");
        assert!(err
            .to_string()
            .contains("must not require a subscription tier"));
    }

    #[test]
    fn validate_rejects_duplicate_view_ids() {
        let raw = FIXTURE.replace(
            "      - id: invitations",
            "      - id: posted-jobs\n        label: Dup\n        icon: copy\n      - id: invitations",
        );
        let settings: Settings = serde_yaml::from_str(&raw).expect("parse settings");
        let err = settings.validate().expect_err("duplicate view");
        assert!(err.to_string().contains("already registered"));
    }

    #[test]
    fn validate_rejects_unknown_creation_form() {
        let raw = FIXTURE.replace(
            "creation_form: job-posting",
            "creation_form: project-brief",
        );
        let settings: Settings = serde_yaml::from_str(&raw).expect("parse settings");
        let err = settings.validate().expect_err("unknown form");
        assert!(err
            .to_string()
            .contains("references unknown form `project-brief`"));
    }

    #[test]
    fn validate_rejects_empty_workspaces() {
        let settings: Settings = serde_yaml::from_str(
            r#"
workspaces: {}
subscription:
  tier: free
  status: active
  renews_at: 0
"#,
        )
        .expect("parse settings");
        let err = settings.validate().expect_err("no workspaces");
        assert!(err.to_string().contains("at least one workspace"));
    }

    #[test]
    fn load_workspace_resolves_or_reports_missing() {
        let settings: Settings = serde_yaml::from_str(FIXTURE).expect("parse settings");
        let (id, workspace) = load_workspace(&settings, "hiring").expect("resolve workspace");
        assert_eq!(id.as_str(), "hiring");
        assert_eq!(workspace.default_view, ViewId::parse("posted-jobs").expect("view id"));

        let err = load_workspace(&settings, "sales").expect_err("missing workspace");
        assert!(matches!(err, ConfigError::MissingWorkspace { .. }));
    }

    #[test]
    fn save_then_load_round_trips_through_home() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        let temp = tempdir().expect("tempdir");
        let _home_guard = HomeGuard::set(temp.path());

        let settings: Settings = serde_yaml::from_str(FIXTURE).expect("parse settings");
        let path = save_settings(&settings).expect("save settings");
        assert_eq!(
            path,
            temp.path().join(GLOBAL_STATE_DIR).join(GLOBAL_SETTINGS_FILE_NAME)
        );

        let loaded = load_global_settings().expect("load settings");
        assert_eq!(loaded.workspaces.len(), 1);
        assert_eq!(loaded.subscription.tier, Tier::Free);
    }

    #[test]
    fn from_path_reports_read_and_parse_errors_with_path() {
        let temp = tempdir().expect("tempdir");
        let missing = temp.path().join("absent.yaml");
        let err = Settings::from_path(&missing).expect_err("missing file");
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("absent.yaml"));

        let garbled = temp.path().join("garbled.yaml");
        std::fs::write(&garbled, "workspaces: [not, a, map]").expect("write fixture");
        let err = Settings::from_path(&garbled).expect_err("bad yaml");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("garbled.yaml"));
    }

    struct HomeGuard {
        old_home: Option<std::ffi::OsString>,
    }

    impl HomeGuard {
        fn set(home: &Path) -> Self {
            let old_home = std::env::var_os("HOME");
            std::env::set_var("HOME", home);
            Self { old_home }
        }
    }

    impl Drop for HomeGuard {
        fn drop(&mut self) {
            if let Some(old_home) = self.old_home.take() {
                std::env::set_var("HOME", old_home);
            } else {
                std::env::remove_var("HOME");
            }
        }
    }
}
