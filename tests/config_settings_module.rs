use crewdeck::config::Settings;
use crewdeck::gate::Tier;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_settings(body: &str) -> (tempfile::TempDir, PathBuf) {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("config.yaml");
    fs::write(&path, body).expect("write settings");
    (temp, path)
}

const VALID_SETTINGS: &str = r#"
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
forms:
  job-posting:
    title: New job posting
    fields:
      - name: title
        label: Title
        required: true
        kind: { type: text, min_len: 3 }
subscription:
  tier: premium
  status: trialing
  renews_at: 1772323200
"#;

#[test]
fn config_settings_module_parses_and_validates_a_full_document() {
    let (_temp, path) = write_settings(VALID_SETTINGS);
    let settings = Settings::from_path(&path).expect("parse settings");
    settings.validate().expect("valid settings");

    let workspace = settings.workspaces.values().next().expect("workspace");
    assert_eq!(workspace.label, "Hiring");
    assert_eq!(workspace.views.len(), 2);
    assert_eq!(
        workspace.views[1].requires_tier,
        Some(Tier::Premium),
        "tier names parse into the tier enum"
    );

    let registry = workspace.build_registry().expect("registry");
    assert_eq!(registry.default_view().id.as_str(), "posted-jobs");

    let form_id = workspace.creation_form.clone().expect("creation form");
    let schema = settings.form(&form_id).expect("schema");
    assert_eq!(schema.fields.len(), 1);
}

#[test]
fn config_settings_module_missing_file_reports_the_path() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("absent.yaml");
    let err = Settings::from_path(&path).expect_err("missing file");
    let message = err.to_string();
    assert!(message.contains("failed to read file"));
    assert!(message.contains("absent.yaml"));
}

#[test]
fn config_settings_module_bad_yaml_reports_a_parse_error() {
    let (_temp, path) = write_settings("workspaces: [not: a: mapping");
    let err = Settings::from_path(&path).expect_err("bad yaml");
    assert!(err.to_string().contains("invalid yaml in"));
}

#[test]
fn config_settings_module_requires_at_least_one_workspace() {
    let (_temp, path) = write_settings(
        r#"
workspaces: {}
subscription:
  tier: free
  status: active
  renews_at: 0
"#,
    );
    let settings = Settings::from_path(&path).expect("parse settings");
    let err = settings.validate().expect_err("no workspaces");
    assert!(err
        .to_string()
        .contains("`workspaces` must configure at least one workspace"));
}

#[test]
fn config_settings_module_rejects_a_gated_default_view() {
    let (_temp, path) = write_settings(
        r#"
workspaces:
  hiring:
    label: Hiring
    default_view: invitations
    views:
      - id: invitations
        label: Invitations
        icon: envelope
        requires_tier: premium
subscription:
  tier: free
  status: active
  renews_at: 0
"#,
    );
    let settings = Settings::from_path(&path).expect("parse settings");
    let err = settings.validate().expect_err("gated default");
    let message = err.to_string();
    assert!(message.contains("workspace `hiring`"));
    assert!(message.contains("must not require a subscription tier"));
}

#[test]
fn config_settings_module_rejects_an_unregistered_default_view() {
    let (_temp, path) = write_settings(
        r#"
workspaces:
  hiring:
    label: Hiring
    default_view: archive
    views:
      - id: posted-jobs
        label: Posted jobs
        icon: briefcase
subscription:
  tier: free
  status: active
  renews_at: 0
"#,
    );
    let settings = Settings::from_path(&path).expect("parse settings");
    let err = settings.validate().expect_err("unknown default");
    assert!(err
        .to_string()
        .contains("default view `archive` is not among the registered views"));
}

#[test]
fn config_settings_module_rejects_an_unknown_creation_form() {
    let (_temp, path) = write_settings(
        r#"
workspaces:
  hiring:
    label: Hiring
    default_view: posted-jobs
    views:
      - id: posted-jobs
        label: Posted jobs
        icon: briefcase
    creation_form: missing-form
subscription:
  tier: free
  status: active
  renews_at: 0
"#,
    );
    let settings = Settings::from_path(&path).expect("parse settings");
    let err = settings.validate().expect_err("unknown form");
    assert!(err
        .to_string()
        .contains("workspace `hiring` references unknown form `missing-form`"));
}

#[test]
fn config_settings_module_rejects_a_negative_renewal_timestamp() {
    let (_temp, path) = write_settings(
        r#"
workspaces:
  hiring:
    label: Hiring
    default_view: posted-jobs
    views:
      - id: posted-jobs
        label: Posted jobs
        icon: briefcase
subscription:
  tier: free
  status: active
  renews_at: -5
"#,
    );
    let settings = Settings::from_path(&path).expect("parse settings");
    let err = settings.validate().expect_err("negative renews_at");
    assert!(err
        .to_string()
        .contains("`subscription.renews_at` must be a unix timestamp >= 0"));
}
