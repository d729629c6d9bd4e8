/// Complete settings document written by `crewdeck init`. Kept as a literal
/// so the comments survive into the user's file.
pub fn starter_settings_yaml() -> &'static str {
    r#"# crewdeck settings
#
# Workspaces group the views shown in the shell sidebar. A view with
# `requires_tier` is locked until the subscription reaches that tier; the
# workspace default view must stay ungated so the shell always has an
# accessible place to land.
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

# Feature ids map to the tier that unlocks them. A feature missing from this
# table is locked for every subscription.
features:
  applicant-insights: premium
  bulk-invitations: executive

# Creation form schemas, keyed by form id. Field kinds: text, number, flag,
# choice.
forms:
  job-posting:
    title: New job posting
    fields:
      - name: title
        label: Title
        required: true
        kind: { type: text, min_len: 3, max_len: 120 }
      - name: remote
        label: Remote friendly
        required: false
        kind: { type: flag }
      - name: seniority
        label: Seniority
        required: true
        kind: { type: choice, options: [junior, mid, senior] }

# Subscription snapshot, normally maintained by the billing integration.
subscription:
  tier: free
  status: active
  renews_at: 1772323200
"#
}
