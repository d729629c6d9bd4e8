use crate::gate::{evaluate_required, upgrade_route, SubscriptionState};
use crate::modal::{EntityRecord, FieldErrors, FieldKind, FormDraft, FormSchema};
use crate::shared::FeatureId;
use crate::shell::navigation::{clamp_selection, ModalFieldKind, NavState, ShellScreen};
use crate::workspace::{ViewDescriptor, WorkspaceController};

/// Gate check for one sidebar view. A view without a tier requirement is
/// never locked.
pub fn view_is_locked(view: &ViewDescriptor, subscription: &SubscriptionState) -> bool {
    view.requires_tier
        .map(|tier| evaluate_required(tier, subscription).locked)
        .unwrap_or(false)
}

/// Upgrade destination for a gated view. View ids and feature ids share one
/// identifier grammar, so a registered view always yields a route.
pub fn view_upgrade_route(view: &ViewDescriptor) -> String {
    FeatureId::parse(view.id.as_str())
        .map(|feature| upgrade_route(&feature))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarRow {
    pub label: String,
    pub icon: String,
    pub locked: bool,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarViewModel {
    pub rows: Vec<SidebarRow>,
    pub selected: Option<usize>,
}

pub fn project_sidebar(
    controller: &WorkspaceController,
    subscription: &SubscriptionState,
    nav: &NavState,
) -> SidebarViewModel {
    let active_id = controller.current().id.clone();
    let rows = controller
        .registry()
        .views()
        .map(|view| SidebarRow {
            label: view.label.clone(),
            icon: view.icon.as_str().to_string(),
            locked: view_is_locked(view, subscription),
            active: view.id == active_id,
        })
        .collect();
    SidebarViewModel {
        rows,
        selected: (nav.screen == ShellScreen::Sidebar).then_some(nav.selected),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentViewModel {
    pub title: String,
    pub lines: Vec<String>,
    pub locked: bool,
}

pub fn project_content(
    controller: &WorkspaceController,
    subscription: &SubscriptionState,
    records: &[EntityRecord],
) -> ContentViewModel {
    let view = controller.current();
    if view_is_locked(view, subscription) {
        let required = view
            .requires_tier
            .map(|tier| tier.to_string())
            .unwrap_or_default();
        return ContentViewModel {
            title: view.label.clone(),
            lines: vec![
                format!("{} requires the {} tier.", view.label, required),
                format!(
                    "Your subscription: {} ({}).",
                    subscription.tier, subscription.status
                ),
                format!("Press u to upgrade: {}", view_upgrade_route(view)),
            ],
            locked: true,
        };
    }

    let mut lines = Vec::new();
    if records.is_empty() {
        lines.push("No records created this session.".to_string());
        lines.push("Press n to open the creation form.".to_string());
    } else {
        lines.push(format!("{} record(s) created this session:", records.len()));
        for record in records {
            lines.push(format_record_line(record));
        }
    }
    ContentViewModel {
        title: view.label.clone(),
        lines,
        locked: false,
    }
}

fn format_record_line(record: &EntityRecord) -> String {
    let values = record
        .values
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(", ");
    if values.is_empty() {
        format!("{} ({})", record.id, record.form)
    } else {
        format!("{} ({}): {}", record.id, record.form, values)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalFieldRow {
    pub label: String,
    pub value: String,
    pub required: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalViewModel {
    pub title: String,
    pub rows: Vec<ModalFieldRow>,
    pub selected: usize,
    pub submitting: bool,
}

pub fn project_modal(
    schema: &FormSchema,
    draft: &FormDraft,
    errors: &FieldErrors,
    nav: &NavState,
    submitting: bool,
) -> ModalViewModel {
    let rows = schema
        .fields
        .iter()
        .map(|field| ModalFieldRow {
            label: field.label.clone(),
            value: draft.get(&field.name).cloned().unwrap_or_default(),
            required: field.required,
            error: errors.get(&field.name).cloned(),
        })
        .collect();
    ModalViewModel {
        title: schema.title.clone(),
        rows,
        selected: clamp_selection(nav.selected, schema.fields.len()),
        submitting,
    }
}

/// Field shapes in schema order, for the navigation layer's Enter dispatch.
/// Number fields are edited through the same line prompt as text.
pub fn modal_nav_fields(schema: &FormSchema) -> Vec<ModalFieldKind> {
    schema
        .fields
        .iter()
        .map(|field| match field.kind {
            FieldKind::Text { .. } | FieldKind::Number { .. } => ModalFieldKind::Text,
            FieldKind::Flag => ModalFieldKind::Flag,
            FieldKind::Choice { .. } => ModalFieldKind::Choice,
        })
        .collect()
}
