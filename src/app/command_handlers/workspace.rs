use crate::config::{load_global_settings, load_workspace};
use crate::shell::{default_state_root_path, view_is_locked};
use crate::shared::append_shell_log;
use crate::workspace::{InitOutcome, WorkspaceController};

pub fn cmd_views(args: &[String]) -> Result<String, String> {
    let Some(workspace_arg) = args.first() else {
        return Err("usage: views <workspace>".to_string());
    };
    let settings = load_global_settings().map_err(|e| e.to_string())?;
    let (workspace_id, workspace) =
        load_workspace(&settings, workspace_arg).map_err(|e| e.to_string())?;
    let registry = workspace.build_registry().map_err(|e| e.to_string())?;

    let mut lines = vec![format!(
        "workspace `{workspace_id}`: {} view(s)",
        registry.len()
    )];
    for view in registry.views() {
        let mut markers = String::new();
        if view.id == registry.default_view().id {
            markers.push_str(" (default)");
        }
        if view_is_locked(view, &settings.subscription) {
            markers.push_str(" [locked]");
        }
        lines.push(format!(
            "  {} {:<20} {}{}",
            view.icon, view.id, view.label, markers
        ));
    }
    Ok(lines.join("\n"))
}

pub fn cmd_route(args: &[String]) -> Result<String, String> {
    let (Some(workspace_arg), Some(hint_raw)) = (args.first(), args.get(1)) else {
        return Err("usage: route <workspace> <view-hint>".to_string());
    };
    let settings = load_global_settings().map_err(|e| e.to_string())?;
    let (workspace_id, workspace) =
        load_workspace(&settings, workspace_arg).map_err(|e| e.to_string())?;
    let registry = workspace.build_registry().map_err(|e| e.to_string())?;
    let mut controller = WorkspaceController::new(registry);

    // a hint that fails to decode cannot name a view (`%` is outside the id
    // grammar), so it falls through the unknown-hint path as raw text
    let hint = match urlencoding::decode(hint_raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => hint_raw.to_string(),
    };
    match controller.initialize(Some(&hint)) {
        InitOutcome::HintApplied(view) => Ok(format!(
            "workspace `{workspace_id}` routes `{hint}` to view `{view}`"
        )),
        InitOutcome::UnknownHint { requested } => {
            let landing = controller.current().id.clone();
            if let Ok(state_root) = default_state_root_path() {
                append_shell_log(
                    &state_root,
                    "info",
                    "view_hint_fallback",
                    &format!("hint `{requested}` is not registered; landing on `{landing}`"),
                );
            }
            Ok(format!(
                "hint `{requested}` is not registered; workspace `{workspace_id}` falls back to view `{landing}`"
            ))
        }
        InitOutcome::NoHint => Ok(format!(
            "workspace `{workspace_id}` lands on view `{}`",
            controller.current().id
        )),
    }
}
