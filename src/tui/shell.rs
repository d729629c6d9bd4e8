use crate::config::{load_workspace, Settings};
use crate::gate::SubscriptionState;
use crate::modal::{
    allocate_record_id, validate_draft, EntityRecord, FieldErrors, FieldKind, FormSchema,
    ModalController, ModalError, SubmitOutcome,
};
use crate::shared::{append_shell_log, now_secs, FieldName, FormId, WorkspaceId};
use crate::shell::{
    bootstrap_state_root, default_state_root_path, load_session, modal_nav_fields,
    parse_scripted_shell_keys, project_content, project_modal, project_sidebar, save_session,
    shell_action_from_key, shell_screen_item_count, shell_transition, view_is_locked,
    view_upgrade_route, ContentViewModel, ModalFieldKind, ModalViewModel, NavState,
    NavigationSink, Notice, NotificationSink, RouteRecorder, SessionSnapshot, ShellAction,
    ShellNavEffect, ShellPaths, SidebarViewModel, StatusNotifications, SubscriptionSource,
};
use crate::workspace::{InitOutcome, WorkspaceController};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, Padding, Paragraph, Row, Table,
};
use ratatui::{Frame, Terminal};
use std::io::{self, IsTerminal};
use std::time::Duration;

pub(crate) fn cmd_open(args: &[String]) -> Result<String, String> {
    let Some(workspace_arg) = args.first() else {
        return Err("usage: open <workspace> [view-hint]".to_string());
    };
    let hint = args.get(1).cloned();

    let state_root = default_state_root_path().map_err(|e| e.to_string())?;
    let paths = ShellPaths::new(state_root);
    bootstrap_state_root(&paths).map_err(|e| e.to_string())?;
    let settings = load_settings_at(&paths)?;

    let mut state = build_shell_state(paths, &settings, workspace_arg)?;
    seed_initial_view(&mut state, hint.as_deref());

    if let Some(scripted_keys) = load_scripted_shell_keys()? {
        run_shell_scripted(&mut state, scripted_keys)?;
    } else if is_interactive_shell() {
        run_shell_tui(&mut state)?;
    } else {
        return Err(
            "open requires an interactive terminal; set CREWDECK_SHELL_SCRIPT_KEYS for scripted runs"
                .to_string(),
        );
    }
    finish_shell(&state)
}

struct ShellState {
    paths: ShellPaths,
    workspace_id: WorkspaceId,
    workspace_label: String,
    controller: WorkspaceController,
    modal: ModalController,
    form: Option<(FormId, FormSchema)>,
    subscription: SubscriptionState,
    records: Vec<EntityRecord>,
    errors: FieldErrors,
    notices: StatusNotifications,
    routes: RouteRecorder,
}

/// Marker returned by effect application when the loop should stop.
struct ShellExit;

fn is_interactive_shell() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

fn load_scripted_shell_keys() -> Result<Option<Vec<crossterm::event::KeyEvent>>, String> {
    let Ok(raw) = std::env::var("CREWDECK_SHELL_SCRIPT_KEYS") else {
        return Ok(None);
    };
    parse_scripted_shell_keys(&raw).map(Some)
}

fn load_settings_at(paths: &ShellPaths) -> Result<Settings, String> {
    let settings = Settings::from_path(&paths.settings_file()).map_err(|e| e.to_string())?;
    settings.validate().map_err(|e| e.to_string())?;
    Ok(settings)
}

fn build_shell_state(
    paths: ShellPaths,
    settings: &Settings,
    workspace_arg: &str,
) -> Result<ShellState, String> {
    let (workspace_id, workspace) =
        load_workspace(settings, workspace_arg).map_err(|e| e.to_string())?;
    let registry = workspace.build_registry().map_err(|e| e.to_string())?;
    let form = workspace.creation_form.as_ref().and_then(|form_id| {
        settings
            .form(form_id)
            .map(|schema| (form_id.clone(), schema.clone()))
    });
    Ok(ShellState {
        paths,
        workspace_id,
        workspace_label: workspace.label.clone(),
        controller: WorkspaceController::new(registry),
        modal: ModalController::new(),
        form,
        subscription: settings.subscription,
        records: Vec::new(),
        errors: FieldErrors::new(),
        notices: StatusNotifications::new(),
        routes: RouteRecorder::new(),
    })
}

/// Seeds the active view: an explicit hint wins, otherwise the saved session
/// snapshot, otherwise the workspace default. Fallbacks are logged, never
/// fatal.
fn seed_initial_view(state: &mut ShellState, hint: Option<&str>) {
    if let Some(raw) = hint {
        // an undecodable hint can never match a view id; treat it as unknown
        let hint = match urlencoding::decode(raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw.to_string(),
        };
        if let InitOutcome::UnknownHint { requested } =
            state.controller.initialize(Some(&hint))
        {
            append_shell_log(
                &state.paths.root,
                "info",
                "view_hint_fallback",
                &format!(
                    "hint `{requested}` is not registered; landing on `{}`",
                    state.controller.current().id
                ),
            );
        }
        return;
    }

    match load_session(&state.paths, &state.workspace_id) {
        Ok(Some(snapshot)) => match state
            .controller
            .initialize(Some(snapshot.active_view.as_str()))
        {
            InitOutcome::HintApplied(view) => {
                state.controller.seed_history(snapshot.history);
                append_shell_log(
                    &state.paths.root,
                    "info",
                    "view_restored",
                    &format!("restored view `{view}` from the session snapshot"),
                );
            }
            InitOutcome::UnknownHint { requested } => {
                append_shell_log(
                    &state.paths.root,
                    "info",
                    "session_restore_fallback",
                    &format!(
                        "saved view `{requested}` is not registered; landing on `{}`",
                        state.controller.current().id
                    ),
                );
            }
            InitOutcome::NoHint => {}
        },
        Ok(None) => {
            state.controller.initialize(None);
        }
        Err(err) => {
            state.controller.initialize(None);
            append_shell_log(
                &state.paths.root,
                "error",
                "session_restore_fallback",
                &format!("session snapshot unreadable: {err}"),
            );
        }
    }
}

fn finish_shell(state: &ShellState) -> Result<String, String> {
    let snapshot = SessionSnapshot {
        workspace: state.workspace_id.clone(),
        active_view: state.controller.current().id.clone(),
        history: state.controller.history().cloned().collect(),
        saved_at: now_secs(),
    };
    save_session(&state.paths, &snapshot).map_err(|e| e.to_string())?;
    append_shell_log(
        &state.paths.root,
        "info",
        "shell_exit",
        &format!("session saved with view `{}`", snapshot.active_view),
    );
    Ok(format!(
        "session saved for workspace `{}` (view `{}`)",
        snapshot.workspace, snapshot.active_view
    ))
}

fn run_shell_tui(state: &mut ShellState) -> Result<(), String> {
    let mut stdout = io::stdout();
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    execute!(stdout, EnterAlternateScreen, Hide)
        .map_err(|e| format!("failed to enter shell screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create shell terminal: {e}"))?;
    let result = run_shell_tui_loop(state, &mut terminal);
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), Show, LeaveAlternateScreen)
        .map_err(|e| format!("failed to leave shell screen: {e}"))?;
    result
}

fn run_shell_tui_loop(
    state: &mut ShellState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), String> {
    let mut nav = NavState::sidebar();
    loop {
        let modal_fields = active_modal_fields(state);
        let view_count = state.controller.registry().len();
        let item_count = shell_screen_item_count(nav.screen, view_count, modal_fields.len());
        let transition = shell_transition(
            &mut nav,
            ShellAction::ReconcileSelection(item_count),
            view_count,
            &modal_fields,
        )
        .map_err(|err| err.to_string())?;
        if let Some(feedback) = transition.feedback {
            nav.status_text = feedback;
        }
        draw_shell(terminal, state, &nav)?;
        if !event::poll(Duration::from_millis(250))
            .map_err(|e| format!("failed to poll shell input: {e}"))?
        {
            continue;
        }
        let ev = event::read().map_err(|e| format!("failed to read shell input: {e}"))?;
        let Event::Key(key) = ev else {
            continue;
        };
        let Some(action) = shell_action_from_key(nav.screen, key) else {
            continue;
        };
        let transition = match shell_transition(&mut nav, action, view_count, &modal_fields) {
            Ok(transition) => transition,
            Err(err) => {
                nav.status_text = err.to_string();
                continue;
            }
        };
        if let Some(feedback) = transition.feedback {
            nav.status_text = feedback;
        }
        if apply_shell_effect_tui(terminal, state, &mut nav, transition.effect)?.is_some() {
            return Ok(());
        }
        drain_notices(state, &mut nav);
    }
}

fn run_shell_scripted(
    state: &mut ShellState,
    scripted_keys: Vec<crossterm::event::KeyEvent>,
) -> Result<(), String> {
    let mut nav = NavState::sidebar();
    let mut keys = scripted_keys.into_iter();
    while let Some(key) = keys.next() {
        let modal_fields = active_modal_fields(state);
        let view_count = state.controller.registry().len();
        let item_count = shell_screen_item_count(nav.screen, view_count, modal_fields.len());
        let reconcile = shell_transition(
            &mut nav,
            ShellAction::ReconcileSelection(item_count),
            view_count,
            &modal_fields,
        )
        .map_err(|err| err.to_string())?;
        if let Some(feedback) = reconcile.feedback {
            nav.status_text = feedback;
        }
        let Some(action) = shell_action_from_key(nav.screen, key) else {
            continue;
        };
        let transition = match shell_transition(&mut nav, action, view_count, &modal_fields) {
            Ok(transition) => transition,
            Err(err) => {
                nav.status_text = err.to_string();
                continue;
            }
        };
        if let Some(feedback) = transition.feedback {
            nav.status_text = feedback;
        }
        if apply_shell_effect_scripted(state, &mut nav, &mut keys, transition.effect)?.is_some() {
            return Ok(());
        }
        drain_notices(state, &mut nav);
    }
    Err("scripted shell did not terminate; include a quit key".to_string())
}

fn active_modal_fields(state: &ShellState) -> Vec<ModalFieldKind> {
    if !state.modal.is_open() {
        return Vec::new();
    }
    state
        .form
        .as_ref()
        .map(|(_, schema)| modal_nav_fields(schema))
        .unwrap_or_default()
}

fn drain_notices(state: &mut ShellState, nav: &mut NavState) {
    for notice in state.notices.drain() {
        nav.status_text = format!("{}: {}", notice.title, notice.description);
    }
}

fn apply_shell_effect_tui(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut ShellState,
    nav: &mut NavState,
    effect: ShellNavEffect,
) -> Result<Option<ShellExit>, String> {
    match effect {
        ShellNavEffect::None => Ok(None),
        ShellNavEffect::FocusSidebar => {
            focus_active_view_row(state, nav);
            Ok(None)
        }
        ShellNavEffect::SelectView(index) => {
            select_view(state, nav, index);
            Ok(None)
        }
        ShellNavEffect::HistoryBack => {
            history_back(state, nav);
            Ok(None)
        }
        ShellNavEffect::OpenModal => {
            open_modal(state, nav);
            Ok(None)
        }
        ShellNavEffect::EditField(index) => {
            if let Some((name, label, current)) = field_prompt_seed(state, index) {
                if let Some(value) = prompt_line_tui(terminal, &label, &current)? {
                    edit_field(state, nav, name, value);
                }
            }
            Ok(None)
        }
        ShellNavEffect::ToggleField(index) => {
            toggle_field(state, nav, index);
            Ok(None)
        }
        ShellNavEffect::CycleChoice(index) => {
            cycle_choice(state, nav, index);
            Ok(None)
        }
        ShellNavEffect::SubmitModal => {
            submit_modal(state, nav);
            Ok(None)
        }
        ShellNavEffect::CancelModal => {
            cancel_modal(state, nav);
            Ok(None)
        }
        ShellNavEffect::RequestUpgrade => {
            request_upgrade(state, nav);
            Ok(None)
        }
        ShellNavEffect::QuitShell => Ok(Some(ShellExit)),
    }
}

fn apply_shell_effect_scripted(
    state: &mut ShellState,
    nav: &mut NavState,
    keys: &mut std::vec::IntoIter<crossterm::event::KeyEvent>,
    effect: ShellNavEffect,
) -> Result<Option<ShellExit>, String> {
    match effect {
        ShellNavEffect::None => Ok(None),
        ShellNavEffect::FocusSidebar => {
            focus_active_view_row(state, nav);
            Ok(None)
        }
        ShellNavEffect::SelectView(index) => {
            select_view(state, nav, index);
            Ok(None)
        }
        ShellNavEffect::HistoryBack => {
            history_back(state, nav);
            Ok(None)
        }
        ShellNavEffect::OpenModal => {
            open_modal(state, nav);
            Ok(None)
        }
        ShellNavEffect::EditField(index) => {
            if let Some((name, _, current)) = field_prompt_seed(state, index) {
                if let Some(value) = scripted_prompt(keys, &current) {
                    edit_field(state, nav, name, value);
                }
            }
            Ok(None)
        }
        ShellNavEffect::ToggleField(index) => {
            toggle_field(state, nav, index);
            Ok(None)
        }
        ShellNavEffect::CycleChoice(index) => {
            cycle_choice(state, nav, index);
            Ok(None)
        }
        ShellNavEffect::SubmitModal => {
            submit_modal(state, nav);
            Ok(None)
        }
        ShellNavEffect::CancelModal => {
            cancel_modal(state, nav);
            Ok(None)
        }
        ShellNavEffect::RequestUpgrade => {
            request_upgrade(state, nav);
            Ok(None)
        }
        ShellNavEffect::QuitShell => Ok(Some(ShellExit)),
    }
}

/// Scripted analog of the line prompt: consumes keys from the script until
/// Enter commits or Esc abandons the edit.
fn scripted_prompt(
    keys: &mut std::vec::IntoIter<crossterm::event::KeyEvent>,
    initial: &str,
) -> Option<String> {
    let mut value = initial.to_string();
    for key in keys.by_ref() {
        if key.kind == KeyEventKind::Release {
            continue;
        }
        match key.code {
            KeyCode::Esc => return None,
            KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => return Some(value),
            KeyCode::Backspace => {
                value.pop();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => value.push(ch),
            _ => {}
        }
    }
    None
}

/// Re-points the sidebar cursor at the active view after focus returns from
/// the content pane.
fn focus_active_view_row(state: &ShellState, nav: &mut NavState) {
    let registry = state.controller.registry();
    nav.selected = registry
        .position(&state.controller.current().id)
        .unwrap_or(0);
}

fn select_view(state: &mut ShellState, nav: &mut NavState, index: usize) {
    let Some(id) = state
        .controller
        .registry()
        .views()
        .nth(index)
        .map(|view| view.id.clone())
    else {
        return;
    };
    let subscription = state.subscription.subscription_state();
    match state.controller.select(&id) {
        Ok(view) => {
            nav.status_text = if view_is_locked(view, &subscription) {
                format!("view `{}` is locked; press u to upgrade", view.id)
            } else {
                format!("view `{}` opened", view.id)
            };
        }
        Err(err) => nav.status_text = err.to_string(),
    }
}

fn history_back(state: &mut ShellState, nav: &mut NavState) {
    nav.status_text = match state.controller.back() {
        Some(view) => format!("returned to `{}`", view.id),
        None => "history is empty".to_string(),
    };
}

fn open_modal(state: &mut ShellState, nav: &mut NavState) {
    if state.form.is_none() {
        nav.status_text = "no creation form configured for this workspace".to_string();
        return;
    }
    match state.modal.open(None) {
        Ok(()) => {
            revalidate(state);
            nav.focus_modal();
        }
        Err(err) => nav.status_text = err.to_string(),
    }
}

fn field_prompt_seed(state: &ShellState, index: usize) -> Option<(FieldName, String, String)> {
    let (_, schema) = state.form.as_ref()?;
    let field = schema.fields.get(index)?;
    let current = state
        .modal
        .draft()
        .and_then(|draft| draft.get(&field.name).cloned())
        .unwrap_or_default();
    Some((field.name.clone(), field.label.clone(), current))
}

fn set_draft_field(state: &mut ShellState, name: FieldName, value: String) -> Result<(), ModalError> {
    state.modal.set_field(name, value)?;
    revalidate(state);
    Ok(())
}

fn revalidate(state: &mut ShellState) {
    let errors = match (state.form.as_ref(), state.modal.draft()) {
        (Some((_, schema)), Some(draft)) => match validate_draft(schema, draft) {
            Ok(_) => FieldErrors::new(),
            Err(errors) => errors,
        },
        _ => FieldErrors::new(),
    };
    state.errors = errors;
}

fn edit_field(state: &mut ShellState, nav: &mut NavState, name: FieldName, value: String) {
    nav.status_text = match set_draft_field(state, name, value) {
        Ok(()) => "field updated".to_string(),
        Err(err) => err.to_string(),
    };
}

fn toggle_field(state: &mut ShellState, nav: &mut NavState, index: usize) {
    let Some((name, label, current)) = field_prompt_seed(state, index) else {
        return;
    };
    let value = toggled_flag(&current);
    nav.status_text = match set_draft_field(state, name, value.clone()) {
        Ok(()) => format!("{label} set to {value}"),
        Err(err) => err.to_string(),
    };
}

fn cycle_choice(state: &mut ShellState, nav: &mut NavState, index: usize) {
    let Some((_, schema)) = state.form.as_ref() else {
        return;
    };
    let Some(field) = schema.fields.get(index) else {
        return;
    };
    let FieldKind::Choice { options } = &field.kind else {
        return;
    };
    let current = state
        .modal
        .draft()
        .and_then(|draft| draft.get(&field.name).cloned())
        .unwrap_or_default();
    let Some(value) = next_choice(options, &current) else {
        return;
    };
    let name = field.name.clone();
    let label = field.label.clone();
    nav.status_text = match set_draft_field(state, name, value.clone()) {
        Ok(()) => format!("{label} set to {value}"),
        Err(err) => err.to_string(),
    };
}

fn toggled_flag(current: &str) -> String {
    match current.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" => "no".to_string(),
        _ => "yes".to_string(),
    }
}

fn next_choice(options: &[String], current: &str) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let next = match options.iter().position(|option| option == current.trim()) {
        Some(index) => (index + 1) % options.len(),
        None => 0,
    };
    options.get(next).cloned()
}

fn submit_modal(state: &mut ShellState, nav: &mut NavState) {
    let Some((form_id, schema)) = state.form.clone() else {
        nav.status_text = "no creation form configured for this workspace".to_string();
        return;
    };
    let Some(draft) = state.modal.draft() else {
        nav.status_text = ModalError::NotOpen.to_string();
        return;
    };
    let values = match validate_draft(&schema, draft) {
        Ok(values) => values,
        Err(errors) => {
            state.errors = errors;
            nav.status_text = "fix the highlighted fields before submitting".to_string();
            return;
        }
    };

    let now = now_secs();
    let ShellState {
        modal, records, ..
    } = state;
    let outcome = modal.submit(|_draft| {
        let id = allocate_record_id(records, now)?;
        records.push(EntityRecord {
            id,
            form: form_id.clone(),
            values,
            created_at: now,
        });
        Ok(())
    });

    match outcome {
        Ok(SubmitOutcome::Completed) => {
            state.errors.clear();
            let created = state
                .records
                .last()
                .map(|record| record.id.clone())
                .unwrap_or_default();
            let notice = Notice::success("Record created", format!("{created} ({form_id})"));
            append_shell_log(
                &state.paths.root,
                notice.kind.log_level(),
                "modal_submit_ok",
                &notice.description,
            );
            state.notices.notify(&notice);
            nav.focus_content();
        }
        Ok(SubmitOutcome::Failed(message)) => {
            let notice = Notice::error("Submission failed", message);
            append_shell_log(
                &state.paths.root,
                notice.kind.log_level(),
                "modal_submit_failed",
                &notice.description,
            );
            state.notices.notify(&notice);
        }
        Err(err) => nav.status_text = err.to_string(),
    }
}

fn cancel_modal(state: &mut ShellState, nav: &mut NavState) {
    match state.modal.cancel() {
        Ok(()) => {
            state.errors.clear();
            state.routes.go_back();
            nav.focus_content();
            nav.status_text = "creation canceled".to_string();
        }
        Err(err) => nav.status_text = err.to_string(),
    }
}

fn request_upgrade(state: &mut ShellState, nav: &mut NavState) {
    let subscription = state.subscription.subscription_state();
    let view = state.controller.current().clone();
    if !view_is_locked(&view, &subscription) {
        nav.status_text = format!("view `{}` is not locked", view.id);
        return;
    }
    state.routes.go_to(&view_upgrade_route(&view));
    for route in state.routes.drain_routes() {
        append_shell_log(&state.paths.root, "info", "upgrade_requested", &route);
        nav.status_text = format!("upgrade requested: {route}");
    }
}

fn draw_shell(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &ShellState,
    nav: &NavState,
) -> Result<(), String> {
    let subscription = state.subscription.subscription_state();
    let sidebar = project_sidebar(&state.controller, &subscription, nav);
    let content = project_content(&state.controller, &subscription, &state.records);
    let modal = match (state.modal.is_open(), state.form.as_ref(), state.modal.draft()) {
        (true, Some((_, schema)), Some(draft)) => Some(project_modal(
            schema,
            draft,
            &state.errors,
            nav,
            state.modal.is_submitting(),
        )),
        _ => None,
    };

    terminal
        .draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(8),
                    Constraint::Length(4),
                ])
                .split(frame.area());

            let header = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Crewdeck Shell",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("Workspace: {}", state.workspace_label)),
            ])
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(header, chunks[0]);

            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
                .split(chunks[1]);
            draw_sidebar_pane(frame, &sidebar, panes[0]);
            draw_content_pane(frame, &content, panes[1]);

            let footer = Paragraph::new(vec![
                Line::from(nav.hint_text.clone()),
                Line::from(format!("Status: {}", nav.status_text)),
            ])
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(footer, chunks[2]);

            if let Some(modal) = &modal {
                draw_modal_overlay(frame, modal);
            }
        })
        .map_err(|e| format!("failed to render shell: {e}"))?;
    Ok(())
}

fn draw_sidebar_pane(frame: &mut Frame<'_>, view_model: &SidebarViewModel, area: Rect) {
    let mut items = Vec::with_capacity(view_model.rows.len());
    for (idx, row) in view_model.rows.iter().enumerate() {
        let mut text = format!("{} {}", row.icon, row.label);
        if row.locked {
            text.push_str(" [locked]");
        }
        if row.active {
            text.push_str(" (active)");
        }
        let mut item = ListItem::new(Line::from(Span::raw(text)));
        if view_model.selected == Some(idx) {
            item = item.style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }
        items.push(item);
    }
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::new(1, 1, 1, 1)),
    );
    frame.render_widget(list, area);
}

fn draw_content_pane(frame: &mut Frame<'_>, view_model: &ContentViewModel, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            view_model.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for text in &view_model.lines {
        lines.push(Line::from(text.clone()));
    }
    frame.render_widget(Paragraph::new(lines).block(main_panel_block()), area);
}

fn draw_modal_overlay(frame: &mut Frame<'_>, view_model: &ModalViewModel) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .padding(Padding::new(2, 2, 1, 1));
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);
    let rows_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            view_model.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))),
        rows_layout[0],
    );

    let table_rows = view_model.rows.iter().enumerate().map(|(idx, row)| {
        let label = if row.required {
            format!("{} *", row.label)
        } else {
            row.label.clone()
        };
        let value = match &row.error {
            Some(err) => format!("{}  ({err})", row.value),
            None => row.value.clone(),
        };
        let style = if idx == view_model.selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if row.error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        Row::new(vec![Cell::from(label), Cell::from(value)]).style(style)
    });
    let table = Table::new(
        table_rows,
        [Constraint::Percentage(35), Constraint::Percentage(65)],
    )
    .column_spacing(2);
    frame.render_widget(table, rows_layout[2]);

    let footer = if view_model.submitting {
        "Submitting, input blocked"
    } else {
        "Enter edit | s submit | Esc cancel"
    };
    frame.render_widget(Paragraph::new(footer), rows_layout[3]);
}

fn main_panel_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .padding(Padding::new(3, 3, 2, 2))
}

fn prompt_line_tui(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    title: &str,
    initial: &str,
) -> Result<Option<String>, String> {
    let mut value = initial.to_string();
    loop {
        terminal
            .draw(|frame| {
                let area = centered_rect(70, 30, frame.area());
                frame.render_widget(Clear, area);
                let block = Block::default()
                    .borders(Borders::ALL)
                    .padding(Padding::new(2, 2, 1, 1));
                frame.render_widget(block.clone(), area);
                let inner = block.inner(area);
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Min(1),
                    ])
                    .split(inner);
                let max_input_width = rows[2].width.saturating_sub(2) as usize;
                let display_value = tail_for_display(&value, max_input_width);

                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        title,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))),
                    rows[0],
                );
                frame.render_widget(
                    Paragraph::new(Line::from(format!("> {display_value}"))),
                    rows[2],
                );
                frame.render_widget(Paragraph::new("Enter apply | Esc cancel"), rows[3]);
                frame.set_cursor_position((
                    rows[2].x + 2 + display_value.chars().count() as u16,
                    rows[2].y,
                ));
            })
            .map_err(|e| format!("failed to render prompt: {e}"))?;
        let ev = event::read().map_err(|e| format!("failed to read prompt input: {e}"))?;
        let Event::Key(key) = ev else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        match key.code {
            KeyCode::Esc => return Ok(None),
            KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => return Ok(Some(value)),
            KeyCode::Backspace => {
                value.pop();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => value.push(ch),
            _ => {}
        }
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn tail_for_display(value: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max_chars {
        return value.to_string();
    }
    chars[chars.len() - max_chars..].iter().collect()
}
