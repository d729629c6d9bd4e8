use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};

const SIDEBAR_STATUS_TEXT: &str = "Enter opens the selected view. q quits.";
const SIDEBAR_HINT_TEXT: &str = "Up/Down move | Enter open | Esc back | n create | u upgrade | q quit";
const CONTENT_STATUS_TEXT: &str = "Esc returns to the sidebar.";
const CONTENT_HINT_TEXT: &str = "Esc sidebar | n create | u upgrade | q quit";
const MODAL_STATUS_TEXT: &str = "Enter edits the selected field. s submits.";
const MODAL_HINT_TEXT: &str = "Up/Down move | Enter edit | s submit | Esc cancel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellScreen {
    Sidebar,
    Content,
    Modal,
}

pub const ALL_SHELL_SCREENS: [ShellScreen; 3] = [
    ShellScreen::Sidebar,
    ShellScreen::Content,
    ShellScreen::Modal,
];

impl ShellScreen {
    fn as_str(self) -> &'static str {
        match self {
            ShellScreen::Sidebar => "sidebar",
            ShellScreen::Content => "content",
            ShellScreen::Modal => "modal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    MovePrev,
    MoveNext,
    Enter,
    Back,
    Create,
    Submit,
    Upgrade,
    Quit,
    ReconcileSelection(usize),
}

impl ShellAction {
    fn as_str(self) -> &'static str {
        match self {
            ShellAction::MovePrev => "move_prev",
            ShellAction::MoveNext => "move_next",
            ShellAction::Enter => "enter",
            ShellAction::Back => "back",
            ShellAction::Create => "create",
            ShellAction::Submit => "submit",
            ShellAction::Upgrade => "upgrade",
            ShellAction::Quit => "quit",
            ShellAction::ReconcileSelection(_) => "reconcile_selection",
        }
    }
}

/// Field shape as the navigation layer sees it. Enter maps to a different
/// effect per shape; the form module owns the full field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalFieldKind {
    Text,
    Flag,
    Choice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    pub screen: ShellScreen,
    pub selected: usize,
    pub status_text: String,
    pub hint_text: String,
}

impl NavState {
    pub fn sidebar() -> Self {
        Self {
            screen: ShellScreen::Sidebar,
            selected: 0,
            status_text: SIDEBAR_STATUS_TEXT.to_string(),
            hint_text: SIDEBAR_HINT_TEXT.to_string(),
        }
    }

    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = clamp_selection(self.selected, len);
    }

    pub fn focus_sidebar(&mut self, selected: usize) {
        self.screen = ShellScreen::Sidebar;
        self.selected = selected;
        self.status_text = SIDEBAR_STATUS_TEXT.to_string();
        self.hint_text = SIDEBAR_HINT_TEXT.to_string();
    }

    pub fn focus_content(&mut self) {
        self.screen = ShellScreen::Content;
        self.selected = 0;
        self.status_text = CONTENT_STATUS_TEXT.to_string();
        self.hint_text = CONTENT_HINT_TEXT.to_string();
    }

    pub fn focus_modal(&mut self) {
        self.screen = ShellScreen::Modal;
        self.selected = 0;
        self.status_text = MODAL_STATUS_TEXT.to_string();
        self.hint_text = MODAL_HINT_TEXT.to_string();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellNavEffect {
    None,
    FocusSidebar,
    SelectView(usize),
    HistoryBack,
    OpenModal,
    EditField(usize),
    ToggleField(usize),
    CycleChoice(usize),
    SubmitModal,
    CancelModal,
    RequestUpgrade,
    QuitShell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellTransition {
    pub effect: ShellNavEffect,
    pub feedback: Option<String>,
}

impl ShellTransition {
    fn no_op(feedback: Option<String>) -> Self {
        Self {
            effect: ShellNavEffect::None,
            feedback,
        }
    }

    fn effect(effect: ShellNavEffect) -> Self {
        Self {
            effect,
            feedback: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellNavError {
    InvalidTransition {
        screen: ShellScreen,
        action: ShellAction,
    },
}

impl std::fmt::Display for ShellNavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellNavError::InvalidTransition { screen, action } => {
                write!(
                    f,
                    "invalid shell transition: screen={} action={}",
                    screen.as_str(),
                    action.as_str()
                )
            }
        }
    }
}

pub fn clamp_selection(selected: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    selected.min(len - 1)
}

pub fn shell_action_from_key(
    screen: ShellScreen,
    key: crossterm::event::KeyEvent,
) -> Option<ShellAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(ShellAction::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(ShellAction::MovePrev),
        KeyCode::Down | KeyCode::Char('j') => Some(ShellAction::MoveNext),
        KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => Some(ShellAction::Enter),
        KeyCode::Esc => Some(ShellAction::Back),
        KeyCode::Char('n') if screen != ShellScreen::Modal => Some(ShellAction::Create),
        KeyCode::Char('s') if screen == ShellScreen::Modal => Some(ShellAction::Submit),
        KeyCode::Char('u') if screen != ShellScreen::Modal => Some(ShellAction::Upgrade),
        KeyCode::Char('q') => Some(ShellAction::Quit),
        _ => None,
    }
}

pub fn parse_scripted_shell_keys(raw: &str) -> Result<Vec<crossterm::event::KeyEvent>, String> {
    let mut keys = Vec::new();
    for token in raw.split(',') {
        let normalized = token.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            continue;
        }
        if let Some(rest) = normalized.strip_prefix("char:") {
            let mut chars = rest.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(format!(
                    "invalid CREWDECK_SHELL_SCRIPT_KEYS token `{normalized}`; char: takes exactly one character"
                ));
            };
            keys.push(crossterm::event::KeyEvent::new(
                KeyCode::Char(ch),
                KeyModifiers::NONE,
            ));
            continue;
        }
        let key = match normalized.as_str() {
            "up" => crossterm::event::KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            "down" => crossterm::event::KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            "enter" => crossterm::event::KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            "esc" => crossterm::event::KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            "backspace" => crossterm::event::KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            "ctrl-c" => crossterm::event::KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            "n" => crossterm::event::KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE),
            "s" => crossterm::event::KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE),
            "u" => crossterm::event::KeyEvent::new(KeyCode::Char('u'), KeyModifiers::NONE),
            "q" => crossterm::event::KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            "j" => crossterm::event::KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE),
            "k" => crossterm::event::KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE),
            other => {
                return Err(format!(
                    "invalid CREWDECK_SHELL_SCRIPT_KEYS token `{other}`; valid tokens: up,down,enter,esc,backspace,ctrl-c,n,s,u,q,j,k,char:<ch>"
                ));
            }
        };
        keys.push(key);
    }
    Ok(keys)
}

pub fn shell_transition(
    state: &mut NavState,
    action: ShellAction,
    view_count: usize,
    modal_fields: &[ModalFieldKind],
) -> Result<ShellTransition, ShellNavError> {
    if let ShellAction::ReconcileSelection(len) = action {
        let previous = state.selected;
        state.clamp_selection(len);
        if previous != state.selected {
            return Ok(ShellTransition::no_op(Some(
                "selection adjusted".to_string(),
            )));
        }
        return Ok(ShellTransition::no_op(None));
    }

    match state.screen {
        ShellScreen::Sidebar => match action {
            ShellAction::MovePrev => {
                state.selected = state.selected.saturating_sub(1);
                Ok(ShellTransition::no_op(None))
            }
            ShellAction::MoveNext => {
                let max_index = view_count.saturating_sub(1);
                state.selected = std::cmp::min(state.selected + 1, max_index);
                Ok(ShellTransition::no_op(None))
            }
            ShellAction::Enter => {
                let selected = state.selected;
                state.focus_content();
                Ok(ShellTransition::effect(ShellNavEffect::SelectView(
                    selected,
                )))
            }
            ShellAction::Back => Ok(ShellTransition::effect(ShellNavEffect::HistoryBack)),
            ShellAction::Create => Ok(ShellTransition::effect(ShellNavEffect::OpenModal)),
            ShellAction::Upgrade => Ok(ShellTransition::effect(ShellNavEffect::RequestUpgrade)),
            ShellAction::Quit => Ok(ShellTransition::effect(ShellNavEffect::QuitShell)),
            ShellAction::Submit | ShellAction::ReconcileSelection(_) => {
                Err(ShellNavError::InvalidTransition {
                    screen: state.screen,
                    action,
                })
            }
        },
        ShellScreen::Content => match action {
            ShellAction::MovePrev | ShellAction::MoveNext => Ok(ShellTransition::no_op(None)),
            ShellAction::Enter => Ok(ShellTransition::no_op(None)),
            ShellAction::Back => {
                let selected = state.selected;
                state.focus_sidebar(selected);
                Ok(ShellTransition::effect(ShellNavEffect::FocusSidebar))
            }
            ShellAction::Create => Ok(ShellTransition::effect(ShellNavEffect::OpenModal)),
            ShellAction::Upgrade => Ok(ShellTransition::effect(ShellNavEffect::RequestUpgrade)),
            ShellAction::Quit => Ok(ShellTransition::effect(ShellNavEffect::QuitShell)),
            ShellAction::Submit | ShellAction::ReconcileSelection(_) => {
                Err(ShellNavError::InvalidTransition {
                    screen: state.screen,
                    action,
                })
            }
        },
        ShellScreen::Modal => match action {
            ShellAction::MovePrev => {
                state.selected = state.selected.saturating_sub(1);
                Ok(ShellTransition::no_op(None))
            }
            ShellAction::MoveNext => {
                let max_index = modal_fields.len().saturating_sub(1);
                state.selected = std::cmp::min(state.selected + 1, max_index);
                Ok(ShellTransition::no_op(None))
            }
            ShellAction::Enter => {
                let selected = clamp_selection(state.selected, modal_fields.len());
                let effect = match modal_fields.get(selected) {
                    Some(ModalFieldKind::Text) => ShellNavEffect::EditField(selected),
                    Some(ModalFieldKind::Flag) => ShellNavEffect::ToggleField(selected),
                    Some(ModalFieldKind::Choice) => ShellNavEffect::CycleChoice(selected),
                    None => return Ok(ShellTransition::no_op(None)),
                };
                Ok(ShellTransition::effect(effect))
            }
            ShellAction::Submit => Ok(ShellTransition::effect(ShellNavEffect::SubmitModal)),
            ShellAction::Back => Ok(ShellTransition::effect(ShellNavEffect::CancelModal)),
            ShellAction::Quit => Ok(ShellTransition::effect(ShellNavEffect::QuitShell)),
            ShellAction::Create | ShellAction::Upgrade | ShellAction::ReconcileSelection(_) => {
                Err(ShellNavError::InvalidTransition {
                    screen: state.screen,
                    action,
                })
            }
        },
    }
}

/// Row count of the list the selection cursor moves over on each screen.
pub fn shell_screen_item_count(
    screen: ShellScreen,
    view_count: usize,
    modal_field_count: usize,
) -> usize {
    match screen {
        ShellScreen::Sidebar => view_count,
        ShellScreen::Content => 0,
        ShellScreen::Modal => modal_field_count,
    }
}
