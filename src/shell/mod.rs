pub mod navigation;
pub mod paths;
pub mod session;
pub mod sinks;
pub mod view_model;

pub use navigation::{
    clamp_selection, parse_scripted_shell_keys, shell_action_from_key, shell_screen_item_count,
    shell_transition, ModalFieldKind, NavState, ShellAction, ShellNavEffect, ShellNavError,
    ShellScreen, ShellTransition, ALL_SHELL_SCREENS,
};
pub use paths::{
    bootstrap_state_root, default_state_root_path, ShellPaths, DEFAULT_STATE_ROOT_DIR,
};
pub use session::{load_session, save_session, SessionError, SessionSnapshot};
pub use sinks::{
    NavigationSink, Notice, NoticeKind, NotificationSink, RouteRecorder, StatusNotifications,
    SubscriptionSource,
};
pub use view_model::{
    modal_nav_fields, project_content, project_modal, project_sidebar, view_is_locked,
    view_upgrade_route, ContentViewModel, ModalFieldRow, ModalViewModel, SidebarRow,
    SidebarViewModel,
};
