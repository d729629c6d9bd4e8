use crate::gate::SubscriptionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    pub fn log_level(self) -> &'static str {
        match self {
            NoticeKind::Info | NoticeKind::Success => "info",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NoticeKind::Info,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NoticeKind::Error,
        }
    }
}

pub trait NotificationSink {
    fn notify(&mut self, notice: &Notice);
}

pub trait NavigationSink {
    fn go_to(&mut self, path: &str);
    fn go_back(&mut self);
}

pub trait SubscriptionSource {
    fn subscription_state(&self) -> SubscriptionState;
}

impl SubscriptionSource for SubscriptionState {
    fn subscription_state(&self) -> SubscriptionState {
        *self
    }
}

/// Queue drained by the shell loop into the status line and event log.
#[derive(Debug, Default)]
pub struct StatusNotifications {
    pending: Vec<Notice>,
}

impl StatusNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }
}

impl NotificationSink for StatusNotifications {
    fn notify(&mut self, notice: &Notice) {
        self.pending.push(notice.clone());
    }
}

/// Records navigation requests so the host can surface or replay them. The
/// shell has no browser; an upgrade route becomes a logged request plus a
/// status-line pointer.
#[derive(Debug, Default)]
pub struct RouteRecorder {
    pub routes: Vec<String>,
    pub back_count: usize,
}

impl RouteRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain_routes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.routes)
    }
}

impl NavigationSink for RouteRecorder {
    fn go_to(&mut self, path: &str) {
        self.routes.push(path.to_string());
    }

    fn go_back(&mut self) {
        self.back_count += 1;
    }
}
