use super::registry::{RegistryError, ViewDescriptor, ViewRegistry};
use crate::shared::ViewId;
use std::collections::VecDeque;

/// Oldest history entries are dropped once the deque reaches this length.
pub const HISTORY_LIMIT: usize = 20;

/// Result of seeding the controller from an external hint. The controller
/// never fails to initialize; callers log the fallback cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    NoHint,
    HintApplied(ViewId),
    UnknownHint { requested: String },
}

/// Holds the active view for one mounted workspace. The active view is
/// always a registered one; transitions happen only through `initialize`,
/// `select` and `back`.
#[derive(Debug, Clone)]
pub struct WorkspaceController {
    registry: ViewRegistry,
    active_index: usize,
    history: VecDeque<ViewId>,
}

impl WorkspaceController {
    pub fn new(registry: ViewRegistry) -> Self {
        let active_index = registry
            .position(&registry.default_view().id)
            .unwrap_or(0);
        Self {
            registry,
            active_index,
            history: VecDeque::new(),
        }
    }

    /// Seeds the active view from an optional deep-link hint, consuming it
    /// once. Unknown or malformed hints fall back to the default view; the
    /// outcome reports which case occurred so the host can log it.
    pub fn initialize(&mut self, hint: Option<&str>) -> InitOutcome {
        self.history.clear();
        let Some(raw) = hint else {
            self.active_index = self.default_index();
            return InitOutcome::NoHint;
        };
        let resolved = ViewId::parse(raw)
            .ok()
            .and_then(|id| self.registry.position(&id));
        match resolved {
            Some(index) => {
                self.active_index = index;
                InitOutcome::HintApplied(self.registry.view_at(index).id.clone())
            }
            None => {
                self.active_index = self.default_index();
                InitOutcome::UnknownHint {
                    requested: raw.to_string(),
                }
            }
        }
    }

    /// Switches to a registered view, recording the previous one in the
    /// bounded history. Unknown ids leave the controller untouched.
    /// Re-selecting the active view is a no-op so repeated sidebar clicks
    /// cannot flood the history.
    pub fn select(&mut self, id: &ViewId) -> Result<&ViewDescriptor, RegistryError> {
        let index = self
            .registry
            .position(id)
            .ok_or_else(|| RegistryError::ViewNotFound { id: id.clone() })?;
        if index != self.active_index {
            let previous = self.registry.view_at(self.active_index).id.clone();
            self.push_history(previous);
            self.active_index = index;
        }
        Ok(self.registry.view_at(self.active_index))
    }

    /// Returns to the most recently recorded view, if any.
    pub fn back(&mut self) -> Option<&ViewDescriptor> {
        let previous = self.history.pop_back()?;
        let index = self.registry.position(&previous)?;
        self.active_index = index;
        Some(self.registry.view_at(self.active_index))
    }

    /// The resolved descriptor for the active view, never a raw id, so
    /// callers cannot render an unregistered view.
    pub fn current(&self) -> &ViewDescriptor {
        self.registry.view_at(self.active_index)
    }

    pub fn history(&self) -> impl Iterator<Item = &ViewId> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    /// Replays a previously saved history, skipping ids that no longer
    /// resolve. Used when restoring a session snapshot.
    pub fn seed_history(&mut self, ids: impl IntoIterator<Item = ViewId>) {
        self.history.clear();
        for id in ids {
            if self.registry.position(&id).is_some() {
                self.push_history(id);
            }
        }
    }

    fn push_history(&mut self, id: ViewId) {
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(id);
    }

    fn default_index(&self) -> usize {
        self.registry
            .position(&self.registry.default_view().id)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::IconRef;

    fn controller() -> WorkspaceController {
        let views = ["posted-jobs", "invitations", "messages"]
            .iter()
            .map(|id| ViewDescriptor {
                id: ViewId::parse(id).expect("view id"),
                label: id.to_string(),
                icon: IconRef::parse("dot").expect("icon"),
                requires_tier: None,
            })
            .collect();
        let registry = ViewRegistry::new(views, &ViewId::parse("posted-jobs").expect("view id"))
            .expect("registry");
        WorkspaceController::new(registry)
    }

    #[test]
    fn starts_on_the_default_view() {
        let controller = controller();
        assert_eq!(controller.current().id.as_str(), "posted-jobs");
    }

    #[test]
    fn initialize_applies_a_known_hint() {
        let mut controller = controller();
        let outcome = controller.initialize(Some("invitations"));
        assert_eq!(
            outcome,
            InitOutcome::HintApplied(ViewId::parse("invitations").expect("view id"))
        );
        assert_eq!(controller.current().id.as_str(), "invitations");
    }

    #[test]
    fn initialize_falls_back_on_unknown_hint() {
        let mut controller = controller();
        let outcome = controller.initialize(Some("bogus"));
        assert_eq!(
            outcome,
            InitOutcome::UnknownHint {
                requested: "bogus".to_string()
            }
        );
        assert_eq!(controller.current().id.as_str(), "posted-jobs");
    }

    #[test]
    fn initialize_falls_back_on_malformed_hint() {
        let mut controller = controller();
        let outcome = controller.initialize(Some("not a slug!"));
        assert!(matches!(outcome, InitOutcome::UnknownHint { .. }));
        assert_eq!(controller.current().id.as_str(), "posted-jobs");
    }

    #[test]
    fn select_updates_active_and_records_history() {
        let mut controller = controller();
        controller
            .select(&ViewId::parse("messages").expect("view id"))
            .expect("select");
        assert_eq!(controller.current().id.as_str(), "messages");
        let history: Vec<&str> = controller.history().map(|id| id.as_str()).collect();
        assert_eq!(history, vec!["posted-jobs"]);
    }

    #[test]
    fn select_unknown_id_leaves_state_unchanged() {
        let mut controller = controller();
        controller
            .select(&ViewId::parse("invitations").expect("view id"))
            .expect("select");
        let err = controller
            .select(&ViewId::parse("bogus").expect("view id"))
            .expect_err("unknown id must fail");
        assert!(matches!(err, RegistryError::ViewNotFound { .. }));
        assert_eq!(controller.current().id.as_str(), "invitations");
        assert_eq!(controller.history_len(), 1);
    }

    #[test]
    fn selecting_the_active_view_does_not_grow_history() {
        let mut controller = controller();
        let id = ViewId::parse("posted-jobs").expect("view id");
        controller.select(&id).expect("select");
        assert_eq!(controller.history_len(), 0);
    }

    #[test]
    fn history_drops_oldest_entries_past_the_limit() {
        let mut controller = controller();
        let ids = [
            ViewId::parse("invitations").expect("view id"),
            ViewId::parse("messages").expect("view id"),
            ViewId::parse("posted-jobs").expect("view id"),
        ];
        for step in 0..(HISTORY_LIMIT + 5) {
            controller.select(&ids[step % ids.len()]).expect("select");
        }
        assert_eq!(controller.history_len(), HISTORY_LIMIT);
    }

    #[test]
    fn back_returns_to_the_previous_view() {
        let mut controller = controller();
        controller
            .select(&ViewId::parse("invitations").expect("view id"))
            .expect("select");
        controller
            .select(&ViewId::parse("messages").expect("view id"))
            .expect("select");
        let landed = controller.back().expect("history entry");
        assert_eq!(landed.id.as_str(), "invitations");
        assert_eq!(controller.current().id.as_str(), "invitations");
        assert_eq!(controller.history_len(), 1);
    }

    #[test]
    fn back_on_empty_history_returns_none() {
        let mut controller = controller();
        assert!(controller.back().is_none());
    }

    #[test]
    fn initialize_clears_previous_history() {
        let mut controller = controller();
        controller
            .select(&ViewId::parse("messages").expect("view id"))
            .expect("select");
        controller.initialize(None);
        assert_eq!(controller.history_len(), 0);
        assert_eq!(controller.current().id.as_str(), "posted-jobs");
    }

    #[test]
    fn seed_history_skips_unknown_ids() {
        let mut controller = controller();
        controller.seed_history(vec![
            ViewId::parse("messages").expect("view id"),
            ViewId::parse("gone-view").expect("view id"),
            ViewId::parse("invitations").expect("view id"),
        ]);
        let history: Vec<&str> = controller.history().map(|id| id.as_str()).collect();
        assert_eq!(history, vec!["messages", "invitations"]);
    }
}
