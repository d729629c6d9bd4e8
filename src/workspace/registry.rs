use crate::gate::Tier;
use crate::shared::{IconRef, ViewId};
use serde::{Deserialize, Serialize};

/// One selectable content pane. Descriptors are immutable once registered;
/// the registry owns the sidebar order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDescriptor {
    pub id: ViewId,
    pub label: String,
    pub icon: IconRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_tier: Option<Tier>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("view `{id}` is already registered")]
    DuplicateView { id: ViewId },
    #[error("view `{id}` is not registered")]
    ViewNotFound { id: ViewId },
    #[error("default view `{id}` is not among the registered views")]
    DefaultViewMissing { id: ViewId },
    #[error("default view `{id}` must not require a subscription tier")]
    DefaultViewGated { id: ViewId },
}

/// Write-once mapping from view id to descriptor, in sidebar order. The
/// default view always resolves and is never tier-gated, so falling back to
/// it cannot fail or land on locked content.
#[derive(Debug, Clone)]
pub struct ViewRegistry {
    views: Vec<ViewDescriptor>,
    default_index: usize,
}

impl ViewRegistry {
    pub fn new(views: Vec<ViewDescriptor>, default_id: &ViewId) -> Result<Self, RegistryError> {
        for (idx, view) in views.iter().enumerate() {
            if views[..idx].iter().any(|other| other.id == view.id) {
                return Err(RegistryError::DuplicateView {
                    id: view.id.clone(),
                });
            }
        }
        let default_index = views
            .iter()
            .position(|view| &view.id == default_id)
            .ok_or_else(|| RegistryError::DefaultViewMissing {
                id: default_id.clone(),
            })?;
        if views[default_index].requires_tier.is_some() {
            return Err(RegistryError::DefaultViewGated {
                id: default_id.clone(),
            });
        }
        Ok(Self {
            views,
            default_index,
        })
    }

    /// Appends a descriptor after construction. Existing positions are
    /// stable; only duplicate ids are rejected.
    pub fn register(&mut self, descriptor: ViewDescriptor) -> Result<(), RegistryError> {
        if self.views.iter().any(|view| view.id == descriptor.id) {
            return Err(RegistryError::DuplicateView { id: descriptor.id });
        }
        self.views.push(descriptor);
        Ok(())
    }

    pub fn resolve(&self, id: &ViewId) -> Result<&ViewDescriptor, RegistryError> {
        self.views
            .iter()
            .find(|view| &view.id == id)
            .ok_or_else(|| RegistryError::ViewNotFound { id: id.clone() })
    }

    pub fn position(&self, id: &ViewId) -> Option<usize> {
        self.views.iter().position(|view| &view.id == id)
    }

    pub fn default_view(&self) -> &ViewDescriptor {
        &self.views[self.default_index]
    }

    pub fn view_at(&self, index: usize) -> &ViewDescriptor {
        &self.views[index]
    }

    pub fn views(&self) -> impl Iterator<Item = &ViewDescriptor> {
        self.views.iter()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
