pub mod controller;
pub mod registry;

pub use controller::{InitOutcome, WorkspaceController, HISTORY_LIMIT};
pub use registry::{RegistryError, ViewDescriptor, ViewRegistry};
