pub mod fs_atomic;
pub mod ids;
pub mod logging;
pub mod serde_ext;
pub mod time;

pub use fs_atomic::atomic_write_file;
pub use ids::{
    validate_identifier_value, FeatureId, FieldName, FormId, IconRef, ViewId, WorkspaceId,
};
pub use logging::{append_shell_log, shell_log_path};
pub use serde_ext::parse_via_string;
pub use time::now_secs;
