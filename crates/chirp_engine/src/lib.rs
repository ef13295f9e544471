//! Chirp engine: filesystem, platform and log collaborators plus the
//! driver that runs the core workflow against them.
mod activity;
mod lock;
mod oauth;
mod persist;
mod publish;
mod store;
mod types;
mod workflow;

pub use activity::{format_entry, ActivityLog, ActivityLogError, Clock};
pub use lock::{RunLock, LOCK_FILENAME};
pub use oauth::{Credentials, OAuthSigner};
pub use persist::ensure_dir;
pub use publish::{PublishSettings, Publisher, XPublisher};
pub use store::{Photo, PhotoStore, StoreError};
pub use types::{FailureKind, MediaId, PublishError, PublishStage};
pub use workflow::Workflow;
