//! Bridge configuration consumed at construction.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::file::BackendId;

fn default_max_recent() -> usize {
    10
}

fn default_true() -> bool {
    true
}

/// Configuration for a bridge instance.
///
/// The application identifier is required and namespaces the local store;
/// everything else has a sensible default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Application identifier used for store namespacing.
    pub app_id: String,

    /// Maximum number of recent items to keep before pruning.
    #[serde(default = "default_max_recent")]
    pub max_recent: usize,

    /// Whether captures persist to the recent list unless a call opts out.
    #[serde(default = "default_true")]
    pub persist_by_default: bool,

    /// Whether to prefer the capability-scoped handle backend when probing.
    #[serde(default = "default_true")]
    pub prefer_scoped_handles: bool,

    /// Skip probing and force this backend if its self-test passes.
    #[serde(default)]
    pub forced_backend: Option<BackendId>,

    /// Override of the store directory; defaults to the per-app data dir.
    #[serde(default)]
    pub store_dir: Option<PathBuf>,
}

impl BridgeConfig {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            max_recent: default_max_recent(),
            persist_by_default: true,
            prefer_scoped_handles: true,
            forced_backend: None,
            store_dir: None,
        }
    }

    pub fn with_max_recent(mut self, max_recent: usize) -> Self {
        self.max_recent = max_recent;
        self
    }

    pub fn with_forced_backend(mut self, backend: BackendId) -> Self {
        self.forced_backend = Some(backend);
        self
    }
}
