//! Backend identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one of the four host file-access backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendId {
    /// Native desktop dialogs plus direct filesystem access.
    Desktop,
    /// Mobile filesystem plugin (picker + URI addressed I/O).
    Mobile,
    /// Capability-scoped live-handle host.
    ScopedHandle,
    /// Plain picker/download fallback with cached content only.
    Fallback,
}

impl BackendId {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendId::Desktop => "desktop",
            BackendId::Mobile => "mobile",
            BackendId::ScopedHandle => "scoped-handle",
            BackendId::Fallback => "fallback",
        }
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
