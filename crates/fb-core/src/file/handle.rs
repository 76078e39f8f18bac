//! Item references, live native handles and named directory slots.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// Kind of a referenced item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "file" => Some(EntryKind::File),
            "directory" => Some(EntryKind::Directory),
            _ => None,
        }
    }
}

/// Access mode requested for a directory or permission operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    Read,
    ReadWrite,
}

/// Outcome of a permission query or request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The host would show a prompt before granting.
    Prompt,
}

/// Opaque live reference handed out by a native host.
///
/// Handles are host-managed live objects, not data: they cannot be
/// serialized and are kept in a dedicated in-memory registry collection,
/// retrieved by identifier lookup rather than reconstruction. Only the
/// reported name and kind are visible to the core.
#[derive(Clone)]
pub struct NativeHandle {
    name: String,
    kind: EntryKind,
    raw: Arc<dyn Any + Send + Sync>,
}

impl NativeHandle {
    pub fn new(name: impl Into<String>, kind: EntryKind, raw: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            name: name.into(),
            kind,
            raw,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Recover the host's concrete handle type. Host ports downcast their
    /// own handles; core code never inspects the payload.
    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.raw.downcast_ref::<T>()
    }
}

impl fmt::Debug for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeHandle")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Item reference kept in the recent list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredHandle {
    pub id: ItemId,
    pub name: String,
    /// Only meaningful for path-addressable backends.
    pub path: Option<String>,
    pub kind: EntryKind,
    /// Wall-clock capture time in milliseconds, used only for ordering.
    pub captured_at_ms: i64,
}

/// Named (keyed) directory reference.
///
/// A preference slot, not a history entry: set/get/remove only, never
/// subject to pruning. The key namespace is distinct from generated item
/// identifiers.
#[derive(Debug, Clone)]
pub struct NamedDirectory {
    pub key: String,
    pub name: String,
    pub path: Option<String>,
    pub kind: EntryKind,
    pub captured_at_ms: i64,
    /// Live handle, present only while the host that produced it is alive.
    pub handle: Option<NativeHandle>,
}
