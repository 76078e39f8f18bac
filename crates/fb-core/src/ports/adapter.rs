//! Platform adapter contract - the interface every backend satisfies.

use async_trait::async_trait;

use crate::error::{BridgeError, BridgeResult};
use crate::file::{
    AccessMode, BackendId, DirEntry, DirectoryValue, FileValue, NamedDirectory, OpenOptions,
    PermissionStatus, SaveContent, SaveOptions, StoredHandle,
};
use crate::ids::ItemId;

/// File-or-directory value a permission operation applies to.
#[derive(Debug, Clone, Copy)]
pub enum PermissionTarget<'a> {
    File(&'a FileValue),
    Directory(&'a DirectoryValue),
}

/// Contract implemented by each of the four host backends.
///
/// Optional capabilities (directories, entry loading, directory restore)
/// default to synthesized `not_supported` failures, and the corresponding
/// `supports_*` flags default to `false`; a backend that implements the
/// operation overrides both. Callers therefore never need to null-check
/// optional operations.
///
/// Every successful open/save that requests persistence writes through to
/// the local store before returning, under the same identifier surfaced to
/// the caller, so a later `list_recent`/`restore_file` can find it.
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    fn id(&self) -> BackendId;

    /// Capability self-test: pure, synchronous and side-effect-free.
    /// Answers "can this backend operate in the current host environment".
    fn is_supported(&self) -> bool;

    /// Reflects whether this instance implements the directory operations.
    fn supports_directories(&self) -> bool {
        false
    }

    /// Reflects whether this instance persists live native handles.
    fn supports_handle_persistence(&self) -> bool {
        false
    }

    /// Show the open picker and load the selected file(s).
    async fn open_files(&self, opts: OpenOptions) -> BridgeResult<Vec<FileValue>>;

    /// Overwrite an existing item in place. Fails with `not_supported`
    /// when the backend has no addressable target for the given item.
    async fn save_file(
        &self,
        file: &FileValue,
        content: SaveContent,
        persist: Option<bool>,
    ) -> BridgeResult<bool>;

    /// Save under a fresh target; always produces a new item reference.
    async fn save_file_as(&self, content: SaveContent, opts: SaveOptions)
        -> BridgeResult<FileValue>;

    async fn open_directory(
        &self,
        _mode: AccessMode,
        _persist: Option<bool>,
    ) -> BridgeResult<DirectoryValue> {
        Err(BridgeError::not_supported("open_directory"))
    }

    /// Lazily list a directory: metadata only, never content.
    async fn read_directory(&self, _dir: &DirectoryValue) -> BridgeResult<Vec<DirEntry>> {
        Err(BridgeError::not_supported("read_directory"))
    }

    /// Explicitly load one previously listed entry's content.
    async fn read_entry_content(
        &self,
        _dir: &DirectoryValue,
        _entry: &DirEntry,
    ) -> BridgeResult<FileValue> {
        Err(BridgeError::not_supported("read_entry_content"))
    }

    /// Recent item references, most recent first. Never mutates the list.
    async fn list_recent(&self) -> BridgeResult<Vec<StoredHandle>>;

    /// Restore a previously captured file. The restore strategy differs by
    /// backend capability class; each adapter documents its own.
    async fn restore_file(&self, item: &StoredHandle) -> BridgeResult<FileValue>;

    async fn restore_directory(
        &self,
        _item: &StoredHandle,
        _mode: AccessMode,
    ) -> BridgeResult<DirectoryValue> {
        Err(BridgeError::not_supported("restore_directory"))
    }

    async fn remove_recent(&self, id: &ItemId) -> BridgeResult<()>;

    async fn clear_recent(&self) -> BridgeResult<()>;

    /// Permission operations are meaningful only on the capability-scoped
    /// backend; everywhere else they report "already granted" so callers
    /// need no backend-specific branching.
    async fn query_permission(
        &self,
        _target: PermissionTarget<'_>,
        _mode: AccessMode,
    ) -> BridgeResult<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn request_permission(
        &self,
        _target: PermissionTarget<'_>,
        _mode: AccessMode,
    ) -> BridgeResult<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn set_named_directory(&self, key: &str, dir: &DirectoryValue) -> BridgeResult<()>;

    async fn get_named_directory(&self, key: &str) -> BridgeResult<Option<NamedDirectory>>;

    async fn remove_named_directory(&self, key: &str) -> BridgeResult<()>;
}
