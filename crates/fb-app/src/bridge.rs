//! The public facade bound to the selected backend.

use std::sync::Arc;

use fb_core::ports::{PermissionTarget, PlatformAdapter};
use fb_core::{
    AccessMode, BackendId, BridgeResult, DirEntry, DirectoryValue, FileValue, ItemId,
    NamedDirectory, OpenOptions, PermissionStatus, SaveContent, SaveOptions, StoredHandle,
};

/// Author-time capability table, one row per backend.
///
/// This is what a backend *class* can do; whether the constructed instance
/// does it is read from the adapter via the `supports_*` accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendCapabilities {
    pub open_files: bool,
    pub save_in_place: bool,
    pub save_as: bool,
    pub directories: bool,
    pub handle_persistence: bool,
    pub permission_ops: bool,
}

impl BackendCapabilities {
    pub const fn of(id: BackendId) -> Self {
        match id {
            BackendId::Desktop => Self {
                open_files: true,
                save_in_place: true,
                save_as: true,
                directories: true,
                handle_persistence: false,
                permission_ops: false,
            },
            BackendId::Mobile => Self {
                open_files: true,
                save_in_place: true,
                save_as: true,
                directories: false,
                handle_persistence: false,
                permission_ops: false,
            },
            BackendId::ScopedHandle => Self {
                open_files: true,
                save_in_place: true,
                save_as: true,
                directories: true,
                handle_persistence: true,
                permission_ops: true,
            },
            BackendId::Fallback => Self {
                open_files: true,
                save_in_place: false,
                save_as: true,
                directories: false,
                handle_persistence: false,
                permission_ops: false,
            },
        }
    }
}

/// Unified file-access surface over the backend selected at build time.
///
/// Every operation delegates to the bound adapter; operations the backend
/// lacks fail with `not_supported` without reaching any native surface.
/// Construction goes through [`FileBridgeBuilder`](crate::FileBridgeBuilder).
pub struct FileBridge {
    adapter: Arc<dyn PlatformAdapter>,
}

impl FileBridge {
    pub(crate) fn new(adapter: Arc<dyn PlatformAdapter>) -> Self {
        Self { adapter }
    }

    pub fn backend_id(&self) -> BackendId {
        self.adapter.id()
    }

    pub fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities::of(self.adapter.id())
    }

    pub fn supports_directories(&self) -> bool {
        self.adapter.supports_directories()
    }

    pub fn supports_handle_persistence(&self) -> bool {
        self.adapter.supports_handle_persistence()
    }

    /// Single-file open; the picker is shown in single-selection mode.
    pub async fn open_file(&self, opts: OpenOptions) -> BridgeResult<FileValue> {
        let opts = OpenOptions {
            multiple: false,
            ..opts
        };
        let mut files = self.adapter.open_files(opts).await?;
        // Adapters report an empty pick as cancellation, so a successful
        // single-selection open yields exactly one file.
        match files.pop() {
            Some(file) => Ok(file),
            None => Err(fb_core::BridgeError::cancelled()),
        }
    }

    /// Multi-file open; always yields a collection, even for one pick.
    pub async fn open_files(&self, opts: OpenOptions) -> BridgeResult<Vec<FileValue>> {
        let opts = OpenOptions {
            multiple: true,
            ..opts
        };
        self.adapter.open_files(opts).await
    }

    pub async fn save_file(
        &self,
        file: &FileValue,
        content: SaveContent,
        persist: Option<bool>,
    ) -> BridgeResult<bool> {
        self.adapter.save_file(file, content, persist).await
    }

    pub async fn save_file_as(
        &self,
        content: SaveContent,
        opts: SaveOptions,
    ) -> BridgeResult<FileValue> {
        self.adapter.save_file_as(content, opts).await
    }

    pub async fn open_directory(
        &self,
        mode: AccessMode,
        persist: Option<bool>,
    ) -> BridgeResult<DirectoryValue> {
        self.adapter.open_directory(mode, persist).await
    }

    pub async fn read_directory(&self, dir: &DirectoryValue) -> BridgeResult<Vec<DirEntry>> {
        self.adapter.read_directory(dir).await
    }

    pub async fn read_entry_content(
        &self,
        dir: &DirectoryValue,
        entry: &DirEntry,
    ) -> BridgeResult<FileValue> {
        self.adapter.read_entry_content(dir, entry).await
    }

    pub async fn list_recent(&self) -> BridgeResult<Vec<StoredHandle>> {
        self.adapter.list_recent().await
    }

    pub async fn restore_file(&self, item: &StoredHandle) -> BridgeResult<FileValue> {
        self.adapter.restore_file(item).await
    }

    pub async fn restore_directory(
        &self,
        item: &StoredHandle,
        mode: AccessMode,
    ) -> BridgeResult<DirectoryValue> {
        self.adapter.restore_directory(item, mode).await
    }

    pub async fn remove_from_recent(&self, id: &ItemId) -> BridgeResult<()> {
        self.adapter.remove_recent(id).await
    }

    pub async fn clear_recent(&self) -> BridgeResult<()> {
        self.adapter.clear_recent().await
    }

    pub async fn query_permission(
        &self,
        target: PermissionTarget<'_>,
        mode: AccessMode,
    ) -> BridgeResult<PermissionStatus> {
        self.adapter.query_permission(target, mode).await
    }

    pub async fn request_permission(
        &self,
        target: PermissionTarget<'_>,
        mode: AccessMode,
    ) -> BridgeResult<PermissionStatus> {
        self.adapter.request_permission(target, mode).await
    }

    pub async fn set_named_directory(&self, key: &str, dir: &DirectoryValue) -> BridgeResult<()> {
        self.adapter.set_named_directory(key, dir).await
    }

    pub async fn get_named_directory(&self, key: &str) -> BridgeResult<Option<NamedDirectory>> {
        self.adapter.get_named_directory(key).await
    }

    pub async fn remove_named_directory(&self, key: &str) -> BridgeResult<()> {
        self.adapter.remove_named_directory(key).await
    }
}
