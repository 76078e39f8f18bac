//! Capability-scoped handle backend.
//!
//! Items opened here carry live handles, so writes go back to the original
//! target and restores re-read current content through the retained handle,
//! re-requesting permission when the host revoked it in the meantime.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use fb_core::ports::{
    ClockPort, HandleHostError, HandleHostPort, PermissionTarget, PlatformAdapter, RecentStorePort,
};
use fb_core::{
    AccessMode, BackendId, BridgeError, BridgeResult, DirEntry, DirectoryValue, EntryKind,
    FileValue, ItemId, MimeType, NamedDirectory, NativeHandle, OpenOptions, PermissionStatus,
    SaveContent, SaveOptions, StoredHandle,
};

use crate::adapters::store_err;

pub struct ScopedHandleBackend {
    host: Arc<dyn HandleHostPort>,
    store: Arc<dyn RecentStorePort>,
    clock: Arc<dyn ClockPort>,
    persist_default: bool,
}

impl ScopedHandleBackend {
    pub fn new(
        host: Arc<dyn HandleHostPort>,
        store: Arc<dyn RecentStorePort>,
        clock: Arc<dyn ClockPort>,
        persist_default: bool,
    ) -> Self {
        Self {
            host,
            store,
            clock,
            persist_default,
        }
    }

    fn persist(&self, requested: Option<bool>) -> bool {
        requested.unwrap_or(self.persist_default)
    }

    fn map_host(err: HandleHostError, what: &str) -> BridgeError {
        match err {
            HandleHostError::Abort => BridgeError::cancelled(),
            HandleHostError::NotAllowed(ref msg) => {
                let message = format!("{what}: {msg}");
                BridgeError::permission_denied(message).with_cause(err)
            }
            HandleHostError::NotFound(ref msg) => {
                let message = format!("{what}: {msg}");
                BridgeError::not_found(message).with_cause(err)
            }
            HandleHostError::TypeMismatch(_) | HandleHostError::Other(_) => {
                let message = format!("{what}: {err}");
                BridgeError::io(message).with_cause(err)
            }
        }
    }

    /// The live handle for an item: the one embedded in the value if
    /// present, otherwise the registry record captured at open time.
    async fn resolve_handle(
        &self,
        embedded: Option<&NativeHandle>,
        id: &ItemId,
    ) -> BridgeResult<NativeHandle> {
        if let Some(handle) = embedded {
            return Ok(handle.clone());
        }
        match self.store.get_handle(id).await.map_err(store_err)? {
            Some(handle) => Ok(handle),
            None => Err(BridgeError::not_found(format!(
                "no live handle for item '{id}'"
            ))),
        }
    }

    /// Query, then request if the host would prompt. Anything short of a
    /// grant at the end is a denial.
    async fn ensure_permission(
        &self,
        handle: &NativeHandle,
        mode: AccessMode,
    ) -> BridgeResult<()> {
        let status = self
            .host
            .query_permission(handle, mode)
            .await
            .map_err(|e| Self::map_host(e, "query permission"))?;
        if status == PermissionStatus::Granted {
            return Ok(());
        }
        let status = self
            .host
            .request_permission(handle, mode)
            .await
            .map_err(|e| Self::map_host(e, "request permission"))?;
        if status == PermissionStatus::Granted {
            Ok(())
        } else {
            Err(BridgeError::permission_denied(format!(
                "access to '{}' was not granted",
                handle.name()
            )))
        }
    }

    async fn read_through(&self, id: ItemId, handle: NativeHandle) -> BridgeResult<FileValue> {
        let payload = self
            .host
            .read(&handle)
            .await
            .map_err(|e| Self::map_host(e, "read handle"))?;
        let size = payload.bytes.len() as i64;
        Ok(FileValue {
            id,
            name: handle.name().to_string(),
            path: None,
            bytes: payload.bytes,
            mime: payload.mime,
            size,
            modified_at_ms: payload.modified_at_ms.unwrap_or_else(|| self.clock.now_ms()),
            handle: Some(handle),
        })
    }

    async fn persist_handle(&self, item: StoredHandle, handle: NativeHandle) -> BridgeResult<()> {
        self.store.put_handle(item, handle).await.map_err(store_err)
    }

    fn permission_subject<'a>(target: &'a PermissionTarget<'_>) -> (Option<&'a NativeHandle>, &'a ItemId) {
        match target {
            PermissionTarget::File(file) => (file.handle.as_ref(), &file.id),
            PermissionTarget::Directory(dir) => (dir.handle.as_ref(), &dir.id),
        }
    }
}

#[async_trait]
impl PlatformAdapter for ScopedHandleBackend {
    fn id(&self) -> BackendId {
        BackendId::ScopedHandle
    }

    fn is_supported(&self) -> bool {
        self.host.is_available()
    }

    fn supports_directories(&self) -> bool {
        true
    }

    fn supports_handle_persistence(&self) -> bool {
        true
    }

    async fn open_files(&self, opts: OpenOptions) -> BridgeResult<Vec<FileValue>> {
        let handles = self
            .host
            .pick_files(&opts.filters, opts.multiple)
            .await
            .map_err(|e| Self::map_host(e, "open picker"))?;
        if handles.is_empty() {
            return Err(BridgeError::cancelled());
        }

        let persist = self.persist(opts.persist);
        let mut files = Vec::with_capacity(handles.len());
        for handle in handles {
            let file = self.read_through(ItemId::generate(), handle.clone()).await?;
            if persist {
                self.persist_handle(file.item_ref(self.clock.now_ms()), handle)
                    .await?;
            }
            files.push(file);
        }
        debug!(count = files.len(), "opened file(s) via scoped handles");
        Ok(files)
    }

    async fn save_file(
        &self,
        file: &FileValue,
        content: SaveContent,
        persist: Option<bool>,
    ) -> BridgeResult<bool> {
        let handle = self.resolve_handle(file.handle.as_ref(), &file.id).await?;
        self.ensure_permission(&handle, AccessMode::ReadWrite).await?;
        self.host
            .write(&handle, content.as_bytes())
            .await
            .map_err(|e| Self::map_host(e, "write handle"))?;

        if self.persist(persist) {
            let now = self.clock.now_ms();
            self.persist_handle(file.item_ref(now), handle).await?;
        }
        Ok(true)
    }

    async fn save_file_as(
        &self,
        content: SaveContent,
        opts: SaveOptions,
    ) -> BridgeResult<FileValue> {
        let handle = self
            .host
            .pick_save(&opts.suggested_name, &opts.filters)
            .await
            .map_err(|e| Self::map_host(e, "save picker"))?;
        self.host
            .write(&handle, content.as_bytes())
            .await
            .map_err(|e| Self::map_host(e, "write handle"))?;

        let now = self.clock.now_ms();
        let name = handle.name().to_string();
        let size = content.len() as i64;
        let file = FileValue {
            id: ItemId::generate(),
            mime: MimeType::from_path(&name),
            name,
            path: None,
            bytes: content.into_bytes(),
            size,
            modified_at_ms: now,
            handle: Some(handle.clone()),
        };

        if self.persist(opts.persist) {
            self.persist_handle(file.item_ref(now), handle).await?;
        }
        Ok(file)
    }

    async fn open_directory(
        &self,
        mode: AccessMode,
        persist: Option<bool>,
    ) -> BridgeResult<DirectoryValue> {
        let handle = self
            .host
            .pick_directory(mode)
            .await
            .map_err(|e| Self::map_host(e, "directory picker"))?;

        let dir = DirectoryValue {
            id: ItemId::generate(),
            name: handle.name().to_string(),
            path: None,
            handle: Some(handle.clone()),
        };

        if self.persist(persist) {
            self.persist_handle(dir.item_ref(self.clock.now_ms()), handle)
                .await?;
        }
        Ok(dir)
    }

    async fn read_directory(&self, dir: &DirectoryValue) -> BridgeResult<Vec<DirEntry>> {
        let handle = self.resolve_handle(dir.handle.as_ref(), &dir.id).await?;
        let children = self
            .host
            .list(&handle)
            .await
            .map_err(|e| Self::map_host(e, "list directory"))?;
        Ok(children
            .into_iter()
            .map(|c| DirEntry {
                name: c.name,
                kind: c.kind,
                size: c.size,
                modified_at_ms: c.modified_at_ms,
                path: None,
                handle: None,
            })
            .collect())
    }

    async fn read_entry_content(
        &self,
        dir: &DirectoryValue,
        entry: &DirEntry,
    ) -> BridgeResult<FileValue> {
        if entry.kind != EntryKind::File {
            return Err(BridgeError::not_found(format!(
                "'{}' is not a file entry",
                entry.name
            )));
        }
        let dir_handle = self.resolve_handle(dir.handle.as_ref(), &dir.id).await?;
        let child = self
            .host
            .child(&dir_handle, &entry.name)
            .await
            .map_err(|e| Self::map_host(e, "resolve entry"))?;
        self.read_through(ItemId::generate(), child).await
    }

    async fn list_recent(&self) -> BridgeResult<Vec<StoredHandle>> {
        self.store.list().await.map_err(store_err)
    }

    /// Handle-backed restore: permission is re-checked (and re-requested
    /// when revoked), then current content is read live. There is no cached
    /// copy to fall back to.
    async fn restore_file(&self, item: &StoredHandle) -> BridgeResult<FileValue> {
        if item.kind != EntryKind::File {
            return Err(BridgeError::not_found(format!(
                "item '{}' is not a file",
                item.id
            )));
        }
        let handle = self.resolve_handle(None, &item.id).await?;
        self.ensure_permission(&handle, AccessMode::Read).await?;
        self.read_through(item.id.clone(), handle).await
    }

    async fn restore_directory(
        &self,
        item: &StoredHandle,
        mode: AccessMode,
    ) -> BridgeResult<DirectoryValue> {
        if item.kind != EntryKind::Directory {
            return Err(BridgeError::not_found(format!(
                "item '{}' is not a directory",
                item.id
            )));
        }
        let handle = self.resolve_handle(None, &item.id).await?;
        self.ensure_permission(&handle, mode).await?;
        Ok(DirectoryValue {
            id: item.id.clone(),
            name: handle.name().to_string(),
            path: None,
            handle: Some(handle),
        })
    }

    async fn remove_recent(&self, id: &ItemId) -> BridgeResult<()> {
        self.store.remove(id).await.map_err(store_err)
    }

    async fn clear_recent(&self) -> BridgeResult<()> {
        self.store.clear().await.map_err(store_err)
    }

    async fn query_permission(
        &self,
        target: PermissionTarget<'_>,
        mode: AccessMode,
    ) -> BridgeResult<PermissionStatus> {
        let (embedded, id) = Self::permission_subject(&target);
        let handle = self.resolve_handle(embedded, id).await?;
        self.host
            .query_permission(&handle, mode)
            .await
            .map_err(|e| Self::map_host(e, "query permission"))
    }

    async fn request_permission(
        &self,
        target: PermissionTarget<'_>,
        mode: AccessMode,
    ) -> BridgeResult<PermissionStatus> {
        let (embedded, id) = Self::permission_subject(&target);
        let handle = self.resolve_handle(embedded, id).await?;
        self.host
            .request_permission(&handle, mode)
            .await
            .map_err(|e| Self::map_host(e, "request permission"))
    }

    async fn set_named_directory(&self, key: &str, dir: &DirectoryValue) -> BridgeResult<()> {
        self.store
            .set_named(NamedDirectory {
                key: key.to_string(),
                name: dir.name.clone(),
                path: dir.path.clone(),
                kind: EntryKind::Directory,
                captured_at_ms: self.clock.now_ms(),
                handle: dir.handle.clone(),
            })
            .await
            .map_err(store_err)
    }

    async fn get_named_directory(&self, key: &str) -> BridgeResult<Option<NamedDirectory>> {
        self.store.get_named(key).await.map_err(store_err)
    }

    async fn remove_named_directory(&self, key: &str) -> BridgeResult<()> {
        self.store.remove_named(key).await.map_err(store_err)
    }
}
