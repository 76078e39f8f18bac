//! Native desktop backend: dialog port plus direct filesystem access.
//!
//! The reference adapter - it implements the full contract. Dialogs are a
//! thin native surface behind [`DesktopDialogPort`]; everything else is
//! ordinary filesystem I/O done here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use fb_core::ports::{ClockPort, DesktopDialogPort, PlatformAdapter, RecentStorePort};
use fb_core::{
    AccessMode, BackendId, BridgeError, BridgeResult, DirEntry, DirectoryValue, EntryKind,
    FileValue, ItemId, MimeType, NamedDirectory, OpenOptions, SaveContent, SaveOptions,
    StoredHandle,
};

use crate::adapters::{store_err, system_time_ms};

pub struct DesktopBackend {
    dialog: Arc<dyn DesktopDialogPort>,
    store: Arc<dyn RecentStorePort>,
    clock: Arc<dyn ClockPort>,
    persist_default: bool,
}

impl DesktopBackend {
    pub fn new(
        dialog: Arc<dyn DesktopDialogPort>,
        store: Arc<dyn RecentStorePort>,
        clock: Arc<dyn ClockPort>,
        persist_default: bool,
    ) -> Self {
        Self {
            dialog,
            store,
            clock,
            persist_default,
        }
    }

    fn persist(&self, requested: Option<bool>) -> bool {
        requested.unwrap_or(self.persist_default)
    }

    fn map_io(err: std::io::Error, what: &str) -> BridgeError {
        match err.kind() {
            std::io::ErrorKind::NotFound => {
                BridgeError::not_found(format!("{what}: no such file or directory"))
                    .with_cause(err)
            }
            std::io::ErrorKind::PermissionDenied => {
                BridgeError::permission_denied(format!("{what}: permission denied"))
                    .with_cause(err)
            }
            _ => {
                let message = format!("{what}: {err}");
                BridgeError::io(message).with_cause(err)
            }
        }
    }

    /// Load a file value from a path, reporting source metadata.
    async fn load_path(&self, path: &Path) -> BridgeResult<FileValue> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Self::map_io(e, "read file"))?;
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|e| Self::map_io(e, "stat file"))?;
        let modified_at_ms = meta
            .modified()
            .ok()
            .and_then(system_time_ms)
            .unwrap_or_else(|| self.clock.now_ms());
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let size = bytes.len() as i64;
        Ok(FileValue {
            id: ItemId::generate(),
            mime: MimeType::from_path(&name),
            name,
            path: Some(path.to_string_lossy().into_owned()),
            bytes,
            size,
            modified_at_ms,
            handle: None,
        })
    }
}

#[async_trait]
impl PlatformAdapter for DesktopBackend {
    fn id(&self) -> BackendId {
        BackendId::Desktop
    }

    fn is_supported(&self) -> bool {
        self.dialog.is_available()
    }

    fn supports_directories(&self) -> bool {
        true
    }

    async fn open_files(&self, opts: OpenOptions) -> BridgeResult<Vec<FileValue>> {
        let picks = self.dialog.pick_open(&opts.filters, opts.multiple).await;
        if picks.is_empty() {
            return Err(BridgeError::cancelled());
        }

        let persist = self.persist(opts.persist);
        let mut files = Vec::with_capacity(picks.len());
        for path in picks {
            let file = self.load_path(&path).await?;
            if persist {
                let now = self.clock.now_ms();
                self.store
                    .put_content(file.to_content_record(now))
                    .await
                    .map_err(store_err)?;
            }
            files.push(file);
        }
        debug!(count = files.len(), "opened file(s) via desktop dialog");
        Ok(files)
    }

    async fn save_file(
        &self,
        file: &FileValue,
        content: SaveContent,
        persist: Option<bool>,
    ) -> BridgeResult<bool> {
        let Some(path) = file.path.as_deref() else {
            return Err(BridgeError::not_supported(
                "save_file on an item without a path",
            ));
        };

        tokio::fs::write(path, content.as_bytes())
            .await
            .map_err(|e| Self::map_io(e, "write file"))?;

        if self.persist(persist) {
            let now = self.clock.now_ms();
            let mut updated = file.clone();
            updated.size = content.len() as i64;
            updated.bytes = content.into_bytes();
            updated.modified_at_ms = now;
            self.store
                .put_content(updated.to_content_record(now))
                .await
                .map_err(store_err)?;
        }
        Ok(true)
    }

    async fn save_file_as(
        &self,
        content: SaveContent,
        opts: SaveOptions,
    ) -> BridgeResult<FileValue> {
        let Some(path) = self
            .dialog
            .pick_save(&opts.suggested_name, &opts.filters)
            .await
        else {
            return Err(BridgeError::cancelled());
        };

        tokio::fs::write(&path, content.as_bytes())
            .await
            .map_err(|e| Self::map_io(e, "write file"))?;

        let now = self.clock.now_ms();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| opts.suggested_name.clone());
        let size = content.len() as i64;
        let file = FileValue {
            id: ItemId::generate(),
            mime: MimeType::from_path(&name),
            name,
            path: Some(path.to_string_lossy().into_owned()),
            bytes: content.into_bytes(),
            size,
            modified_at_ms: now,
            handle: None,
        };

        if self.persist(opts.persist) {
            self.store
                .put_content(file.to_content_record(now))
                .await
                .map_err(store_err)?;
        }
        Ok(file)
    }

    async fn open_directory(
        &self,
        _mode: AccessMode,
        persist: Option<bool>,
    ) -> BridgeResult<DirectoryValue> {
        let Some(path) = self.dialog.pick_directory().await else {
            return Err(BridgeError::cancelled());
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let dir = DirectoryValue {
            id: ItemId::generate(),
            name,
            path: Some(path.to_string_lossy().into_owned()),
            handle: None,
        };

        if self.persist(persist) {
            let now = self.clock.now_ms();
            self.store
                .put_item(dir.item_ref(now))
                .await
                .map_err(store_err)?;
        }
        Ok(dir)
    }

    async fn read_directory(&self, dir: &DirectoryValue) -> BridgeResult<Vec<DirEntry>> {
        let Some(path) = dir.path.as_deref() else {
            return Err(BridgeError::not_found("directory has no path"));
        };

        let mut read_dir = tokio::fs::read_dir(path)
            .await
            .map_err(|e| Self::map_io(e, "list directory"))?;

        let mut entries = Vec::new();
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| Self::map_io(e, "list directory"))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| Self::map_io(e, "stat directory entry"))?;
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            // Metadata only; entry content is loaded by an explicit call.
            let (size, modified_at_ms) = if kind == EntryKind::File {
                let meta = entry
                    .metadata()
                    .await
                    .map_err(|e| Self::map_io(e, "stat directory entry"))?;
                (Some(meta.len() as i64), meta.modified().ok().and_then(system_time_ms))
            } else {
                (None, None)
            };
            entries.push(DirEntry {
                name,
                kind,
                size,
                modified_at_ms,
                path: Some(entry.path().to_string_lossy().into_owned()),
                handle: None,
            });
        }
        Ok(entries)
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
        let path = match (&entry.path, dir.path.as_deref()) {
            (Some(p), _) => PathBuf::from(p),
            (None, Some(dir_path)) => Path::new(dir_path).join(&entry.name),
            (None, None) => return Err(BridgeError::not_found("directory has no path")),
        };
        self.load_path(&path).await
    }

    async fn list_recent(&self) -> BridgeResult<Vec<StoredHandle>> {
        self.store.list().await.map_err(store_err)
    }

    /// Path-backed restore: a fresh read from the captured path, degrading
    /// to the cached content record when the path became unreachable.
    async fn restore_file(&self, item: &StoredHandle) -> BridgeResult<FileValue> {
        if item.kind != EntryKind::File {
            return Err(BridgeError::not_found(format!(
                "item '{}' is not a file",
                item.id
            )));
        }

        let cached = || async {
            self.store.get_content(&item.id).await.map_err(store_err)
        };

        match item.path.as_deref() {
            Some(path) => match self.load_path(Path::new(path)).await {
                Ok(mut file) => {
                    file.id = item.id.clone();
                    Ok(file)
                }
                Err(fresh_err) => match cached().await? {
                    Some(record) => {
                        warn!(
                            path,
                            "fresh read failed, restoring cached content: {fresh_err}"
                        );
                        Ok(record.into_file_value())
                    }
                    None => Err(fresh_err),
                },
            },
            None => match cached().await? {
                Some(record) => Ok(record.into_file_value()),
                None => Err(BridgeError::not_found(format!(
                    "no cached content for item '{}'",
                    item.id
                ))),
            },
        }
    }

    async fn restore_directory(
        &self,
        item: &StoredHandle,
        _mode: AccessMode,
    ) -> BridgeResult<DirectoryValue> {
        let Some(path) = item.path.as_deref() else {
            return Err(BridgeError::not_found("item has no directory path"));
        };
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|e| Self::map_io(e, "stat directory"))?;
        if !meta.is_dir() {
            return Err(BridgeError::not_found(format!(
                "'{path}' is no longer a directory"
            )));
        }
        Ok(DirectoryValue {
            id: item.id.clone(),
            name: item.name.clone(),
            path: item.path.clone(),
            handle: None,
        })
    }

    async fn remove_recent(&self, id: &ItemId) -> BridgeResult<()> {
        self.store.remove(id).await.map_err(store_err)
    }

    async fn clear_recent(&self) -> BridgeResult<()> {
        self.store.clear().await.map_err(store_err)
    }

    async fn set_named_directory(&self, key: &str, dir: &DirectoryValue) -> BridgeResult<()> {
        self.store
            .set_named(NamedDirectory {
                key: key.to_string(),
                name: dir.name.clone(),
                path: dir.path.clone(),
                kind: EntryKind::Directory,
                captured_at_ms: self.clock.now_ms(),
                handle: None,
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
