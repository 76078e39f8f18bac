//! Mobile filesystem-plugin backend.
//!
//! Items are addressed by the opaque URI the plugin reports. Plugin calls
//! fail with string codes; the well-known ones classify into the shared
//! taxonomy and everything else becomes `io_error`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use fb_core::ports::{
    ClockPort, MobileFsError, MobileFsPort, MobilePick, PlatformAdapter, RecentStorePort,
};
use fb_core::{
    BackendId, BridgeError, BridgeResult, EntryKind, FileValue, ItemId, MimeType, NamedDirectory,
    OpenOptions, SaveContent, SaveOptions, StoredHandle,
};

use crate::adapters::store_err;

pub struct MobileBackend {
    fs: Arc<dyn MobileFsPort>,
    store: Arc<dyn RecentStorePort>,
    clock: Arc<dyn ClockPort>,
    persist_default: bool,
}

impl MobileBackend {
    pub fn new(
        fs: Arc<dyn MobileFsPort>,
        store: Arc<dyn RecentStorePort>,
        clock: Arc<dyn ClockPort>,
        persist_default: bool,
    ) -> Self {
        Self {
            fs,
            store,
            clock,
            persist_default,
        }
    }

    fn persist(&self, requested: Option<bool>) -> bool {
        requested.unwrap_or(self.persist_default)
    }

    fn map_fs(err: MobileFsError, what: &str) -> BridgeError {
        let code = err.code().map(str::to_string);
        match code.as_deref() {
            Some("canceled") | Some("cancelled") => BridgeError::cancelled(),
            Some("denied") => {
                let message = format!("{what}: plugin denied the operation");
                BridgeError::permission_denied(message).with_cause(err)
            }
            Some("missing") => {
                let message = format!("{what}: target no longer exists");
                BridgeError::not_found(message).with_cause(err)
            }
            _ => {
                let message = format!("{what}: {err}");
                BridgeError::io(message).with_cause(err)
            }
        }
    }

    /// Load a file value from a plugin URI; content and stat metadata are
    /// separate plugin calls.
    async fn load_uri(&self, pick: &MobilePick) -> BridgeResult<FileValue> {
        let bytes = self
            .fs
            .read(&pick.uri)
            .await
            .map_err(|e| Self::map_fs(e, "read file"))?;
        let modified_at_ms = match self.fs.stat(&pick.uri).await {
            Ok(stat) => stat.modified_at_ms,
            Err(_) => self.clock.now_ms(),
        };
        let size = bytes.len() as i64;
        Ok(FileValue {
            id: ItemId::generate(),
            name: pick.name.clone(),
            path: Some(pick.uri.clone()),
            bytes,
            mime: pick.mime.clone(),
            size,
            modified_at_ms,
            handle: None,
        })
    }
}

#[async_trait]
impl PlatformAdapter for MobileBackend {
    fn id(&self) -> BackendId {
        BackendId::Mobile
    }

    fn is_supported(&self) -> bool {
        self.fs.is_available()
    }

    async fn open_files(&self, opts: OpenOptions) -> BridgeResult<Vec<FileValue>> {
        let picks = self
            .fs
            .pick_files(&opts.filters, opts.multiple)
            .await
            .map_err(|e| Self::map_fs(e, "open picker"))?;
        if picks.is_empty() {
            return Err(BridgeError::cancelled());
        }

        let persist = self.persist(opts.persist);
        let mut files = Vec::with_capacity(picks.len());
        for pick in picks {
            let file = self.load_uri(&pick).await?;
            if persist {
                let now = self.clock.now_ms();
                self.store
                    .put_content(file.to_content_record(now))
                    .await
                    .map_err(store_err)?;
            }
            files.push(file);
        }
        debug!(count = files.len(), "opened file(s) via mobile plugin");
        Ok(files)
    }

    async fn save_file(
        &self,
        file: &FileValue,
        content: SaveContent,
        persist: Option<bool>,
    ) -> BridgeResult<bool> {
        let Some(uri) = file.path.as_deref() else {
            return Err(BridgeError::not_supported(
                "save_file on an item without a source location",
            ));
        };

        self.fs
            .write(uri, content.as_bytes())
            .await
            .map_err(|e| Self::map_fs(e, "write file"))?;

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
        let target = self
            .fs
            .pick_save_target(&opts.suggested_name)
            .await
            .map_err(|e| Self::map_fs(e, "save picker"))?;

        self.fs
            .write(&target.uri, content.as_bytes())
            .await
            .map_err(|e| Self::map_fs(e, "write file"))?;

        let now = self.clock.now_ms();
        let size = content.len() as i64;
        let file = FileValue {
            id: ItemId::generate(),
            name: target.name.clone(),
            path: Some(target.uri.clone()),
            bytes: content.into_bytes(),
            mime: target.mime.clone(),
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

    async fn list_recent(&self) -> BridgeResult<Vec<StoredHandle>> {
        self.store.list().await.map_err(store_err)
    }

    /// URI-backed restore: a fresh plugin read, degrading to the cached
    /// content record when the URI is no longer readable.
    async fn restore_file(&self, item: &StoredHandle) -> BridgeResult<FileValue> {
        if item.kind != EntryKind::File {
            return Err(BridgeError::not_found(format!(
                "item '{}' is not a file",
                item.id
            )));
        }

        let cached = || async { self.store.get_content(&item.id).await.map_err(store_err) };

        match item.path.as_deref() {
            Some(uri) => {
                let pick = MobilePick {
                    name: item.name.clone(),
                    uri: uri.to_string(),
                    mime: MimeType::from_path(&item.name),
                };
                match self.load_uri(&pick).await {
                    Ok(mut file) => {
                        file.id = item.id.clone();
                        Ok(file)
                    }
                    Err(fresh_err) => match cached().await? {
                        Some(record) => {
                            warn!(
                                uri,
                                "fresh read failed, restoring cached content: {fresh_err}"
                            );
                            Ok(record.into_file_value())
                        }
                        None => Err(fresh_err),
                    },
                }
            }
            None => match cached().await? {
                Some(record) => Ok(record.into_file_value()),
                None => Err(BridgeError::not_found(format!(
                    "no cached content for item '{}'",
                    item.id
                ))),
            },
        }
    }

    async fn remove_recent(&self, id: &ItemId) -> BridgeResult<()> {
        self.store.remove(id).await.map_err(store_err)
    }

    async fn clear_recent(&self) -> BridgeResult<()> {
        self.store.clear().await.map_err(store_err)
    }

    async fn set_named_directory(
        &self,
        _key: &str,
        _dir: &fb_core::DirectoryValue,
    ) -> BridgeResult<()> {
        Err(BridgeError::not_supported("set_named_directory"))
    }

    async fn get_named_directory(&self, _key: &str) -> BridgeResult<Option<NamedDirectory>> {
        Err(BridgeError::not_supported("get_named_directory"))
    }

    async fn remove_named_directory(&self, _key: &str) -> BridgeResult<()> {
        Err(BridgeError::not_supported("remove_named_directory"))
    }
}
