//! Plain picker/download fallback backend.
//!
//! The terminal backend: always supported, no environment precondition.
//! Picked files arrive as name plus bytes with no path or handle, so the
//! cached content record is the only restore source, and in-place save has
//! no addressable target.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use fb_core::ports::{ClockPort, FallbackHostPort, PlatformAdapter, RecentStorePort};
use fb_core::{
    BackendId, BridgeError, BridgeResult, EntryKind, FileValue, ItemId, MimeType, NamedDirectory,
    OpenOptions, SaveContent, SaveOptions, StoredHandle,
};

use crate::adapters::store_err;

pub struct FallbackBackend {
    host: Arc<dyn FallbackHostPort>,
    store: Arc<dyn RecentStorePort>,
    clock: Arc<dyn ClockPort>,
    persist_default: bool,
}

impl FallbackBackend {
    pub fn new(
        host: Arc<dyn FallbackHostPort>,
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
}

#[async_trait]
impl PlatformAdapter for FallbackBackend {
    fn id(&self) -> BackendId {
        BackendId::Fallback
    }

    fn is_supported(&self) -> bool {
        true
    }

    async fn open_files(&self, opts: OpenOptions) -> BridgeResult<Vec<FileValue>> {
        let Some(picks) = self.host.pick_files(&opts.filters, opts.multiple).await else {
            return Err(BridgeError::cancelled());
        };
        if picks.is_empty() {
            return Err(BridgeError::cancelled());
        }

        let persist = self.persist(opts.persist);
        let now = self.clock.now_ms();
        let mut files = Vec::with_capacity(picks.len());
        for pick in picks {
            let size = pick.bytes.len() as i64;
            let file = FileValue {
                id: ItemId::generate(),
                name: pick.name,
                path: None,
                bytes: pick.bytes,
                mime: pick.mime,
                size,
                modified_at_ms: pick.modified_at_ms.unwrap_or(now),
                handle: None,
            };
            if persist {
                self.store
                    .put_content(file.to_content_record(now))
                    .await
                    .map_err(store_err)?;
            }
            files.push(file);
        }
        debug!(count = files.len(), "opened file(s) via plain picker");
        Ok(files)
    }

    /// No path and no handle: there is nothing to overwrite in place.
    async fn save_file(
        &self,
        _file: &FileValue,
        _content: SaveContent,
        _persist: Option<bool>,
    ) -> BridgeResult<bool> {
        Err(BridgeError::not_supported("save_file"))
    }

    async fn save_file_as(
        &self,
        content: SaveContent,
        opts: SaveOptions,
    ) -> BridgeResult<FileValue> {
        let mime = MimeType::from_path(&opts.suggested_name);
        self.host
            .deliver_download(&opts.suggested_name, &mime, content.as_bytes())
            .await
            .map_err(|e| BridgeError::io("download delivery failed").with_cause(e))?;

        let now = self.clock.now_ms();
        let size = content.len() as i64;
        let file = FileValue {
            id: ItemId::generate(),
            name: opts.suggested_name.clone(),
            path: None,
            bytes: content.into_bytes(),
            mime,
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

    /// Cache-only restore: the bytes captured at open/save time are the
    /// single source of truth.
    async fn restore_file(&self, item: &StoredHandle) -> BridgeResult<FileValue> {
        if item.kind != EntryKind::File {
            return Err(BridgeError::not_found(format!(
                "item '{}' is not a file",
                item.id
            )));
        }
        match self.store.get_content(&item.id).await.map_err(store_err)? {
            Some(record) => Ok(record.into_file_value()),
            None => Err(BridgeError::not_found(format!(
                "no cached content for item '{}'",
                item.id
            ))),
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
