//! In-memory fakes for the native host ports.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tempfile::TempDir;

use fb_core::ports::{
    DesktopDialogPort, FallbackHostPort, HandleHostError, HandleHostPort, HandlePayload,
    MobileFsError, MobileFsPort, MobilePick, MobileStat, NativeDirEntry, PickedFile,
    RecentStorePort,
};
use fb_core::{
    AccessMode, ContentRecord, EntryKind, FileFilter, ItemId, MimeType, NamedDirectory,
    NativeHandle, PermissionStatus, StoredHandle,
};
use fb_infra::LocalStore;

/// A file-backed store in a temp directory.
pub(crate) fn test_store(tmp: &TempDir, max_recent: usize) -> Arc<dyn RecentStorePort> {
    let store =
        LocalStore::open_at(&tmp.path().join("store.db"), max_recent).expect("open test store");
    Arc::new(store)
}

/// Store whose every operation fails, exercising the store error mapping.
pub(crate) struct FailingStore;

#[async_trait]
impl RecentStorePort for FailingStore {
    async fn put_content(&self, _record: ContentRecord) -> Result<()> {
        Err(anyhow!("store transaction failed"))
    }

    async fn put_item(&self, _item: StoredHandle) -> Result<()> {
        Err(anyhow!("store transaction failed"))
    }

    async fn put_handle(&self, _item: StoredHandle, _handle: NativeHandle) -> Result<()> {
        Err(anyhow!("store transaction failed"))
    }

    async fn get_item(&self, _id: &ItemId) -> Result<Option<StoredHandle>> {
        Err(anyhow!("store transaction failed"))
    }

    async fn get_content(&self, _id: &ItemId) -> Result<Option<ContentRecord>> {
        Err(anyhow!("store transaction failed"))
    }

    async fn get_handle(&self, _id: &ItemId) -> Result<Option<NativeHandle>> {
        Err(anyhow!("store transaction failed"))
    }

    async fn list(&self) -> Result<Vec<StoredHandle>> {
        Err(anyhow!("store transaction failed"))
    }

    async fn len(&self) -> Result<usize> {
        Err(anyhow!("store transaction failed"))
    }

    async fn remove(&self, _id: &ItemId) -> Result<()> {
        Err(anyhow!("store transaction failed"))
    }

    async fn clear(&self) -> Result<()> {
        Err(anyhow!("store transaction failed"))
    }

    async fn set_named(&self, _record: NamedDirectory) -> Result<()> {
        Err(anyhow!("store transaction failed"))
    }

    async fn get_named(&self, _key: &str) -> Result<Option<NamedDirectory>> {
        Err(anyhow!("store transaction failed"))
    }

    async fn remove_named(&self, _key: &str) -> Result<()> {
        Err(anyhow!("store transaction failed"))
    }
}

/// Dialog fake returning pre-scripted picker results.
#[derive(Default)]
pub(crate) struct ScriptedDialog {
    open: Vec<PathBuf>,
    save: Option<PathBuf>,
    directory: Option<PathBuf>,
}

impl ScriptedDialog {
    pub(crate) fn with_open(paths: Vec<PathBuf>) -> Self {
        Self {
            open: paths,
            ..Self::default()
        }
    }

    pub(crate) fn with_save(path: PathBuf) -> Self {
        Self {
            save: Some(path),
            ..Self::default()
        }
    }

    pub(crate) fn with_directory(path: PathBuf) -> Self {
        Self {
            directory: Some(path),
            ..Self::default()
        }
    }
}

#[async_trait]
impl DesktopDialogPort for ScriptedDialog {
    fn is_available(&self) -> bool {
        true
    }

    async fn pick_open(&self, _filters: &[FileFilter], _multiple: bool) -> Vec<PathBuf> {
        self.open.clone()
    }

    async fn pick_save(&self, _suggested_name: &str, _filters: &[FileFilter]) -> Option<PathBuf> {
        self.save.clone()
    }

    async fn pick_directory(&self) -> Option<PathBuf> {
        self.directory.clone()
    }
}

struct HandleFile {
    bytes: Vec<u8>,
    granted: bool,
}

#[derive(Default)]
struct HandleHostState {
    files: HashMap<String, HandleFile>,
    pick_order: Vec<String>,
    directories: HashMap<String, Vec<String>>,
    save_target: Option<String>,
    grant_on_request: bool,
}

/// Handle host fake. Handles carry the entry name as their opaque payload;
/// per-file grants can be revoked and re-granted to exercise the
/// permission flow.
pub(crate) struct InMemoryHandleHost {
    state: Mutex<HandleHostState>,
}

impl InMemoryHandleHost {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(HandleHostState {
                grant_on_request: true,
                ..HandleHostState::default()
            }),
        }
    }

    pub(crate) fn add_file(&self, name: &str, bytes: &[u8]) {
        let mut state = self.state.lock().unwrap();
        state.files.insert(
            name.to_string(),
            HandleFile {
                bytes: bytes.to_vec(),
                granted: true,
            },
        );
        state.pick_order.push(name.to_string());
    }

    pub(crate) fn add_directory(&self, name: &str, entries: &[(&str, &[u8])]) {
        let mut state = self.state.lock().unwrap();
        let mut children = Vec::new();
        for (child, bytes) in entries {
            state.files.insert(
                child.to_string(),
                HandleFile {
                    bytes: bytes.to_vec(),
                    granted: true,
                },
            );
            children.push(child.to_string());
        }
        state.directories.insert(name.to_string(), children);
    }

    pub(crate) fn set_save_target(&self, name: &str) {
        self.state.lock().unwrap().save_target = Some(name.to_string());
    }

    pub(crate) fn set_content(&self, name: &str, bytes: &[u8]) {
        if let Some(file) = self.state.lock().unwrap().files.get_mut(name) {
            file.bytes = bytes.to_vec();
        }
    }

    pub(crate) fn content_of(&self, name: &str) -> Option<Vec<u8>> {
        self.state
            .lock()
            .unwrap()
            .files
            .get(name)
            .map(|f| f.bytes.clone())
    }

    pub(crate) fn revoke(&self, name: &str) {
        if let Some(file) = self.state.lock().unwrap().files.get_mut(name) {
            file.granted = false;
        }
    }

    pub(crate) fn grant_on_request(&self, grant: bool) {
        self.state.lock().unwrap().grant_on_request = grant;
    }

    fn handle_for(name: &str, kind: EntryKind) -> NativeHandle {
        NativeHandle::new(name, kind, Arc::new(name.to_string()))
    }

    fn name_of(handle: &NativeHandle) -> Result<String, HandleHostError> {
        handle
            .downcast_ref::<String>()
            .cloned()
            .ok_or_else(|| HandleHostError::Other("foreign handle payload".into()))
    }
}

#[async_trait]
impl HandleHostPort for InMemoryHandleHost {
    fn is_available(&self) -> bool {
        true
    }

    async fn pick_files(
        &self,
        _filters: &[FileFilter],
        _multiple: bool,
    ) -> Result<Vec<NativeHandle>, HandleHostError> {
        let state = self.state.lock().unwrap();
        if state.pick_order.is_empty() {
            return Err(HandleHostError::Abort);
        }
        Ok(state
            .pick_order
            .iter()
            .map(|name| Self::handle_for(name, EntryKind::File))
            .collect())
    }

    async fn pick_save(
        &self,
        _suggested_name: &str,
        _filters: &[FileFilter],
    ) -> Result<NativeHandle, HandleHostError> {
        let mut state = self.state.lock().unwrap();
        let Some(name) = state.save_target.clone() else {
            return Err(HandleHostError::Abort);
        };
        state.files.entry(name.clone()).or_insert(HandleFile {
            bytes: Vec::new(),
            granted: true,
        });
        Ok(Self::handle_for(&name, EntryKind::File))
    }

    async fn pick_directory(&self, _mode: AccessMode) -> Result<NativeHandle, HandleHostError> {
        let state = self.state.lock().unwrap();
        match state.directories.keys().next() {
            Some(name) => Ok(Self::handle_for(name, EntryKind::Directory)),
            None => Err(HandleHostError::Abort),
        }
    }

    async fn read(&self, handle: &NativeHandle) -> Result<HandlePayload, HandleHostError> {
        let name = Self::name_of(handle)?;
        let state = self.state.lock().unwrap();
        let file = state
            .files
            .get(&name)
            .ok_or_else(|| HandleHostError::NotFound(name.clone()))?;
        if !file.granted {
            return Err(HandleHostError::NotAllowed(name));
        }
        Ok(HandlePayload {
            bytes: file.bytes.clone(),
            mime: MimeType::from_path(&name),
            modified_at_ms: Some(1_700_000_000_000),
        })
    }

    async fn write(&self, handle: &NativeHandle, bytes: &[u8]) -> Result<(), HandleHostError> {
        let name = Self::name_of(handle)?;
        let mut state = self.state.lock().unwrap();
        let file = state
            .files
            .get_mut(&name)
            .ok_or_else(|| HandleHostError::NotFound(name.clone()))?;
        if !file.granted {
            return Err(HandleHostError::NotAllowed(name));
        }
        file.bytes = bytes.to_vec();
        Ok(())
    }

    async fn list(&self, dir: &NativeHandle) -> Result<Vec<NativeDirEntry>, HandleHostError> {
        let name = Self::name_of(dir)?;
        let state = self.state.lock().unwrap();
        let children = state
            .directories
            .get(&name)
            .ok_or_else(|| HandleHostError::NotFound(name))?;
        Ok(children
            .iter()
            .map(|child| NativeDirEntry {
                name: child.clone(),
                kind: EntryKind::File,
                size: state.files.get(child).map(|f| f.bytes.len() as i64),
                modified_at_ms: None,
            })
            .collect())
    }

    async fn child(
        &self,
        dir: &NativeHandle,
        name: &str,
    ) -> Result<NativeHandle, HandleHostError> {
        let dir_name = Self::name_of(dir)?;
        let state = self.state.lock().unwrap();
        let children = state
            .directories
            .get(&dir_name)
            .ok_or_else(|| HandleHostError::NotFound(dir_name))?;
        if children.iter().any(|c| c == name) {
            Ok(Self::handle_for(name, EntryKind::File))
        } else {
            Err(HandleHostError::NotFound(name.to_string()))
        }
    }

    async fn query_permission(
        &self,
        handle: &NativeHandle,
        _mode: AccessMode,
    ) -> Result<PermissionStatus, HandleHostError> {
        let name = Self::name_of(handle)?;
        let state = self.state.lock().unwrap();
        match state.files.get(&name) {
            Some(file) if file.granted => Ok(PermissionStatus::Granted),
            Some(_) => Ok(PermissionStatus::Prompt),
            // Directory handles have no per-file grant record.
            None => Ok(PermissionStatus::Granted),
        }
    }

    async fn request_permission(
        &self,
        handle: &NativeHandle,
        _mode: AccessMode,
    ) -> Result<PermissionStatus, HandleHostError> {
        let name = Self::name_of(handle)?;
        let mut state = self.state.lock().unwrap();
        if !state.grant_on_request {
            return Ok(PermissionStatus::Denied);
        }
        if let Some(file) = state.files.get_mut(&name) {
            file.granted = true;
        }
        Ok(PermissionStatus::Granted)
    }
}

#[derive(Default)]
struct MobileFsState {
    files: HashMap<String, (String, Vec<u8>)>,
    pick_order: Vec<String>,
    save_target: Option<(String, String)>,
    fail_pick: Option<(String, String)>,
}

/// Plugin fake addressing entries by opaque URI strings.
pub(crate) struct InMemoryMobileFs {
    state: Mutex<MobileFsState>,
}

impl InMemoryMobileFs {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(MobileFsState::default()),
        }
    }

    pub(crate) fn add_file(&self, uri: &str, name: &str, bytes: &[u8]) {
        let mut state = self.state.lock().unwrap();
        state
            .files
            .insert(uri.to_string(), (name.to_string(), bytes.to_vec()));
        state.pick_order.push(uri.to_string());
    }

    pub(crate) fn set_content(&self, uri: &str, bytes: &[u8]) {
        if let Some((_, content)) = self.state.lock().unwrap().files.get_mut(uri) {
            *content = bytes.to_vec();
        }
    }

    pub(crate) fn remove_uri(&self, uri: &str) {
        self.state.lock().unwrap().files.remove(uri);
    }

    pub(crate) fn set_save_target(&self, uri: &str, name: &str) {
        self.state.lock().unwrap().save_target = Some((uri.to_string(), name.to_string()));
    }

    pub(crate) fn fail_next_pick(&self, code: &str, message: &str) {
        self.state.lock().unwrap().fail_pick = Some((code.to_string(), message.to_string()));
    }

    pub(crate) fn content_of(&self, uri: &str) -> Option<Vec<u8>> {
        self.state
            .lock()
            .unwrap()
            .files
            .get(uri)
            .map(|(_, bytes)| bytes.clone())
    }
}

#[async_trait]
impl MobileFsPort for InMemoryMobileFs {
    fn is_available(&self) -> bool {
        true
    }

    async fn pick_files(
        &self,
        _filters: &[FileFilter],
        _multiple: bool,
    ) -> Result<Vec<MobilePick>, MobileFsError> {
        let mut state = self.state.lock().unwrap();
        if let Some((code, message)) = state.fail_pick.take() {
            return Err(MobileFsError::plugin(code, message));
        }
        if state.pick_order.is_empty() {
            return Err(MobileFsError::plugin("canceled", "picker dismissed"));
        }
        Ok(state
            .pick_order
            .iter()
            .filter_map(|uri| {
                state.files.get(uri).map(|(name, _)| MobilePick {
                    name: name.clone(),
                    uri: uri.clone(),
                    mime: MimeType::from_path(name),
                })
            })
            .collect())
    }

    async fn pick_save_target(
        &self,
        _suggested_name: &str,
    ) -> Result<MobilePick, MobileFsError> {
        let mut state = self.state.lock().unwrap();
        let Some((uri, name)) = state.save_target.clone() else {
            return Err(MobileFsError::plugin("canceled", "picker dismissed"));
        };
        state
            .files
            .entry(uri.clone())
            .or_insert_with(|| (name.clone(), Vec::new()));
        Ok(MobilePick {
            mime: MimeType::from_path(&name),
            name,
            uri,
        })
    }

    async fn read(&self, uri: &str) -> Result<Vec<u8>, MobileFsError> {
        self.state
            .lock()
            .unwrap()
            .files
            .get(uri)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| MobileFsError::plugin("missing", format!("no entry at {uri}")))
    }

    async fn write(&self, uri: &str, bytes: &[u8]) -> Result<(), MobileFsError> {
        let mut state = self.state.lock().unwrap();
        match state.files.get_mut(uri) {
            Some((_, content)) => {
                *content = bytes.to_vec();
                Ok(())
            }
            None => Err(MobileFsError::plugin(
                "missing",
                format!("no entry at {uri}"),
            )),
        }
    }

    async fn stat(&self, uri: &str) -> Result<MobileStat, MobileFsError> {
        self.state
            .lock()
            .unwrap()
            .files
            .get(uri)
            .map(|(_, bytes)| MobileStat {
                kind: EntryKind::File,
                size: bytes.len() as i64,
                modified_at_ms: 1_700_000_000_000,
            })
            .ok_or_else(|| MobileFsError::plugin("missing", format!("no entry at {uri}")))
    }
}

#[derive(Default)]
struct DownloadHostState {
    pick_queue: VecDeque<Vec<PickedFile>>,
    downloads: Vec<(String, Vec<u8>)>,
}

/// Plain picker/download fake. Each queued batch serves one pick call;
/// an empty queue means the user dismissed the picker.
pub(crate) struct InMemoryDownloadHost {
    state: Mutex<DownloadHostState>,
}

impl InMemoryDownloadHost {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(DownloadHostState::default()),
        }
    }

    pub(crate) fn queue_picks(&self, picks: Vec<PickedFile>) {
        self.state.lock().unwrap().pick_queue.push_back(picks);
    }

    pub(crate) fn downloads(&self) -> Vec<(String, Vec<u8>)> {
        self.state.lock().unwrap().downloads.clone()
    }
}

#[async_trait]
impl FallbackHostPort for InMemoryDownloadHost {
    async fn pick_files(
        &self,
        _filters: &[FileFilter],
        _multiple: bool,
    ) -> Option<Vec<PickedFile>> {
        self.state.lock().unwrap().pick_queue.pop_front()
    }

    async fn deliver_download(
        &self,
        name: &str,
        _mime: &MimeType,
        bytes: &[u8],
    ) -> anyhow::Result<()> {
        self.state
            .lock()
            .unwrap()
            .downloads
            .push((name.to_string(), bytes.to_vec()));
        Ok(())
    }
}
