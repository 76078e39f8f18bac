//! Minimal port stubs for selection and facade tests.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use fb_core::ports::{
    DesktopDialogPort, FallbackHostPort, HandleHostError, HandleHostPort, HandlePayload,
    MobileFsError, MobileFsPort, MobilePick, MobileStat, NativeDirEntry, PickedFile,
    RecentStorePort,
};
use fb_core::{AccessMode, FileFilter, MimeType, NativeHandle, PermissionStatus};
use fb_infra::LocalStore;

pub(crate) fn test_store(tmp: &TempDir, max_recent: usize) -> Arc<dyn RecentStorePort> {
    let store =
        LocalStore::open_at(&tmp.path().join("store.db"), max_recent).expect("open test store");
    Arc::new(store)
}

/// Dialog stub whose only interesting property is availability.
pub(crate) struct StubDialog {
    pub available: bool,
}

#[async_trait]
impl DesktopDialogPort for StubDialog {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn pick_open(&self, _filters: &[FileFilter], _multiple: bool) -> Vec<PathBuf> {
        Vec::new()
    }

    async fn pick_save(&self, _suggested_name: &str, _filters: &[FileFilter]) -> Option<PathBuf> {
        None
    }

    async fn pick_directory(&self) -> Option<PathBuf> {
        None
    }
}

pub(crate) struct StubHandleHost {
    pub available: bool,
}

#[async_trait]
impl HandleHostPort for StubHandleHost {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn pick_files(
        &self,
        _filters: &[FileFilter],
        _multiple: bool,
    ) -> Result<Vec<NativeHandle>, HandleHostError> {
        Err(HandleHostError::Abort)
    }

    async fn pick_save(
        &self,
        _suggested_name: &str,
        _filters: &[FileFilter],
    ) -> Result<NativeHandle, HandleHostError> {
        Err(HandleHostError::Abort)
    }

    async fn pick_directory(&self, _mode: AccessMode) -> Result<NativeHandle, HandleHostError> {
        Err(HandleHostError::Abort)
    }

    async fn read(&self, _handle: &NativeHandle) -> Result<HandlePayload, HandleHostError> {
        Err(HandleHostError::Other("stub host".into()))
    }

    async fn write(&self, _handle: &NativeHandle, _bytes: &[u8]) -> Result<(), HandleHostError> {
        Err(HandleHostError::Other("stub host".into()))
    }

    async fn list(&self, _dir: &NativeHandle) -> Result<Vec<NativeDirEntry>, HandleHostError> {
        Err(HandleHostError::Other("stub host".into()))
    }

    async fn child(
        &self,
        _dir: &NativeHandle,
        _name: &str,
    ) -> Result<NativeHandle, HandleHostError> {
        Err(HandleHostError::Other("stub host".into()))
    }

    async fn query_permission(
        &self,
        _handle: &NativeHandle,
        _mode: AccessMode,
    ) -> Result<PermissionStatus, HandleHostError> {
        Ok(PermissionStatus::Granted)
    }

    async fn request_permission(
        &self,
        _handle: &NativeHandle,
        _mode: AccessMode,
    ) -> Result<PermissionStatus, HandleHostError> {
        Ok(PermissionStatus::Granted)
    }
}

pub(crate) struct StubMobileFs {
    pub available: bool,
}

#[async_trait]
impl MobileFsPort for StubMobileFs {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn pick_files(
        &self,
        _filters: &[FileFilter],
        _multiple: bool,
    ) -> Result<Vec<MobilePick>, MobileFsError> {
        Err(MobileFsError::Unavailable)
    }

    async fn pick_save_target(&self, _suggested_name: &str) -> Result<MobilePick, MobileFsError> {
        Err(MobileFsError::Unavailable)
    }

    async fn read(&self, _uri: &str) -> Result<Vec<u8>, MobileFsError> {
        Err(MobileFsError::Unavailable)
    }

    async fn write(&self, _uri: &str, _bytes: &[u8]) -> Result<(), MobileFsError> {
        Err(MobileFsError::Unavailable)
    }

    async fn stat(&self, _uri: &str) -> Result<MobileStat, MobileFsError> {
        Err(MobileFsError::Unavailable)
    }
}

/// Fallback host serving queued picks and recording downloads.
#[derive(Default)]
pub(crate) struct QueueFallbackHost {
    picks: Mutex<Vec<Vec<PickedFile>>>,
}

impl QueueFallbackHost {
    pub(crate) fn queue(&self, picks: Vec<PickedFile>) {
        self.picks.lock().unwrap().push(picks);
    }
}

#[async_trait]
impl FallbackHostPort for QueueFallbackHost {
    async fn pick_files(
        &self,
        _filters: &[FileFilter],
        _multiple: bool,
    ) -> Option<Vec<PickedFile>> {
        let mut picks = self.picks.lock().unwrap();
        if picks.is_empty() {
            None
        } else {
            Some(picks.remove(0))
        }
    }

    async fn deliver_download(
        &self,
        _name: &str,
        _mime: &MimeType,
        _bytes: &[u8],
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

pub(crate) fn picked(name: &str, bytes: &[u8]) -> PickedFile {
    PickedFile {
        name: name.to_string(),
        bytes: bytes.to_vec(),
        mime: MimeType::from_path(name),
        modified_at_ms: None,
    }
}
