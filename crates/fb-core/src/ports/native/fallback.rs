//! Plain picker/download fallback port.
//!
//! The terminal backend's host surface: a bare file picker that yields
//! name plus bytes (no path, no handle) and a download sink for save-as.
//! It has no environment precondition.

use anyhow::Result;
use async_trait::async_trait;

use crate::file::{FileFilter, MimeType};

/// A file as delivered by the plain picker.
#[derive(Debug, Clone)]
pub struct PickedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime: MimeType,
    pub modified_at_ms: Option<i64>,
}

#[async_trait]
pub trait FallbackHostPort: Send + Sync {
    /// Show the picker; `None` means the user dismissed it.
    async fn pick_files(
        &self,
        filters: &[FileFilter],
        multiple: bool,
    ) -> Option<Vec<PickedFile>>;

    /// Hand the bytes to the host's download mechanism.
    async fn deliver_download(&self, name: &str, mime: &MimeType, bytes: &[u8]) -> Result<()>;
}
