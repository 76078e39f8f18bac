//! Mobile filesystem plugin port.
//!
//! Plugin bridges report failures as string codes; the adapter classifies
//! the well-known codes and maps the rest to `io_error`.

use async_trait::async_trait;
use thiserror::Error;

use crate::file::{EntryKind, FileFilter, MimeType};

#[derive(Debug, Error)]
pub enum MobileFsError {
    /// A plugin call completed with an error code.
    #[error("plugin call failed ({code}): {message}")]
    Plugin { code: String, message: String },

    /// The plugin is not installed on this host.
    #[error("filesystem plugin unavailable")]
    Unavailable,
}

impl MobileFsError {
    pub fn plugin(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Plugin {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            MobileFsError::Plugin { code, .. } => Some(code),
            MobileFsError::Unavailable => None,
        }
    }
}

/// Picker result: the plugin reports a display name and an opaque URI.
#[derive(Debug, Clone)]
pub struct MobilePick {
    pub name: String,
    pub uri: String,
    pub mime: MimeType,
}

#[derive(Debug, Clone)]
pub struct MobileStat {
    pub kind: EntryKind,
    pub size: i64,
    pub modified_at_ms: i64,
}

/// URI-addressed plugin filesystem.
#[async_trait]
pub trait MobileFsPort: Send + Sync {
    fn is_available(&self) -> bool;

    async fn pick_files(
        &self,
        filters: &[FileFilter],
        multiple: bool,
    ) -> Result<Vec<MobilePick>, MobileFsError>;

    /// Create-document picker used by save-as.
    async fn pick_save_target(&self, suggested_name: &str)
        -> Result<MobilePick, MobileFsError>;

    async fn read(&self, uri: &str) -> Result<Vec<u8>, MobileFsError>;

    async fn write(&self, uri: &str, bytes: &[u8]) -> Result<(), MobileFsError>;

    async fn stat(&self, uri: &str) -> Result<MobileStat, MobileFsError>;
}
