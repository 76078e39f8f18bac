//! Capability-scoped live-handle host port.

use async_trait::async_trait;
use thiserror::Error;

use crate::file::{AccessMode, EntryKind, FileFilter, MimeType, NativeHandle, PermissionStatus};

/// Failure surface of the handle host, mirroring its native exception set.
#[derive(Debug, Error)]
pub enum HandleHostError {
    /// The user aborted the picker.
    #[error("picker aborted by user")]
    Abort,

    /// A security check refused the operation.
    #[error("not allowed: {0}")]
    NotAllowed(String),

    /// The handle's underlying item no longer exists.
    #[error("not found: {0}")]
    NotFound(String),

    /// The handle is not of the expected kind for the operation.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("{0}")]
    Other(String),
}

/// Bytes plus source-reported metadata read through a handle.
#[derive(Debug, Clone)]
pub struct HandlePayload {
    pub bytes: Vec<u8>,
    pub mime: MimeType,
    pub modified_at_ms: Option<i64>,
}

/// Metadata-only listing entry reported by the host.
#[derive(Debug, Clone)]
pub struct NativeDirEntry {
    pub name: String,
    pub kind: EntryKind,
    pub size: Option<i64>,
    pub modified_at_ms: Option<i64>,
}

/// Host exposing live, revocable handles with scoped permissions.
///
/// Handles returned here stay valid as live object references for the host
/// process lifetime; permission may be revoked underneath them at any time.
#[async_trait]
pub trait HandleHostPort: Send + Sync {
    /// Whether the host exposes the scoped-handle capability at all.
    fn is_available(&self) -> bool;

    async fn pick_files(
        &self,
        filters: &[FileFilter],
        multiple: bool,
    ) -> Result<Vec<NativeHandle>, HandleHostError>;

    async fn pick_save(
        &self,
        suggested_name: &str,
        filters: &[FileFilter],
    ) -> Result<NativeHandle, HandleHostError>;

    async fn pick_directory(&self, mode: AccessMode) -> Result<NativeHandle, HandleHostError>;

    /// Read current bytes through a file handle.
    async fn read(&self, handle: &NativeHandle) -> Result<HandlePayload, HandleHostError>;

    /// Write bytes in place through a file handle.
    async fn write(&self, handle: &NativeHandle, bytes: &[u8]) -> Result<(), HandleHostError>;

    /// List a directory handle's children, metadata only.
    async fn list(&self, dir: &NativeHandle) -> Result<Vec<NativeDirEntry>, HandleHostError>;

    /// Resolve a child file handle by name within a directory handle.
    async fn child(
        &self,
        dir: &NativeHandle,
        name: &str,
    ) -> Result<NativeHandle, HandleHostError>;

    async fn query_permission(
        &self,
        handle: &NativeHandle,
        mode: AccessMode,
    ) -> Result<PermissionStatus, HandleHostError>;

    /// May prompt; must be invoked within a user-initiated call chain.
    async fn request_permission(
        &self,
        handle: &NativeHandle,
        mode: AccessMode,
    ) -> Result<PermissionStatus, HandleHostError>;
}
