//! Desktop dialog port.
//!
//! The thinnest of the native surfaces: pickers report a dismissed dialog
//! as an empty/`None` result rather than an error. The desktop adapter does
//! the actual filesystem I/O itself.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::file::FileFilter;

#[async_trait]
pub trait DesktopDialogPort: Send + Sync {
    /// Whether native dialogs can be shown in this host environment.
    fn is_available(&self) -> bool;

    /// Open picker; an empty result means the user dismissed the dialog.
    async fn pick_open(&self, filters: &[FileFilter], multiple: bool) -> Vec<PathBuf>;

    /// Save picker; `None` means the user dismissed the dialog.
    async fn pick_save(&self, suggested_name: &str, filters: &[FileFilter]) -> Option<PathBuf>;

    /// Directory picker; `None` means the user dismissed the dialog.
    async fn pick_directory(&self) -> Option<PathBuf>;
}
