//! File-access domain model shared by every backend.

pub mod backend;
pub mod handle;
pub mod mime;
pub mod options;
pub mod value;

pub use backend::BackendId;
pub use handle::{
    AccessMode, EntryKind, NamedDirectory, NativeHandle, PermissionStatus, StoredHandle,
};
pub use mime::MimeType;
pub use options::{FileFilter, OpenOptions, SaveContent, SaveOptions};
pub use value::{ContentRecord, DirEntry, DirectoryValue, FileValue};
