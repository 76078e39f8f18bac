//! # fb-core
//!
//! Core domain models, ports and the shared error taxonomy for FileBridge.
//!
//! This crate contains pure domain logic without any infrastructure
//! dependencies. Backend adapters, the local store and the facade live in
//! `fb-platform`, `fb-infra` and `fb-app` respectively.

// Public module exports
pub mod config;
pub mod content;
pub mod error;
pub mod file;
pub mod ids;
pub mod ports;

// Re-export commonly used types at the crate root
pub use config::BridgeConfig;
pub use error::{BridgeError, BridgeErrorKind, BridgeResult};
pub use file::{
    AccessMode, BackendId, ContentRecord, DirEntry, DirectoryValue, EntryKind, FileFilter,
    FileValue, MimeType, NamedDirectory, NativeHandle, OpenOptions, PermissionStatus, SaveContent,
    SaveOptions, StoredHandle,
};
pub use ids::ItemId;
