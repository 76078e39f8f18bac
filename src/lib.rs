//! # FileBridge
//!
//! A unified facade over heterogeneous host file-access mechanisms: native
//! desktop dialogs, capability-scoped live handles, mobile filesystem
//! plugins and a plain picker/download fallback. One backend is selected at
//! build time; every operation then flows through the same typed surface,
//! with failures normalized into a shared taxonomy and captures recorded in
//! a persisted, pruned recent-files store.
//!
//! ```no_run
//! use std::sync::Arc;
//! use filebridge::{BridgeConfig, FileBridgeBuilder, OpenOptions};
//! # use filebridge::ports::FallbackHostPort;
//! # async fn demo(fallback: Arc<dyn FallbackHostPort>) -> anyhow::Result<()> {
//! let bridge = FileBridgeBuilder::new(BridgeConfig::new("my-app"))
//!     .with_fallback_host(fallback)
//!     .build()?;
//! let file = bridge.open_file(OpenOptions::default()).await?;
//! println!("{}: {} bytes", file.name, file.size);
//! # Ok(())
//! # }
//! ```

pub use fb_app::{BackendCapabilities, BridgeDeps, FileBridge, FileBridgeBuilder};
pub use fb_core::{
    AccessMode, BackendId, BridgeConfig, BridgeError, BridgeErrorKind, BridgeResult,
    ContentRecord, DirEntry, DirectoryValue, EntryKind, FileFilter, FileValue, ItemId, MimeType,
    NamedDirectory, NativeHandle, OpenOptions, PermissionStatus, SaveContent, SaveOptions,
    StoredHandle,
};
pub use fb_infra::LocalStore;
pub use fb_platform::{detect_host_environment, HostEnvironment};

/// Port traits a host implements to wire its native surfaces in.
pub mod ports {
    pub use fb_core::ports::{
        ClockPort, DesktopDialogPort, FallbackHostPort, HandleHostError, HandleHostPort,
        HandlePayload, MobileFsError, MobileFsPort, MobilePick, MobileStat, NativeDirEntry,
        PermissionTarget, PickedFile, PlatformAdapter, RecentStorePort,
    };
}
