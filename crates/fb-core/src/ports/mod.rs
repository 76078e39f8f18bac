//! Port interfaces for the bridge.
//!
//! Ports define the contract between the core logic and its collaborators.
//! Two families live here: the [`PlatformAdapter`] contract every backend
//! satisfies, and the native host ports, the black-box capabilities each
//! backend invokes (dialogs, plugin calls, live-handle hosts). The native
//! surfaces keep their own heterogeneous error types; adapters translate
//! them into the shared taxonomy at the boundary.

pub mod adapter;
pub mod clock;
pub mod native;
pub mod store;

pub use adapter::{PermissionTarget, PlatformAdapter};
pub use clock::ClockPort;
pub use native::{
    DesktopDialogPort, FallbackHostPort, HandleHostError, HandleHostPort, HandlePayload,
    MobileFsError, MobileFsPort, MobilePick, MobileStat, NativeDirEntry, PickedFile,
};
pub use store::RecentStorePort;
