//! # fb-platform
//!
//! Backend adapters for each host file-access mechanism, plus host
//! environment detection used by backend selection.

pub mod adapters;
pub mod capability;

pub use adapters::{DesktopBackend, FallbackBackend, MobileBackend, ScopedHandleBackend};
pub use capability::{detect_host_environment, HostEnvironment};
