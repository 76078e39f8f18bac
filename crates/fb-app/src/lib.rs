//! # fb-app
//!
//! Wires configuration, the recent store and the wired host ports into a
//! [`FileBridge`]: backend selection runs once at build time and every
//! facade call delegates to the winning backend.

pub mod bridge;
pub mod builder;
pub mod deps;

pub use bridge::{BackendCapabilities, FileBridge};
pub use builder::FileBridgeBuilder;
pub use deps::BridgeDeps;

#[cfg(test)]
pub(crate) mod testing;
