//! Backend adapter implementations.
//!
//! One adapter per host mechanism, each translating its native failure
//! surface into the shared taxonomy and writing captures through the
//! recent store.

pub mod desktop;
pub mod fallback;
pub mod mobile;
pub mod scoped_handle;

pub use desktop::DesktopBackend;
pub use fallback::FallbackBackend;
pub use mobile::MobileBackend;
pub use scoped_handle::ScopedHandleBackend;

use fb_core::BridgeError;

/// Local-store failures are infrastructure I/O, never `cancelled`.
pub(crate) fn store_err(err: anyhow::Error) -> BridgeError {
    BridgeError::io("recent store failure").with_cause(err)
}

/// Wall-clock milliseconds from a filesystem timestamp, when available.
pub(crate) fn system_time_ms(t: std::time::SystemTime) -> Option<i64> {
    t.duration_since(std::time::UNIX_EPOCH)
        .ok()
        .map(|d| d.as_millis() as i64)
}

#[cfg(test)]
pub(crate) mod testing;
