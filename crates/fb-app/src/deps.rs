//! Dependency bundle handed to the builder.

use std::sync::Arc;

use fb_core::ports::{
    ClockPort, DesktopDialogPort, FallbackHostPort, HandleHostPort, MobileFsPort, RecentStorePort,
};

/// Everything backend construction needs.
///
/// Native host ports are optional: a host wires in the surfaces it actually
/// has, and absent ports simply take the corresponding backend out of the
/// probe. The fallback host is required so that selection always terminates
/// with a working backend.
pub struct BridgeDeps {
    pub store: Arc<dyn RecentStorePort>,
    pub clock: Arc<dyn ClockPort>,
    pub desktop_dialog: Option<Arc<dyn DesktopDialogPort>>,
    pub handle_host: Option<Arc<dyn HandleHostPort>>,
    pub mobile_fs: Option<Arc<dyn MobileFsPort>>,
    pub fallback_host: Arc<dyn FallbackHostPort>,
}
