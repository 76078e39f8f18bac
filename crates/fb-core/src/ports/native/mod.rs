//! Native host ports - the black-box capabilities behind each backend.
//!
//! One port per host mechanism, each with its own failure surface. The
//! adapters in `fb-platform` are the only translation point from these
//! errors into the shared taxonomy.

pub mod desktop;
pub mod fallback;
pub mod handle_host;
pub mod mobile;

pub use desktop::DesktopDialogPort;
pub use fallback::{FallbackHostPort, PickedFile};
pub use handle_host::{HandleHostError, HandleHostPort, HandlePayload, NativeDirEntry};
pub use mobile::{MobileFsError, MobileFsPort, MobilePick, MobileStat};
