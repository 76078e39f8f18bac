//! Host environment detection.
//!
//! Coarse classification of the process environment, used for logging at
//! bridge construction and by hosts when deciding which native ports to
//! wire up. Backend selection itself relies on each adapter's own
//! capability self-test.

/// Represents the kind of host environment the process runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEnvironment {
    /// A desktop session able to show native dialogs.
    Desktop,
    /// A mobile host (plugin-based filesystem access).
    Mobile,
    /// No display session detected; only the fallback backend is expected
    /// to operate here.
    Headless,
}

/// Detect the host environment of the current process.
///
/// - **macOS / Windows**: always `Desktop`
/// - **Android / iOS**: always `Mobile`
/// - **Linux**: `Mobile` when Android indicators are present (containers),
///   `Desktop` when a display session is detected, `Headless` otherwise
pub fn detect_host_environment() -> HostEnvironment {
    #[cfg(any(target_os = "macos", target_os = "windows"))]
    {
        return HostEnvironment::Desktop;
    }

    #[cfg(any(target_os = "android", target_os = "ios"))]
    {
        return HostEnvironment::Mobile;
    }

    #[cfg(target_os = "linux")]
    {
        if has_android_indicators() {
            tracing::debug!("Android indicators present, treating host as mobile");
            return HostEnvironment::Mobile;
        }

        if has_display_session() {
            return HostEnvironment::Desktop;
        }

        tracing::debug!("no display session detected, treating host as headless");
        HostEnvironment::Headless
    }

    #[cfg(not(any(
        target_os = "macos",
        target_os = "windows",
        target_os = "android",
        target_os = "ios",
        target_os = "linux"
    )))]
    {
        HostEnvironment::Headless
    }
}

/// Android userland detection for Linux builds running inside Android
/// containers or Termux-like environments.
#[cfg(target_os = "linux")]
fn has_android_indicators() -> bool {
    std::env::var("ANDROID_ROOT").is_ok() || std::env::var("ANDROID_DATA").is_ok()
}

/// A display session is indicated by an X11 or Wayland display variable.
#[cfg(target_os = "linux")]
fn has_display_session() -> bool {
    std::env::var("DISPLAY").is_ok() || std::env::var("WAYLAND_DISPLAY").is_ok()
}
