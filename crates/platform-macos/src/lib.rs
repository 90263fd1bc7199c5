//! macOS platform integration.
//!
//! - Display enumeration through CoreGraphics (`CGGetActiveDisplayList`)
//! - Window enumeration through the on-screen window list
//! - Screen recording consent through `CGPreflightScreenCaptureAccess` /
//!   `CGRequestScreenCaptureAccess`
//!
//! On other targets every entry point reports `Unsupported` so dependent
//! crates build unchanged.

use castkit_common::error::CastkitResult;
use castkit_platform_core::{
    DisplayServer, PermissionGate, PermissionState, PlatformCapabilities, Source,
    SourceEnumerator,
};

#[cfg(target_os = "macos")]
mod native;

/// CoreGraphics enumerator.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacEnumerator;

impl SourceEnumerator for MacEnumerator {
    fn list_displays(&self) -> CastkitResult<Vec<Source>> {
        list_displays()
    }

    fn list_windows(&self) -> CastkitResult<Vec<Source>> {
        list_windows()
    }
}

/// Detect displays on macOS.
pub fn list_displays() -> CastkitResult<Vec<Source>> {
    #[cfg(target_os = "macos")]
    {
        native::list_displays()
    }
    #[cfg(not(target_os = "macos"))]
    {
        Err(castkit_common::error::CastkitError::unsupported(
            "CoreGraphics display enumeration is only available on macOS",
        ))
    }
}

/// Detect on-screen windows on macOS.
pub fn list_windows() -> CastkitResult<Vec<Source>> {
    #[cfg(target_os = "macos")]
    {
        native::list_windows()
    }
    #[cfg(not(target_os = "macos"))]
    {
        Err(castkit_common::error::CastkitError::unsupported(
            "CoreGraphics window enumeration is only available on macOS",
        ))
    }
}

/// Screen recording consent, read fresh from the OS on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScreenCaptureAccessGate;

impl PermissionGate for ScreenCaptureAccessGate {
    fn check(&self) -> PermissionState {
        #[cfg(target_os = "macos")]
        {
            // The preflight API cannot tell "never asked" from "refused";
            // both read as Denied, and request() handles either.
            if native::preflight_screen_capture() {
                PermissionState::Granted
            } else {
                PermissionState::Denied
            }
        }
        #[cfg(not(target_os = "macos"))]
        {
            PermissionState::Undetermined
        }
    }

    fn request(&self) -> bool {
        #[cfg(target_os = "macos")]
        {
            tracing::info!("Requesting screen recording permission");
            native::request_screen_capture()
        }
        #[cfg(not(target_os = "macos"))]
        {
            false
        }
    }
}

/// Capture paths available on macOS.
pub fn probe_capabilities() -> PlatformCapabilities {
    PlatformCapabilities {
        display_server: DisplayServer::MacOS,
        compositor_capture: true,
        legacy_screen_capture: false,
        // Per-window capture needs ScreenCaptureKit content filters, which
        // the engine does not drive.
        window_capture: false,
        system_audio: true,
        permission_gate: true,
    }
}

/// Open System Settings at the Screen Recording pane.
pub fn open_screen_recording_preferences() {
    let url = "x-apple.systempreferences:com.apple.preference.security?Privacy_ScreenCapture";
    match std::process::Command::new("open").arg(url).output() {
        Ok(output) if output.status.success() => {}
        _ => tracing::warn!("Failed to open Screen Recording preferences"),
    }
}
