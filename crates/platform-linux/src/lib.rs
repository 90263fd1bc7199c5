//! Castkit Linux Platform Integration
//!
//! Platform-specific implementations for Linux:
//! - **Display Detection:** display server detection and XRandR output enumeration
//! - **Window Detection:** EWMH client list via `wmctrl`
//! - **Permissions:** capability detection and user guidance
//!
//! Linux has no capture consent model outside the Wayland portal, so the
//! permission gate here is [`NoPermissionGate`].

use castkit_common::error::CastkitResult;
use castkit_platform_core::{
    NoPermissionGate, PermissionGate, PlatformCapabilities, Source, SourceEnumerator,
};

pub mod display;
pub mod permissions;
pub mod windows;

pub use display::*;
pub use windows::list_windows;

/// X11 enumerator (also works under XWayland).
#[derive(Debug, Default, Clone, Copy)]
pub struct LinuxEnumerator;

impl SourceEnumerator for LinuxEnumerator {
    fn list_displays(&self) -> CastkitResult<Vec<Source>> {
        display::list_displays()
    }

    fn list_windows(&self) -> CastkitResult<Vec<Source>> {
        windows::list_windows()
    }
}

/// Probe what the current session can capture.
pub fn probe_capabilities() -> PlatformCapabilities {
    let display_server = detect_display_server();
    let x11 = x11_available();
    tracing::debug!(?display_server, x11, "Probed Linux capture capabilities");

    PlatformCapabilities {
        display_server,
        // Compositor capture on Wayland needs an interactive portal session;
        // displays go through the X11 grab path instead.
        compositor_capture: false,
        legacy_screen_capture: x11,
        window_capture: x11,
        system_audio: true,
        permission_gate: false,
    }
}

/// Permission gate for Linux sessions.
pub fn permission_gate() -> Box<dyn PermissionGate> {
    Box::new(NoPermissionGate)
}
