//! Windows platform integration.
//!
//! Monitors come from `EnumDisplayMonitors` (id = `HMONITOR` value), windows
//! from `EnumWindows` (id = `HWND` value). Windows has no capture consent
//! prompt, so the permission gate is a no-op.
//!
//! On other targets every entry point reports `Unsupported` so dependent
//! crates build unchanged.

use castkit_common::error::CastkitResult;
use castkit_platform_core::{
    DisplayServer, NoPermissionGate, PermissionGate, PlatformCapabilities, Source,
    SourceEnumerator,
};

#[cfg(target_os = "windows")]
mod native;

/// Win32 enumerator.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Enumerator;

impl SourceEnumerator for Win32Enumerator {
    fn list_displays(&self) -> CastkitResult<Vec<Source>> {
        list_displays()
    }

    fn list_windows(&self) -> CastkitResult<Vec<Source>> {
        list_windows()
    }
}

/// Detect monitors on Windows.
pub fn list_displays() -> CastkitResult<Vec<Source>> {
    #[cfg(target_os = "windows")]
    {
        native::list_displays()
    }
    #[cfg(not(target_os = "windows"))]
    {
        Err(castkit_common::error::CastkitError::unsupported(
            "Win32 monitor enumeration is only available on Windows",
        ))
    }
}

/// List every top-level window, hidden and untitled ones included.
pub fn list_windows() -> CastkitResult<Vec<Source>> {
    #[cfg(target_os = "windows")]
    {
        native::list_windows()
    }
    #[cfg(not(target_os = "windows"))]
    {
        Err(castkit_common::error::CastkitError::unsupported(
            "Win32 window enumeration is only available on Windows",
        ))
    }
}

/// Capture paths available on Windows 10 1903 and later.
pub fn probe_capabilities() -> PlatformCapabilities {
    PlatformCapabilities {
        display_server: DisplayServer::Windows,
        compositor_capture: true,
        legacy_screen_capture: true,
        window_capture: true,
        system_audio: true,
        permission_gate: false,
    }
}

/// Permission gate for Windows.
pub fn permission_gate() -> Box<dyn PermissionGate> {
    Box::new(NoPermissionGate)
}
