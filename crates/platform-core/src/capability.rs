//! Platform capture capabilities and backend identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display server / platform family used for capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayServer {
    Wayland,
    X11,
    Windows,
    MacOS,
    #[default]
    Unknown,
}

/// A platform capture implementation the engine can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendId {
    /// Modern compositor-level display capture (Windows Graphics Capture,
    /// macOS screen capture).
    CompositorCapture,
    /// Single-window capture through the window manager.
    WindowCapture,
    /// Legacy full-display grab (X11 image grab, GDI).
    LegacyScreenCapture,
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendId::CompositorCapture => f.write_str("compositor-capture"),
            BackendId::WindowCapture => f.write_str("window-capture"),
            BackendId::LegacyScreenCapture => f.write_str("legacy-screen-capture"),
        }
    }
}

/// What the running platform can capture, probed once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlatformCapabilities {
    pub display_server: DisplayServer,
    pub compositor_capture: bool,
    pub legacy_screen_capture: bool,
    pub window_capture: bool,
    pub system_audio: bool,
    pub permission_gate: bool,
}

impl PlatformCapabilities {
    /// Whether the given backend exists on this platform.
    pub fn supports(&self, backend: BackendId) -> bool {
        match backend {
            BackendId::CompositorCapture => self.compositor_capture,
            BackendId::WindowCapture => self.window_capture,
            BackendId::LegacyScreenCapture => self.legacy_screen_capture,
        }
    }

    /// Backends available here, in preference order.
    pub fn available_backends(&self) -> Vec<BackendId> {
        [
            BackendId::CompositorCapture,
            BackendId::LegacyScreenCapture,
            BackendId::WindowCapture,
        ]
        .into_iter()
        .filter(|backend| self.supports(*backend))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_backends_follow_flags() {
        let caps = PlatformCapabilities {
            display_server: DisplayServer::X11,
            legacy_screen_capture: true,
            window_capture: true,
            ..Default::default()
        };
        assert_eq!(
            caps.available_backends(),
            vec![BackendId::LegacyScreenCapture, BackendId::WindowCapture]
        );
        assert!(!caps.supports(BackendId::CompositorCapture));
    }

    #[test]
    fn backend_names_are_kebab_case() {
        assert_eq!(BackendId::CompositorCapture.to_string(), "compositor-capture");
        assert_eq!(
            BackendId::LegacyScreenCapture.to_string(),
            "legacy-screen-capture"
        );
    }
}
