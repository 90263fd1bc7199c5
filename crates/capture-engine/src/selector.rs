//! Backend selection.

use castkit_common::error::{CastkitError, CastkitResult};
use castkit_platform_core::{BackendId, PlatformCapabilities, SourceKind};

/// Pick the capture backend for a source kind on this platform.
///
/// Displays prefer compositor capture and fall back to the legacy screen
/// grab; windows always go through window capture. Audio-only recordings
/// are display recordings with audio enabled and select like any display.
pub fn select_backend(
    kind: SourceKind,
    capabilities: &PlatformCapabilities,
) -> CastkitResult<BackendId> {
    let backend = match kind {
        SourceKind::Display if capabilities.compositor_capture => BackendId::CompositorCapture,
        SourceKind::Display if capabilities.legacy_screen_capture => {
            BackendId::LegacyScreenCapture
        }
        SourceKind::Window if capabilities.window_capture => BackendId::WindowCapture,
        _ => {
            return Err(CastkitError::backend_unavailable(format!(
                "No capture backend supports {kind} sources on {:?}",
                capabilities.display_server
            )));
        }
    };

    tracing::debug!(%kind, %backend, "Selected capture backend");
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use castkit_common::error::ErrorKind;
    use castkit_platform_core::DisplayServer;

    fn caps(compositor: bool, legacy: bool, window: bool) -> PlatformCapabilities {
        PlatformCapabilities {
            display_server: DisplayServer::Windows,
            compositor_capture: compositor,
            legacy_screen_capture: legacy,
            window_capture: window,
            ..Default::default()
        }
    }

    #[test]
    fn displays_prefer_compositor_capture() {
        let selected = select_backend(SourceKind::Display, &caps(true, true, true)).unwrap();
        assert_eq!(selected, BackendId::CompositorCapture);
    }

    #[test]
    fn displays_fall_back_to_legacy() {
        let selected = select_backend(SourceKind::Display, &caps(false, true, false)).unwrap();
        assert_eq!(selected, BackendId::LegacyScreenCapture);
    }

    #[test]
    fn windows_route_to_window_capture() {
        let selected = select_backend(SourceKind::Window, &caps(true, true, true)).unwrap();
        assert_eq!(selected, BackendId::WindowCapture);
    }

    #[test]
    fn missing_backend_is_unavailable_not_a_panic() {
        let err = select_backend(SourceKind::Window, &caps(true, false, false)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BackendUnavailable);

        let err = select_backend(SourceKind::Display, &PlatformCapabilities::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BackendUnavailable);
    }
}
