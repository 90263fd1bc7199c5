//! Interface to the delegated capture-and-encode engine.
//!
//! The orchestrator never grabs pixels itself. It hands a [`CapturePlan`] to
//! a [`CaptureEngine`] and tracks the returned [`RecordingHandle`] until the
//! recording is stopped.

use std::sync::atomic::{AtomicBool, Ordering};

use castkit_common::error::{CastkitError, CastkitResult};
use castkit_platform_core::{BackendId, DisplayServer, Source};
use serde::Serialize;

use crate::validator::RecordingConfiguration;

/// Everything the engine needs to begin one recording.
#[derive(Debug, Clone, Serialize)]
pub struct CapturePlan {
    pub configuration: RecordingConfiguration,
    pub backend: BackendId,
    pub display_server: DisplayServer,

    /// Enumerated source matching the configured id, if it was still present
    /// when the recording started.
    pub source: Option<Source>,

    /// Position of the source in the display listing (display sources only).
    pub display_index: Option<usize>,

    pub encoder: EncoderSettings,
}

/// Encoder parameters taken from the application config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncoderSettings {
    pub video_bitrate_kbps: u32,
    pub audio_bitrate_kbps: u32,
    pub audio_sample_rate: u32,
}

/// A capture-and-encode engine.
pub trait CaptureEngine: Send {
    /// Acquire native resources. Called once per `Uninitialized -> Idle`
    /// transition.
    fn init(&mut self) -> CastkitResult<()>;

    /// Begin capturing. Returns only once capture has actually started or
    /// definitively failed.
    fn start(&mut self, plan: &CapturePlan) -> CastkitResult<Box<dyn RecordingHandle>>;

    /// Release native resources. Must tolerate being called when `init`
    /// never succeeded.
    fn shutdown(&mut self);
}

/// A running recording inside the engine.
pub trait RecordingHandle: Send {
    /// Finalize and flush the output container.
    ///
    /// Reports any engine error observed while the recording was running,
    /// after the output has been closed.
    fn stop(&mut self) -> CastkitResult<()>;

    /// Whether capture is still producing output.
    fn is_running(&self) -> bool;
}

static ENGINE_OWNED: AtomicBool = AtomicBool::new(false);

/// Process-wide claim on the capture device.
///
/// Only one engine may own the capture device at a time; the claim is
/// released when the lease is dropped.
#[derive(Debug)]
pub struct EngineLease {
    _private: (),
}

impl EngineLease {
    pub fn acquire() -> CastkitResult<Self> {
        ENGINE_OWNED
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                CastkitError::initialization(
                    "Capture engine is already owned by another recorder in this process",
                )
            })?;
        Ok(Self { _private: () })
    }
}

impl Drop for EngineLease {
    fn drop(&mut self) {
        ENGINE_OWNED.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lease_is_exclusive_until_dropped() {
        let lease = EngineLease::acquire().unwrap();

        let err = EngineLease::acquire().unwrap_err();
        assert_eq!(err.kind(), castkit_common::error::ErrorKind::Initialization);

        drop(lease);
        let again = EngineLease::acquire().unwrap();
        drop(again);
    }
}
