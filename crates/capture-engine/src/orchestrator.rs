//! Recording session orchestration.
//!
//! [`Recorder`] owns the single recording session and sequences every
//! transition of its state machine:
//!
//! ```text
//! Uninitialized --init--> Idle --start--> Starting --> Recording
//!                          ^                               |
//!                          +------ Idle <-- Stopping <-stop+
//!
//! any --shutdown--> ShuttingDown --> Uninitialized
//! ```
//!
//! Each operation comes in two forms: a typed `try_*` method returning
//! [`CastkitResult`], and a host-facing form that logs the failure, keeps it
//! in [`Recorder::last_error`], and returns a plain success flag.

use std::fmt;
use std::path::Path;

use castkit_common::clock::RecordingClock;
use castkit_common::config::AppConfig;
use castkit_common::error::{CastkitError, CastkitResult};
use castkit_platform_core::{
    BackendId, PermissionGate, PermissionState, PlatformCapabilities, Source, SourceEnumerator,
    SourceId, SourceKind,
};
use serde::Serialize;

use crate::engine::{CaptureEngine, CapturePlan, EncoderSettings, RecordingHandle};
use crate::pipeline::GStreamerEngine;
use crate::selector::select_backend;
use crate::validator::{source_selection, validate, RecordingConfigInput, RecordingConfiguration};

/// State of the recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Engine not initialized.
    Uninitialized,
    /// Ready to record.
    Idle,
    /// Engine start in progress. Never observable between calls.
    Starting,
    /// Recording in progress.
    Recording,
    /// Output being finalized. Never observable between calls.
    Stopping,
    /// Engine teardown in progress. Never observable between calls.
    ShuttingDown,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Idle => "idle",
            SessionState::Starting => "starting",
            SessionState::Recording => "recording",
            SessionState::Stopping => "stopping",
            SessionState::ShuttingDown => "shutting down",
        };
        f.write_str(name)
    }
}

/// Snapshot of the session for hosts.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub state: SessionState,
    pub configuration: Option<RecordingConfiguration>,
    pub backend: Option<BackendId>,
    pub started_at: Option<String>,
    pub elapsed_secs: Option<f64>,
}

/// Collaborators a [`Recorder`] drives.
pub struct RecorderParts {
    pub engine: Box<dyn CaptureEngine>,
    pub enumerator: Box<dyn SourceEnumerator>,
    pub permission: Box<dyn PermissionGate>,
    pub capabilities: PlatformCapabilities,
    pub config: AppConfig,
}

struct ActiveRecording {
    configuration: RecordingConfiguration,
    backend: BackendId,
    handle: Box<dyn RecordingHandle>,
    clock: RecordingClock,
}

/// The recording session orchestrator.
pub struct Recorder {
    engine: Box<dyn CaptureEngine>,
    enumerator: Box<dyn SourceEnumerator>,
    permission: Box<dyn PermissionGate>,
    capabilities: PlatformCapabilities,
    config: AppConfig,
    state: SessionState,
    active: Option<ActiveRecording>,
    last_error: Option<CastkitError>,
}

impl Recorder {
    pub fn new(parts: RecorderParts) -> Self {
        Self {
            engine: parts.engine,
            enumerator: parts.enumerator,
            permission: parts.permission,
            capabilities: parts.capabilities,
            config: parts.config,
            state: SessionState::Uninitialized,
            active: None,
            last_error: None,
        }
    }

    /// Recorder for the running platform, backed by GStreamer.
    pub fn native(config: &AppConfig) -> Self {
        let (enumerator, permission, capabilities) = native_platform();
        tracing::debug!(?capabilities, "Probed platform capabilities");
        Self::new(RecorderParts {
            engine: Box::new(GStreamerEngine::new()),
            enumerator,
            permission,
            capabilities,
            config: config.clone(),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Most recent failure reported by any operation.
    pub fn last_error(&self) -> Option<&CastkitError> {
        self.last_error.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        let active = self.active.as_ref();
        SessionStatus {
            state: self.state,
            configuration: active.map(|a| a.configuration.clone()),
            backend: active.map(|a| a.backend),
            started_at: active.map(|a| a.clock.epoch_wall().to_string()),
            elapsed_secs: active.map(|a| a.clock.elapsed_secs()),
        }
    }

    /// Initialize the capture engine. Idempotent once initialized.
    pub fn try_init(&mut self) -> CastkitResult<()> {
        if self.state != SessionState::Uninitialized {
            return Ok(());
        }
        self.engine.init()?;
        self.state = SessionState::Idle;
        tracing::info!("Recorder initialized");
        Ok(())
    }

    pub fn try_list_displays(&self) -> CastkitResult<Vec<Source>> {
        self.ensure_initialized("list displays")?;
        self.enumerator.list_displays()
    }

    pub fn try_list_windows(&self) -> CastkitResult<Vec<Source>> {
        self.ensure_initialized("list windows")?;
        self.enumerator.list_windows()
    }

    /// Current capture permission, read fresh from the OS.
    pub fn try_check_permission(&self) -> CastkitResult<PermissionState> {
        self.ensure_initialized("check permission")?;
        Ok(self.permission.check())
    }

    /// Run the OS consent flow. **May block** until the user responds.
    pub fn try_request_permission(&self) -> CastkitResult<bool> {
        self.ensure_initialized("request permission")?;
        if !self.permission.is_required() {
            return Ok(true);
        }
        if self.permission.check().is_granted() {
            return Ok(true);
        }
        tracing::info!("Requesting screen capture permission");
        Ok(self.permission.request())
    }

    /// Start a recording. Returns once capture has begun or definitively
    /// failed; on failure the session stays `Idle`.
    pub fn try_start(
        &mut self,
        output_path: impl AsRef<Path>,
        input: &RecordingConfigInput,
    ) -> CastkitResult<RecordingConfiguration> {
        if self.state != SessionState::Idle {
            return Err(CastkitError::invalid_state(self.state, "start recording"));
        }

        if self.permission.is_required() {
            let permission = self.permission.check();
            if !permission.is_granted() {
                return Err(CastkitError::permission_denied(format!(
                    "Screen capture permission is {permission:?}"
                )));
            }
        }

        let (kind, id) = source_selection(input)?;
        let (source, display_index) = self.lookup_source(kind, &id)?;
        let mut configuration = validate(
            output_path.as_ref(),
            input,
            source.as_ref(),
            &self.config.limits,
            &self.config.recording,
        )?;

        let backend = select_backend(kind, &self.capabilities)?;
        if configuration.capture_audio && !self.capabilities.system_audio {
            tracing::warn!("System audio capture is unavailable; recording video only");
            configuration.capture_audio = false;
        }

        let plan = CapturePlan {
            configuration,
            backend,
            display_server: self.capabilities.display_server,
            source,
            display_index,
            encoder: EncoderSettings {
                video_bitrate_kbps: self.config.recording.video_bitrate_kbps,
                audio_bitrate_kbps: self.config.recording.audio_bitrate_kbps,
                audio_sample_rate: self.config.recording.audio_sample_rate,
            },
        };

        self.state = SessionState::Starting;
        let handle = match self.launch(&plan) {
            Ok(handle) => handle,
            Err(e) => {
                self.state = SessionState::Idle;
                return Err(e);
            }
        };

        let clock = RecordingClock::start();
        tracing::info!(
            source_id = %plan.configuration.source_id,
            kind = %plan.configuration.source_kind,
            %backend,
            output = %plan.configuration.output_path.display(),
            width = plan.configuration.width,
            height = plan.configuration.height,
            fps = plan.configuration.fps,
            epoch_wall = %clock.epoch_wall(),
            "Recording started"
        );

        self.active = Some(ActiveRecording {
            configuration: plan.configuration.clone(),
            backend,
            handle,
            clock,
        });
        self.state = SessionState::Recording;
        Ok(plan.configuration)
    }

    /// Stop the active recording, flushing the output before returning.
    ///
    /// The session returns to `Idle` even when the engine reports a failure.
    pub fn try_stop(&mut self) -> CastkitResult<()> {
        if self.state != SessionState::Recording {
            return Err(CastkitError::invalid_state(self.state, "stop recording"));
        }
        self.finish("Recording stopped")
    }

    /// Check on the active recording. An engine that stopped by itself is
    /// finalized, the session returns to `Idle`, and its failure is reported.
    pub fn try_poll(&mut self) -> CastkitResult<SessionState> {
        if self.state != SessionState::Recording {
            return Ok(self.state);
        }
        let running = self
            .active
            .as_ref()
            .map(|a| a.handle.is_running())
            .unwrap_or(false);
        if running {
            return Ok(self.state);
        }

        tracing::warn!("Capture engine stopped unexpectedly");
        self.finish("Recording ended by engine")?;
        Err(CastkitError::platform(
            "Capture engine stopped before the recording was stopped",
        ))
    }

    /// Stop any recording, tear down the engine and return to
    /// `Uninitialized`. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        if self.state == SessionState::Uninitialized {
            return;
        }
        self.state = SessionState::ShuttingDown;

        if let Some(mut active) = self.active.take() {
            tracing::info!("Stopping active recording before shutdown");
            if let Err(e) = active.handle.stop() {
                tracing::warn!(error = %e, "Recording did not finalize cleanly during shutdown");
                self.last_error = Some(e);
            }
        }

        self.engine.shutdown();
        self.state = SessionState::Uninitialized;
        tracing::info!("Recorder shut down");
    }

    /// Host form of [`Recorder::try_init`].
    pub fn init(&mut self) -> bool {
        let result = self.try_init();
        self.report("initialize", result).is_some()
    }

    /// Host form of [`Recorder::try_list_displays`]; empty on failure.
    pub fn list_displays(&mut self) -> Vec<Source> {
        let result = self.try_list_displays();
        self.report("list displays", result).unwrap_or_default()
    }

    /// Host form of [`Recorder::try_list_windows`]; empty on failure.
    pub fn list_windows(&mut self) -> Vec<Source> {
        let result = self.try_list_windows();
        self.report("list windows", result).unwrap_or_default()
    }

    pub fn check_screen_permission(&mut self) -> bool {
        let result = self.try_check_permission();
        self.report("check permission", result)
            .is_some_and(PermissionState::is_granted)
    }

    /// **May block** until the user responds to the OS prompt.
    pub fn request_screen_permission(&mut self) -> bool {
        let result = self.try_request_permission();
        self.report("request permission", result).unwrap_or(false)
    }

    pub fn start_recording(
        &mut self,
        output_path: impl AsRef<Path>,
        input: &RecordingConfigInput,
    ) -> bool {
        let result = self.try_start(output_path, input);
        self.report("start recording", result).is_some()
    }

    pub fn stop_recording(&mut self) -> bool {
        let result = self.try_stop();
        self.report("stop recording", result).is_some()
    }

    pub fn poll(&mut self) -> SessionState {
        let result = self.try_poll();
        self.report("poll recording", result);
        self.state
    }

    fn ensure_initialized(&self, operation: &'static str) -> CastkitResult<()> {
        match self.state {
            SessionState::Uninitialized | SessionState::ShuttingDown => {
                Err(CastkitError::invalid_state(self.state, operation))
            }
            _ => Ok(()),
        }
    }

    /// Find the source in a fresh listing.
    ///
    /// A display missing from a successful listing is disconnected. Windows
    /// are still handed to the engine by native handle.
    fn lookup_source(
        &self,
        kind: SourceKind,
        id: &SourceId,
    ) -> CastkitResult<(Option<Source>, Option<usize>)> {
        let sources = match self.enumerator.list(kind) {
            Ok(sources) => sources,
            Err(e) => {
                tracing::warn!(%kind, error = %e, "Could not enumerate sources; using defaults");
                return Ok((None, None));
            }
        };

        let Some(index) = sources.iter().position(|s| &s.id == id) else {
            if kind == SourceKind::Display {
                return Err(CastkitError::backend_start(format!(
                    "Display {id} is no longer connected"
                )));
            }
            tracing::warn!(%kind, source_id = %id, "Source not found in current enumeration");
            return Ok((None, None));
        };

        let display_index = (kind == SourceKind::Display).then_some(index);
        Ok((Some(sources[index].clone()), display_index))
    }

    fn launch(&mut self, plan: &CapturePlan) -> CastkitResult<Box<dyn RecordingHandle>> {
        let output = &plan.configuration.output_path;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                CastkitError::backend_start(format!(
                    "Cannot create output directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        self.engine.start(plan)
    }

    fn finish(&mut self, message: &'static str) -> CastkitResult<()> {
        self.state = SessionState::Stopping;
        let result = match self.active.take() {
            Some(mut active) => {
                let result = active.handle.stop();
                tracing::info!(
                    output = %active.configuration.output_path.display(),
                    elapsed_secs = active.clock.elapsed_secs(),
                    "{message}"
                );
                result
            }
            None => Ok(()),
        };
        self.state = SessionState::Idle;
        result
    }

    fn report<T>(&mut self, operation: &'static str, result: CastkitResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(operation, kind = ?e.kind(), error = %e, state = %self.state, "Recorder operation failed");
                self.last_error = Some(e);
                None
            }
        }
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn native_platform() -> (
    Box<dyn SourceEnumerator>,
    Box<dyn PermissionGate>,
    PlatformCapabilities,
) {
    #[cfg(target_os = "windows")]
    {
        (
            Box::new(castkit_platform_windows::Win32Enumerator),
            castkit_platform_windows::permission_gate(),
            castkit_platform_windows::probe_capabilities(),
        )
    }
    #[cfg(target_os = "macos")]
    {
        (
            Box::new(castkit_platform_macos::MacEnumerator),
            Box::new(castkit_platform_macos::ScreenCaptureAccessGate),
            castkit_platform_macos::probe_capabilities(),
        )
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        (
            Box::new(castkit_platform_linux::LinuxEnumerator),
            castkit_platform_linux::permission_gate(),
            castkit_platform_linux::probe_capabilities(),
        )
    }
}
