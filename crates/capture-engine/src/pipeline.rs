//! GStreamer capture-and-encode engine.
//!
//! Each recording is one `gst::Pipeline` built from a launch string: a
//! platform video source scaled to the configured size and frame rate,
//! encoded to H.264, optionally joined by a system-audio branch, and muxed
//! into a container chosen from the output extension.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use castkit_common::error::{CastkitError, CastkitResult};
use castkit_platform_core::{BackendId, DisplayServer};
use gst::prelude::*;
use gstreamer as gst;

use crate::engine::{CaptureEngine, CapturePlan, EngineLease, RecordingHandle};

const STATE_CHANGE_TIMEOUT_SECS: u64 = 10;
const EOS_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Output container, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Mp4,
    QuickTime,
    Matroska,
}

impl Container {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
        match extension.as_deref() {
            Some("mp4") | Some("m4v") => Container::Mp4,
            Some("mov") => Container::QuickTime,
            _ => Container::Matroska,
        }
    }

    fn muxer(self) -> &'static str {
        match self {
            Container::Mp4 => "mp4mux",
            Container::QuickTime => "qtmux",
            Container::Matroska => "matroskamux",
        }
    }

    fn uses_aac(self) -> bool {
        matches!(self, Container::Mp4 | Container::QuickTime)
    }
}

/// Engine that records through GStreamer.
#[derive(Debug, Default)]
pub struct GStreamerEngine {
    lease: Option<EngineLease>,
}

impl GStreamerEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CaptureEngine for GStreamerEngine {
    fn init(&mut self) -> CastkitResult<()> {
        if self.lease.is_some() {
            return Ok(());
        }
        let lease = EngineLease::acquire()?;
        init_gstreamer()?;
        self.lease = Some(lease);
        tracing::debug!("GStreamer capture engine initialized");
        Ok(())
    }

    fn start(&mut self, plan: &CapturePlan) -> CastkitResult<Box<dyn RecordingHandle>> {
        if self.lease.is_none() {
            return Err(CastkitError::initialization(
                "GStreamer capture engine is not initialized",
            ));
        }

        if plan.configuration.hide_self_from_capture {
            tracing::debug!(
                backend = %plan.backend,
                "Self-exclusion is not supported by the GStreamer sources; capturing every window"
            );
        }

        let launch = build_launch(plan)?;
        tracing::debug!(%launch, "Built capture pipeline");

        let mut recording = GstRecording::from_launch(plan.backend.to_string(), &launch)?;
        recording.start()?;
        Ok(Box::new(recording))
    }

    fn shutdown(&mut self) {
        if self.lease.take().is_some() {
            tracing::debug!("GStreamer capture engine released");
        }
    }
}

/// One running GStreamer pipeline.
pub struct GstRecording {
    name: String,
    pipeline: gst::Pipeline,
    running: AtomicBool,
    drained: AtomicBool,
    failure: Mutex<Option<String>>,
}

impl GstRecording {
    pub fn from_launch(name: impl Into<String>, launch: &str) -> CastkitResult<Self> {
        init_gstreamer()?;

        let element = gst::parse::launch(launch).map_err(|e| {
            CastkitError::backend_start(format!("Failed to build pipeline: {e}"))
        })?;

        let pipeline = element.dynamic_cast::<gst::Pipeline>().map_err(|_| {
            CastkitError::backend_start("Launch string did not produce a pipeline")
        })?;

        Ok(Self {
            name: name.into(),
            pipeline,
            running: AtomicBool::new(false),
            drained: AtomicBool::new(false),
            failure: Mutex::new(None),
        })
    }

    fn start(&mut self) -> CastkitResult<()> {
        if let Err(e) = self.pipeline.set_state(gst::State::Playing) {
            let detail = self.pop_bus_error().unwrap_or_else(|| format!("{e:?}"));
            let _ = self.pipeline.set_state(gst::State::Null);
            return Err(CastkitError::backend_start(format!(
                "Failed to start {} pipeline: {detail}",
                self.name
            )));
        }

        // State changes are async; capture has not begun until Playing.
        let wait_result = self
            .pipeline
            .state(gst::ClockTime::from_seconds(STATE_CHANGE_TIMEOUT_SECS));
        match wait_result {
            (Ok(_), state, _) => {
                if let Err(e) = require_playing(&self.name, state) {
                    tracing::warn!(pipeline = %self.name, ?state, "Pipeline did not reach Playing state within timeout");
                    let _ = self.pipeline.set_state(gst::State::Null);
                    return Err(e);
                }
            }
            (Err(e), _, _) => {
                let detail = self.pop_bus_error().unwrap_or_else(|| format!("{e:?}"));
                let _ = self.pipeline.set_state(gst::State::Null);
                return Err(CastkitError::backend_start(format!(
                    "{} pipeline failed to reach Playing state: {detail}",
                    self.name
                )));
            }
        }

        self.running.store(true, Ordering::SeqCst);
        tracing::info!(pipeline = %self.name, "Capture pipeline playing");
        Ok(())
    }

    fn pop_bus_error(&self) -> Option<String> {
        let bus = self.pipeline.bus()?;
        while let Some(msg) = bus.pop_filtered(&[gst::MessageType::Error]) {
            if let gst::MessageView::Error(e) = msg.view() {
                return Some(e.error().to_string());
            }
        }
        None
    }

    fn record_failure(&self, message: String) {
        if let Ok(mut failure) = self.failure.lock() {
            failure.get_or_insert(message);
        }
    }

    fn drain(&self) {
        if self.drained.load(Ordering::SeqCst) {
            return;
        }

        let outcome = self.wait_for_eos();
        if let Some(message) = outcome.failure() {
            tracing::warn!(pipeline = %self.name, %message, "Output may not be finalized");
            self.record_failure(message);
        }
        self.drained.store(true, Ordering::SeqCst);
    }

    fn wait_for_eos(&self) -> DrainOutcome {
        // EOS lets the encoder and muxer flush so the container is finalized.
        if !self.pipeline.send_event(gst::event::Eos::new()) {
            return DrainOutcome::EosRejected;
        }

        let Some(bus) = self.pipeline.bus() else {
            return DrainOutcome::TimedOut;
        };
        let start = std::time::Instant::now();
        loop {
            let elapsed = start.elapsed();
            if elapsed >= EOS_DRAIN_TIMEOUT {
                return DrainOutcome::TimedOut;
            }
            let remaining = EOS_DRAIN_TIMEOUT - elapsed;
            let timeout = gst::ClockTime::from_nseconds(remaining.as_nanos() as u64);
            match bus.timed_pop_filtered(timeout, &[gst::MessageType::Eos, gst::MessageType::Error]) {
                Some(msg) => match msg.view() {
                    gst::MessageView::Eos(_) => {
                        tracing::debug!(pipeline = %self.name, "EOS received; pipeline drained");
                        return DrainOutcome::Drained;
                    }
                    gst::MessageView::Error(e) => {
                        return DrainOutcome::Failed(e.error().to_string());
                    }
                    _ => {}
                },
                None => return DrainOutcome::TimedOut,
            }
        }
    }
}

/// How an EOS drain ended.
#[derive(Debug, PartialEq, Eq)]
enum DrainOutcome {
    Drained,
    EosRejected,
    TimedOut,
    Failed(String),
}

impl DrainOutcome {
    fn failure(self) -> Option<String> {
        match self {
            DrainOutcome::Drained => None,
            DrainOutcome::EosRejected => Some("pipeline rejected the EOS event".to_string()),
            DrainOutcome::TimedOut => Some(format!(
                "EOS did not arrive within {}s",
                EOS_DRAIN_TIMEOUT.as_secs()
            )),
            DrainOutcome::Failed(message) => Some(message),
        }
    }
}

fn require_playing(name: &str, state: gst::State) -> CastkitResult<()> {
    if state == gst::State::Playing {
        return Ok(());
    }
    Err(CastkitError::backend_start(format!(
        "{name} pipeline stuck in {state:?} after {STATE_CHANGE_TIMEOUT_SECS}s"
    )))
}

impl RecordingHandle for GstRecording {
    fn stop(&mut self) -> CastkitResult<()> {
        self.drain();

        self.pipeline.set_state(gst::State::Null).map_err(|e| {
            CastkitError::platform(format!("Failed to stop {} pipeline: {e:?}", self.name))
        })?;
        self.running.store(false, Ordering::SeqCst);

        let failure = self.failure.lock().ok().and_then(|mut f| f.take());
        match failure {
            Some(message) => Err(CastkitError::platform(format!(
                "{} pipeline failed during capture: {message}",
                self.name
            ))),
            None => Ok(()),
        }
    }

    fn is_running(&self) -> bool {
        if !self.running.load(Ordering::SeqCst) {
            return false;
        }
        if let Some(bus) = self.pipeline.bus() {
            while let Some(msg) =
                bus.pop_filtered(&[gst::MessageType::Error, gst::MessageType::Eos])
            {
                match msg.view() {
                    gst::MessageView::Error(e) => {
                        tracing::error!(pipeline = %self.name, error = %e.error(), "Capture pipeline error");
                        self.record_failure(e.error().to_string());
                        self.running.store(false, Ordering::SeqCst);
                    }
                    gst::MessageView::Eos(_) => {
                        self.drained.store(true, Ordering::SeqCst);
                        self.running.store(false, Ordering::SeqCst);
                    }
                    _ => {}
                }
            }
        }
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for GstRecording {
    fn drop(&mut self) {
        let _ = self.pipeline.set_state(gst::State::Null);
    }
}

/// Build the launch string for a capture plan.
pub fn build_launch(plan: &CapturePlan) -> CastkitResult<String> {
    let config = &plan.configuration;
    let container = Container::from_path(&config.output_path);
    let path = escape_path(&config.output_path);

    let source = video_source(plan)?;
    let (width, height) = (even(config.width), even(config.height));
    let fps = config.fps;
    // One keyframe every two seconds.
    let keyint = fps.saturating_mul(2).max(2);
    let bitrate = plan.encoder.video_bitrate_kbps.max(1);

    let mut launch = format!(
        "{source} ! queue max-size-buffers=200 leaky=downstream ! videoconvert ! videoscale ! videorate ! video/x-raw,format=I420,width={width},height={height},framerate={fps}/1 ! queue max-size-buffers=8 ! x264enc tune=zerolatency speed-preset=veryfast bitrate={bitrate} key-int-max={keyint} ! h264parse ! queue max-size-buffers=8 ! mux."
    );

    if config.capture_audio {
        let audio = audio_branch(plan, container)?;
        launch.push(' ');
        launch.push_str(&audio);
    }

    launch.push_str(&format!(
        " {} name=mux ! filesink location=\"{path}\"",
        container.muxer()
    ));
    Ok(launch)
}

fn video_source(plan: &CapturePlan) -> CastkitResult<String> {
    let config = &plan.configuration;
    let cursor = config.capture_cursor;

    match (plan.display_server, plan.backend) {
        (DisplayServer::Windows, BackendId::CompositorCapture) => Ok(format!(
            "d3d11screencapturesrc capture-api=wgc monitor-handle={} show-cursor={cursor}",
            native_handle(plan)?
        )),
        (DisplayServer::Windows, BackendId::LegacyScreenCapture) => Ok(format!(
            "gdiscreencapsrc monitor={} cursor={cursor}",
            connected_display_index(plan)?
        )),
        (DisplayServer::Windows, BackendId::WindowCapture) => Ok(format!(
            "d3d11screencapturesrc capture-api=wgc window-handle={} show-cursor={cursor}",
            native_handle(plan)?
        )),
        (DisplayServer::MacOS, BackendId::CompositorCapture) => {
            let index = connected_display_index(plan)?;
            Ok(format!(
                "avfvideosrc capture-screen=true capture-screen-cursor={cursor} device-index={index} do-timestamp=true"
            ))
        }
        (
            DisplayServer::X11 | DisplayServer::Wayland | DisplayServer::Unknown,
            BackendId::LegacyScreenCapture,
        ) => {
            let source = plan.source.as_ref().ok_or_else(|| disconnected(plan))?;
            let (x, y) = source.position();
            let region = x11_capture_region_fragment((x, y, source.width, source.height))?;
            Ok(format!(
                "ximagesrc use-damage=false show-pointer={cursor}{region} do-timestamp=true"
            ))
        }
        (
            DisplayServer::X11 | DisplayServer::Wayland | DisplayServer::Unknown,
            BackendId::WindowCapture,
        ) => Ok(format!(
            "ximagesrc use-damage=false show-pointer={cursor} xid={} do-timestamp=true",
            native_handle(plan)?
        )),
        (display_server, backend) => Err(CastkitError::backend_unavailable(format!(
            "{backend} has no GStreamer source on {display_server:?}"
        ))),
    }
}

fn audio_branch(plan: &CapturePlan, container: Container) -> CastkitResult<String> {
    let source = match plan.display_server {
        DisplayServer::Windows => "wasapisrc loopback=true low-latency=true do-timestamp=true",
        // Needs a loopback device (e.g. BlackHole) selected as default input.
        DisplayServer::MacOS => "osxaudiosrc do-timestamp=true",
        DisplayServer::X11 | DisplayServer::Wayland | DisplayServer::Unknown => {
            "pulsesrc device=@DEFAULT_MONITOR@ do-timestamp=true"
        }
    };

    let bitrate = plan.encoder.audio_bitrate_kbps.max(1).saturating_mul(1000);
    let encode = if container.uses_aac() {
        let rate = plan.encoder.audio_sample_rate;
        format!("audio/x-raw,rate={rate},channels=2 ! avenc_aac bitrate={bitrate} ! aacparse")
    } else {
        // Opus negotiates its own rate.
        format!("audio/x-raw,channels=2 ! opusenc bitrate={bitrate}")
    };

    Ok(format!(
        "{source} ! queue max-size-buffers=200 leaky=downstream ! audioconvert ! audioresample ! {encode} ! queue ! mux."
    ))
}

fn native_handle(plan: &CapturePlan) -> CastkitResult<u64> {
    let id = &plan.configuration.source_id;
    id.as_u64().ok_or_else(|| {
        CastkitError::backend_start(format!(
            "{} id {id} is not a native handle",
            plan.configuration.source_kind
        ))
    })
}

fn connected_display_index(plan: &CapturePlan) -> CastkitResult<usize> {
    plan.display_index.ok_or_else(|| disconnected(plan))
}

fn disconnected(plan: &CapturePlan) -> CastkitError {
    CastkitError::backend_start(format!(
        "Display {} is no longer connected",
        plan.configuration.source_id
    ))
}

fn x11_capture_region_fragment(capture_region: (i32, i32, u32, u32)) -> CastkitResult<String> {
    let (x, y, width, height) = capture_region;

    if width == 0 || height == 0 {
        return Err(CastkitError::backend_start(format!(
            "Invalid X11 capture region {width}x{height} at ({x},{y})"
        )));
    }

    let width_i32 = i32::try_from(width)
        .map_err(|_| CastkitError::backend_start(format!("X11 capture width too large: {width}")))?;
    let height_i32 = i32::try_from(height).map_err(|_| {
        CastkitError::backend_start(format!("X11 capture height too large: {height}"))
    })?;

    let endx = x
        .checked_add(width_i32 - 1)
        .ok_or_else(|| CastkitError::backend_start("X11 capture region x-range overflow"))?;
    let endy = y
        .checked_add(height_i32 - 1)
        .ok_or_else(|| CastkitError::backend_start("X11 capture region y-range overflow"))?;

    Ok(format!(" startx={x} starty={y} endx={endx} endy={endy}"))
}

/// x264 needs even dimensions for I420.
fn even(value: u32) -> u32 {
    (value & !1).max(2)
}

fn init_gstreamer() -> CastkitResult<()> {
    static GST_INIT: OnceLock<Result<(), String>> = OnceLock::new();
    let init_res = GST_INIT.get_or_init(|| gst::init().map_err(|e| e.to_string()));
    match init_res {
        Ok(()) => Ok(()),
        Err(e) => Err(CastkitError::initialization(format!(
            "Failed to initialize GStreamer: {e}"
        ))),
    }
}

fn escape_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EncoderSettings;
    use crate::validator::RecordingConfiguration;
    use castkit_common::error::ErrorKind;
    use castkit_platform_core::{Source, SourceId, SourceKind};
    use std::path::PathBuf;

    fn plan(
        display_server: DisplayServer,
        backend: BackendId,
        kind: SourceKind,
        id: &str,
        output: &str,
    ) -> CapturePlan {
        CapturePlan {
            configuration: RecordingConfiguration {
                source_kind: kind,
                source_id: SourceId::new(id),
                output_path: PathBuf::from(output),
                width: 1280,
                height: 720,
                fps: 30,
                capture_audio: false,
                capture_cursor: true,
                hide_self_from_capture: false,
            },
            backend,
            display_server,
            source: None,
            display_index: None,
            encoder: EncoderSettings {
                video_bitrate_kbps: 8000,
                audio_bitrate_kbps: 160,
                audio_sample_rate: 48000,
            },
        }
    }

    #[test]
    fn x11_region_fragment_uses_inclusive_end_coordinates() {
        let fragment = x11_capture_region_fragment((2560, 0, 2560, 1440)).unwrap();
        assert_eq!(
            fragment,
            " startx=2560 starty=0 endx=5119 endy=1439".to_string()
        );
    }

    #[test]
    fn x11_region_fragment_rejects_zero_size() {
        let err = x11_capture_region_fragment((0, 0, 0, 1080)).unwrap_err();
        assert!(err.to_string().contains("Invalid X11 capture region"));
    }

    #[test]
    fn x11_display_capture_grabs_the_output_region() {
        let mut plan = plan(
            DisplayServer::X11,
            BackendId::LegacyScreenCapture,
            SourceKind::Display,
            "HDMI-1",
            "/tmp/out.mkv",
        );
        plan.source = Some(Source::display(
            SourceId::new("HDMI-1"),
            "HDMI-1",
            1920,
            1080,
            1920,
            0,
            false,
        ));

        let launch = build_launch(&plan).unwrap();
        assert!(launch.starts_with("ximagesrc use-damage=false show-pointer=true startx=1920 starty=0 endx=3839 endy=1079"));
        assert!(launch.contains("width=1280,height=720,framerate=30/1"));
        assert!(launch.contains("x264enc tune=zerolatency speed-preset=veryfast bitrate=8000 key-int-max=60"));
        assert!(launch.ends_with("matroskamux name=mux ! filesink location=\"/tmp/out.mkv\""));
        assert!(!launch.contains("pulsesrc"));
    }

    #[test]
    fn x11_window_capture_uses_xid() {
        let plan = plan(
            DisplayServer::X11,
            BackendId::WindowCapture,
            SourceKind::Window,
            "60817415",
            "/tmp/out.mkv",
        );
        let launch = build_launch(&plan).unwrap();
        assert!(launch.starts_with("ximagesrc use-damage=false show-pointer=true xid=60817415"));
    }

    #[test]
    fn non_numeric_window_id_is_a_start_failure() {
        let plan = plan(
            DisplayServer::X11,
            BackendId::WindowCapture,
            SourceKind::Window,
            "not-a-window",
            "/tmp/out.mkv",
        );
        assert_eq!(build_launch(&plan).unwrap_err().kind(), ErrorKind::BackendStart);
    }

    #[test]
    fn windows_sources_address_native_handles() {
        let display = plan(
            DisplayServer::Windows,
            BackendId::CompositorCapture,
            SourceKind::Display,
            "65537",
            "C:\\rec\\out.mp4",
        );
        let launch = build_launch(&display).unwrap();
        assert!(launch.starts_with("d3d11screencapturesrc capture-api=wgc monitor-handle=65537 show-cursor=true"));
        assert!(launch.contains("location=\"C:\\\\rec\\\\out.mp4\""));

        let window = plan(
            DisplayServer::Windows,
            BackendId::WindowCapture,
            SourceKind::Window,
            "198482",
            "out.mkv",
        );
        assert!(build_launch(&window).unwrap().contains("window-handle=198482"));
    }

    #[test]
    fn mp4_output_uses_aac_audio() {
        let mut plan = plan(
            DisplayServer::Windows,
            BackendId::LegacyScreenCapture,
            SourceKind::Display,
            "65537",
            "/tmp/out.MP4",
        );
        plan.configuration.capture_audio = true;
        plan.display_index = Some(1);

        let launch = build_launch(&plan).unwrap();
        assert!(launch.starts_with("gdiscreencapsrc monitor=1 cursor=true"));
        assert!(launch.contains("wasapisrc loopback=true"));
        assert!(launch.contains("audio/x-raw,rate=48000,channels=2 ! avenc_aac bitrate=160000"));
        assert!(launch.contains("mp4mux name=mux"));
    }

    #[test]
    fn matroska_output_uses_opus_audio() {
        let mut plan = plan(
            DisplayServer::X11,
            BackendId::LegacyScreenCapture,
            SourceKind::Display,
            "eDP-1",
            "/tmp/out.mkv",
        );
        plan.configuration.capture_audio = true;
        plan.source = Some(Source::display(
            SourceId::new("eDP-1"),
            "eDP-1",
            1920,
            1080,
            0,
            0,
            true,
        ));
        let launch = build_launch(&plan).unwrap();
        assert!(launch.contains("pulsesrc device=@DEFAULT_MONITOR@"));
        assert!(launch.contains("opusenc bitrate=160000"));
    }

    #[test]
    fn macos_display_needs_an_index() {
        let mut plan = plan(
            DisplayServer::MacOS,
            BackendId::CompositorCapture,
            SourceKind::Display,
            "69733382",
            "/tmp/out.mov",
        );
        assert_eq!(build_launch(&plan).unwrap_err().kind(), ErrorKind::BackendStart);

        plan.display_index = Some(0);
        plan.configuration.width = 1279;
        let launch = build_launch(&plan).unwrap();
        assert!(launch.starts_with("avfvideosrc capture-screen=true capture-screen-cursor=true device-index=0"));
        assert!(launch.contains("width=1278,"));
        assert!(launch.contains("qtmux name=mux"));
    }

    #[test]
    fn disconnected_display_is_a_start_failure() {
        let x11 = plan(
            DisplayServer::X11,
            BackendId::LegacyScreenCapture,
            SourceKind::Display,
            "DP-9",
            "/tmp/out.mkv",
        );
        let err = build_launch(&x11).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BackendStart);
        assert!(err.to_string().contains("DP-9 is no longer connected"));

        let gdi = plan(
            DisplayServer::Windows,
            BackendId::LegacyScreenCapture,
            SourceKind::Display,
            "65537",
            "/tmp/out.mkv",
        );
        assert_eq!(build_launch(&gdi).unwrap_err().kind(), ErrorKind::BackendStart);
    }

    #[test]
    fn unsupported_combination_is_unavailable() {
        let plan = plan(
            DisplayServer::MacOS,
            BackendId::WindowCapture,
            SourceKind::Window,
            "42",
            "/tmp/out.mkv",
        );
        assert_eq!(
            build_launch(&plan).unwrap_err().kind(),
            ErrorKind::BackendUnavailable
        );
    }

    #[test]
    fn only_playing_counts_as_started() {
        assert!(require_playing("compositor-capture", gst::State::Playing).is_ok());
        for state in [gst::State::Paused, gst::State::Ready, gst::State::Null] {
            let err = require_playing("compositor-capture", state).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BackendStart);
        }
    }

    #[test]
    fn unfinished_drain_is_a_failure() {
        assert_eq!(DrainOutcome::Drained.failure(), None);
        assert!(DrainOutcome::EosRejected.failure().is_some());
        assert!(DrainOutcome::TimedOut
            .failure()
            .unwrap()
            .contains("EOS did not arrive"));
        assert_eq!(
            DrainOutcome::Failed("qtmux: not negotiated".into()).failure(),
            Some("qtmux: not negotiated".to_string())
        );
    }

    #[test]
    fn container_follows_extension() {
        assert_eq!(Container::from_path(Path::new("a.mp4")), Container::Mp4);
        assert_eq!(Container::from_path(Path::new("a.mov")), Container::QuickTime);
        assert_eq!(Container::from_path(Path::new("a.mkv")), Container::Matroska);
        assert_eq!(Container::from_path(Path::new("a")), Container::Matroska);
    }
}
