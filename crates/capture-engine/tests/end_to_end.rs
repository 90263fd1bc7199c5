//! Records the first display for a few seconds with the native engine.
//!
//! Needs a graphical session and the GStreamer capture plugins:
//! `cargo test -p castkit-capture-engine --test end_to_end -- --ignored`

use std::time::Duration;

use castkit_capture_engine::{Recorder, RecordingConfigInput, SessionState};
use castkit_common::config::AppConfig;

#[test]
#[ignore = "requires a display and GStreamer capture plugins"]
fn records_first_display_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("e2e.mkv");

    let mut recorder = Recorder::native(&AppConfig::default());
    assert!(recorder.init(), "init failed: {:?}", recorder.last_error());

    let displays = recorder.list_displays();
    let Some(display) = displays.first() else {
        eprintln!("no displays connected; nothing to record");
        return;
    };

    let mut input = RecordingConfigInput::for_source(display)
        .with_size(1280, 720)
        .with_fps(30);
    input.capture_audio = Some(false);

    assert!(
        recorder.start_recording(&output, &input),
        "start failed: {:?}",
        recorder.last_error()
    );
    assert_eq!(recorder.state(), SessionState::Recording);

    std::thread::sleep(Duration::from_secs(3));
    assert!(recorder.stop_recording(), "stop failed: {:?}", recorder.last_error());

    let size = std::fs::metadata(&output).unwrap().len();
    assert!(size > 0);

    recorder.shutdown();
}
