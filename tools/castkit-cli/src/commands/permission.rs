//! Show or request screen capture permission.

use castkit_capture_engine::Recorder;
use castkit_common::config::AppConfig;
use serde::Serialize;

#[derive(Serialize)]
struct PermissionReport {
    required: bool,
    granted: bool,
}

pub async fn run(config: &AppConfig, request: bool, json: bool) -> anyhow::Result<()> {
    let mut recorder = Recorder::native(config);
    recorder.try_init()?;
    let required = recorder.capabilities().permission_gate;
    let mut granted = recorder.try_check_permission()?.is_granted();

    if request && !granted {
        if !json {
            println!("Waiting for the screen recording prompt to be answered...");
        }
        // The OS prompt can block indefinitely.
        granted = tokio::task::spawn_blocking(move || recorder.try_request_permission()).await??;

        #[cfg(target_os = "macos")]
        if !granted {
            castkit_platform_macos::open_screen_recording_preferences();
        }
    }

    if json {
        let report = PermissionReport { required, granted };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !required {
        println!("Screen capture needs no permission on this platform.");
    } else if granted {
        println!("[OK] Screen recording permission granted.");
    } else {
        println!("[MISSING] Screen recording permission not granted.");
        if !request {
            println!("    Fix: run `castkit permission --request`, then restart the terminal.");
        }
    }
    Ok(())
}
