//! Check system capabilities.

use castkit_capture_engine::Recorder;
use castkit_common::config::AppConfig;
use castkit_platform_core::{BackendId, PlatformCapabilities};
use serde::Serialize;

#[derive(Serialize)]
struct CheckReport {
    capabilities: PlatformCapabilities,
    backends: Vec<BackendId>,
    engine_ready: bool,
    engine_error: Option<String>,
    displays: usize,
    permission_granted: bool,
}

pub fn run(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let mut recorder = Recorder::native(config);
    let capabilities = *recorder.capabilities();

    let engine_error = recorder.try_init().err().map(|e| e.to_string());
    let engine_ready = engine_error.is_none();
    let displays = if engine_ready {
        recorder.list_displays().len()
    } else {
        0
    };
    let permission_granted = engine_ready && recorder.check_screen_permission();

    let report = CheckReport {
        capabilities,
        backends: capabilities.available_backends(),
        engine_ready,
        engine_error,
        displays,
        permission_granted,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Castkit System Check");
    println!("{}", "=".repeat(50));
    println!("Display server: {:?}", capabilities.display_server);

    for backend in [
        BackendId::CompositorCapture,
        BackendId::LegacyScreenCapture,
        BackendId::WindowCapture,
    ] {
        let status = if capabilities.supports(backend) { "[OK]" } else { "[--]" };
        println!("{status} Backend: {backend}");
    }
    let audio = if capabilities.system_audio { "[OK]" } else { "[--]" };
    println!("{audio} System audio");

    match &report.engine_error {
        None => println!("[OK] Capture engine initialized"),
        Some(e) => println!("[MISSING] Capture engine: {e}"),
    }
    println!("[OK] Displays detected: {}", report.displays);

    if capabilities.permission_gate {
        if report.permission_granted {
            println!("[OK] Screen recording permission");
        } else {
            println!("[MISSING] Screen recording permission (run `castkit permission --request`)");
        }
    }

    #[cfg(target_os = "linux")]
    {
        let tools = castkit_platform_linux::permissions::check_capabilities();
        println!();
        castkit_platform_linux::permissions::print_capability_report(&tools);
    }

    println!();
    if engine_ready && !report.backends.is_empty() {
        println!("Castkit is ready to record.");
    } else {
        println!("Some required capabilities are missing. See above for fixes.");
    }

    Ok(())
}
