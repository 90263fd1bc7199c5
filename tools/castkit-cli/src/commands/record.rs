//! Record a display or window.

use std::time::Duration;

use castkit_capture_engine::{RawSourceId, Recorder, RecordingConfigInput};
use castkit_common::config::AppConfig;
use castkit_platform_core::SourceKind;

use crate::RecordArgs;

const POLL_INTERVAL: Duration = Duration::from_millis(500);

pub async fn run(config: &AppConfig, args: RecordArgs, json: bool) -> anyhow::Result<()> {
    if let Some(secs) = args.duration {
        anyhow::ensure!(
            secs.is_finite() && secs > 0.0,
            "--duration must be a positive number of seconds"
        );
    }

    let input = request_from_args(&args);
    let mut recorder = Recorder::native(config);
    recorder.try_init()?;

    let configuration = recorder.try_start(&args.output, &input)?;
    if !json {
        println!(
            "Recording {} {}",
            configuration.source_kind, configuration.source_id
        );
        println!("  Output: {}", configuration.output_path.display());
        println!(
            "  Size: {}x{} @ {} fps",
            configuration.width, configuration.height, configuration.fps
        );
        println!("  Audio: {}", configuration.capture_audio);
        println!("  Cursor: {}", configuration.capture_cursor);
        println!();
        println!("Press Ctrl+C to stop recording...");
    }

    let deadline = args
        .duration
        .map(|secs| tokio::time::Instant::now() + Duration::from_secs_f64(secs));
    let elapsed = async move {
        match deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(elapsed);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ticker = tokio::time::interval(POLL_INTERVAL);

    loop {
        tokio::select! {
            result = &mut ctrl_c => {
                result?;
                tracing::debug!("Ctrl+C received");
                break;
            }
            _ = &mut elapsed => {
                tracing::debug!("Recording duration elapsed");
                break;
            }
            _ = ticker.tick() => {
                recorder.try_poll()?;
            }
        }
    }

    let status = recorder.status();
    recorder.try_stop()?;
    recorder.shutdown();

    let size = std::fs::metadata(&configuration.output_path)
        .map(|m| m.len())
        .unwrap_or(0);

    if json {
        let report = serde_json::json!({
            "configuration": configuration,
            "backend": status.backend,
            "started_at": status.started_at,
            "elapsed_secs": status.elapsed_secs,
            "bytes": size,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        println!(
            "Recording saved to: {} ({size} bytes)",
            configuration.output_path.display()
        );
    }

    Ok(())
}

fn request_from_args(args: &RecordArgs) -> RecordingConfigInput {
    let (source_type, display_id, window_id) = match (&args.display, &args.window) {
        (_, Some(window)) => (SourceKind::Window, None, Some(window)),
        (display, None) => (SourceKind::Display, display.as_ref(), None),
    };

    RecordingConfigInput {
        source_type: Some(i64::from(source_type.code())),
        display_id: display_id.map(|id| RawSourceId::Text(id.clone())),
        window_id: window_id.map(|id| RawSourceId::Text(id.clone())),
        width: args.width,
        height: args.height,
        fps: args.fps,
        capture_cursor: args.no_cursor.then_some(false),
        capture_audio: args.no_audio.then_some(false),
        hide_obs: args.show_self.then_some(false),
    }
}
