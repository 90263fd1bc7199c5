//! List capturable displays and windows.

use castkit_capture_engine::Recorder;
use castkit_common::config::AppConfig;
use castkit_platform_core::Source;

pub fn displays(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let mut recorder = Recorder::native(config);
    recorder.try_init()?;
    let displays = recorder.try_list_displays()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&displays)?);
        return Ok(());
    }

    if displays.is_empty() {
        println!("No displays found.");
        return Ok(());
    }
    println!("{:<24} {:<20} {:>11} {:>14}", "ID", "NAME", "SIZE", "POSITION");
    for display in &displays {
        let (x, y) = display.position();
        println!(
            "{:<24} {:<20} {:>11} {:>14} {}",
            display.id,
            truncate(&display.name, 20),
            format!("{}x{}", display.width, display.height),
            format!("{x},{y}"),
            if display.is_primary() { "(primary)" } else { "" }
        );
    }
    Ok(())
}

pub fn windows(
    config: &AppConfig,
    all: bool,
    min_width: u32,
    min_height: u32,
    json: bool,
) -> anyhow::Result<()> {
    let mut recorder = Recorder::native(config);
    recorder.try_init()?;
    let windows: Vec<Source> = recorder
        .try_list_windows()?
        .into_iter()
        .filter(|w| all || w.is_suitable_window(min_width, min_height))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&windows)?);
        return Ok(());
    }

    if windows.is_empty() {
        println!("No windows found.");
        return Ok(());
    }
    println!("{:<12} {:<20} {:>11}  TITLE", "ID", "OWNER", "SIZE");
    for window in &windows {
        println!(
            "{:<12} {:<20} {:>11}  {}",
            window.id,
            truncate(window.owner_process_name().unwrap_or_default(), 20),
            format!("{}x{}", window.width, window.height),
            window.name
        );
    }
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
