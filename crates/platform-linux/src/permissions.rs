//! Capability detection and guidance for Linux.
//!
//! Capture on Linux needs no consent prompt, but it does need an X server,
//! the enumeration tools, and the GStreamer capture elements.

use std::process::Command;

use serde::Serialize;

/// A system capability that Castkit may need.
#[derive(Debug, Clone, Serialize)]
pub struct Capability {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub required: bool,
    pub fix_instructions: Option<String>,
}

/// Check all capabilities and report status.
pub fn check_capabilities() -> Vec<Capability> {
    vec![
        check_x11_access(),
        check_tool(
            "xrandr",
            &["--version"],
            "Display enumeration (XRandR)",
            true,
            "Install xrandr: sudo apt install x11-xserver-utils",
        ),
        check_tool(
            "wmctrl",
            &["-m"],
            "Window enumeration (EWMH client list)",
            false,
            "Install wmctrl: sudo apt install wmctrl",
        ),
        check_tool(
            "gst-inspect-1.0",
            &["ximagesrc"],
            "GStreamer X11 capture element",
            true,
            "Install GStreamer good plugins: sudo apt install gstreamer1.0-plugins-good",
        ),
        check_tool(
            "gst-inspect-1.0",
            &["x264enc"],
            "GStreamer H.264 encoder",
            true,
            "Install GStreamer ugly plugins: sudo apt install gstreamer1.0-plugins-ugly",
        ),
        check_tool(
            "gst-inspect-1.0",
            &["pulsesrc"],
            "System audio capture (PulseAudio/PipeWire monitor)",
            false,
            "Install GStreamer pulse plugin and pipewire-pulse",
        ),
    ]
}

/// Check if an X server (or XWayland) is reachable.
fn check_x11_access() -> Capability {
    let available = crate::display::x11_available();

    Capability {
        name: "X11 Display".to_string(),
        description: "X server or XWayland for display and window capture".to_string(),
        available,
        required: true,
        fix_instructions: if !available {
            Some(
                "Run inside a graphical session with DISPLAY set (X11 or XWayland)".to_string(),
            )
        } else {
            None
        },
    }
}

fn check_tool(
    program: &str,
    args: &[&str],
    description: &str,
    required: bool,
    fix: &str,
) -> Capability {
    let available = Command::new(program)
        .args(args)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);

    let name = match args.first() {
        Some(element) if program.starts_with("gst-") => format!("{program} {element}"),
        _ => program.to_string(),
    };

    Capability {
        name,
        description: description.to_string(),
        available,
        required,
        fix_instructions: if available {
            None
        } else {
            Some(fix.to_string())
        },
    }
}

/// Print a user-friendly capability report.
pub fn print_capability_report(capabilities: &[Capability]) {
    println!("Castkit System Capabilities:");
    println!("{}", "-".repeat(60));

    for cap in capabilities {
        let status = if cap.available {
            "[OK]"
        } else if cap.required {
            "[MISSING - REQUIRED]"
        } else {
            "[MISSING - OPTIONAL]"
        };

        println!("  {} {}: {}", status, cap.name, cap.description);

        if let Some(ref fix) = cap.fix_instructions {
            println!("    Fix: {fix}");
        }
    }
}
