//! Display server detection and XRandR output enumeration.

use std::process::Command;

use castkit_common::error::{CastkitError, CastkitResult};
use castkit_platform_core::{dedupe_by_id, DisplayServer, Source, SourceId};

/// Detect the current display server.
pub fn detect_display_server() -> DisplayServer {
    if std::env::var("WAYLAND_DISPLAY").is_ok() {
        DisplayServer::Wayland
    } else if std::env::var("DISPLAY").is_ok() {
        DisplayServer::X11
    } else {
        DisplayServer::Unknown
    }
}

/// Whether an X11 server (native or XWayland) is reachable.
pub fn x11_available() -> bool {
    std::env::var("DISPLAY")
        .map(|v| !v.is_empty())
        .unwrap_or(false)
}

/// List connected outputs with an active mode.
pub fn list_displays() -> CastkitResult<Vec<Source>> {
    tracing::debug!("Enumerating displays via xrandr");
    let stdout = run_query("xrandr", &["--query"])?;
    Ok(dedupe_by_id(parse_xrandr_query(&stdout)))
}

/// Parse `xrandr --query` output into display sources.
///
/// Only connected outputs with a geometry are returned; a connected but
/// disabled output cannot be captured.
pub fn parse_xrandr_query(stdout: &str) -> Vec<Source> {
    stdout
        .lines()
        .filter(|line| !line.starts_with(char::is_whitespace))
        .filter_map(parse_output_line)
        .collect()
}

fn parse_output_line(line: &str) -> Option<Source> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;
    if tokens.next()? != "connected" {
        return None;
    }

    let mut primary = false;
    for token in tokens {
        if token == "primary" {
            primary = true;
            continue;
        }
        // The geometry is the first token after the flags; anything else
        // (rotation list in parentheses) means the output has no mode.
        let (width, height, x, y) = parse_geometry(token)?;
        return Some(Source::display(
            SourceId::new(name),
            name,
            width,
            height,
            x,
            y,
            primary,
        ));
    }
    None
}

/// Parse an X geometry string such as `1920x1080+2560+0` or `1920x1080-1920+0`.
pub fn parse_geometry(token: &str) -> Option<(u32, u32, i32, i32)> {
    let (width, rest) = token.split_once('x')?;
    let width = width.parse().ok()?;
    let split = rest.find(['+', '-'])?;
    let height = rest[..split].parse().ok()?;
    let (x, rest) = take_offset(&rest[split..])?;
    let (y, rest) = take_offset(rest)?;
    if !rest.is_empty() {
        return None;
    }
    Some((width, height, x, y))
}

fn take_offset(s: &str) -> Option<(i32, &str)> {
    let mut rest = s;
    let mut negative = false;
    let mut signed = false;
    while let Some(c) = rest.chars().next() {
        match c {
            '+' => {}
            '-' => negative = !negative,
            _ => break,
        }
        signed = true;
        rest = &rest[1..];
    }
    if !signed {
        return None;
    }

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let value: i32 = rest[..end].parse().ok()?;
    Some((if negative { -value } else { value }, &rest[end..]))
}

/// Run an enumeration tool and return its stdout.
pub(crate) fn run_query(program: &str, args: &[&str]) -> CastkitResult<String> {
    let output = Command::new(program).args(args).output().map_err(|e| {
        CastkitError::enumeration(format!("Failed to run {program}: {e}"))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CastkitError::enumeration(format!(
            "{program} exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use castkit_common::error::ErrorKind;

    const XRANDR: &str = "\
Screen 0: minimum 320 x 200, current 4480 x 1440, maximum 16384 x 16384
eDP-1 connected primary 1920x1080+2560+0 (normal left inverted right x axis y axis) 344mm x 194mm
   1920x1080     60.03*+  59.93
HDMI-1 connected 2560x1440+0+0 (normal left inverted right x axis y axis) 597mm x 336mm
   2560x1440     59.95*+
DP-1 disconnected (normal left inverted right x axis y axis)
HDMI-2 connected (normal left inverted right x axis y axis)
";

    #[test]
    fn parses_connected_outputs_with_modes() {
        let displays = parse_xrandr_query(XRANDR);
        assert_eq!(displays.len(), 2);

        assert_eq!(displays[0].id.as_str(), "eDP-1");
        assert_eq!((displays[0].width, displays[0].height), (1920, 1080));
        assert_eq!(displays[0].position(), (2560, 0));
        assert!(displays[0].is_primary());

        assert_eq!(displays[1].id.as_str(), "HDMI-1");
        assert!(!displays[1].is_primary());
    }

    #[test]
    fn empty_output_yields_no_displays() {
        assert!(parse_xrandr_query("").is_empty());
    }

    #[test]
    fn missing_tool_is_an_enumeration_error() {
        let err = run_query("castkit-no-such-tool", &["--query"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Enumeration);
        assert!(err.to_string().contains("Failed to run castkit-no-such-tool"));
    }

    #[cfg(unix)]
    #[test]
    fn failing_tool_is_an_enumeration_error() {
        let err = run_query("sh", &["-c", "echo \"Can't open display\" >&2; exit 1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Enumeration);
        assert!(err.to_string().contains("Can't open display"));
    }

    #[test]
    fn geometry_handles_negative_offsets() {
        assert_eq!(parse_geometry("1920x1080+2560+0"), Some((1920, 1080, 2560, 0)));
        assert_eq!(parse_geometry("1920x1080-1920+0"), Some((1920, 1080, -1920, 0)));
        assert_eq!(parse_geometry("1920x1080+-1920+-200"), Some((1920, 1080, -1920, -200)));
        assert_eq!(parse_geometry("(normal"), None);
        assert_eq!(parse_geometry("1920x1080"), None);
    }
}
