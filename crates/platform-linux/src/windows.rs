//! Top-level window enumeration via the EWMH client list.

use castkit_common::error::CastkitResult;
use castkit_platform_core::{clamp_dimension, dedupe_by_id, Source, SourceId};

use crate::display::run_query;

/// List all managed windows, including untitled ones.
pub fn list_windows() -> CastkitResult<Vec<Source>> {
    tracing::debug!("Enumerating windows via wmctrl");
    let stdout = run_query("wmctrl", &["-lpG"])?;
    Ok(dedupe_by_id(parse_wmctrl_list(&stdout, process_name)))
}

/// Parse `wmctrl -lpG` output.
///
/// Each line is `<xid> <desktop> <pid> <x> <y> <w> <h> <host> <title...>`;
/// the title may be empty. `owner_of` resolves a pid to a process name.
pub fn parse_wmctrl_list(stdout: &str, owner_of: impl Fn(u32) -> String) -> Vec<Source> {
    stdout
        .lines()
        .filter_map(|line| parse_window_line(line, &owner_of))
        .collect()
}

fn parse_window_line(line: &str, owner_of: &impl Fn(u32) -> String) -> Option<Source> {
    let (xid, rest) = next_field(line)?;
    let (_desktop, rest) = next_field(rest)?;
    let (pid, rest) = next_field(rest)?;
    let (x, rest) = next_field(rest)?;
    let (y, rest) = next_field(rest)?;
    let (width, rest) = next_field(rest)?;
    let (height, rest) = next_field(rest)?;
    // One space separates the host from the title; the rest is verbatim.
    let (_host, title) = next_field(rest).unwrap_or(("", ""));
    let title = title.strip_prefix(' ').unwrap_or(title);

    let xid = u64::from_str_radix(xid.trim_start_matches("0x"), 16).ok()?;
    let pid: u32 = pid.parse().unwrap_or(0);
    let owner = if pid == 0 { String::new() } else { owner_of(pid) };

    Some(Source::window(
        SourceId::from_native_u64(xid),
        title,
        owner,
        clamp_dimension(width.parse().ok()?),
        clamp_dimension(height.parse().ok()?),
        x.parse().ok()?,
        y.parse().ok()?,
    ))
}

fn next_field(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

fn process_name(pid: u32) -> String {
    std::fs::read_to_string(format!("/proc/{pid}/comm"))
        .map(|comm| comm.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WMCTRL: &str = "\
0x03a00007  0 4242   10   52   1280 720  workstation Release notes - Editor
0x01e00003 -1 1001   0    0    1920 32   workstation
0x04400001  0 0      200  300  640  480  N/A spaced   title
";

    fn owner(pid: u32) -> String {
        format!("proc{pid}")
    }

    #[test]
    fn parses_windows_including_untitled() {
        let windows = parse_wmctrl_list(WMCTRL, owner);
        assert_eq!(windows.len(), 3);

        let editor = &windows[0];
        assert_eq!(editor.id.as_str(), "60817415");
        assert_eq!(editor.name, "Release notes - Editor");
        assert_eq!(editor.owner_process_name(), Some("proc4242"));
        assert_eq!((editor.width, editor.height), (1280, 720));
        assert_eq!(editor.position(), (10, 52));

        assert_eq!(windows[1].name, "");
        assert_eq!(windows[2].name, "spaced   title");
        assert_eq!(windows[2].owner_process_name(), Some(""));
    }

    #[test]
    fn title_whitespace_is_kept_verbatim() {
        let line = "0x00c00002  0 77   0    0    800  600  workstation  [draft] notes \n";
        let windows = parse_wmctrl_list(line, owner);
        assert_eq!(windows[0].name, " [draft] notes ");
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let windows = parse_wmctrl_list("garbage\n0xzz 0 1 0 0 1 1 host t\n", owner);
        assert!(windows.is_empty());
    }

    #[test]
    fn ids_are_unique_within_one_listing() {
        let doubled = format!("{WMCTRL}{WMCTRL}");
        let windows = dedupe_by_id(parse_wmctrl_list(&doubled, owner));
        assert_eq!(windows.len(), 3);
    }
}
