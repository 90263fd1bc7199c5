use std::path::Path;

use castkit_common::error::{CastkitError, CastkitResult};
use castkit_platform_core::{
    clamp_coordinate, clamp_dimension, dedupe_by_id, Source, SourceId,
};
use windows::core::PWSTR;
use windows::Win32::Foundation::{CloseHandle, BOOL, HWND, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFOEXW,
};
use windows::Win32::System::Threading::{
    OpenProcess, QueryFullProcessImageNameW, PROCESS_NAME_WIN32,
    PROCESS_QUERY_LIMITED_INFORMATION,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowRect, GetWindowTextW, GetWindowThreadProcessId,
};

const MONITORINFOF_PRIMARY: u32 = 1;

pub(crate) fn list_displays() -> CastkitResult<Vec<Source>> {
    tracing::debug!("Enumerating monitors via EnumDisplayMonitors");
    let mut displays: Vec<Source> = Vec::new();

    unsafe extern "system" fn enum_monitor(
        hmonitor: HMONITOR,
        _hdc: HDC,
        _rect: *mut RECT,
        lparam: LPARAM,
    ) -> BOOL {
        let displays = unsafe { &mut *(lparam.0 as *mut Vec<Source>) };

        let mut info: MONITORINFOEXW = unsafe { std::mem::zeroed() };
        info.monitorInfo.cbSize = std::mem::size_of::<MONITORINFOEXW>() as u32;

        if unsafe { GetMonitorInfoW(hmonitor, &mut info.monitorInfo) }.as_bool() {
            let rect = info.monitorInfo.rcMonitor;
            let name = utf16_until_nul(&info.szDevice);
            displays.push(Source::display(
                SourceId::from_native_u64(hmonitor.0 as usize as u64),
                name,
                clamp_dimension(i64::from(rect.right) - i64::from(rect.left)),
                clamp_dimension(i64::from(rect.bottom) - i64::from(rect.top)),
                rect.left,
                rect.top,
                info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
            ));
        }

        BOOL::from(true)
    }

    let completed = unsafe {
        EnumDisplayMonitors(
            HDC::default(),
            None,
            Some(enum_monitor),
            LPARAM(&mut displays as *mut Vec<Source> as isize),
        )
    };
    if !completed.as_bool() {
        return Err(CastkitError::enumeration(format!(
            "EnumDisplayMonitors failed: {}",
            windows::core::Error::from_win32()
        )));
    }

    Ok(dedupe_by_id(displays))
}

pub(crate) fn list_windows() -> CastkitResult<Vec<Source>> {
    tracing::debug!("Enumerating windows via EnumWindows");
    let mut windows: Vec<Source> = Vec::new();

    unsafe extern "system" fn enum_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let windows = unsafe { &mut *(lparam.0 as *mut Vec<Source>) };

        let mut title = [0u16; 512];
        let len = unsafe { GetWindowTextW(hwnd, &mut title) };
        let title = String::from_utf16_lossy(&title[..len.max(0) as usize]);

        // A window that vanished mid-walk still gets listed, with no geometry.
        let mut rect = RECT::default();
        if unsafe { GetWindowRect(hwnd, &mut rect) }.is_err() {
            rect = RECT::default();
        }

        let mut pid = 0u32;
        unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid as *mut u32)) };

        windows.push(Source::window(
            SourceId::from_native_u64(hwnd.0 as usize as u64),
            title,
            process_image_name(pid),
            clamp_dimension(i64::from(rect.right) - i64::from(rect.left)),
            clamp_dimension(i64::from(rect.bottom) - i64::from(rect.top)),
            clamp_coordinate(i64::from(rect.left)),
            clamp_coordinate(i64::from(rect.top)),
        ));

        BOOL::from(true)
    }

    unsafe {
        EnumWindows(
            Some(enum_window),
            LPARAM(&mut windows as *mut Vec<Source> as isize),
        )
    }
    .map_err(|e| CastkitError::enumeration(format!("EnumWindows failed: {e}")))?;

    Ok(dedupe_by_id(windows))
}

fn process_image_name(pid: u32) -> String {
    if pid == 0 {
        return String::new();
    }

    unsafe {
        let Ok(process) = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) else {
            return String::new();
        };

        let mut buffer = [0u16; 1024];
        let mut size = buffer.len() as u32;
        let result = QueryFullProcessImageNameW(
            process,
            PROCESS_NAME_WIN32,
            PWSTR(buffer.as_mut_ptr()),
            &mut size,
        );
        let _ = CloseHandle(process);

        if result.is_err() {
            return String::new();
        }

        let path = String::from_utf16_lossy(&buffer[..size as usize]);
        Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or(path)
    }
}

fn utf16_until_nul(buffer: &[u16]) -> String {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_listing_is_unfiltered_and_unique() {
        let windows = list_windows().unwrap();
        let mut ids: Vec<_> = windows.iter().map(|w| w.id.as_str().to_string()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), windows.len());
        // The shell keeps hidden helper windows, so an unfiltered walk sees untitled ones.
        assert!(windows.iter().any(|w| !w.is_suitable_window(100, 100)));
    }

    #[test]
    fn display_listing_succeeds() {
        let displays = list_displays().unwrap();
        assert!(displays.iter().filter(|d| d.is_primary()).count() <= 1);
    }
}
