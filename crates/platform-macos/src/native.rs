use castkit_common::error::{CastkitError, CastkitResult};
use castkit_platform_core::{clamp_dimension, clamp_position, dedupe_by_id, Source, SourceId};
use core_foundation::array::CFArray;
use core_foundation::base::{CFType, TCFType};
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::number::CFNumber;
use core_foundation::string::{CFString, CFStringRef};
use core_graphics::display::CGDisplay;
use core_graphics::geometry::CGRect;
use core_graphics::window::{
    copy_window_info, kCGNullWindowID, kCGWindowBounds, kCGWindowListOptionOnScreenOnly,
    kCGWindowName, kCGWindowNumber, kCGWindowOwnerName,
};

#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {
    fn CGPreflightScreenCaptureAccess() -> bool;
    fn CGRequestScreenCaptureAccess() -> bool;
}

pub(crate) fn preflight_screen_capture() -> bool {
    unsafe { CGPreflightScreenCaptureAccess() }
}

pub(crate) fn request_screen_capture() -> bool {
    unsafe { CGRequestScreenCaptureAccess() }
}

pub(crate) fn list_displays() -> CastkitResult<Vec<Source>> {
    let display_ids = CGDisplay::active_displays().map_err(|e| {
        CastkitError::enumeration(format!("CGGetActiveDisplayList failed: {e}"))
    })?;

    let displays = display_ids
        .iter()
        .enumerate()
        .map(|(index, &id)| {
            let display = CGDisplay::new(id);
            let bounds = display.bounds();
            Source::display(
                SourceId::from_native_u64(u64::from(id)),
                format!("Display {}", index + 1),
                clamp_dimension(display.pixels_wide() as i64),
                clamp_dimension(display.pixels_high() as i64),
                clamp_position(bounds.origin.x),
                clamp_position(bounds.origin.y),
                display.is_main(),
            )
        })
        .collect();

    Ok(dedupe_by_id(displays))
}

pub(crate) fn list_windows() -> CastkitResult<Vec<Source>> {
    let list: CFArray = copy_window_info(kCGWindowListOptionOnScreenOnly, kCGNullWindowID)
        .ok_or_else(|| CastkitError::enumeration("CGWindowListCopyWindowInfo returned null"))?;

    let mut windows = Vec::with_capacity(list.len() as usize);
    for item in list.iter() {
        let entry: CFDictionary<CFString, CFType> =
            unsafe { CFDictionary::wrap_under_get_rule(*item as CFDictionaryRef) };

        let Some(number) = number_value(&entry, unsafe { kCGWindowNumber }) else {
            continue;
        };
        let Ok(number) = u64::try_from(number) else {
            continue;
        };
        let owner = string_value(&entry, unsafe { kCGWindowOwnerName }).unwrap_or_default();
        // Titles are withheld until screen recording consent is granted.
        let title = string_value(&entry, unsafe { kCGWindowName }).unwrap_or_default();
        let bounds = rect_value(&entry, unsafe { kCGWindowBounds });

        let (x, y, width, height) = bounds
            .map(|rect| {
                (
                    clamp_position(rect.origin.x),
                    clamp_position(rect.origin.y),
                    clamp_dimension(rect.size.width.round() as i64),
                    clamp_dimension(rect.size.height.round() as i64),
                )
            })
            .unwrap_or((0, 0, 0, 0));

        windows.push(Source::window(
            SourceId::from_native_u64(number),
            title,
            owner,
            width,
            height,
            x,
            y,
        ));
    }

    Ok(dedupe_by_id(windows))
}

fn value(entry: &CFDictionary<CFString, CFType>, key: CFStringRef) -> Option<CFType> {
    let key = unsafe { CFString::wrap_under_get_rule(key) };
    entry.find(&key).map(|value| (*value).clone())
}

fn number_value(entry: &CFDictionary<CFString, CFType>, key: CFStringRef) -> Option<i64> {
    value(entry, key)?.downcast::<CFNumber>()?.to_i64()
}

fn string_value(entry: &CFDictionary<CFString, CFType>, key: CFStringRef) -> Option<String> {
    Some(value(entry, key)?.downcast::<CFString>()?.to_string())
}

fn rect_value(entry: &CFDictionary<CFString, CFType>, key: CFStringRef) -> Option<CGRect> {
    let raw = value(entry, key)?;
    let dict: CFDictionary =
        unsafe { CFDictionary::wrap_under_get_rule(raw.as_CFTypeRef() as CFDictionaryRef) };
    CGRect::from_dict_representation(&dict)
}
