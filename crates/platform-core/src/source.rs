//! Source identity model.
//!
//! Every platform names its capturable surfaces differently: X11 output names
//! and window XIDs, CoreGraphics display ids and window numbers, Win32
//! `HMONITOR`/`HWND` handles. Enumerators convert those into [`Source`]
//! values at the boundary so nothing past this point sees a native handle.
//!
//! Nothing in this module performs I/O.

use std::collections::HashSet;
use std::fmt;

use castkit_common::error::CastkitResult;
use serde::{Deserialize, Serialize};

/// Kind of capturable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Display,
    Window,
}

impl SourceKind {
    /// Parse the wire code used by hosts (`0` = display, `1` = window).
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(SourceKind::Display),
            1 => Some(SourceKind::Window),
            _ => None,
        }
    }

    /// Wire code for this kind.
    pub fn code(self) -> u8 {
        match self {
            SourceKind::Display => 0,
            SourceKind::Window => 1,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Display => f.write_str("display"),
            SourceKind::Window => f.write_str("window"),
        }
    }
}

/// Opaque, comparable source identifier.
///
/// Stable within one enumeration snapshot. Not guaranteed stable across
/// process restarts (window handles are reused by every OS we support).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    /// Wrap a native string identifier (output name, UUID, ...).
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.len() == id.len() {
            Self(id)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Wrap a native numeric handle (window number, XID, HWND, HMONITOR).
    pub fn from_native_u64(handle: u64) -> Self {
        Self(handle.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recover a numeric native handle, for backends that address sources
    /// by number.
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SourceId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Kind-specific attributes of a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceDetails {
    Display {
        /// Position in the virtual desktop (pixels).
        x: i32,
        y: i32,
        primary: bool,
    },
    Window {
        /// Name of the process that owns the window (may be empty).
        owner_process_name: String,
        x: i32,
        y: i32,
    },
}

/// One capturable display or window, as seen by a single enumeration call.
///
/// Values are snapshots: the display may be unplugged or the window closed
/// at any time after enumeration, and re-enumerating never mutates a
/// previously returned `Source`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: SourceId,
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(flatten)]
    pub details: SourceDetails,
}

impl Source {
    pub fn display(
        id: SourceId,
        name: impl Into<String>,
        width: u32,
        height: u32,
        x: i32,
        y: i32,
        primary: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            width,
            height,
            details: SourceDetails::Display { x, y, primary },
        }
    }

    pub fn window(
        id: SourceId,
        name: impl Into<String>,
        owner_process_name: impl Into<String>,
        width: u32,
        height: u32,
        x: i32,
        y: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            width,
            height,
            details: SourceDetails::Window {
                owner_process_name: owner_process_name.into(),
                x,
                y,
            },
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self.details {
            SourceDetails::Display { .. } => SourceKind::Display,
            SourceDetails::Window { .. } => SourceKind::Window,
        }
    }

    /// Top-left corner in virtual desktop pixels.
    pub fn position(&self) -> (i32, i32) {
        match self.details {
            SourceDetails::Display { x, y, .. } | SourceDetails::Window { x, y, .. } => (x, y),
        }
    }

    pub fn owner_process_name(&self) -> Option<&str> {
        match &self.details {
            SourceDetails::Window {
                owner_process_name, ..
            } => Some(owner_process_name),
            SourceDetails::Display { .. } => None,
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self.details, SourceDetails::Display { primary: true, .. })
    }

    /// Caller-side filter for pickers: a titled window at least
    /// `min_width` x `min_height`. Enumerators never apply this themselves.
    pub fn is_suitable_window(&self, min_width: u32, min_height: u32) -> bool {
        self.kind() == SourceKind::Window
            && !self.name.trim().is_empty()
            && self.width >= min_width
            && self.height >= min_height
    }
}

/// Capability every platform enumerator provides.
///
/// Both calls are read-only and may be made while a recording is active.
/// An empty result is not an error; only a failing OS query is.
pub trait SourceEnumerator: Send + Sync {
    /// Connected displays, in platform-native order.
    fn list_displays(&self) -> CastkitResult<Vec<Source>>;

    /// All windows the platform reports, including untitled ones.
    fn list_windows(&self) -> CastkitResult<Vec<Source>>;

    /// Enumerate sources of one kind.
    fn list(&self, kind: SourceKind) -> CastkitResult<Vec<Source>> {
        match kind {
            SourceKind::Display => self.list_displays(),
            SourceKind::Window => self.list_windows(),
        }
    }
}

/// Drop later entries that repeat an id already seen, keeping native order.
pub fn dedupe_by_id(sources: Vec<Source>) -> Vec<Source> {
    let mut seen = HashSet::with_capacity(sources.len());
    let before = sources.len();
    let unique: Vec<Source> = sources
        .into_iter()
        .filter(|source| seen.insert(source.id.clone()))
        .collect();
    if unique.len() != before {
        tracing::debug!(
            dropped = before - unique.len(),
            "Dropped sources with duplicate ids"
        );
    }
    unique
}

/// Coerce a native extent into an unsigned pixel size. Negative extents
/// (inverted native rects) become zero.
pub fn clamp_dimension(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

/// Coerce a native 64-bit coordinate into the signed pixel range.
pub fn clamp_coordinate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Coerce a floating point coordinate (CoreGraphics points) into the signed
/// pixel range.
pub fn clamp_position(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32
}
