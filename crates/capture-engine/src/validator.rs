//! Recording configuration validation.
//!
//! Turns loosely typed host input into a [`RecordingConfiguration`]. Shape
//! problems are rejected here with the offending field named; I/O problems
//! (unwritable output, busy device) are left for the engine to discover at
//! start time.

use std::path::{Path, PathBuf};

use castkit_common::config::{BackendLimits, RecordingDefaults};
use castkit_common::error::{CastkitError, CastkitResult};
use castkit_platform_core::{Source, SourceId, SourceKind};
use serde::{Deserialize, Serialize};

/// A source id as hosts send it: either a native number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSourceId {
    Number(u64),
    Text(String),
}

impl RawSourceId {
    fn to_source_id(&self) -> SourceId {
        match self {
            RawSourceId::Number(handle) => SourceId::from_native_u64(*handle),
            RawSourceId::Text(text) => SourceId::new(text.as_str()),
        }
    }
}

impl From<&SourceId> for RawSourceId {
    fn from(id: &SourceId) -> Self {
        RawSourceId::Text(id.as_str().to_string())
    }
}

/// Raw recording request. Every field is optional; unset fields take the
/// configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingConfigInput {
    /// `0` = display, `1` = window.
    pub source_type: Option<i64>,

    #[serde(rename = "displayId")]
    pub display_id: Option<RawSourceId>,

    #[serde(rename = "windowId")]
    pub window_id: Option<RawSourceId>,

    pub width: Option<i64>,
    pub height: Option<i64>,
    pub fps: Option<i64>,
    pub capture_cursor: Option<bool>,
    pub capture_audio: Option<bool>,

    /// Exclude this process's own windows from a display capture.
    pub hide_obs: Option<bool>,
}

impl RecordingConfigInput {
    /// Request a recording of the given display.
    pub fn display(id: &SourceId) -> Self {
        Self {
            source_type: Some(i64::from(SourceKind::Display.code())),
            display_id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Request a recording of the given window.
    pub fn window(id: &SourceId) -> Self {
        Self {
            source_type: Some(i64::from(SourceKind::Window.code())),
            window_id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Request a recording of an enumerated source.
    pub fn for_source(source: &Source) -> Self {
        match source.kind() {
            SourceKind::Display => Self::display(&source.id),
            SourceKind::Window => Self::window(&source.id),
        }
    }

    pub fn with_size(mut self, width: i64, height: i64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_fps(mut self, fps: i64) -> Self {
        self.fps = Some(fps);
        self
    }
}

/// Canonical, backend-ready recording request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordingConfiguration {
    pub source_kind: SourceKind,
    pub source_id: SourceId,
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub capture_audio: bool,
    pub capture_cursor: bool,

    /// Only ever true for display captures.
    pub hide_self_from_capture: bool,
}

/// Resolve which source the request names.
///
/// An omitted `source_type` means a window when `windowId` is present and a
/// display otherwise.
pub fn source_selection(input: &RecordingConfigInput) -> CastkitResult<(SourceKind, SourceId)> {
    let kind = match input.source_type {
        Some(code) => SourceKind::from_code(code).ok_or_else(|| {
            CastkitError::configuration(
                "source_type",
                format!("unknown source type {code} (expected 0 = display or 1 = window)"),
            )
        })?,
        None if input.window_id.is_some() => SourceKind::Window,
        None => SourceKind::Display,
    };

    let (field, raw) = match kind {
        SourceKind::Display => ("displayId", input.display_id.as_ref()),
        SourceKind::Window => ("windowId", input.window_id.as_ref()),
    };

    let id = raw
        .map(RawSourceId::to_source_id)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CastkitError::configuration(field, "a non-empty source id is required"))?;

    Ok((kind, id))
}

/// Validate a request into a [`RecordingConfiguration`].
///
/// `source` is the enumerated source matching the request, used for the
/// default resolution; when it is unknown the backend maximum is used.
/// Oversized values are clamped, never rejected.
pub fn validate(
    output_path: &Path,
    input: &RecordingConfigInput,
    source: Option<&Source>,
    limits: &BackendLimits,
    defaults: &RecordingDefaults,
) -> CastkitResult<RecordingConfiguration> {
    let (source_kind, source_id) = source_selection(input)?;
    let output_path = validate_output_path(output_path)?;

    let native = source.filter(|s| s.kind() == source_kind && s.id == source_id);
    let width = dimension(
        "width",
        input.width,
        native.map(|s| s.width),
        limits.max_width,
    )?;
    let height = dimension(
        "height",
        input.height,
        native.map(|s| s.height),
        limits.max_height,
    )?;

    let fps = match input.fps {
        Some(fps) if fps > 0 => u32::try_from(fps).unwrap_or(u32::MAX),
        _ => defaults.fps,
    }
    .clamp(1, limits.max_fps.max(1));

    let hide_self_from_capture = source_kind == SourceKind::Display
        && input.hide_obs.unwrap_or(defaults.hide_self_from_capture);

    Ok(RecordingConfiguration {
        source_kind,
        source_id,
        output_path,
        width,
        height,
        fps,
        capture_audio: input.capture_audio.unwrap_or(defaults.capture_audio),
        capture_cursor: input.capture_cursor.unwrap_or(defaults.capture_cursor),
        hide_self_from_capture,
    })
}

fn dimension(
    field: &str,
    requested: Option<i64>,
    native: Option<u32>,
    max: u32,
) -> CastkitResult<u32> {
    let max = max.max(1);
    let value = match requested {
        Some(value) if value <= 0 => {
            return Err(CastkitError::configuration(
                field,
                format!("must be positive, got {value}"),
            ));
        }
        Some(value) => u32::try_from(value).unwrap_or(u32::MAX),
        None => native.filter(|&n| n > 0).unwrap_or(max),
    };
    Ok(value.min(max))
}

fn validate_output_path(path: &Path) -> CastkitResult<PathBuf> {
    let text = path.to_string_lossy();
    if text.trim().is_empty() {
        return Err(CastkitError::configuration("outputPath", "must not be empty"));
    }
    if text.contains('\0') {
        return Err(CastkitError::configuration(
            "outputPath",
            "must not contain NUL bytes",
        ));
    }
    if path.file_name().is_none() {
        return Err(CastkitError::configuration(
            "outputPath",
            format!("{} does not name a file", path.display()),
        ));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use castkit_common::error::ErrorKind;
    use proptest::prelude::*;

    fn limits() -> BackendLimits {
        BackendLimits::default()
    }

    fn defaults() -> RecordingDefaults {
        RecordingDefaults::default()
    }

    fn monitor() -> Source {
        Source::display(SourceId::new("HDMI-1"), "HDMI-1", 1280, 1024, 0, 0, true)
    }

    fn run(input: &RecordingConfigInput, source: Option<&Source>) -> CastkitResult<RecordingConfiguration> {
        validate(Path::new("/tmp/out.mkv"), input, source, &limits(), &defaults())
    }

    #[test]
    fn oversized_request_is_clamped() {
        let input = RecordingConfigInput::display(&SourceId::new("HDMI-1")).with_size(4000, 3000);
        let config = run(&input, None).unwrap();
        assert_eq!((config.width, config.height), (1920, 1080));
    }

    #[test]
    fn unset_size_uses_native_resolution() {
        let source = monitor();
        let input = RecordingConfigInput::for_source(&source);
        let config = run(&input, Some(&source)).unwrap();
        assert_eq!((config.width, config.height), (1280, 1024));
        assert_eq!(config.fps, 30);
    }

    #[test]
    fn unset_size_without_source_uses_maximum() {
        let input = RecordingConfigInput::display(&SourceId::new("gone"));
        let config = run(&input, None).unwrap();
        assert_eq!((config.width, config.height), (1920, 1080));
    }

    #[test]
    fn empty_source_id_names_the_field() {
        let input = RecordingConfigInput {
            display_id: Some(RawSourceId::Text("  ".into())),
            ..Default::default()
        };
        let err = run(&input, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.field(), Some("displayId"));

        let err = run(&RecordingConfigInput::default(), None).unwrap_err();
        assert_eq!(err.field(), Some("displayId"));
    }

    #[test]
    fn window_kind_requires_window_id() {
        let input = RecordingConfigInput {
            source_type: Some(1),
            display_id: Some(RawSourceId::Number(1)),
            ..Default::default()
        };
        assert_eq!(run(&input, None).unwrap_err().field(), Some("windowId"));
    }

    #[test]
    fn unknown_source_type_is_rejected() {
        let input = RecordingConfigInput {
            source_type: Some(2),
            display_id: Some(RawSourceId::Number(1)),
            ..Default::default()
        };
        assert_eq!(run(&input, None).unwrap_err().field(), Some("source_type"));
    }

    #[test]
    fn omitted_kind_is_inferred_from_ids() {
        let input = RecordingConfigInput {
            window_id: Some(RawSourceId::Number(0x3a00007)),
            ..Default::default()
        };
        let (kind, id) = source_selection(&input).unwrap();
        assert_eq!(kind, SourceKind::Window);
        assert_eq!(id.as_str(), "60817415");
    }

    #[test]
    fn non_positive_fps_falls_back_to_default() {
        for fps in [None, Some(0), Some(-5)] {
            let mut input = RecordingConfigInput::display(&SourceId::new("0"));
            input.fps = fps;
            assert_eq!(run(&input, None).unwrap().fps, 30);
        }
        let input = RecordingConfigInput::display(&SourceId::new("0")).with_fps(240);
        assert_eq!(run(&input, None).unwrap().fps, 60);
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        let input = RecordingConfigInput::display(&SourceId::new("0")).with_size(0, 720);
        assert_eq!(run(&input, None).unwrap_err().field(), Some("width"));
        let input = RecordingConfigInput::display(&SourceId::new("0")).with_size(1280, -1);
        assert_eq!(run(&input, None).unwrap_err().field(), Some("height"));
    }

    #[test]
    fn hide_self_only_applies_to_displays() {
        let mut input = RecordingConfigInput::window(&SourceId::new("42"));
        input.hide_obs = Some(true);
        assert!(!run(&input, None).unwrap().hide_self_from_capture);

        let mut input = RecordingConfigInput::display(&SourceId::new("0"));
        input.hide_obs = Some(true);
        assert!(run(&input, None).unwrap().hide_self_from_capture);
    }

    #[test]
    fn output_path_shape_is_checked() {
        let input = RecordingConfigInput::display(&SourceId::new("0"));
        let err = validate(Path::new(""), &input, None, &limits(), &defaults()).unwrap_err();
        assert_eq!(err.field(), Some("outputPath"));
        let err = validate(Path::new("/tmp/.."), &input, None, &limits(), &defaults()).unwrap_err();
        assert_eq!(err.field(), Some("outputPath"));

        // Writability is not checked here.
        let config = validate(
            Path::new("/nonexistent/dir/out.mp4"),
            &input,
            None,
            &limits(),
            &defaults(),
        )
        .unwrap();
        assert_eq!(config.output_path, PathBuf::from("/nonexistent/dir/out.mp4"));
    }

    #[test]
    fn host_json_is_accepted() {
        let input: RecordingConfigInput = serde_json::from_str(
            r#"{ "source_type": 0, "displayId": 69733382, "fps": 30, "width": 1280, "height": 720, "capture_audio": false }"#,
        )
        .unwrap();
        let config = run(&input, None).unwrap();
        assert_eq!(config.source_id.as_str(), "69733382");
        assert_eq!((config.width, config.height, config.fps), (1280, 720, 30));
        assert!(!config.capture_audio);
        assert!(config.capture_cursor);
    }

    proptest! {
        #[test]
        fn validated_values_respect_limits(
            width in proptest::option::of(1i64..100_000),
            height in proptest::option::of(1i64..100_000),
            fps in proptest::option::of(-100i64..1_000),
        ) {
            let mut input = RecordingConfigInput::display(&SourceId::new("0"));
            input.width = width;
            input.height = height;
            input.fps = fps;

            let config = run(&input, None).unwrap();
            prop_assert!(config.width > 0 && config.width <= 1920);
            prop_assert!(config.height > 0 && config.height <= 1080);
            prop_assert!(config.fps > 0 && config.fps <= 60);
        }
    }
}
