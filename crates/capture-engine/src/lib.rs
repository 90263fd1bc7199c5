//! Castkit Capture Engine
//!
//! Runs a single screen, window, or system-audio recording at a time.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                    Recorder                      │
//! │  ┌────────────┐ ┌───────────┐ ┌───────────────┐  │
//! │  │ Permission │ │ Validator │ │ Backend       │  │
//! │  │ Gate       │→│           │→│ Selector      │  │
//! │  └────────────┘ └───────────┘ └───────┬───────┘  │
//! │                                       ▼          │
//! │  ┌─────────────────────────────────────────────┐ │
//! │  │     CaptureEngine (GStreamer pipeline)      │ │
//! │  │  video source → x264 → mux ← audio branch   │ │
//! │  └─────────────────────────────────────────────┘ │
//! └──────────────────────────────────────────────────┘
//! ```

pub mod engine;
pub mod orchestrator;
pub mod pipeline;
pub mod selector;
pub mod validator;

pub use engine::{CaptureEngine, CapturePlan, EncoderSettings, EngineLease, RecordingHandle};
pub use orchestrator::*;
pub use pipeline::GStreamerEngine;
pub use selector::select_backend;
pub use validator::{RawSourceId, RecordingConfigInput, RecordingConfiguration};
