//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default recording settings.
    pub recording: RecordingDefaults,

    /// Maximum values the capture backends accept.
    pub limits: BackendLimits,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default recording parameters, applied when a request leaves them unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingDefaults {
    /// Default FPS.
    pub fps: u32,

    /// Draw the cursor into the capture.
    pub capture_cursor: bool,

    /// Record system audio alongside video.
    pub capture_audio: bool,

    /// Exclude this process's own windows from display capture.
    pub hide_self_from_capture: bool,

    /// Audio sample rate.
    pub audio_sample_rate: u32,

    /// H.264 target bitrate.
    pub video_bitrate_kbps: u32,

    /// Audio encoder bitrate.
    pub audio_bitrate_kbps: u32,
}

/// Upper bounds for validated recording requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendLimits {
    pub max_width: u32,
    pub max_height: u32,
    pub max_fps: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "castkit=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for RecordingDefaults {
    fn default() -> Self {
        Self {
            fps: 30,
            capture_cursor: true,
            capture_audio: true,
            hide_self_from_capture: true,
            audio_sample_rate: 48000,
            video_bitrate_kbps: 8000,
            audio_bitrate_kbps: 160,
        }
    }
}

impl Default for BackendLimits {
    fn default() -> Self {
        Self {
            max_width: 1920,
            max_height: 1080,
            max_fps: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<PathBuf, std::io::Error> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("castkit").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_historical_backend_maximum() {
        let config = AppConfig::default();
        assert_eq!(config.limits.max_width, 1920);
        assert_eq!(config.limits.max_height, 1080);
        assert_eq!(config.recording.fps, 30);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "recording": { "fps": 24 } }"#).unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.recording.fps, 24);
        assert!(config.recording.capture_cursor);
        assert_eq!(config.limits, BackendLimits::default());
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = AppConfig::default();
        config.limits.max_fps = 120;
        config.logging.json = true;

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path), config);
    }
}
