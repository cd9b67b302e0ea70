//! Application configuration.

use std::path::{Path, PathBuf};

use camtrail_trajectory_model::{CoordinateConvention, ExportOptions, SmoothingOptions};
use serde::{Deserialize, Serialize};

use crate::clock::DEFAULT_FPS;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default recording settings.
    pub recording: RecordingDefaults,

    /// Default smoothing settings.
    pub smoothing: SmoothingOptions,

    /// Default export settings.
    pub export: ExportDefaults,

    /// Sign/scale convention for the schedule consumer.
    pub convention: CoordinateConvention,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default recording parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingDefaults {
    /// Fixed sampling rate in frames per second.
    pub fps: f64,
}

/// Export defaults that do not depend on the recording length.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportDefaults {
    pub frame_step: usize,
    pub cadence: usize,
    pub scale_x: f64,
    pub scale_y: f64,
    pub scale_z: f64,
    pub master_scale_translate: f64,
    pub master_scale_rotate: f64,
    pub include_empty_frames: bool,
    pub include_fov: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives (e.g., "warn,camtrail=debug"). Defaults to
    /// [`DEFAULT_LOG_FILTER`](crate::logging::DEFAULT_LOG_FILTER).
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for RecordingDefaults {
    fn default() -> Self {
        Self { fps: DEFAULT_FPS }
    }
}

impl Default for ExportDefaults {
    fn default() -> Self {
        let base = ExportOptions::default();
        Self {
            frame_step: base.frame_step,
            cadence: base.cadence,
            scale_x: base.scale_x,
            scale_y: base.scale_y,
            scale_z: base.scale_z,
            master_scale_translate: base.master_scale_translate,
            master_scale_rotate: base.master_scale_rotate,
            include_empty_frames: base.include_empty_frames,
            include_fov: base.include_fov,
        }
    }
}

impl ExportDefaults {
    /// Export options covering a whole recording of `total_frames`.
    pub fn options_for(&self, total_frames: usize) -> ExportOptions {
        ExportOptions {
            frame_step: self.frame_step,
            cadence: self.cadence,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            scale_z: self.scale_z,
            master_scale_translate: self.master_scale_translate,
            master_scale_rotate: self.master_scale_rotate,
            include_empty_frames: self.include_empty_frames,
            include_fov: self.include_fov,
            ..ExportOptions::for_frames(total_frames)
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::DEFAULT_LOG_FILTER.to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            return Self::load_from(&config_path);
        }
        Self::default()
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to parse config at {:?}: {}", path, e);
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, e);
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
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
    base.join("camtrail").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("camtrail-config-{}-{name}", std::process::id()))
            .join("config.json")
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.recording.fps, 30.0);
        assert_eq!(config.export.cadence, 1);
        assert_eq!(config.convention, CoordinateConvention::deforum());
        assert_eq!(config.logging.level, "warn,camtrail=info");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip");
        let mut config = AppConfig::default();
        config.recording.fps = 24.0;
        config.export.cadence = 3;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.recording.fps, 24.0);
        assert_eq!(loaded.export.cadence, 3);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let path = temp_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.recording.fps, 30.0);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_export_defaults_seed_frame_range() {
        let defaults = ExportDefaults {
            cadence: 4,
            ..ExportDefaults::default()
        };
        let opts = defaults.options_for(50);
        assert_eq!(opts.frame_end, 49);
        assert_eq!(opts.cadence, 4);
    }
}
