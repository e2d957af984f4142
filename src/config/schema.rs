//! Configuration schema types for `incubator.toml`
//!
//! Every section is optional; a missing file yields [`IncubatorConfig::default`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::audio::Track;
use crate::incubator::{DurationError, IncubationDuration};

/// Upper bound on asset load retries
pub const MAX_ASSET_RETRIES: u32 = 5;

/// Countdown settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Incubation length in whole minutes (>= 1)
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,
    /// Pause between the egg cracking and the reveal
    #[serde(default = "default_hatch_delay_ms")]
    pub hatch_delay_ms: u64,
}

impl TimerConfig {
    /// The validated duration.
    pub fn duration(&self) -> Result<IncubationDuration, DurationError> {
        IncubationDuration::from_minutes(self.duration_minutes)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            duration_minutes: default_duration_minutes(),
            hatch_delay_ms: default_hatch_delay_ms(),
        }
    }
}

fn default_duration_minutes() -> u32 {
    IncubationDuration::DEFAULT_MINUTES
}

fn default_hatch_delay_ms() -> u64 {
    1000
}

/// Sprite asset settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory holding `egg_base.png`, `pet_<species>.png`, ...
    #[serde(default = "default_assets_dir")]
    pub dir: PathBuf,
    /// Extra attempts after a failed load
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: default_assets_dir(),
            retries: default_retries(),
        }
    }
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_retries() -> u32 {
    1
}

/// Collection persistence settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the saved collection
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: default_storage_path() }
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("pixel-incubator.json")
}

/// Background music settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Playlist, in playback order
    #[serde(default = "default_tracks")]
    pub tracks: Vec<Track>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { tracks: default_tracks() }
    }
}

fn default_tracks() -> Vec<Track> {
    vec![
        Track::new("White Noise", "assets/audio/track_white_noise.mp3"),
        Track::new("Lofi Beats", "assets/audio/track_lofi_beats.mp3"),
        Track::new("Rain Sounds", "assets/audio/track_rain.mp3"),
    ]
}

/// Root of `incubator.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncubatorConfig {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

/// A single configuration problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "timer.duration_minutes")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "incubator.toml: '{}' {}", self.field, self.message)
    }
}

impl IncubatorConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if let Err(e) = self.timer.duration() {
            errors.push(ConfigValidationError {
                field: "timer.duration_minutes".to_string(),
                message: e.to_string(),
            });
        }

        if self.assets.retries > MAX_ASSET_RETRIES {
            errors.push(ConfigValidationError {
                field: "assets.retries".to_string(),
                message: format!("must be at most {}", MAX_ASSET_RETRIES),
            });
        }

        if self.storage.path.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "storage.path".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        if self.audio.tracks.is_empty() {
            errors.push(ConfigValidationError {
                field: "audio.tracks".to_string(),
                message: "must contain at least one track".to_string(),
            });
        }
        for (i, track) in self.audio.tracks.iter().enumerate() {
            if track.name.is_empty() || track.src.is_empty() {
                errors.push(ConfigValidationError {
                    field: format!("audio.tracks[{}]", i),
                    message: "needs both a name and a src".to_string(),
                });
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IncubatorConfig::default();
        assert_eq!(config.timer.duration_minutes, 25);
        assert_eq!(config.timer.hatch_delay_ms, 1000);
        assert_eq!(config.assets.dir, PathBuf::from("assets"));
        assert_eq!(config.assets.retries, 1);
        assert_eq!(config.audio.tracks.len(), 3);
        assert!(config.is_valid());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: IncubatorConfig = toml::from_str("").unwrap();
        assert_eq!(config, IncubatorConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config: IncubatorConfig = toml::from_str(
            r#"
[timer]
duration_minutes = 5

[[audio.tracks]]
name = "Ocean"
src = "ocean.mp3"
"#,
        )
        .unwrap();

        assert_eq!(config.timer.duration_minutes, 5);
        assert_eq!(config.timer.hatch_delay_ms, 1000);
        assert_eq!(config.audio.tracks, vec![Track::new("Ocean", "ocean.mp3")]);
        assert_eq!(config.timer.duration().unwrap().as_millis(), 300_000);
    }

    #[test]
    fn test_validation_collects_all_problems() {
        let mut config = IncubatorConfig::default();
        config.timer.duration_minutes = 0;
        config.assets.retries = 9;
        config.storage.path = PathBuf::new();
        config.audio.tracks = vec![];

        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["timer.duration_minutes", "assets.retries", "storage.path", "audio.tracks"]);
    }

    #[test]
    fn test_validation_message_format() {
        let mut config = IncubatorConfig::default();
        config.audio.tracks.push(Track::new("", "x.mp3"));
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "incubator.toml: 'audio.tracks[3]' needs both a name and a src");
    }
}
