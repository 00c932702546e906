//! User preferences
//!
//! Persisted as `settings.json` in the working directory. A missing file
//! gets the defaults written back; a malformed file falls back to defaults
//! with a warning so a bad edit never blocks startup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sync presents to the display refresh
    pub vsync: bool,
    /// Mouse look sensitivity, degrees per pixel
    pub mouse_sensitivity: f32,
    /// Camera movement speed, world units per second
    pub move_speed: f32,
    /// Initial vertical field of view in degrees
    pub fov_degrees: f32,
    /// Fixed RNG seed for the marble toy; unset means seed from the clock
    pub seed: Option<u64>,
    /// Directory the scene's textures load from
    pub texture_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vsync: true,
            mouse_sensitivity: 0.1,
            move_speed: 2.5,
            fov_degrees: 45.0,
            seed: None,
            texture_dir: "assets/textures".to_string(),
        }
    }
}

impl Settings {
    /// Load settings, creating the file with defaults when it is absent.
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring malformed {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                let settings = Self::default();
                settings.save(path);
                settings
            }
        }
    }

    /// Write settings to disk; failure is logged, not fatal.
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("could not write {}: {err}", path.display());
                } else {
                    log::info!("wrote settings to {}", path.display());
                }
            }
            Err(err) => log::warn!("could not serialize settings: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip() {
        let mut settings = Settings::default();
        settings.vsync = false;
        settings.seed = Some(1234);

        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert!(!back.vsync);
        assert_eq!(back.seed, Some(1234));
        assert_eq!(back.texture_dir, settings.texture_dir);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let back: Settings = serde_json::from_str(r#"{"vsync": false}"#).unwrap();
        assert!(!back.vsync);
        assert_eq!(back.fov_degrees, 45.0);
        assert_eq!(back.seed, None);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join("marbleworks-settings-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let settings = Settings::load_or_default(&path);
        assert!(settings.vsync);

        std::fs::remove_file(&path).ok();
    }
}
