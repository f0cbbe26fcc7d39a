use crate::images::default_image_url;
use crate::model::Difficulty;
use crate::storage::DEFAULT_HISTORY_LIMIT;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

const DATA_DIR_ENV: &str = "SLIDEQUEST_DATA_DIR";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    pub difficulty: Difficulty,

    /// Overlay tile numbers on the board.
    #[serde(default)]
    pub show_tile_numbers: bool,

    #[serde(default = "default_image_url")]
    pub current_image: String,

    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

// Helper functions for default values
fn default_version() -> u32 {
    2
}
fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            difficulty: Difficulty::default(),
            show_tile_numbers: false,
            current_image: default_image_url(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Root of everything the game persists. `SLIDEQUEST_DATA_DIR` overrides the
/// platform data directory.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("slidequest")
}

pub fn uploads_dir() -> PathBuf {
    data_dir().join("uploads")
}

impl Settings {
    /// Defaults are written only when no settings file exists yet. A file
    /// that fails to parse is moved aside to `settings.json.invalid`.
    pub fn load() -> Self {
        let path = Self::settings_path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let default = Settings::default();
                if let Err(err) = default.save() {
                    warn!(target: "settings", "Could not write default settings: {}", err);
                }
                return default;
            }
            Err(err) => {
                warn!(target: "settings", "Could not read {:?}: {}", path, err);
                return Settings::default();
            }
        };
        match serde_json::from_str::<Settings>(&contents) {
            Ok(mut settings) => {
                settings.migrate();
                settings
            }
            Err(err) => {
                let backup = path.with_extension("json.invalid");
                warn!(
                    target: "settings",
                    "Ignoring unreadable {:?} ({}), keeping it as {:?}", path, err, backup
                );
                if let Err(err) = fs::rename(&path, &backup) {
                    warn!(target: "settings", "Could not move {:?} aside: {}", path, err);
                }
                Settings::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        let path = Self::settings_path();
        // Ensure the directory exists
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string(self)?;
        fs::write(path, contents)
    }

    fn settings_path() -> PathBuf {
        data_dir().join("settings.json")
    }

    fn migrate(&mut self) {
        match self.version {
            // version 1 had no history limit
            0 | 1 => {
                if self.history_limit == 0 {
                    self.history_limit = DEFAULT_HISTORY_LIMIT;
                }
                self.version = default_version();
            }
            _ => (),
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse::<u64>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::path::Path;

    fn with_data_dir<F: FnOnce(&Path)>(f: F) {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(DATA_DIR_ENV, dir.path());
        f(dir.path());
        std::env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    #[serial]
    fn test_load_writes_defaults_when_missing() {
        with_data_dir(|dir| {
            let settings = Settings::load();
            assert_eq!(settings, Settings::default());
            assert!(dir.join("settings.json").exists());
        });
    }

    #[test]
    #[serial]
    fn test_unreadable_settings_are_kept_aside() {
        with_data_dir(|dir| {
            let path = dir.join("settings.json");
            fs::write(&path, r#"{"difficulty": "4x4",}"#).unwrap();

            assert_eq!(Settings::load(), Settings::default());
            assert!(!path.exists());
            assert_eq!(
                fs::read_to_string(dir.join("settings.json.invalid")).unwrap(),
                r#"{"difficulty": "4x4",}"#
            );
        });
    }

    #[test]
    #[serial]
    fn test_save_and_load() {
        with_data_dir(|_| {
            let settings = Settings {
                difficulty: Difficulty::Hard,
                show_tile_numbers: true,
                ..Settings::default()
            };
            settings.save().unwrap();
            assert_eq!(Settings::load(), settings);
        });
    }

    #[test]
    #[serial]
    fn test_old_settings_are_migrated() {
        with_data_dir(|dir| {
            fs::create_dir_all(dir).unwrap();
            fs::write(
                dir.join("settings.json"),
                r#"{"version":1,"difficulty":"4x4","history_limit":0}"#,
            )
            .unwrap();

            let settings = Settings::load();
            assert_eq!(settings.difficulty, Difficulty::Medium);
            assert_eq!(settings.history_limit, DEFAULT_HISTORY_LIMIT);
            assert_eq!(settings.current_image, default_image_url());
            assert_eq!(settings.version, default_version());
        });
    }

    #[test]
    #[serial]
    fn test_seed_from_env() {
        std::env::set_var("SEED", "1234");
        assert_eq!(Settings::seed_from_env(), Some(1234));
        std::env::set_var("SEED", "not-a-number");
        assert_eq!(Settings::seed_from_env(), None);
        std::env::remove_var("SEED");
        assert_eq!(Settings::seed_from_env(), None);
    }
}
