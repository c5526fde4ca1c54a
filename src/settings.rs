//! Game settings and preferences
//!
//! The one preference this game keeps — the last-selected difficulty — is
//! persisted to a small JSON file so the menu reopens on it next launch.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Difficulty presets, each mapping to an (obstacle count, enemy speed) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Obstacles placed at the start of a run
    pub fn obstacle_count(&self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 6,
            Difficulty::Hard => 10,
        }
    }

    /// Enemy base step size (pixels per tick)
    pub fn enemy_speed(&self) -> i32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// Persisted preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub difficulty: Difficulty,
}

impl Settings {
    /// Settings file, relative to the working directory.
    const STORAGE_FILE: &'static str = "settings.json";

    pub fn load() -> Self {
        Self::load_from(Path::new(Self::STORAGE_FILE))
    }

    /// Load from an explicit path; missing or corrupt files fall back to
    /// defaults with a log line, never an error.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring corrupt settings file {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        self.save_to(Path::new(Self::STORAGE_FILE));
    }

    pub fn save_to(&self, path: &Path) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("could not save settings to {}: {}", path.display(), err);
                }
            }
            Err(err) => log::warn!("could not serialize settings: {}", err),
        }
    }
}
