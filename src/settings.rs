//! Runtime preferences
//!
//! Gameplay tuning is fixed at build time in `consts`; these only cover
//! audio and how the headless runner is driven.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::Volume;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence every cue
    pub muted: bool,

    // === Runner ===
    /// Fixed run seed; random when absent
    pub seed: Option<u64>,
    /// Stop the headless runner after this many ticks
    pub max_ticks: u64,
    /// Restart automatically after a game over (headless runner)
    pub auto_restart: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            seed: None,
            max_ticks: 1200,
            auto_restart: false,
        }
    }
}

impl Settings {
    /// Environment variable naming a JSON settings file
    pub const ENV_VAR: &'static str = "SKY_RAID_SETTINGS";

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Volume pair for audio sinks
    pub fn volume(&self) -> Volume {
        Volume {
            master: self.master_volume.clamp(0.0, 1.0),
            sfx: self.sfx_volume.clamp(0.0, 1.0),
            muted: self.muted,
        }
    }

    /// Load from a JSON file, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from the file named by `SKY_RAID_SETTINGS`, or defaults
    pub fn load() -> Self {
        match std::env::var_os(Self::ENV_VAR) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
