use crate::game::session::SessionConfig;
use crate::model::Difficulty;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DATA_DIR_ENV: &str = "MEMORY_MATCH_DATA_DIR";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub daily_mode: bool,

    #[serde(default = "default_match_delay_ms")]
    pub match_delay_ms: u64,

    #[serde(default = "default_mismatch_delay_ms")]
    pub mismatch_delay_ms: u64,

    #[serde(default = "default_true")]
    pub background_music: bool,
}

// Helper functions for default values
fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_match_delay_ms() -> u64 {
    400
}
fn default_mismatch_delay_ms() -> u64 {
    1000
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            difficulty: Difficulty::default(),
            daily_mode: false,
            match_delay_ms: default_match_delay_ms(),
            mismatch_delay_ms: default_mismatch_delay_ms(),
            background_music: true,
        }
    }
}

impl Settings {
    /// Reads `settings.json` from `data_dir`, writing defaults back when it is
    /// missing or unreadable.
    pub fn load(data_dir: &Path) -> Self {
        let path = Self::settings_path(data_dir);
        if let Ok(contents) = fs::read_to_string(&path) {
            match serde_json::from_str::<Settings>(&contents) {
                Ok(mut settings) => {
                    settings.migrate();
                    return settings;
                }
                Err(err) => warn!(target: "settings", "Ignoring {}: {}", path.display(), err),
            }
        }
        let default = Settings::default();
        if let Err(err) = default.save(data_dir) {
            warn!(target: "settings", "Could not write default settings: {}", err);
        }
        default
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), std::io::Error> {
        let path = Self::settings_path(data_dir);
        // Ensure the directory exists
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
    }

    fn settings_path(data_dir: &Path) -> PathBuf {
        data_dir.join("settings.json")
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            match_delay: Duration::from_millis(self.match_delay_ms),
            mismatch_delay: Duration::from_millis(self.mismatch_delay_ms),
            ..SessionConfig::default()
        }
        .validated()
    }

    /// `$MEMORY_MATCH_DATA_DIR`, else `$HOME/.local/share/memory-match`, else
    /// the working directory.
    pub fn data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.is_empty() {
                return PathBuf::from(dir);
            }
        }
        let dir = std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".local/share/memory-match"))
            .unwrap_or_else(|_| PathBuf::from("."));
        debug!(target: "settings", "Using data dir {}", dir.display());
        dir
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    pub fn seed_from_env() -> Option<i64> {
        let value = std::env::var("SEED").ok()?;
        match value.parse::<i64>() {
            Ok(seed) => Some(seed),
            Err(err) => {
                warn!(target: "settings", "Ignoring SEED={}: {}", value, err);
                None
            }
        }
    }
}
