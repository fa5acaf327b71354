use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::game::GameConfig;
use crate::session::{SessionConfig, DEFAULT_GAME_DURATION_SECS};
use crate::tilt::{
    is_valid_threshold, Axis, TiltConfig, TiltMapping, DEFAULT_COOLDOWN_MS, DEFAULT_THRESHOLD,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub game_duration_secs: u32,
    pub tilt_threshold: f64,
    pub tilt_cooldown_ms: u64,
    pub tilt_axis: Axis,
    pub tilt_mapping: TiltMapping,
    pub sound: bool,
    pub words_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game_duration_secs: DEFAULT_GAME_DURATION_SECS,
            tilt_threshold: DEFAULT_THRESHOLD,
            tilt_cooldown_ms: DEFAULT_COOLDOWN_MS,
            tilt_axis: Axis::Z,
            tilt_mapping: TiltMapping::Standard,
            sound: true,
            words_dir: None,
        }
    }
}

impl Config {
    /// Replaces values that would break a round with their defaults.
    pub fn sanitized(mut self) -> Self {
        if self.game_duration_secs == 0 {
            log::warn!("game_duration_secs must be at least 1, using {DEFAULT_GAME_DURATION_SECS}");
            self.game_duration_secs = DEFAULT_GAME_DURATION_SECS;
        }
        if !is_valid_threshold(self.tilt_threshold) {
            log::warn!(
                "tilt_threshold {} is not a positive number, using {DEFAULT_THRESHOLD}",
                self.tilt_threshold
            );
            self.tilt_threshold = DEFAULT_THRESHOLD;
        }
        self
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            session: SessionConfig {
                game_duration_secs: self.game_duration_secs,
                ..SessionConfig::default()
            },
            tilt: TiltConfig {
                threshold: self.tilt_threshold,
                cooldown: Duration::from_millis(self.tilt_cooldown_ms),
                axis: self.tilt_axis,
                mapping: self.tilt_mapping,
            },
            ..GameConfig::default()
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };

        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg.sanitized(),
            Err(e) => {
                log::warn!("ignoring malformed config {}: {e}", self.path.display());
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
