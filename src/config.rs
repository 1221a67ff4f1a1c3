use crate::error::GameError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub cols: usize,
    pub rows: usize,
    pub total_rounds: usize,
    pub min_targets: usize,
    pub max_targets: usize,
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cols: 12,
            rows: 12,
            total_rounds: 10,
            min_targets: 3,
            max_targets: 20,
            history_limit: 10,
        }
    }
}

impl Config {
    /// Reject settings the game cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: String| -> Result<(), GameError> { Err(GameError::InvalidConfig(msg)) };

        if self.cols == 0 || self.rows == 0 {
            return invalid(format!("grid must not be empty ({}x{})", self.cols, self.rows));
        }
        if self.total_rounds == 0 {
            return invalid("a session needs at least one round".to_string());
        }
        if self.history_limit == 0 {
            return invalid("history must keep at least one session".to_string());
        }
        if self.min_targets == 0 {
            return invalid("every round needs at least one target".to_string());
        }
        if self.min_targets > self.max_targets {
            return invalid(format!(
                "min_targets ({}) exceeds max_targets ({})",
                self.min_targets, self.max_targets
            ));
        }
        // at least one cell has to stay free to be the answer
        if self.max_targets >= self.cols * self.rows {
            return invalid(format!(
                "max_targets ({}) must be below the cell count ({})",
                self.max_targets,
                self.cols * self.rows
            ));
        }
        Ok(())
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
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "pinpoint") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("pinpoint_config.json")
        };
        Self { path }
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
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("ignoring malformed config {}: {}", self.path.display(), e);
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::other)?;
        fs::write(&self.path, data)
    }
}
