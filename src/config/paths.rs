use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

const APP_DIR: &str = "automail";
const LOG_FILE: &str = "automail.log";

/// Per-profile settings live under the config dir; logs under the data dir.
#[derive(Debug, Clone)]
pub struct AppPaths {
    profiles_dir: PathBuf,
    logs_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> AppResult<Self> {
        let config_root = dirs::config_dir()
            .ok_or_else(|| AppError::Config("unable to resolve config directory".to_string()))?;
        let data_root = dirs::data_dir()
            .ok_or_else(|| AppError::Config("unable to resolve data directory".to_string()))?;

        Self::rooted_at(&config_root.join(APP_DIR), &data_root.join(APP_DIR))
    }

    /// Creates the directory layout below the given roots.
    pub fn rooted_at(config_dir: &Path, data_dir: &Path) -> AppResult<Self> {
        let paths = Self {
            profiles_dir: config_dir.join("profiles"),
            logs_dir: data_dir.join("logs"),
        };

        fs::create_dir_all(&paths.profiles_dir)?;
        fs::create_dir_all(&paths.logs_dir)?;
        Ok(paths)
    }

    pub fn settings_file(&self, profile: &str) -> PathBuf {
        self.profiles_dir.join(format!("{profile}.json"))
    }

    pub fn log_file(&self) -> PathBuf {
        self.logs_dir.join(LOG_FILE)
    }
}
