use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::client::DEFAULT_API_BASE_URL;
use crate::error::{AppError, AppResult};
use crate::triage::presenter::DEFAULT_EXIT_TRANSITION;
use crate::triage::viewport::DEFAULT_COMPACT_BREAKPOINT;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub compact_breakpoint: Option<u16>,
    #[serde(default)]
    pub exit_transition_ms: Option<u64>,
}

impl Settings {
    pub fn api_base_url(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    pub fn request_timeout(&self) -> AppResult<Duration> {
        match self.request_timeout_secs {
            Some(0) => Err(AppError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            )),
            Some(secs) => Ok(Duration::from_secs(secs)),
            None => Ok(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
        }
    }

    pub fn compact_breakpoint(&self) -> u16 {
        self.compact_breakpoint.unwrap_or(DEFAULT_COMPACT_BREAKPOINT)
    }

    pub fn exit_transition(&self) -> Duration {
        self.exit_transition_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_EXIT_TRANSITION)
    }
}

pub fn load(path: PathBuf) -> AppResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let raw = fs::read_to_string(path)?;
    let settings = serde_json::from_str(&raw)?;
    Ok(settings)
}

pub fn save(path: PathBuf, settings: &Settings) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = serde_json::to_string_pretty(settings)?;
    fs::write(&path, payload)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}
