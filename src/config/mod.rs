use crate::error::{GrmError, GrmResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration
///
/// Loaded from the platform config directory when a file exists there,
/// defaults otherwise:
/// - Windows: %APPDATA%\grm\config.yaml
/// - Linux: ~/.config/grm/config.yaml
/// - macOS: ~/Library/Application Support/grm/config.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory where tag markers are stored, namespaced by owner and repo
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    /// GitHub API settings
    #[serde(default)]
    pub github: GithubConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// API base URL (overridable for GitHub Enterprise and for testing)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".grm")
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            github: GithubConfig::default(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load config from the platform config directory, falling back to
    /// defaults when no file exists
    pub fn load() -> GrmResult<Self> {
        match Self::config_file() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path).map_err(|e| {
                    GrmError::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                serde_yaml::from_str(&content)
                    .map_err(|e| GrmError::Config(format!("Failed to parse config: {}", e)))
            }
            _ => Ok(Self::default()),
        }
    }

    fn config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("grm").join("config.yaml"))
    }
}
