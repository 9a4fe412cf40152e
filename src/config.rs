//! Tool configuration (deadlock_translator.yaml)
//!
//! The file is optional and every key has a default. Command-line flags
//! override what is loaded here.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, config};
use crate::http::DEFAULT_USER_AGENT;

/// Config filename, looked up in the game directory
pub const CONFIG_FILE: &str = "deadlock_translator.yaml";

/// Forum post carrying the translation link
pub const DEFAULT_FORUM_URL: &str = "https://forum.gamer.com.tw/C.php?bsn=80911&snA=76";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub forum_url: String,

    /// Per-request timeout in seconds
    pub download_timeout: u64,

    /// Launch the game after a successful update
    pub auto_launch: bool,

    /// Filename used when neither headers nor URL yield one
    pub fallback_filename: String,

    pub log_level: String,

    pub user_agent: String,

    /// Download directory, relative to the game directory unless absolute
    pub download_dir: PathBuf,

    pub language: LanguagePatch,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            forum_url: DEFAULT_FORUM_URL.to_string(),
            download_timeout: 30,
            auto_launch: true,
            fallback_filename: "taiwan_translation.zip".to_string(),
            log_level: "info".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            download_dir: PathBuf::from("downloads"),
            language: LanguagePatch::default(),
        }
    }
}

/// The gameinfo.gi entry to register and where to put it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagePatch {
    /// Block holding the language list
    pub block: String,
    /// Entry the new one is inserted after
    pub anchor_key: String,
    pub anchor_value: String,
    /// Entry to insert
    pub key: String,
    pub value: String,
}

impl Default for LanguagePatch {
    fn default() -> Self {
        Self {
            block: "SupportedLanguages".to_string(),
            anchor_key: "ukrainian".to_string(),
            anchor_value: "3".to_string(),
            key: "tchinese".to_string(),
            value: "3".to_string(),
        }
    }
}

impl TranslatorConfig {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str, path: &Path) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| config::parse_failed(path.display().to_string(), e))
    }

    /// Load from an explicit file, or from the game directory if none is given.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an
    /// error.
    pub fn load(game_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .map_err(|e| config::read_failed(path.display().to_string(), e))?;
                Self::from_yaml(&content, path)
            }
            None => {
                let path = game_root.join(CONFIG_FILE);
                if !path.exists() {
                    return Ok(Self::default());
                }
                let content = fs::read_to_string(&path)
                    .map_err(|e| config::read_failed(path.display().to_string(), e))?;
                Self::from_yaml(&content, &path)
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout)
    }

    /// Absolute download directory for `game_root`
    pub fn download_dir(&self, game_root: &Path) -> PathBuf {
        if self.download_dir.is_absolute() {
            self.download_dir.clone()
        } else {
            game_root.join(&self.download_dir)
        }
    }
}
