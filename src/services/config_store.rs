// Configuration Storage Service
// Handles config file read/write and version backup

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::services::detection::{DetectorOptions, VerdictThresholds};

const CONFIG_FILE: &str = "config.json";
const BACKUP_KEEP: usize = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ConfigError {
    let path = path.to_path_buf();
    move |source| ConfigError::Io { path, source }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub review: ReviewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetectionConfig {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_min_words")]
    pub min_words: usize,
    #[serde(default)]
    pub thresholds: VerdictThresholds,
    #[serde(default)]
    pub explicit_marker_override: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            min_words: default_min_words(),
            thresholds: VerdictThresholds::default(),
            explicit_marker_override: false,
        }
    }
}

impl DetectionConfig {
    pub fn to_options(&self) -> DetectorOptions {
        DetectorOptions {
            min_length: self.min_length,
            min_words: self.min_words,
            thresholds: self.thresholds,
            explicit_marker_override: self.explicit_marker_override,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewConfig {
    /// Question types whose free-text answers are checked.
    #[serde(default = "default_detect_question_types")]
    pub detect_question_types: Vec<String>,
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            detect_question_types: default_detect_question_types(),
            snippet_chars: default_snippet_chars(),
        }
    }
}

impl ReviewConfig {
    pub fn is_detectable(&self, question_type: &str) -> bool {
        let wanted = question_type.trim();
        self.detect_question_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(wanted))
    }
}

fn default_min_length() -> usize { crate::services::detection::DEFAULT_MIN_LENGTH }
fn default_min_words() -> usize { crate::services::detection::DEFAULT_MIN_WORDS }
fn default_detect_question_types() -> Vec<String> { vec!["writing".to_string(), "translation".to_string()] }
fn default_snippet_chars() -> usize { 200 }

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join(CONFIG_FILE);
        Self { config_dir, config_file }
    }

    /// `EXAMGUARD_CONFIG_DIR`, else the platform config directory.
    pub fn default_config_dir() -> Option<PathBuf> {
        match std::env::var("EXAMGUARD_CONFIG_DIR") {
            Ok(p) if !p.trim().is_empty() => Some(PathBuf::from(p)),
            _ => dirs::config_dir().map(|p| p.join("examGuard")),
        }
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_dir).map_err(io_err(&self.config_dir))
    }

    /// Load configuration from file; a missing file yields defaults.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file).map_err(io_err(&self.config_file))?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        self.ensure_dir()?;

        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;
        fs::write(&self.config_file, content).map_err(io_err(&self.config_file))
    }

    fn create_backup(&self) -> Result<(), ConfigError> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir).map_err(io_err(&backup_dir))?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file).map_err(io_err(&backup_file))?;

        self.cleanup_old_backups(&backup_dir, BACKUP_KEEP)
    }

    /// Remove old backups, keeping only the most recent N
    fn cleanup_old_backups(&self, backup_dir: &Path, keep: usize) -> Result<(), ConfigError> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)
            .map_err(io_err(backup_dir))?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Oldest first
        entries.sort_by_key(|e| {
            e.metadata()
                .and_then(|m| m.modified())
                .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
        });

        let remove_count = entries.len() - keep;
        for entry in entries.iter().take(remove_count) {
            let _ = fs::remove_file(entry.path());
        }

        Ok(())
    }
}
