// Configuration Storage Service
// Handles config file read/write and version backup

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ANNOTATION_SERVICE_URL: &str = "http://127.0.0.1:8790";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub annotation: AnnotationConfig,
    #[serde(default)]
    pub patterns: PatternConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            analysis: AnalysisConfig::default(),
            annotation: AnnotationConfig::default(),
            patterns: PatternConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default)]
    pub normalize_input: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            normalize_input: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationConfig {
    #[serde(default = "default_annotator")]
    pub annotator: String,
    #[serde(default = "default_service_url")]
    pub service_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            annotator: default_annotator(),
            service_url: default_service_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Optional replacements for the built-in pattern groups
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PatternConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decisions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<String>>,
}

fn default_version() -> String { env!("CARGO_PKG_VERSION").to_string() }
fn default_strategy() -> String { "auto".to_string() }
fn default_annotator() -> String { "service".to_string() }
fn default_service_url() -> String { DEFAULT_ANNOTATION_SERVICE_URL.to_string() }
fn default_timeout_secs() -> u64 { 10 }

/// Which strategy the caller wants; `Auto` follows the annotation capability
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StrategyPreference {
    Auto,
    Annotated,
    Patterns,
}

impl StrategyPreference {
    pub fn parse(val: &str) -> Result<Self, ConfigError> {
        match val.trim().to_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "annotated" | "nlp" | "spacy" => Ok(Self::Annotated),
            "patterns" | "pattern" | "regex" => Ok(Self::Patterns),
            other => Err(ConfigError::InvalidValue {
                key: "analysis.strategy".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Source of linguistic annotation
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AnnotatorKind {
    Service,
    Builtin,
    Disabled,
}

impl AnnotatorKind {
    pub fn parse(val: &str) -> Result<Self, ConfigError> {
        match val.trim().to_lowercase().as_str() {
            "service" | "" => Ok(Self::Service),
            "builtin" | "rules" => Ok(Self::Builtin),
            "none" | "off" | "disabled" => Ok(Self::Disabled),
            other => Err(ConfigError::InvalidValue {
                key: "annotation.annotator".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl AppConfig {
    pub fn strategy_preference(&self) -> Result<StrategyPreference, ConfigError> {
        StrategyPreference::parse(&self.analysis.strategy)
    }

    pub fn annotator_kind(&self) -> Result<AnnotatorKind, ConfigError> {
        AnnotatorKind::parse(&self.annotation.annotator)
    }
}

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Store backed by an explicit config file path
    pub fn with_file(config_file: PathBuf) -> Self {
        let config_dir = config_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("meeting-notes-analyzer"))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_dir).map_err(|source| ConfigError::Io {
            path: self.config_dir.clone(),
            source,
        })
    }

    /// Load configuration from file, falling back to defaults when absent
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file).map_err(|source| ConfigError::Io {
            path: self.config_file.clone(),
            source,
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        self.ensure_dir()?;

        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)?;

        fs::write(&self.config_file, content).map_err(|source| ConfigError::Io {
            path: self.config_file.clone(),
            source,
        })
    }

    /// Create a backup of current config
    fn create_backup(&self) -> Result<(), ConfigError> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir).map_err(|source| ConfigError::Io {
            path: backup_dir.clone(),
            source,
        })?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S%3f");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file).map_err(|source| ConfigError::Io {
            path: backup_file.clone(),
            source,
        })?;

        // Keep only last 10 backups
        self.cleanup_old_backups(&backup_dir, 10)
    }

    /// Remove old backups, keeping only the most recent N
    fn cleanup_old_backups(&self, backup_dir: &Path, keep: usize) -> Result<(), ConfigError> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)
            .map_err(|source| ConfigError::Io {
                path: backup_dir.to_path_buf(),
                source,
            })?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Oldest first; the timestamped names sort the same way
        entries.sort_by_key(|e| e.file_name());

        let remove_count = entries.len() - keep;
        for entry in entries.iter().take(remove_count) {
            let _ = fs::remove_file(entry.path());
        }

        Ok(())
    }
}
