// TOML config adapter - Configuration management using TOML files

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Configuration keys
pub mod keys {
    pub const FFMPEG_PATH: &str = "ffmpeg_path";
    pub const FFPROBE_PATH: &str = "ffprobe_path";
    pub const YTDLP_PATH: &str = "ytdlp_path";
    pub const CHUNK_DURATION: &str = "chunk_duration";
    pub const SCALE: &str = "scale";
    pub const FORMAT: &str = "format";
    pub const OVERWRITE_POLICY: &str = "overwrite_policy";
    pub const LOG_LEVEL: &str = "log_level";

    pub const ALL: &[&str] = &[
        FFMPEG_PATH,
        FFPROBE_PATH,
        YTDLP_PATH,
        CHUNK_DURATION,
        SCALE,
        FORMAT,
        OVERWRITE_POLICY,
        LOG_LEVEL,
    ];
}

/// Prefix for environment overrides, e.g. `CLIPGEN_CHUNK_DURATION`
pub const ENV_PREFIX: &str = "CLIPGEN_";

/// Table name inside the TOML file
const TABLE: &str = "clipgen";

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    config: RwLock<HashMap<String, String>>,
    config_file_path: RwLock<Option<PathBuf>>,
}

impl TomlConfigAdapter {
    /// Create new TOML config adapter populated with defaults
    pub fn new() -> Self {
        Self {
            config: RwLock::new(Self::default_values()),
            config_file_path: RwLock::new(None),
        }
    }

    fn default_values() -> HashMap<String, String> {
        [
            (keys::FFMPEG_PATH, "ffmpeg".to_string()),
            (keys::FFPROBE_PATH, "ffprobe".to_string()),
            (keys::YTDLP_PATH, "yt-dlp".to_string()),
            (keys::CHUNK_DURATION, DEFAULT_CHUNK_DURATION.to_string()),
            (keys::SCALE, DEFAULT_SCALE.to_string()),
            (keys::FORMAT, OutputFormat::default().to_string()),
            (keys::OVERWRITE_POLICY, "never".to_string()),
            (keys::LOG_LEVEL, "info".to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    /// Candidate config file locations, in lookup order
    pub fn default_config_candidates() -> Vec<PathBuf> {
        let mut candidates = vec![
            PathBuf::from("clipgen.toml"),
            PathBuf::from("config").join("clipgen.toml"),
        ];

        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg).join("clipgen").join("config.toml"));
        } else if let Some(home) = std::env::var_os("HOME") {
            candidates.push(
                PathBuf::from(home)
                    .join(".config")
                    .join("clipgen")
                    .join("config.toml"),
            );
        }

        candidates
    }

    /// Apply `CLIPGEN_*` overrides from the given variables, returning how many
    /// were applied
    pub fn apply_env_overrides<I>(&self, vars: I) -> Result<usize, DomainError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = self.write_config()?;
        let mut applied = 0;

        for (name, value) in vars {
            let Some(suffix) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let key = suffix.to_lowercase();
            if keys::ALL.contains(&key.as_str()) {
                tracing::debug!("Environment override: {} = {}", name, value);
                config.insert(key, value);
                applied += 1;
            }
        }

        Ok(applied)
    }

    /// Deserialize config from TOML string
    fn deserialize_config(&self, toml_content: &str) -> Result<(), DomainError> {
        let parsed: toml::Value = toml::from_str(toml_content)
            .map_err(|e| DomainError::BadArgs(format!("Failed to parse TOML config: {}", e)))?;

        let Some(table) = parsed.get(TABLE).and_then(|section| section.as_table()) else {
            return Ok(());
        };

        let mut config = self.write_config()?;
        for (key, value) in table {
            if !keys::ALL.contains(&key.as_str()) {
                tracing::warn!("Ignoring unknown config key: {}", key);
                continue;
            }
            let value = match value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    return Err(DomainError::BadArgs(format!(
                        "Unsupported value for {}: {}",
                        key, other
                    )))
                }
            };
            config.insert(key.clone(), value);
        }

        Ok(())
    }

    fn read_config(&self) -> Result<RwLockReadGuard<'_, HashMap<String, String>>, DomainError> {
        self.config
            .read()
            .map_err(|_| DomainError::InternalError("Config lock poisoned".to_string()))
    }

    fn write_config(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, String>>, DomainError> {
        self.config
            .write()
            .map_err(|_| DomainError::InternalError("Config lock poisoned".to_string()))
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.read_config()?.get(key).cloned())
    }

    async fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, DomainError> {
        Ok(self
            .read_config()?
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string()))
    }

    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.write_config()?
            .insert(key.to_string(), value.to_string());
        tracing::debug!("Set config {} = {}", key, value);
        Ok(())
    }

    async fn load_config(&self, file_path: &Path) -> Result<(), DomainError> {
        let content = tokio::fs::read_to_string(file_path).await.map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to read config file {}: {}",
                file_path.display(),
                e
            ))
        })?;

        self.deserialize_config(&content)?;

        let mut config_path = self
            .config_file_path
            .write()
            .map_err(|_| DomainError::InternalError("Config lock poisoned".to_string()))?;
        *config_path = Some(file_path.to_path_buf());

        Ok(())
    }

    async fn validate_config(&self) -> Result<(), DomainError> {
        let config = self.read_config()?;

        if let Some(log_level) = config.get(keys::LOG_LEVEL) {
            LogLevel::parse(log_level)?;
        }

        if let Some(chunk) = config.get(keys::CHUNK_DURATION) {
            let value: u32 = chunk.trim().parse().map_err(|e| {
                DomainError::BadArgs(format!("Invalid chunk duration '{}': {}", chunk, e))
            })?;
            validate_chunk_duration(value)?;
        }

        if let Some(format) = config.get(keys::FORMAT) {
            OutputFormat::parse(format)?;
        }

        if let Some(scale) = config.get(keys::SCALE) {
            ScaleSpec::parse(scale)?;
        }

        if let Some(policy) = config.get(keys::OVERWRITE_POLICY) {
            OverwritePolicy::parse(policy)?;
        }

        for key in [keys::FFMPEG_PATH, keys::FFPROBE_PATH, keys::YTDLP_PATH] {
            if config.get(key).is_some_and(|v| v.trim().is_empty()) {
                return Err(DomainError::BadArgs(format!("{} cannot be empty", key)));
            }
        }

        Ok(())
    }

    async fn get_config_file_path(&self) -> Result<Option<PathBuf>, DomainError> {
        let config_path = self
            .config_file_path
            .read()
            .map_err(|_| DomainError::InternalError("Config lock poisoned".to_string()))?;
        Ok(config_path.clone())
    }
}
