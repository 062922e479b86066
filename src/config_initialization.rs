//! Configuration initialization and hierarchy management

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::adapters::toml_config::{keys, TomlConfigAdapter};
use crate::cli::{Cli, Commands};
use crate::domain::errors::DomainError;
use crate::domain::model::{OutputFormat, OverwritePolicy, ScaleSpec};
use crate::ports::{ConfigPort, LogLevel};

/// Fully resolved settings for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    pub ytdlp_path: PathBuf,
    pub chunk_duration: u32,
    pub scale: ScaleSpec,
    pub format: OutputFormat,
    pub overwrite: OverwritePolicy,
    pub log_level: LogLevel,
    pub config_file: Option<PathBuf>,
}

impl Settings {
    /// Read typed settings out of a validated config port
    pub async fn from_config(config: &dyn ConfigPort) -> Result<Self, DomainError> {
        let chunk_duration = config
            .get_config_or_default(keys::CHUNK_DURATION, "10")
            .await?;
        let chunk_duration = chunk_duration.trim().parse::<u32>().map_err(|e| {
            DomainError::BadArgs(format!("Invalid chunk duration '{}': {}", chunk_duration, e))
        })?;

        Ok(Self {
            ffmpeg_path: PathBuf::from(config.get_config_or_default(keys::FFMPEG_PATH, "ffmpeg").await?),
            ffprobe_path: PathBuf::from(
                config.get_config_or_default(keys::FFPROBE_PATH, "ffprobe").await?,
            ),
            ytdlp_path: PathBuf::from(config.get_config_or_default(keys::YTDLP_PATH, "yt-dlp").await?),
            chunk_duration,
            scale: ScaleSpec::parse(&config.get_config_or_default(keys::SCALE, "480:-1").await?)?,
            format: OutputFormat::parse(&config.get_config_or_default(keys::FORMAT, "gif").await?)?,
            overwrite: OverwritePolicy::parse(
                &config.get_config_or_default(keys::OVERWRITE_POLICY, "never").await?,
            )?,
            log_level: LogLevel::parse(&config.get_config_or_default(keys::LOG_LEVEL, "info").await?)?,
            config_file: config.get_config_file_path().await?,
        })
    }
}

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub async fn initialize_configuration_hierarchy(cli: &Cli) -> Result<Settings> {
    // Step 1: defaults are populated by the adapter
    let config = TomlConfigAdapter::new();

    // Step 2: config file
    if let Some(path) = config_file_to_load(cli) {
        config
            .load_config(&path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    }

    // Step 3: environment variables
    config.apply_env_overrides(std::env::vars())?;

    // Step 4: CLI arguments
    apply_cli_configuration_overrides(&config, cli).await?;

    config
        .validate_config()
        .await
        .context("Invalid configuration")?;

    Ok(Settings::from_config(&config).await?)
}

/// Explicit `--config` wins; otherwise the first existing default location
fn config_file_to_load(cli: &Cli) -> Option<PathBuf> {
    if let Some(path) = &cli.config {
        return Some(path.clone());
    }

    TomlConfigAdapter::default_config_candidates()
        .into_iter()
        .find(|candidate| candidate.is_file())
}

/// Apply CLI argument overrides to configuration
async fn apply_cli_configuration_overrides(config: &dyn ConfigPort, cli: &Cli) -> Result<usize> {
    let mut overrides: Vec<(&str, String)> = Vec::new();

    if let Some(level) = &cli.log_level {
        overrides.push((keys::LOG_LEVEL, level.clone()));
    }
    if let Some(policy) = &cli.overwrite {
        overrides.push((keys::OVERWRITE_POLICY, policy.clone()));
    }

    if let Commands::Split(args) = &cli.command {
        if let Some(chunk) = args.chunk_duration {
            overrides.push((keys::CHUNK_DURATION, chunk.to_string()));
        }
        if let Some(scale) = &args.scale {
            overrides.push((keys::SCALE, scale.clone()));
        }
        if let Some(format) = &args.format {
            overrides.push((keys::FORMAT, format.clone()));
        }
    }

    for (key, value) in &overrides {
        config.set_config(key, value).await?;
    }

    Ok(overrides.len())
}
