//! Configuration file management for materio.
//!
//! Provides a TOML-based config file at `~/.config/materio/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use materio_core::gateway::openai::DEFAULT_BASE_URL;
use materio_core::pipeline::PipelineConfig;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub api: ApiSection,
    #[serde(default)]
    pub pipeline: PipelineSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiSection {
    /// Bearer token for the generation service.
    pub key: String,
    /// Service root override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PipelineSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_concurrency: Option<usize>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the materio config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/materio` or `~/.config/materio`.
/// We intentionally ignore the platform-specific `dirs::config_dir()`
/// (which returns `~/Library/Application Support` on macOS).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("materio");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("materio")
}

/// Return the path to the materio config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix; the file holds an API key.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct MaterioConfig {
    pub api_key: String,
    pub base_url: String,
    pub pipeline: PipelineConfig,
}

impl MaterioConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config
    /// file > default.
    ///
    /// - API key: `cli_api_key` > `MATERIO_API_KEY` env > `api.key` > error
    /// - Base URL: `MATERIO_BASE_URL` env > `api.base_url` > default
    /// - Model / concurrency: CLI flags > `[pipeline]` section > defaults
    pub fn resolve(
        cli_api_key: Option<&str>,
        cli_model: Option<&str>,
        cli_image_concurrency: Option<usize>,
    ) -> Result<Self> {
        let file_config = load_config().ok();

        let api_key = if let Some(key) = cli_api_key {
            key.to_string()
        } else if let Ok(key) = std::env::var("MATERIO_API_KEY") {
            key
        } else if let Some(ref cfg) = file_config {
            cfg.api.key.clone()
        } else {
            bail!(
                "API key not found; set MATERIO_API_KEY or run `materio init` to create a config file"
            );
        };

        let base_url = if let Ok(url) = std::env::var("MATERIO_BASE_URL") {
            url
        } else if let Some(url) = file_config.as_ref().and_then(|c| c.api.base_url.clone()) {
            url
        } else {
            DEFAULT_BASE_URL.to_string()
        };

        let defaults = PipelineConfig::default();
        let pipeline = PipelineConfig {
            text_model: cli_model
                .map(str::to_string)
                .or_else(|| {
                    file_config
                        .as_ref()
                        .and_then(|c| c.pipeline.text_model.clone())
                })
                .unwrap_or(defaults.text_model),
            image_concurrency: cli_image_concurrency
                .or_else(|| {
                    file_config
                        .as_ref()
                        .and_then(|c| c.pipeline.image_concurrency)
                })
                .unwrap_or(defaults.image_concurrency),
        };

        Ok(Self {
            api_key,
            base_url,
            pipeline,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
