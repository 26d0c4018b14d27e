//! Application configuration loading for CLI defaults.
//!
//! Precedence: CLI flag, then config file, then built-in default.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use image_fetcher_core::FetcherConfig;
use serde::Deserialize;

use crate::cli::Args;

/// TOML-backed file configuration for fetcher defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Default destination directory.
    pub output_dir: Option<PathBuf>,
    /// Size ceiling in megabytes.
    pub max_size_mb: Option<u64>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Delay between batch requests in milliseconds.
    pub delay_ms: Option<u64>,
    /// Whether to send a HEAD request before each download.
    pub probe_headers: Option<bool>,
}

impl FileConfig {
    /// Validates config values against the same ranges the CLI enforces.
    pub fn validate(&self) -> Result<()> {
        validate_range("max_size_mb", self.max_size_mb, 1, 1024)?;
        validate_range("timeout_secs", self.timeout_secs, 1, 300)?;
        validate_range("delay_ms", self.delay_ms, 0, 60_000)?;
        if let Some(dir) = &self.output_dir
            && dir.as_os_str().is_empty()
        {
            bail!("Invalid config value for `output_dir`: must not be empty");
        }
        Ok(())
    }
}

fn validate_range(field: &str, value: Option<u64>, min: u64, max: u64) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(min..=max).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: {min}..={max}");
    }
    Ok(())
}

/// Loaded config metadata.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// Config path that was consulted, if one could be determined.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/image-fetcher/config.toml`
/// 2. `$HOME/.config/image-fetcher/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("image-fetcher")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("image-fetcher")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads the explicit config file, or the default one if present.
///
/// A missing explicit file is an error; a missing default file is not.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load_file_config(path)?;
        return Ok(LoadedConfig {
            path: Some(path.to_path_buf()),
            config: Some(config),
        });
    }

    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.exists() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let config: FileConfig = toml::from_str(raw)?;
    config.validate()?;
    Ok(config)
}

/// Merges CLI flags over file values over built-in defaults.
#[must_use]
pub fn build_fetcher_config(args: &Args, file: Option<&FileConfig>) -> FetcherConfig {
    let file = file.cloned().unwrap_or_default();
    let mut config = FetcherConfig::default();

    if let Some(dir) = args.output_dir.clone().or(file.output_dir) {
        config.output_dir = dir;
    }
    if let Some(mb) = args.max_size_mb.or(file.max_size_mb) {
        config.policy.max_bytes = mb * 1024 * 1024;
    }
    if let Some(secs) = args.timeout_secs.or(file.timeout_secs) {
        config.policy.timeout = Duration::from_secs(secs);
    }
    if let Some(ms) = args.delay_ms.or(file.delay_ms) {
        config.request_delay = Duration::from_millis(ms);
    }
    config.probe_headers = !args.no_probe && file.probe_headers.unwrap_or(true);

    config
}
