use super::apple_container::DEFAULT_BINARY;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "boxdeck.toml";
pub const DEFAULT_LOG_FILTER: &str = "info";

const DEFAULT_CONFIG_TOML: &str = r#"[runtime]
# Program used for every runtime command line
binary = "container"

[log]
# Overridden by RUST_LOG when set
filter = "info"
"#;

#[derive(Deserialize, Debug, Default)]
pub struct RuntimeConfig {
    pub binary: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct LogConfig {
    pub filter: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    pub fn binary(&self) -> &str {
        self.runtime.binary.as_deref().unwrap_or(DEFAULT_BINARY)
    }

    pub fn log_filter(&self) -> &str {
        self.log.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

pub fn default_config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".config/boxdeck")
}

pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

pub fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    fs::create_dir_all(config_dir).with_context(|| format!("creating {:?}", config_dir))
}

/// Loads `boxdeck.toml` from `config_dir`. A missing file yields defaults.
pub fn load_app_config(config_dir: &Path) -> Result<AppConfig> {
    let path = config_path(config_dir);

    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path).with_context(|| format!("reading {:?}", path))?;
    parse_app_config(&content, &path)
}

fn parse_app_config(content: &str, path: &Path) -> Result<AppConfig> {
    let mut config: AppConfig =
        toml::from_str(content).with_context(|| format!("parsing {:?}", path))?;

    if let Some(binary) = config.runtime.binary.take() {
        if binary.trim().is_empty() {
            bail!("{:?}: runtime.binary must not be empty", path);
        }
        config.runtime.binary = Some(shellexpand::tilde(binary.trim()).into_owned());
    }

    Ok(config)
}

/// Writes the default config file unless one already exists. Returns
/// whether a file was written.
pub fn install_default_config(config_dir: &Path) -> Result<bool> {
    ensure_config_dir(config_dir)?;

    let target = config_path(config_dir);
    if target.exists() {
        return Ok(false);
    }

    fs::write(&target, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("writing default config to {:?}", target))?;
    Ok(true)
}
