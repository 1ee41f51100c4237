// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

pub const APP_NAME: &str = "stockpile";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: Api::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Api {
    pub base_url: Option<String>,
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("STOCKPILE_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set STOCKPILE_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.validate(path)?;
            return Ok(config);
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put settings under [api] and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let base_url = self.api_base_url();
        let parsed = Url::parse(&base_url).with_context(|| {
            format!(
                "api.base_url {base_url:?} in {} is not a valid URL",
                path.display()
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "api.base_url in {} must be an http(s) URL, got {base_url:?}",
                path.display()
            );
        }

        if let Some(timeout) = &self.api.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "api.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        EnvFilter::try_new(self.log_level()).with_context(|| {
            format!(
                "log.level {:?} in {} is not a valid filter (try info or debug)",
                self.log_level(),
                path.display()
            )
        })?;

        Ok(())
    }

    /// Config file value, then `STOCKPILE_API_URL`, then the default.
    pub fn api_base_url(&self) -> String {
        let raw = match &self.api.base_url {
            Some(url) => url.clone(),
            None => env::var("STOCKPILE_API_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned()),
        };
        raw.trim().trim_end_matches('/').to_owned()
    }

    /// `None` leaves the transport default in place.
    pub fn api_timeout(&self) -> Result<Option<Duration>> {
        self.api.timeout.as_deref().map(parse_duration).transpose()
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Config file value, then `STOCKPILE_LOG`. Logging is off otherwise.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log
            .file
            .clone()
            .or_else(|| env::var("STOCKPILE_LOG").ok())
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# stockpile config\n# Place this file at: {}\n\nversion = 1\n\n[api]\n# Root of the inventory service; requests go to <base_url>/inventoryapi\nbase_url = \"{}\"\n# Optional. Unset uses the HTTP client's default.\n# timeout = \"10s\"\n\n[log]\nlevel = \"{}\"\n# Optional. Logging is disabled unless a file is set (or STOCKPILE_LOG).\n# file = \"/tmp/stockpile.log\"\n",
            path.display(),
            DEFAULT_API_BASE_URL,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("timeout {raw:?} is too large; use a smaller [api].timeout"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 5s)")
}
