use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Path prefix the resource routes are nested under.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(4),
            api_prefix: default_api_prefix(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// Start with the sample businesses when no snapshot exists.
    #[serde(default = "default_seed")]
    pub seed: bool,
    /// JSON snapshot file; in-memory only when absent.
    #[serde(default)]
    pub data_file: Option<String>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self { seed: default_seed(), data_file: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 5001 }
fn default_api_prefix() -> String { "/api/v1.0".into() }
fn default_seed() -> bool { true }
fn default_log_format() -> String { "compact".into() }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Read `config.toml` when present, otherwise start from defaults; then
    /// apply environment overrides and validate. A file that exists but fails
    /// to parse is an error.
    pub fn load_or_env() -> Result<Self> {
        Self::load_with(&config_path(), |key| std::env::var(key).ok())
    }

    fn load_with<F>(path: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = if std::path::Path::new(path).exists() {
            load_from_file(path).map_err(|e| anyhow!("{path}: {e}"))?
        } else {
            AppConfig::default()
        };
        cfg.apply_env(lookup);
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Environment variables win over file values.
    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(prefix) = lookup("API_PREFIX") {
            self.server.api_prefix = prefix;
        }
        if let Some(seed) = lookup("DIRECTORY_SEED").and_then(|v| v.parse::<bool>().ok()) {
            self.directory.seed = seed;
        }
        if let Some(file) = lookup("DIRECTORY_DATA_FILE") {
            self.directory.data_file = Some(file);
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.directory.normalize();
        self.logging.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        self.api_prefix = normalize_prefix(&self.api_prefix)?;
        Ok(())
    }
}

/// `""` and `"/"` mount at the root; anything else must be an absolute path
/// without a trailing slash.
fn normalize_prefix(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if !trimmed.starts_with('/') {
        return Err(anyhow!("server.api_prefix must start with '/': {raw}"));
    }
    Ok(trimmed.to_string())
}

impl DirectoryConfig {
    fn normalize(&mut self) {
        if self.data_file.as_deref().is_some_and(|f| f.trim().is_empty()) {
            self.data_file = None;
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        match self.format.to_ascii_lowercase().as_str() {
            "compact" | "json" => Ok(()),
            other => Err(anyhow!("logging.format must be compact or json, got {other}")),
        }
    }
}
