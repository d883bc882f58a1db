// src/config.rs
//
// Backend connection settings
//
// PRINCIPLES:
// - Explicit: nothing connects until a validated config exists
// - File first, environment overrides
// - The API key never appears in Debug output

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

pub const URL_ENV: &str = "SUPABASE_URL";
pub const API_KEY_ENV: &str = "SUPABASE_ANON_KEY";
pub const IMAGE_BUCKET_ENV: &str = "CHURCH_API_IMAGE_BUCKET";
pub const TIMEOUT_ENV: &str = "CHURCH_API_TIMEOUT_SECS";

pub const DEFAULT_IMAGE_BUCKET: &str = "images";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`
    pub url: String,
    pub api_key: String,
    #[serde(default = "default_image_bucket")]
    pub image_bucket: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Config file contents; every field may be overridden by the environment
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    url: Option<String>,
    api_key: Option<String>,
    image_bucket: Option<String>,
    request_timeout_secs: Option<u64>,
}

fn default_image_bucket() -> String {
    DEFAULT_IMAGE_BUCKET.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> AppResult<Self> {
        let config = Self {
            url: url.into().trim().trim_end_matches('/').to_string(),
            api_key: api_key.into().trim().to_string(),
            image_bucket: default_image_bucket(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_image_bucket(mut self, bucket: impl Into<String>) -> AppResult<Self> {
        self.image_bucket = bucket.into();
        self.validate()?;
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> AppResult<Self> {
        self.request_timeout_secs = secs;
        self.validate()?;
        Ok(self)
    }

    /// Read `SUPABASE_URL`, `SUPABASE_ANON_KEY` and the optional overrides
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::merge(ConfigFile::default(), lookup)
    }

    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> AppResult<Self> {
        let path = get_config_path()?;
        Self::load_from(&path, |key| std::env::var(key).ok())
    }

    /// Load from an explicit file path; a missing file is not an error
    pub fn load_from<F>(path: &Path, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str(&raw).map_err(|e| {
                AppError::Config(format!("Invalid config file {}: {}", path.display(), e))
            })?
        } else {
            ConfigFile::default()
        };

        Self::merge(file, lookup)
    }

    fn merge<F>(file: ConfigFile, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let url = non_empty(URL_ENV)
            .or(file.url)
            .ok_or_else(|| AppError::Config(format!("{} is not set", URL_ENV)))?;
        let api_key = non_empty(API_KEY_ENV)
            .or(file.api_key)
            .ok_or_else(|| AppError::Config(format!("{} is not set", API_KEY_ENV)))?;

        let mut config = Self::new(url, api_key)?;

        if let Some(bucket) = non_empty(IMAGE_BUCKET_ENV).or(file.image_bucket) {
            config = config.with_image_bucket(bucket)?;
        }

        let timeout = match non_empty(TIMEOUT_ENV) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                AppError::Config(format!("{} must be a number of seconds: {}", TIMEOUT_ENV, e))
            })?),
            None => file.request_timeout_secs,
        };
        if let Some(secs) = timeout {
            config = config.with_timeout_secs(secs)?;
        }

        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        let url = Url::parse(&self.url)
            .map_err(|e| AppError::Config(format!("Invalid backend URL '{}': {}", self.url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "Backend URL must be http(s), got '{}'",
                url.scheme()
            )));
        }
        if self.api_key.is_empty() {
            return Err(AppError::Config("API key cannot be empty".to_string()));
        }
        if self.image_bucket.is_empty() || self.image_bucket.contains('/') {
            return Err(AppError::Config(format!(
                "Invalid image bucket '{}'",
                self.image_bucket
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::Config("Request timeout must be positive".to_string()));
        }
        Ok(())
    }

    /// Base URL of the table API
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url)
    }

    /// Base URL of the object store API
    pub fn storage_url(&self) -> String {
        format!("{}/storage/v1", self.url)
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("image_bucket", &self.image_bucket)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Get the config file path
///
/// Path structure: {CONFIG_DIR}/church-api/backend.json
pub fn get_config_path() -> AppResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| AppError::Config("Could not determine config directory".to_string()))?;

    Ok(config_dir.join("church-api").join("backend.json"))
}
