//! Secrets and connection settings for the grade sheets.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Secrets the dashboard needs at runtime.
///
/// Stored either in environment variables (see [`Secrets::from_env`]) or as
/// a plain JSON object on disk:
/// ```json
/// {
///   "password": "hunter2",
///   "private_sheet_url": "https://docs.google.com/spreadsheets/d/abc/edit",
///   "demo_sheet_url": "https://docs.google.com/spreadsheets/d/def/edit",
///   "access_token": null,
///   "api_key": null,
///   "cache_ttl_secs": 600
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    /// Password unlocking the private sheet. Without one nobody can log in.
    #[serde(default)]
    pub password: Option<String>,
    pub private_sheet_url: Option<String>,
    pub demo_sheet_url: Option<String>,
    /// OAuth access token sent as `Authorization: Bearer`.
    #[serde(default)]
    pub access_token: Option<String>,
    /// API key appended as the `key` query parameter.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub cache_ttl_secs: Option<u64>,
}

impl Secrets {
    /// Loads secrets from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read secrets file '{path}'"))?;
        serde_json::from_str(&content).with_context(|| format!("invalid secrets file '{path}'"))
    }

    /// Reads secrets from `CLA_*` environment variables. All are optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let cache_ttl_secs = lookup("CLA_CACHE_TTL_SECS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("CLA_CACHE_TTL_SECS must be a number of seconds")?;

        Ok(Self {
            password: lookup("CLA_PASSWORD"),
            private_sheet_url: lookup("CLA_PRIVATE_SHEET_URL"),
            demo_sheet_url: lookup("CLA_DEMO_SHEET_URL"),
            access_token: lookup("CLA_SHEET_ACCESS_TOKEN"),
            api_key: lookup("CLA_SHEET_API_KEY"),
            cache_ttl_secs,
        })
    }

    /// How long fetched records may be reused, if caching is enabled.
    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
