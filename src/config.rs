use std::env;
use std::time::Duration;

use crate::error::{CatalogError, Result};

pub const API_BASE: &str = "https://api.pokemontcg.io/v2";

/// Largest page the upstream search endpoints accept.
pub const PAGE_SIZE: usize = 250;

pub const DEFAULT_CACHE_HOURS: i64 = 24;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

pub const ENV_API_KEY: &str = "POKEMON_TCG_API_KEY";
pub const ENV_API_URL: &str = "POKEMON_TCG_API_URL";
pub const ENV_CACHE_HOURS: &str = "CATALOG_CACHE_HOURS";
pub const ENV_TIMEOUT_SECS: &str = "CATALOG_HTTP_TIMEOUT_SECS";

pub fn default_freshness_window() -> chrono::Duration {
    chrono::Duration::hours(DEFAULT_CACHE_HOURS)
}

/// Credentials and tunables for talking to the catalog.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub freshness_window: chrono::Duration,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: API_BASE.to_string(),
            freshness_window: default_freshness_window(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Settings {
    /// Read settings from the process environment, falling back to defaults
    /// for anything unset. An empty API key counts as unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but with a caller-supplied lookup,
    /// so tests don't have to touch the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        settings.api_key = lookup(ENV_API_KEY)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if let Some(url) = lookup(ENV_API_URL) {
            settings.base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(hours) = lookup(ENV_CACHE_HOURS) {
            let hours: i64 = hours.trim().parse().map_err(|_| {
                CatalogError::Config(format!("{ENV_CACHE_HOURS} must be a whole number, got '{hours}'"))
            })?;
            if hours < 0 {
                return Err(CatalogError::Config(format!(
                    "{ENV_CACHE_HOURS} must not be negative"
                )));
            }
            settings.freshness_window = chrono::Duration::hours(hours);
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                CatalogError::Config(format!("{ENV_TIMEOUT_SECS} must be a whole number, got '{secs}'"))
            })?;
            settings.timeout = Duration::from_secs(secs);
        }

        Ok(settings)
    }
}
