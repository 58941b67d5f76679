use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::scoring::traits::DEFAULT_TEMPERATURE;
use crate::scoring::{ApiConfig, Locale};

/// Threshold used when none is configured.
pub const DEFAULT_FILTERING_DEGREE: f32 = 5.0;

/// User-facing scoring settings.
///
/// Loaded from environment variables (a .env file is read at startup via
/// dotenvy). At runtime the values live in a SharedPreferences store and are
/// read back fresh for every call.
#[derive(Clone, PartialEq)]
pub struct Config {
    /// Chat-completion endpoint; `/chat/completions` is appended if missing
    pub api_url: String,
    pub api_key: String,
    pub model_name: String,
    /// Custom system prompt. Empty means the locale default.
    pub model_prompt: String,
    pub temperature: f32,
    /// Notifications scoring at or below this are filtered
    pub filtering_degree: f32,
    pub locale: Locale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            model_name: String::new(),
            model_prompt: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            filtering_degree: DEFAULT_FILTERING_DEGREE,
            locale: Locale::default(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api", &self.api_config())
            .field("filtering_degree", &self.filtering_degree)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional. Numbers that fail to parse are errors
    /// rather than silently falling back to the default.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            api_url: env::var("NOTISCORE_API_URL").unwrap_or_default(),
            api_key: env::var("NOTISCORE_API_KEY").unwrap_or_default(),
            model_name: env::var("NOTISCORE_MODEL").unwrap_or_default(),
            model_prompt: env::var("NOTISCORE_PROMPT").unwrap_or_default(),
            temperature: parse_var("NOTISCORE_TEMPERATURE")?.unwrap_or(defaults.temperature),
            filtering_degree: parse_var("NOTISCORE_FILTERING_DEGREE")?
                .unwrap_or(defaults.filtering_degree),
            locale: parse_var("NOTISCORE_LOCALE")?.unwrap_or(defaults.locale),
        })
    }

    /// The per-call API configuration these settings describe.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(&self.api_url, &self.api_key, &self.model_name)
            .with_system_prompt(&self.model_prompt)
            .with_temperature(self.temperature)
            .with_locale(self.locale)
    }

    /// Check that an endpoint and model are configured.
    /// The key may be empty: local gateways often don't need one.
    pub fn require_api(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            anyhow::bail!(
                "NOTISCORE_API_URL not set. Add it to your .env file,\n\
                 e.g. NOTISCORE_API_URL=https://api.openai.com/v1"
            );
        }
        if self.model_name.trim().is_empty() {
            anyhow::bail!(
                "NOTISCORE_MODEL not set. Add it to your .env file,\n\
                 e.g. NOTISCORE_MODEL=gpt-4o-mini"
            );
        }
        Ok(())
    }
}

/// Read and parse an optional environment variable.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Invalid value for {name}: {raw:?}")),
        _ => Ok(None),
    }
}
