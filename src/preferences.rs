// Preferences collaborator: where the scoring client reads its settings.
//
// The client never caches settings. It asks a PreferenceSource for a fresh
// snapshot when a call starts (ApiConfig) and again when a verdict is
// produced (filtering degree). Last writer wins; no call holds a lock
// across the network round trip.

use std::sync::{PoisonError, RwLock};

use crate::config::Config;
use crate::scoring::{ApiConfig, Locale};

/// Read-only view of the user's scoring settings.
pub trait PreferenceSource: Send + Sync {
    /// Threshold for `score <= threshold` filtering.
    fn filtering_degree(&self) -> f32;

    /// Endpoint, key, model, prompt, temperature and locale for one call.
    fn api_config(&self) -> ApiConfig;

    /// Locale used for probe text when testing explicit settings.
    fn locale(&self) -> Locale {
        self.api_config().locale
    }
}

/// In-memory settings store shared between the client and whoever edits it.
#[derive(Debug, Default)]
pub struct SharedPreferences {
    inner: RwLock<Config>,
}

impl SharedPreferences {
    pub fn new(config: Config) -> Self {
        Self {
            inner: RwLock::new(config),
        }
    }

    /// Point-in-time copy of every setting.
    pub fn snapshot(&self) -> Config {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply an edit atomically with respect to readers.
    pub fn update(&self, edit: impl FnOnce(&mut Config)) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        edit(&mut guard);
    }

    pub fn set_filtering_degree(&self, degree: f32) {
        self.update(|c| c.filtering_degree = degree);
    }

    pub fn set_temperature(&self, temperature: f32) {
        self.update(|c| c.temperature = temperature);
    }

    pub fn set_api_url(&self, url: impl Into<String>) {
        let url = url.into();
        self.update(|c| c.api_url = url);
    }

    pub fn set_api_key(&self, key: impl Into<String>) {
        let key = key.into();
        self.update(|c| c.api_key = key);
    }

    pub fn set_model_name(&self, model: impl Into<String>) {
        let model = model.into();
        self.update(|c| c.model_name = model);
    }

    pub fn set_model_prompt(&self, prompt: impl Into<String>) {
        let prompt = prompt.into();
        self.update(|c| c.model_prompt = prompt);
    }
}

impl PreferenceSource for SharedPreferences {
    fn filtering_degree(&self) -> f32 {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .filtering_degree
    }

    fn api_config(&self) -> ApiConfig {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .api_config()
    }

    fn locale(&self) -> Locale {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .locale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_are_visible_to_next_read() {
        let prefs = SharedPreferences::new(Config::default());
        assert_eq!(prefs.filtering_degree(), 5.0);

        prefs.set_filtering_degree(7.5);
        prefs.set_api_url("https://api.example.com/v1");
        prefs.set_model_name("m");
        prefs.set_model_prompt("custom");
        prefs.set_api_key("k");
        prefs.set_temperature(0.1);

        assert_eq!(prefs.filtering_degree(), 7.5);
        let api = prefs.api_config();
        assert_eq!(api.endpoint_url, "https://api.example.com/v1");
        assert_eq!(api.model_name, "m");
        assert_eq!(api.system_prompt, "custom");
        assert_eq!(api.api_key, "k");
        assert_eq!(api.temperature, 0.1);
    }

    #[test]
    fn snapshot_is_detached_from_later_edits() {
        let prefs = SharedPreferences::new(Config::default());
        let before = prefs.snapshot();
        prefs.set_filtering_degree(9.0);
        assert_eq!(before.filtering_degree, 5.0);
        assert_eq!(prefs.snapshot().filtering_degree, 9.0);
    }

    #[test]
    fn locale_comes_from_config() {
        let prefs = SharedPreferences::new(Config {
            locale: Locale::En,
            ..Config::default()
        });
        assert_eq!(prefs.locale(), Locale::En);
    }
}
