//! Environment-driven application settings.

use std::path::PathBuf;

use crate::infrastructure::sources::{DEFAULT_DND5E_BASE_URL, DEFAULT_PATHFINDER_BASE_URL};

/// Runtime configuration, loaded from environment variables with defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    /// Debug mode: HTML page handlers reload translation catalogs on every
    /// request so catalog edits show up without a restart.
    pub debug: bool,
    pub host: String,
    pub port: u16,
    /// CORS origins; the single entry `*` allows any origin.
    pub allowed_origins: Vec<String>,
    pub default_language: String,
    pub supported_languages: Vec<String>,
    pub translations_dir: PathBuf,
    pub dnd5e_base_url: String,
    pub pathfinder_base_url: String,
    /// Timeout applied to every upstream reference-data request.
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "Roleplaying Characters Manager".to_string(),
            app_version: "1.0.0".to_string(),
            debug: true,
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:8000".to_string(),
            ],
            default_language: "es".to_string(),
            supported_languages: vec!["es".to_string(), "en".to_string()],
            translations_dir: default_translations_dir(),
            dnd5e_base_url: DEFAULT_DND5E_BASE_URL.to_string(),
            pathfinder_base_url: DEFAULT_PATHFINDER_BASE_URL.to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Settings {
    /// Load settings from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            app_name: env_or("APP_NAME", defaults.app_name),
            app_version: env_or("APP_VERSION", defaults.app_version),
            debug: std::env::var("DEBUG")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.debug),
            host: env_or("HOST", defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|v| split_csv(&v))
                .unwrap_or(defaults.allowed_origins),
            default_language: env_or("DEFAULT_LANGUAGE", defaults.default_language),
            supported_languages: std::env::var("SUPPORTED_LANGUAGES")
                .map(|v| split_csv(&v))
                .unwrap_or(defaults.supported_languages),
            translations_dir: std::env::var("TRANSLATIONS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.translations_dir),
            dnd5e_base_url: env_or("DND5E_API_BASE_URL", defaults.dnd5e_base_url),
            pathfinder_base_url: env_or("PATHFINDER_API_BASE_URL", defaults.pathfinder_base_url),
            request_timeout_secs: std::env::var("API_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Translations live at the repository root next to the crates.
fn default_translations_dir() -> PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("translations")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.app_name, "Roleplaying Characters Manager");
        assert_eq!(settings.default_language, "es");
        assert_eq!(settings.supported_languages, vec!["es", "en"]);
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.allowed_origins.len(), 2);
    }

    #[test]
    fn split_csv_trims_and_drops_empty_entries() {
        assert_eq!(
            split_csv("http://a.example, http://b.example ,"),
            vec!["http://a.example", "http://b.example"]
        );
    }
}
