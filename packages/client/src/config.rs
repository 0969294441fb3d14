//! # Client configuration — `academy.toml`
//!
//! Connection settings for the hosted backend, read from a TOML file (or
//! compiled-in defaults when no file ships with the build).
//!
//! ```toml
//! [backend]
//! url = "https://project.example.co"
//! anon_key = "public-anon-key"
//!
//! [storage]
//! bucket = "course-files"
//! ```
//!
//! All structs derive `Default` so a missing or empty file is equivalent to
//! the local-development configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `academy.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AcademyConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Hosted-backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the hosted backend project.
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Public (anonymous) API key sent with every request.
    #[serde(default)]
    pub anon_key: String,
}

fn default_backend_url() -> String {
    "http://localhost:54321".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            anon_key: String::new(),
        }
    }
}

/// Object storage settings. A single bucket holds all course files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

fn default_bucket() -> String {
    "course-files".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
        }
    }
}

impl AcademyConfig {
    /// Create a config pointing at the given backend.
    pub fn new(url: String, anon_key: String) -> Self {
        Self {
            backend: BackendConfig { url, anon_key },
            storage: StorageConfig::default(),
        }
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "academy.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_equals_defaults() {
        let config = AcademyConfig::from_toml("").unwrap();
        assert_eq!(config, AcademyConfig::default());
        assert_eq!(config.storage.bucket, "course-files");
        assert_eq!(config.backend.url, "http://localhost:54321");
    }

    #[test]
    fn toml_roundtrip() {
        let config = AcademyConfig::new(
            "https://academy.example.co".to_string(),
            "anon-key".to_string(),
        );
        let text = config.to_toml().unwrap();
        let loaded = AcademyConfig::from_toml(&text).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = AcademyConfig::from_toml("[backend]\nurl = \"https://x.co\"\n").unwrap();
        assert_eq!(config.backend.url, "https://x.co");
        assert_eq!(config.backend.anon_key, "");
        assert_eq!(config.storage.bucket, "course-files");
    }
}
