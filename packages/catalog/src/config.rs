//! # Client configuration: `catalog.toml`
//!
//! Settings for the catalog client, read from a TOML file
//! (filename: [`CatalogConfig::filename`] = `"catalog.toml"`).
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "https://api.bitechx.com"
//! cache_ttl_secs = 60    # how long API responses are reused
//!
//! [list]
//! page_size = 12
//! page_size_options = [6, 12, 24]
//! search_debounce_ms = 300
//!
//! [upload]
//! folder = "products"     # optional media-host folder
//! upload_base_url = "https://api.cloudinary.com/v1_1"
//! ```
//!
//! Every section and field has a default, so a missing or empty file is
//! equivalent to [`CatalogConfig::default`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::list::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use crate::search::SEARCH_DEBOUNCE_MS;

pub const DEFAULT_API_BASE_URL: &str = "https://api.bitechx.com";
pub const DEFAULT_UPLOAD_BASE_URL: &str = "https://api.cloudinary.com/v1_1";
/// Seconds a cached API response stays usable.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Remote catalog API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl ApiConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Product list behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<u32>,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_page_size_options() -> Vec<u32> {
    PAGE_SIZE_OPTIONS.to_vec()
}

fn default_search_debounce_ms() -> u64 {
    SEARCH_DEBOUNCE_MS
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_size_options: default_page_size_options(),
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

/// Media host uploads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Folder passed to the signing endpoint. `None` uploads to the root.
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default = "default_upload_base_url")]
    pub upload_base_url: String,
}

fn default_upload_base_url() -> String {
    DEFAULT_UPLOAD_BASE_URL.to_string()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            folder: None,
            upload_base_url: default_upload_base_url(),
        }
    }
}

impl CatalogConfig {
    /// Builder method to point the client at another API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "catalog.toml"
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
    fn test_empty_file_is_default() {
        let config = CatalogConfig::from_toml("").unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api.cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.list.page_size, 12);
        assert_eq!(config.list.page_size_options, vec![6, 12, 24]);
        assert_eq!(config.list.search_debounce_ms, 300);
        assert!(config.upload.folder.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config = CatalogConfig::from_toml(
            r#"
            [api]
            cache_ttl_secs = 5

            [list]
            page_size = 24

            [upload]
            folder = "shoes"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.cache_ttl_secs, 5);
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.list.page_size, 24);
        assert_eq!(config.list.search_debounce_ms, 300);
        assert_eq!(config.upload.folder.as_deref(), Some("shoes"));
        assert_eq!(config.upload.upload_base_url, DEFAULT_UPLOAD_BASE_URL);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CatalogConfig::default().with_base_url("http://localhost:9000");
        let text = config.to_toml().unwrap();
        assert_eq!(CatalogConfig::from_toml(&text).unwrap(), config);
    }
}
