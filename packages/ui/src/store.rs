//! Platform-appropriate session persistence and configuration.
//!
//! - **Web** (WASM + `web` feature): `localStorage` via [`catalog::LocalStorageStore`]
//! - **Native**: JSON files under `<data_dir>/product-console/` via [`catalog::FileStore`]

use catalog::{CatalogConfig, KeyValueStore, SessionPersistence};

const APP_DIR: &str = "product-console";

/// Create the session persistence layer for the current platform.
pub fn make_session_store() -> SessionPersistence<impl KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        SessionPersistence::new(catalog::LocalStorageStore::new())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join(APP_DIR);
        SessionPersistence::new(catalog::FileStore::new(base))
    }
}

/// Load `catalog.toml` from the working directory, falling back to defaults.
///
/// The browser has no file system, so wasm builds always use the defaults.
pub fn load_config() -> CatalogConfig {
    #[cfg(target_arch = "wasm32")]
    {
        CatalogConfig::default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let path = std::path::Path::new(CatalogConfig::filename());
        match std::fs::read_to_string(path) {
            Ok(text) => CatalogConfig::from_toml(&text).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid {}: {e}", path.display());
                CatalogConfig::default()
            }),
            Err(_) => CatalogConfig::default(),
        }
    }
}
