//! # API crate: remote catalog client and fullstack server functions
//!
//! Everything the product console says to the outside world goes through here.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`cache`] | none | Tag-invalidated cache of query responses |
//! | [`client`] | none | Bearer-authenticated HTTP client for the remote product API |
//! | [`error`] | none | [`ApiError`] and the `ApiResult` alias |
//! | [`media`] | none | Upload signing and the direct-to-media-host upload |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated with
//! `#[post(...)]` and compiled twice: once with full server logic (behind
//! `#[cfg(feature = "server")]`) and once as a thin client stub that forwards the
//! call over HTTP.
//!
//! - **Uploads**: `sign_upload`

use dioxus::prelude::*;

pub mod cache;
pub mod client;
pub mod error;
pub mod media;

pub use cache::{QueryCache, Tag};
pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use media::{MediaConfig, MediaUploader, SignedUpload, UploadFile};

/// Sign an upload of the current moment into `folder` with the media host secret.
#[cfg(feature = "server")]
#[post("/api/cloudinary/sign")]
pub async fn sign_upload(folder: Option<String>) -> Result<SignedUpload, ServerFnError> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let config = MediaConfig::from_env().map_err(|e| {
        tracing::error!("{e}");
        ServerFnError::new(e)
    })?;

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| ServerFnError::new(e.to_string()))?
        .as_secs();

    Ok(config.sign(timestamp, folder.as_deref()))
}

#[cfg(not(feature = "server"))]
#[post("/api/cloudinary/sign")]
pub async fn sign_upload(folder: Option<String>) -> Result<SignedUpload, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Ask the app server for an upload ticket, mapping failures into [`ApiError`].
pub async fn request_signature(folder: Option<String>) -> ApiResult<SignedUpload> {
    sign_upload(folder)
        .await
        .map_err(|e| ApiError::Sign(e.to_string()))
}
