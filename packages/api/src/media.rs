//! # Image upload bridge
//!
//! Turns a local file into a hosted image URL in three steps:
//!
//! 1. [`crate::sign_upload`] asks the app server to sign `{timestamp, folder?}`
//!    with the media host's secret ([`sign_params`]). The secret never leaves
//!    the server.
//! 2. [`MediaUploader::upload`] posts the file with the signed fields straight
//!    to the media host (`<upload_base_url>/<cloud_name>/auto/upload`).
//! 3. The response's `secure_url` (or `url`) becomes the image address.
//!
//! Uploads of a batch run one after another; see [`MediaUploader::upload_all`].

use catalog::config::UploadConfig;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::error::{ApiError, ApiResult};

/// Signed upload ticket returned by the signing endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUpload {
    pub signature: String,
    pub timestamp: u64,
    pub api_key: String,
    pub cloud_name: String,
    pub folder: Option<String>,
}

/// Compute the media host signature: `sha1_hex("k=v&k=v" + secret)` with keys
/// sorted. `folder` is included only when non-empty.
pub fn sign_params(timestamp: u64, folder: Option<&str>, secret: &str) -> String {
    let mut params: Vec<(&str, String)> = vec![("timestamp", timestamp.to_string())];
    if let Some(folder) = folder.filter(|f| !f.is_empty()) {
        params.push(("folder", folder.to_string()));
    }
    params.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Credentials of the media host account, read on the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaConfig {
    pub api_key: String,
    pub api_secret: String,
    pub cloud_name: String,
}

impl MediaConfig {
    /// Read `CLOUDINARY_API_KEY`, `CLOUDINARY_API_SECRET` and
    /// `CLOUDINARY_CLOUD_NAME`. Empty values count as missing.
    #[cfg(feature = "server")]
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        match (
            get("CLOUDINARY_API_KEY"),
            get("CLOUDINARY_API_SECRET"),
            get("CLOUDINARY_CLOUD_NAME"),
        ) {
            (Some(api_key), Some(api_secret), Some(cloud_name)) => Ok(Self {
                api_key,
                api_secret,
                cloud_name,
            }),
            _ => Err(MISSING_CONFIG.to_string()),
        }
    }

    /// Sign an upload of the current moment.
    pub fn sign(&self, timestamp: u64, folder: Option<&str>) -> SignedUpload {
        let folder = folder.filter(|f| !f.is_empty()).map(str::to_string);
        SignedUpload {
            signature: sign_params(timestamp, folder.as_deref(), &self.api_secret),
            timestamp,
            api_key: self.api_key.clone(),
            cloud_name: self.cloud_name.clone(),
            folder,
        }
    }
}

pub const MISSING_CONFIG: &str = "Missing Cloudinary environment variables";

/// A file picked by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    secure_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl UploadResponse {
    fn into_url(self) -> ApiResult<String> {
        self.secure_url
            .filter(|u| !u.is_empty())
            .or(self.url.filter(|u| !u.is_empty()))
            .ok_or(ApiError::MissingUrl)
    }
}

#[derive(Clone, Debug)]
pub struct MediaUploader {
    http: reqwest::Client,
    upload_base_url: String,
}

impl MediaUploader {
    pub fn new(upload_base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            upload_base_url: upload_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(config.upload_base_url.clone())
    }

    pub fn endpoint(&self, cloud_name: &str) -> String {
        format!("{}/{cloud_name}/auto/upload", self.upload_base_url)
    }

    /// Upload one file with a signed ticket and return its hosted URL.
    pub async fn upload(&self, ticket: &SignedUpload, file: UploadFile) -> ApiResult<String> {
        let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.name.clone());
        if let Some(mime) = &file.mime {
            part = part
                .mime_str(mime)
                .map_err(|e| ApiError::Upload(e.to_string()))?;
        }
        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("api_key", ticket.api_key.clone())
            .text("timestamp", ticket.timestamp.to_string())
            .text("signature", ticket.signature.clone());
        if let Some(folder) = ticket.folder.as_ref().filter(|f| !f.is_empty()) {
            form = form.text("folder", folder.clone());
        }

        let response = self
            .http
            .post(self.endpoint(&ticket.cloud_name))
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Upload of {} rejected with {status}", file.name);
            return Err(ApiError::Upload(format!("{status}: {body}")));
        }
        let body: UploadResponse = serde_json::from_str(&response.text().await?)?;
        let url = body.into_url()?;
        tracing::info!("Uploaded {} to {url}", file.name);
        Ok(url)
    }

    /// Upload `files` one at a time, signing each. `on_done` sees every result
    /// in order as it completes; a failed file does not stop the batch.
    pub async fn upload_all<S, Fut>(
        &self,
        files: Vec<UploadFile>,
        sign: S,
        mut on_done: impl FnMut(ApiResult<String>),
    ) where
        S: Fn() -> Fut,
        Fut: std::future::Future<Output = ApiResult<SignedUpload>>,
    {
        for file in files {
            let result = match sign().await {
                Ok(ticket) => self.upload(&ticket, file).await,
                Err(e) => Err(e),
            };
            on_done(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Multipart;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    fn sha1_hex(s: &str) -> String {
        let mut hasher = Sha1::new();
        hasher.update(s.as_bytes());
        hex::encode(hasher.finalize())
    }

    #[test]
    fn test_signature_with_folder() {
        assert_eq!(
            sign_params(1000, Some("shoes"), "S"),
            sha1_hex("folder=shoes&timestamp=1000S")
        );
    }

    #[test]
    fn test_signature_without_folder() {
        assert_eq!(sign_params(1000, None, "S"), sha1_hex("timestamp=1000S"));
        assert_eq!(sign_params(1000, Some(""), "S"), sha1_hex("timestamp=1000S"));
    }

    #[test]
    fn test_config_requires_all_values() {
        let env: HashMap<&str, &str> = [
            ("CLOUDINARY_API_KEY", "key"),
            ("CLOUDINARY_API_SECRET", "S"),
            ("CLOUDINARY_CLOUD_NAME", "demo"),
        ]
        .into_iter()
        .collect();
        let config = MediaConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        let ticket = config.sign(1000, Some("shoes"));
        assert_eq!(ticket.signature, sha1_hex("folder=shoes&timestamp=1000S"));
        assert_eq!(ticket.cloud_name, "demo");
        assert_eq!(ticket.folder.as_deref(), Some("shoes"));
        assert_eq!(config.sign(1000, Some("")).folder, None);

        let err = MediaConfig::from_lookup(|k| {
            (k != "CLOUDINARY_API_SECRET").then(|| "x".to_string())
        })
        .unwrap_err();
        assert_eq!(err, MISSING_CONFIG);
    }

    #[test]
    fn test_ticket_wire_format() {
        let ticket = SignedUpload {
            signature: "sig".to_string(),
            timestamp: 1000,
            api_key: "key".to_string(),
            cloud_name: "demo".to_string(),
            folder: None,
        };
        let value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(value["apiKey"], "key");
        assert_eq!(value["cloudName"], "demo");
        assert!(value["folder"].is_null());
    }

    #[test]
    fn test_response_url_fallback() {
        let secure = UploadResponse {
            secure_url: Some("https://a".into()),
            url: Some("http://a".into()),
        };
        assert_eq!(secure.into_url().unwrap(), "https://a");
        let plain = UploadResponse {
            secure_url: None,
            url: Some("http://a".into()),
        };
        assert_eq!(plain.into_url().unwrap(), "http://a");
        let none = UploadResponse {
            secure_url: None,
            url: None,
        };
        assert!(matches!(none.into_url(), Err(ApiError::MissingUrl)));
    }

    async fn spawn_host() -> String {
        async fn upload(mut multipart: Multipart) -> Result<Json<serde_json::Value>, StatusCode> {
            let mut fields = HashMap::new();
            while let Some(field) = multipart.next_field().await.map_err(|_| StatusCode::BAD_REQUEST)? {
                let name = field.name().unwrap_or_default().to_string();
                let file_name = field.file_name().map(str::to_string);
                let text = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                fields.insert(name, file_name.unwrap_or(text));
            }
            if fields.get("signature").map(String::as_str) != Some("sig") {
                return Err(StatusCode::UNAUTHORIZED);
            }
            let file = fields.get("file").cloned().unwrap_or_default();
            let folder = fields.get("folder").cloned().unwrap_or_default();
            Ok(Json(json!({ "secure_url": format!("https://cdn.example/{folder}/{file}") })))
        }

        let router = Router::new().route("/demo/auto/upload", post(upload));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn ticket(signature: &str) -> SignedUpload {
        SignedUpload {
            signature: signature.to_string(),
            timestamp: 1000,
            api_key: "key".to_string(),
            cloud_name: "demo".to_string(),
            folder: Some("shoes".to_string()),
        }
    }

    fn file(name: &str) -> UploadFile {
        UploadFile {
            name: name.to_string(),
            mime: Some("image/png".to_string()),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[tokio::test]
    async fn test_upload_returns_hosted_url() {
        let uploader = MediaUploader::new(spawn_host().await);
        let url = uploader.upload(&ticket("sig"), file("a.png")).await.unwrap();
        assert_eq!(url, "https://cdn.example/shoes/a.png");

        let err = uploader.upload(&ticket("bad"), file("a.png")).await.unwrap_err();
        assert!(matches!(err, ApiError::Upload(_)));
    }

    #[tokio::test]
    async fn test_failed_file_does_not_stop_batch() {
        let uploader = MediaUploader::new(spawn_host().await);
        let calls = std::cell::Cell::new(0);
        let mut results = Vec::new();
        uploader
            .upload_all(
                vec![file("1.png"), file("2.png"), file("3.png")],
                || {
                    calls.set(calls.get() + 1);
                    let n = calls.get();
                    async move {
                        if n == 2 {
                            Err(ApiError::Sign("signing endpoint down".to_string()))
                        } else {
                            Ok(ticket("sig"))
                        }
                    }
                },
                |result| results.push(result),
            )
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), "https://cdn.example/shoes/1.png");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap(), "https://cdn.example/shoes/3.png");
    }
}
