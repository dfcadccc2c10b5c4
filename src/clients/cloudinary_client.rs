//! Cloudinary image store client
//!
//! One capability: push an image, get back its hosted URL. Uploads are
//! signed with the account secret; a failure propagates to the caller
//! unretried.

use anyhow::Result;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AppError;

const SERVICE: &str = "cloudinary";

/// Cloudinary client
pub struct CloudinaryClient {
    cloud_name: String,
    api_key: String,
    api_secret: String,
    http: reqwest::Client,
}

impl CloudinaryClient {
    pub fn new(config: &Config) -> Self {
        Self {
            cloud_name: config.cloudinary_cloud_name.clone(),
            api_key: config.cloudinary_api_key.clone(),
            api_secret: config.cloudinary_api_secret.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// Upload an image and return its hosted (secure) URL
    pub async fn upload(&self, image_bytes: Vec<u8>) -> Result<String> {
        let endpoint = format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        );

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&timestamp);

        debug!("uploading {} bytes to {}", image_bytes.len(), endpoint);

        let form = reqwest::multipart::Form::new()
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256".to_string())
            .part(
                "file",
                reqwest::multipart::Part::bytes(image_bytes).file_name("image.png"),
            );

        let response = self
            .http
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("image upload request failed: {}", e);
                AppError::collaborator_request_failed(SERVICE, e)
            })?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::collaborator_request_failed(SERVICE, e))?;

        if !status.is_success() {
            let message = body
                .pointer("/error/message")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string());
            return Err(
                AppError::collaborator_bad_response(SERVICE, Some(status.as_u16()), message).into(),
            );
        }

        let secure_url = body
            .get("secure_url")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                AppError::collaborator_bad_response(
                    SERVICE,
                    Some(status.as_u16()),
                    Some("response has no secure_url".to_string()),
                )
            })?;

        debug!("image hosted at {}", secure_url);
        Ok(secure_url.to_string())
    }

    /// Upload signature: SHA-256 over the sorted parameter string plus the
    /// account secret
    fn sign(&self, timestamp: &str) -> String {
        let to_sign = format!("timestamp={}{}", timestamp, self.api_secret);
        let digest = Sha256::digest(to_sign.as_bytes());
        hex::encode(digest)
    }
}
