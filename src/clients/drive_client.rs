//! Google Drive document store client
//!
//! One capability: store a serialized exam document under a filename in the
//! configured folder and return where it landed.

use anyhow::Result;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::clients::google_auth::GoogleAuth;
use crate::config::Config;
use crate::error::AppError;

const SERVICE: &str = "drive";
const SCOPE: &str = "https://www.googleapis.com/auth/drive";
const UPLOAD_URL: &str =
    "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart&fields=id,webViewLink";

/// Where a stored document ended up
#[derive(Debug, Clone, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    #[serde(rename = "webViewLink", default)]
    pub link: Option<String>,
}

/// Drive client
pub struct DriveClient {
    auth: GoogleAuth,
    folder_id: String,
    http: reqwest::Client,
}

impl DriveClient {
    pub fn new(config: &Config) -> Self {
        Self {
            auth: GoogleAuth::new(config),
            folder_id: config.drive_folder_id.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// Store a JSON document under the given filename
    pub async fn store(&self, json_data: &str, filename: &str) -> Result<StoredDocument> {
        let token = self
            .auth
            .access_token(SCOPE)
            .await
            .map_err(|e| AppError::collaborator_request_failed(SERVICE, e))?;

        let file_metadata = json!({
            "name": filename,
            "parents": [self.folder_id],
        });

        // Drive's multipart upload wants multipart/related, which reqwest's
        // form support does not produce; the body is assembled by hand.
        let boundary = "medquest_admin_boundary";
        let body = format!(
            "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{meta}\r\n--{b}\r\nContent-Type: application/json\r\n\r\n{data}\r\n--{b}--",
            b = boundary,
            meta = file_metadata,
            data = json_data,
        );

        debug!("storing {} ({} bytes)", filename, json_data.len());

        let response = self
            .http
            .post(UPLOAD_URL)
            .bearer_auth(token)
            .header(
                "Content-Type",
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!("document store request failed: {}", e);
                AppError::collaborator_request_failed(SERVICE, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.ok();
            return Err(
                AppError::collaborator_bad_response(SERVICE, Some(status.as_u16()), message).into(),
            );
        }

        let stored: StoredDocument = response
            .json()
            .await
            .map_err(|e| AppError::collaborator_request_failed(SERVICE, e))?;

        debug!("stored as Drive file {}", stored.id);
        Ok(stored)
    }
}
