//! Google Sheets tabular log client
//!
//! One capability: append a row of field values to the metadata log sheet.

use anyhow::Result;
use serde_json::json;
use tracing::{debug, warn};

use crate::clients::google_auth::GoogleAuth;
use crate::config::Config;
use crate::error::AppError;
use crate::models::exam::ExamDocument;

const SERVICE: &str = "sheets";
const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const RANGE: &str = "Metadata!A1:K";

/// Sheets client
pub struct SheetsClient {
    auth: GoogleAuth,
    spreadsheet_id: String,
    http: reqwest::Client,
}

impl SheetsClient {
    pub fn new(config: &Config) -> Self {
        Self {
            auth: GoogleAuth::new(config),
            spreadsheet_id: config.spreadsheet_id.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// Append one row of values to the metadata log
    pub async fn append_row(&self, values: Vec<String>) -> Result<()> {
        let token = self
            .auth
            .access_token(SCOPE)
            .await
            .map_err(|e| AppError::collaborator_request_failed(SERVICE, e))?;

        let endpoint = format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{}:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            self.spreadsheet_id, RANGE
        );

        debug!("appending {}-cell row to {}", values.len(), RANGE);

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(token)
            .json(&json!({ "values": [values] }))
            .send()
            .await
            .map_err(|e| {
                warn!("log append request failed: {}", e);
                AppError::collaborator_request_failed(SERVICE, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.ok();
            return Err(
                AppError::collaborator_bad_response(SERVICE, Some(status.as_u16()), message).into(),
            );
        }

        Ok(())
    }

    /// Append the standard log row for a published exam
    pub async fn append_exam_log(&self, document: &ExamDocument) -> Result<()> {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.append_row(build_row(document, &timestamp)).await
    }
}

/// Row layout of the metadata log: timestamp, id, metadata fields, question
/// count — columns A through J
pub fn build_row(document: &ExamDocument, timestamp: &str) -> Vec<String> {
    let metadata = &document.metadata;
    vec![
        timestamp.to_string(),
        metadata.unique_id.clone(),
        metadata.school.clone(),
        metadata.exam_year.to_string(),
        metadata.exam_month.to_string(),
        metadata.exam_variable.to_string(),
        metadata.subject_year.to_string(),
        metadata.semester.to_string(),
        metadata.topic.clone(),
        document.question_count().to_string(),
    ]
}
