//! Publish flow
//!
//! The complete pipeline for getting one finished exam out the door:
//! serialize → store the document → append the log row. Steps run inline
//! and in order; the first failure aborts the rest and surfaces to the
//! operator, and nothing already done is rolled back.

use anyhow::Result;
use tracing::info;

use crate::clients::{DriveClient, SheetsClient, StoredDocument};
use crate::config::Config;
use crate::models::exam::ExamDocument;
use crate::services::exam_assembler;
use crate::workflow::exam_ctx::ExamCtx;

/// Where a published exam ended up
#[derive(Debug)]
pub struct PublishOutcome {
    pub file_id: String,
    pub link: Option<String>,
}

/// Publish flow
///
/// Responsibilities:
/// - serialize one document and hand it to the document store
/// - append the metadata log row
/// - no retries, no partial persistence bookkeeping
pub struct PublishFlow {
    drive: DriveClient,
    sheets: SheetsClient,
}

impl PublishFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            drive: DriveClient::new(config),
            sheets: SheetsClient::new(config),
        }
    }

    /// Publish one document under the given filename
    pub async fn run(
        &self,
        document: &ExamDocument,
        filename: &str,
        ctx: &ExamCtx,
    ) -> Result<PublishOutcome> {
        let json = exam_assembler::serialize(document)?;

        info!("{} 📤 storing {} ...", ctx, filename);
        let stored: StoredDocument = self.drive.store(&json, filename).await?;
        info!("{} ✓ stored with id {}", ctx, stored.id);

        info!("{} 📤 appending metadata log row...", ctx);
        self.sheets.append_exam_log(document).await?;
        info!("{} ✓ metadata logged", ctx);

        Ok(PublishOutcome {
            file_id: stored.id,
            link: stored.link,
        })
    }
}
