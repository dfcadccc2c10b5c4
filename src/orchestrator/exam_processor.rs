//! Single exam processor
//!
//! Takes one loaded exam file through the repair pipeline: re-normalize the
//! metadata, restore the question invariants, re-export the corrected file,
//! and optionally publish it. Partially applied repairs stay applied — if
//! publishing fails after the corrected file was written, the file remains.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::loaders::LoadedExam;
use crate::models::taxonomy::{Curriculum, SchoolDirectory};
use crate::services::exam_assembler;
use crate::utils::logging::truncate_text;
use crate::workflow::{EditorSession, ExamCtx, PublishFlow};

/// What happened to one exam file
#[derive(Debug, Default)]
pub struct ExamStats {
    pub questions: usize,
    pub warnings: usize,
    pub repaired: usize,
    pub published: bool,
}

/// Process one exam file end to end
pub async fn process_exam(
    loaded: LoadedExam,
    ctx: &ExamCtx,
    curriculum: &Curriculum,
    schools: &SchoolDirectory,
    config: &Config,
    publish_flow: Option<&PublishFlow>,
) -> Result<ExamStats> {
    info!(
        "{} 📝 {} question(s), id: {}",
        ctx,
        loaded.document.question_count(),
        truncate_text(&loaded.document.metadata.unique_id, 60)
    );

    // Entering the session re-normalizes the metadata and logs every
    // fallback it had to take.
    let mut session = EditorSession::from_document(
        curriculum.clone(),
        schools.clone(),
        config.exam_variable_max,
        loaded.document,
    )?;

    let warnings = session.last_warnings().len();
    if warnings > 0 {
        warn!("{} ⚠️ {} metadata field(s) normalized", ctx, warnings);
    }

    let repaired = session.repair_questions()?;
    if repaired > 0 {
        warn!("{} ⚠️ {} question(s) repaired", ctx, repaired);
    }

    let (json, _) = session.finalize()?;
    let document = session
        .document()
        .ok_or_else(|| anyhow::anyhow!("session lost its document"))?;

    let export_name = exam_assembler::corrected_filename(&loaded.file_name);
    let export_path = Path::new(&config.export_folder).join(&export_name);
    fs::write(&export_path, &json)
        .await
        .with_context(|| format!("failed to write {}", export_path.display()))?;
    info!("{} ✓ exported {}", ctx, export_name);

    let mut stats = ExamStats {
        questions: document.question_count(),
        warnings,
        repaired,
        published: false,
    };

    if let Some(flow) = publish_flow {
        let outcome = flow.run(document, &export_name, ctx).await?;
        if let Some(link) = &outcome.link {
            info!("{} ✓ published: {}", ctx, link);
        }
        stats.published = true;
    }

    Ok(stats)
}
