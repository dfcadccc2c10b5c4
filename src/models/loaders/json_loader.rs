use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::models::exam::ExamDocument;

/// An exam document together with the file it was loaded from
#[derive(Debug, Clone)]
pub struct LoadedExam {
    pub file_name: String,
    pub document: ExamDocument,
}

/// Load a single exam document from a JSON file
pub async fn load_exam_file(path: &Path) -> Result<ExamDocument> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read exam file: {}", path.display()))?;

    let document: ExamDocument = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse exam file: {}", path.display()))?;

    Ok(document)
}

/// Load every exam JSON file in a folder
///
/// Files that fail to parse are logged and skipped so one bad export does
/// not block the batch.
pub async fn load_all_exam_files(folder_path: &str) -> Result<Vec<LoadedExam>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("folder not found: {}", folder_path);
    }

    let mut exams = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("failed to read folder: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            let file_name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            tracing::info!("loading: {}", file_name);

            match load_exam_file(&path).await {
                Ok(document) => {
                    tracing::info!("loaded {} questions", document.question_count());
                    exams.push(LoadedExam {
                        file_name,
                        document,
                    });
                }
                Err(e) => {
                    tracing::warn!("failed to load {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(exams)
}
