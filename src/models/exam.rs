use serde::{Deserialize, Serialize};

use crate::models::metadata::ExamMetadata;
use crate::models::question::QuestionRecord;

/// Question list of an exam document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamContent {
    pub questions: Vec<QuestionRecord>,
}

/// The persisted unit: metadata plus an ordered question list
///
/// Struct field order is the serialized key order — `metadata` always
/// precedes `content` in exported JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamDocument {
    pub metadata: ExamMetadata,
    pub content: ExamContent,
}

impl ExamDocument {
    pub fn new(metadata: ExamMetadata) -> Self {
        Self {
            metadata,
            content: ExamContent {
                questions: Vec::new(),
            },
        }
    }

    pub fn question_count(&self) -> usize {
        self.content.questions.len()
    }

    /// Default export filename for a freshly created exam
    pub fn export_filename(&self) -> String {
        format!("{}.json", self.metadata.unique_id)
    }
}
