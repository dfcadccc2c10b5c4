//! Exam document assembly and JSON import
//!
//! Owns the persisted shape: `metadata` first, then `content.questions`.
//! Pasted or OCR-produced question JSON is untrusted and goes through
//! [`merge_imported_questions`], which is partial-accepting: valid elements
//! are kept, invalid ones are skipped and counted, and only a non-array
//! top-level value rejects the import as a whole.

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::ImportError;
use crate::models::exam::{ExamContent, ExamDocument};
use crate::models::metadata::ExamMetadata;
use crate::models::question::{Explanation, OptionLetter, QuestionRecord};

/// Compose metadata and questions into a persistable document
pub fn assemble(metadata: ExamMetadata, questions: Vec<QuestionRecord>) -> ExamDocument {
    ExamDocument {
        metadata,
        content: ExamContent { questions },
    }
}

/// Serialize a document to its canonical pretty-printed JSON form
pub fn serialize(document: &ExamDocument) -> Result<String> {
    serde_json::to_string_pretty(document).context("failed to serialize exam document")
}

/// Parse a document from JSON
pub fn parse(json: &str) -> Result<ExamDocument> {
    serde_json::from_str(json).context("failed to parse exam document")
}

/// Export filename for a re-export of an edited document
pub fn updated_filename(original: &str) -> String {
    format!("updated_{}", original)
}

/// Export filename for a re-export of an answered/corrected document
pub fn corrected_filename(original: &str) -> String {
    format!("corrected_{}", original)
}

/// Outcome of a question import
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Number of elements merged into the list
    pub accepted: usize,
    /// 0-based indexes of elements skipped for missing/ill-typed keys
    pub skipped: Vec<usize>,
    /// Set when the import was rejected as a whole; the list is untouched
    pub rejected: Option<ImportError>,
}

impl ImportReport {
    pub fn is_rejected(&self) -> bool {
        self.rejected.is_some()
    }
}

/// Merge pasted question JSON into an existing question list
///
/// The top-level value must be an array of objects; anything else rejects
/// the whole import and leaves `existing` unchanged. Each element needs both
/// a `question` and an `options` key; missing `correct_answers` defaults to
/// empty and missing `isAnswered` to false, and answer letters are
/// re-filtered against the options that survived conversion.
pub fn merge_imported_questions(existing: &mut Vec<QuestionRecord>, json: &str) -> ImportReport {
    let mut report = ImportReport::default();

    let parsed: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => {
            warn!("question import is not valid JSON: {}", e);
            report.rejected = Some(ImportError::JsonParseFailed {
                source: Box::new(e),
            });
            return report;
        }
    };

    let elements = match parsed.as_array() {
        Some(elements) => elements,
        None => {
            warn!("question import rejected: top-level value is not an array");
            report.rejected = Some(ImportError::NotAnArray);
            return report;
        }
    };

    for (index, element) in elements.iter().enumerate() {
        match question_from_value(element) {
            Some(record) => {
                existing.push(record);
                report.accepted += 1;
            }
            None => {
                debug!("{}", ImportError::MissingRequiredKeys { index });
                report.skipped.push(index);
            }
        }
    }

    report
}

/// Convert one imported element into a question record
///
/// Returns `None` when the element is not an object with string `question`
/// and object `options` keys. Option keys outside `A..E` and non-string
/// option values are dropped rather than failing the element.
fn question_from_value(value: &Value) -> Option<QuestionRecord> {
    let object = value.as_object()?;
    let question = object.get("question")?.as_str()?.to_string();
    let raw_options = object.get("options")?.as_object()?;

    let mut options: BTreeMap<OptionLetter, String> = BTreeMap::new();
    for (key, text) in raw_options {
        let letter = match (key.len(), key.chars().next()) {
            (1, Some(c)) => OptionLetter::from_char(c),
            _ => None,
        };
        if let (Some(letter), Some(text)) = (letter, text.as_str()) {
            options.insert(letter, text.to_string());
        }
    }

    let correct_answers = object
        .get("correct_answers")
        .and_then(|v| v.as_array())
        .map(|letters| {
            letters
                .iter()
                .filter_map(|l| l.as_str())
                .filter_map(|l| match (l.len(), l.chars().next()) {
                    (1, Some(c)) => OptionLetter::from_char(c),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    let image_url = object
        .get("image_url")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    let explanation = object
        .get("explanation")
        .and_then(|v| serde_json::from_value::<Explanation>(v.clone()).ok());

    let mut record = QuestionRecord {
        question,
        options,
        correct_answers,
        is_answered: false,
        image_url,
        explanation,
    };
    record.repair_answer_consistency();

    Some(record)
}
