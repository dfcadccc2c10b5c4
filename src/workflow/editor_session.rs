//! Editing session
//!
//! The one mutable object of an editing interaction. It owns the in-progress
//! document, the cursor over its questions, and the warnings from the last
//! normalization; every operation goes through it, there is no ambient
//! state. Created when the operator starts editing, dropped when they stop.
//!
//! Edits apply immediately and stay applied: there is no rollback, so a
//! question-list resize that happened before a later step failed remains in
//! effect, exactly as the operator saw it.

use anyhow::Result;

use crate::clients::CloudinaryClient;
use crate::models::exam::ExamDocument;
use crate::models::question::{Explanation, QuestionRecord};
use crate::models::taxonomy::{Curriculum, SchoolDirectory};
use crate::services::exam_assembler::{self, ImportReport};
use crate::services::metadata_normalizer::{self, NormalizationWarning, RawMetadata};
use crate::services::option_parser;
use crate::services::question_editor;

/// Editing session for one exam document
pub struct EditorSession {
    curriculum: Curriculum,
    schools: SchoolDirectory,
    exam_variable_max: u32,
    document: Option<ExamDocument>,
    current_question: usize,
    last_warnings: Vec<NormalizationWarning>,
}

impl EditorSession {
    /// Start an empty session
    pub fn new(curriculum: Curriculum, schools: SchoolDirectory, exam_variable_max: u32) -> Self {
        Self {
            curriculum,
            schools,
            exam_variable_max,
            document: None,
            current_question: 0,
            last_warnings: Vec::new(),
        }
    }

    /// Start a session over an existing document (the edit flow)
    ///
    /// The document's metadata is re-normalized on entry so a stale
    /// semester/topic from an old export is repaired and reported.
    pub fn from_document(
        curriculum: Curriculum,
        schools: SchoolDirectory,
        exam_variable_max: u32,
        document: ExamDocument,
    ) -> Result<Self> {
        let mut session = Self::new(curriculum, schools, exam_variable_max);
        let raw = RawMetadata::from(&document.metadata);
        session.document = Some(document);
        session.submit_metadata(&raw)?;
        Ok(session)
    }

    /// Submit or re-submit the metadata form
    ///
    /// Normalizes the raw fields, recomputes the unique id, and replaces the
    /// document's metadata. The question list is untouched, so this is also
    /// the explicit "edit metadata" action.
    pub fn submit_metadata(&mut self, raw: &RawMetadata) -> Result<()> {
        let (metadata, warnings) = metadata_normalizer::normalize(
            raw,
            &self.curriculum,
            &self.schools,
            self.exam_variable_max,
        )?;

        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        self.last_warnings = warnings;

        match &mut self.document {
            Some(document) => document.metadata = metadata,
            None => self.document = Some(ExamDocument::new(metadata)),
        }
        Ok(())
    }

    /// Warnings produced by the most recent metadata submission
    pub fn last_warnings(&self) -> &[NormalizationWarning] {
        &self.last_warnings
    }

    /// The in-progress document, if metadata has been submitted
    pub fn document(&self) -> Option<&ExamDocument> {
        self.document.as_ref()
    }

    /// Resize the question list, padding with blanks or truncating extras
    pub fn set_question_count(&mut self, target_count: usize) -> Result<()> {
        let document = self.document_mut()?;
        question_editor::resize_questions(&mut document.content.questions, target_count);
        let count = document.question_count();
        if self.current_question >= count {
            self.current_question = count.saturating_sub(1);
        }
        Ok(())
    }

    /// Replace a question's text
    pub fn update_question_text(&mut self, index: usize, text: &str) -> Result<()> {
        let record = self.question_mut(index)?;
        record.question = text.to_string();
        Ok(())
    }

    /// Re-parse a question's options from editor text
    ///
    /// Correct answers whose letter disappeared are dropped and the answered
    /// flag recomputed.
    pub fn update_options(&mut self, index: usize, raw_text: &str) -> Result<()> {
        let options = option_parser::parse_options(raw_text);
        let record = self.question_mut(index)?;
        question_editor::apply_options(record, options);
        Ok(())
    }

    /// Set a question's correct answers from quick input like "ABC"
    pub fn set_correct_answers(&mut self, index: usize, input_letters: &str) -> Result<()> {
        let record = self.question_mut(index)?;
        question_editor::set_correct_answers(record, input_letters);
        Ok(())
    }

    /// Upload and attach an image to a question
    pub async fn attach_image(
        &mut self,
        index: usize,
        image_bytes: Vec<u8>,
        uploader: &CloudinaryClient,
    ) -> Result<()> {
        let record = self.question_mut(index)?;
        question_editor::attach_image(record, image_bytes, uploader).await
    }

    /// Remove a question's image
    pub fn remove_image(&mut self, index: usize) -> Result<()> {
        let record = self.question_mut(index)?;
        question_editor::remove_image(record);
        Ok(())
    }

    /// Attach or replace a question's worked explanation
    pub fn set_explanation(
        &mut self,
        index: usize,
        text: &str,
        image_url: Option<String>,
    ) -> Result<()> {
        let record = self.question_mut(index)?;
        record.explanation = Some(Explanation {
            text: text.to_string(),
            image_url,
        });
        Ok(())
    }

    /// Re-establish the answer-consistency invariant on every question
    ///
    /// Used when a document arrives from outside the editor (a hand-edited
    /// or re-imported file). Returns how many records were changed.
    pub fn repair_questions(&mut self) -> Result<usize> {
        let document = self.document_mut()?;
        let mut repaired = 0;
        for record in &mut document.content.questions {
            let before = (record.correct_answers.clone(), record.is_answered);
            record.repair_answer_consistency();
            if before != (record.correct_answers.clone(), record.is_answered) {
                repaired += 1;
            }
        }
        Ok(repaired)
    }

    /// Merge pasted/OCR question JSON into the question list
    pub fn import_questions(&mut self, json: &str) -> Result<ImportReport> {
        let document = self.document_mut()?;
        let report = exam_assembler::merge_imported_questions(&mut document.content.questions, json);
        if let Some(rejection) = &report.rejected {
            tracing::warn!("import rejected: {}", rejection);
        } else {
            tracing::info!(
                "imported {} questions, skipped {}",
                report.accepted,
                report.skipped.len()
            );
        }
        Ok(report)
    }

    // ========== question navigation ==========

    /// Index of the question currently in front of the operator
    pub fn current_question(&self) -> usize {
        self.current_question
    }

    /// Jump to a question by index
    pub fn goto_question(&mut self, index: usize) -> Result<&QuestionRecord> {
        let count = self.document_ref()?.question_count();
        if index >= count {
            anyhow::bail!("question index {} out of range [0, {})", index, count);
        }
        self.current_question = index;
        Ok(&self.document_ref()?.content.questions[index])
    }

    /// Step to the next question, staying on the last one at the end
    pub fn next_question(&mut self) -> Result<&QuestionRecord> {
        let count = self.document_ref()?.question_count();
        let index = (self.current_question + 1).min(count.saturating_sub(1));
        self.goto_question(index)
    }

    /// Step to the previous question, staying on the first one at the start
    pub fn previous_question(&mut self) -> Result<&QuestionRecord> {
        let index = self.current_question.saturating_sub(1);
        self.goto_question(index)
    }

    /// Assemble the final document and its default export filename
    pub fn finalize(&self) -> Result<(String, String)> {
        let document = self.document_ref()?;
        let json = exam_assembler::serialize(document)?;
        Ok((json, document.export_filename()))
    }

    // ========== internals ==========

    fn document_ref(&self) -> Result<&ExamDocument> {
        self.document
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("metadata has not been submitted yet"))
    }

    fn document_mut(&mut self) -> Result<&mut ExamDocument> {
        self.document
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("metadata has not been submitted yet"))
    }

    fn question_mut(&mut self, index: usize) -> Result<&mut QuestionRecord> {
        let document = self.document_mut()?;
        let count = document.content.questions.len();
        document
            .content
            .questions
            .get_mut(index)
            .ok_or_else(|| anyhow::anyhow!("question index {} out of range [0, {})", index, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::metadata::{ExamMonth, ExamYear};
    use crate::models::taxonomy::{Semester, SubjectYear};
    use crate::services::exam_assembler;
    use crate::services::metadata_normalizer::NormalizationWarning;

    fn new_session() -> EditorSession {
        EditorSession::new(
            Curriculum::default_curriculum(),
            SchoolDirectory::default_directory(),
            10,
        )
    }

    fn submitted_session() -> EditorSession {
        let mut session = new_session();
        let raw = RawMetadata {
            school: Some("UIR".to_string()),
            exam_year: Some(ExamYear::Year(2024)),
            exam_month: Some(ExamMonth::May),
            exam_variable: Some(1),
            subject_year: Some(SubjectYear::First),
            semester: Some(Semester::S1),
            topic: Some("Biochimie".to_string()),
        };
        session.submit_metadata(&raw).unwrap();
        session
    }

    #[test]
    fn questions_require_submitted_metadata() {
        let mut session = new_session();
        assert!(session.set_question_count(5).is_err());
        assert!(session.finalize().is_err());
    }

    #[test]
    fn submit_then_edit_keeps_questions_and_updates_id() {
        let mut session = submitted_session();
        session.set_question_count(3).unwrap();
        session.update_question_text(0, "What is ATP?").unwrap();
        assert_eq!(
            session.document().unwrap().metadata.unique_id,
            "S1_UIR_Biochimie_2024_May_1"
        );

        // Explicit edit: new school, everything else unchanged.
        let mut raw = RawMetadata::from(&session.document().unwrap().metadata);
        raw.school = Some("Fes".to_string());
        session.submit_metadata(&raw).unwrap();

        let document = session.document().unwrap();
        assert_eq!(document.metadata.school, "Fes");
        assert_eq!(document.metadata.unique_id, "S1_Fes_Biochimie_2024_May_1");
        assert_eq!(document.question_count(), 3);
        assert_eq!(document.content.questions[0].question, "What is ATP?");
    }

    #[test]
    fn subject_year_change_cascades_through_the_session() {
        let mut session = submitted_session();

        let mut raw = RawMetadata::from(&session.document().unwrap().metadata);
        raw.subject_year = Some(SubjectYear::Fourth);
        session.submit_metadata(&raw).unwrap();

        let metadata = &session.document().unwrap().metadata;
        assert_eq!(metadata.semester, Semester::S7);
        assert_eq!(metadata.topic, "Pathologie Cardiovasculaire");
        assert!(session
            .last_warnings()
            .iter()
            .any(|w| matches!(w, NormalizationWarning::SemesterReset { .. })));
    }

    #[test]
    fn editing_flow_covers_options_and_answers() {
        let mut session = submitted_session();
        session.set_question_count(2).unwrap();

        session.update_question_text(0, "Pick one").unwrap();
        session.update_options(0, "alpha\nbeta\ngamma").unwrap();
        session.set_correct_answers(0, "cA").unwrap();

        let record = &session.document().unwrap().content.questions[0];
        assert_eq!(record.options.len(), 3);
        assert!(record.is_answered);

        // Shrinking the options invalidates the stale C answer.
        session.update_options(0, "alpha\nbeta").unwrap();
        let record = &session.document().unwrap().content.questions[0];
        assert_eq!(record.correct_answers.len(), 1);
        assert!(record.is_answered);
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut session = submitted_session();
        session.set_question_count(3).unwrap();

        assert_eq!(session.current_question(), 0);
        session.previous_question().unwrap();
        assert_eq!(session.current_question(), 0);

        session.next_question().unwrap();
        session.next_question().unwrap();
        session.next_question().unwrap();
        assert_eq!(session.current_question(), 2);

        assert!(session.goto_question(3).is_err());
    }

    #[test]
    fn import_merges_into_the_session_document() {
        let mut session = submitted_session();
        session.set_question_count(1).unwrap();

        let report = session
            .import_questions(
                r#"[{"question": "imported", "options": {"A": "x"}, "correct_answers": ["A"]}]"#,
            )
            .unwrap();
        assert_eq!(report.accepted, 1);
        assert_eq!(session.document().unwrap().question_count(), 2);

        let report = session.import_questions(r#"{"not": "an array"}"#).unwrap();
        assert!(report.is_rejected());
        assert_eq!(session.document().unwrap().question_count(), 2);
    }

    #[test]
    fn repair_questions_restores_the_answer_invariant() {
        let mut session = submitted_session();
        session.set_question_count(2).unwrap();
        session.update_options(0, "x\ny").unwrap();

        // Simulate a hand-edited import: an answer letter with no option and
        // a flag that lies.
        {
            let document = session.document_mut().unwrap();
            document.content.questions[0].correct_answers =
                vec![crate::models::question::OptionLetter::E];
            document.content.questions[0].is_answered = true;
        }

        let repaired = session.repair_questions().unwrap();
        assert_eq!(repaired, 1);
        let record = &session.document().unwrap().content.questions[0];
        assert!(record.correct_answers.is_empty());
        assert!(!record.is_answered);
    }

    #[test]
    fn finalize_round_trips_through_the_assembler() {
        let mut session = submitted_session();
        session.set_question_count(1).unwrap();
        session.update_options(0, "yes\nno").unwrap();
        session.set_correct_answers(0, "B").unwrap();

        let (json, filename) = session.finalize().unwrap();
        assert_eq!(filename, "S1_UIR_Biochimie_2024_May_1.json");

        let reparsed = exam_assembler::parse(&json).unwrap();
        assert_eq!(&reparsed, session.document().unwrap());
    }

    #[test]
    fn from_document_repairs_stale_metadata_on_entry() {
        let (json, _) = {
            let mut session = submitted_session();
            session.set_question_count(2).unwrap();
            session.finalize().unwrap()
        };

        // A hand-edited export with a semester that no longer matches.
        let tampered = json.replace("\"semester\": \"S1\"", "\"semester\": \"S5\"");
        let document = exam_assembler::parse(&tampered).unwrap();

        let session = EditorSession::from_document(
            Curriculum::default_curriculum(),
            SchoolDirectory::default_directory(),
            10,
            document,
        )
        .unwrap();

        let metadata = &session.document().unwrap().metadata;
        assert_eq!(metadata.semester, Semester::S1);
        assert!(!session.last_warnings().is_empty());
        assert_eq!(session.document().unwrap().question_count(), 2);
    }
}
