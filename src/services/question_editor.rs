//! Question record editing
//!
//! Keeps the question-list invariants intact across edits: the list length
//! tracks the requested count, correct answers always name existing options,
//! and the answered flag mirrors the answer set.

use std::collections::BTreeMap;

use anyhow::Result;
use tracing::debug;

use crate::clients::CloudinaryClient;
use crate::models::question::{OptionLetter, QuestionRecord};

/// Resize the question list to the target count
///
/// Pads with blank records while too short, truncates from the end while too
/// long. Surviving records are never reordered or otherwise touched.
pub fn resize_questions(questions: &mut Vec<QuestionRecord>, target_count: usize) {
    while questions.len() < target_count {
        questions.push(QuestionRecord::blank());
    }
    questions.truncate(target_count);
}

/// Set the correct answers of a record from quick input like "ABC"
///
/// Input is uppercased and filtered to letters that currently name an
/// option; everything else is dropped silently. Duplicates keep their first
/// occurrence, and the answered flag is recomputed.
pub fn set_correct_answers(record: &mut QuestionRecord, input_letters: &str) {
    let mut answers: Vec<OptionLetter> = Vec::new();

    for c in input_letters.to_uppercase().chars() {
        if let Some(letter) = OptionLetter::from_char(c) {
            if record.options.contains_key(&letter) && !answers.contains(&letter) {
                answers.push(letter);
            }
        }
    }

    record.correct_answers = answers;
    record.is_answered = !record.correct_answers.is_empty();
}

/// Install a re-parsed option map on a record
///
/// Correct-answer letters whose option disappeared are dropped and the
/// answered flag recomputed.
pub fn apply_options(record: &mut QuestionRecord, options: BTreeMap<OptionLetter, String>) {
    record.options = options;
    record.repair_answer_consistency();
}

/// Upload an image and attach the returned URL to the record
///
/// Delegates to the image store; a failed upload propagates to the caller
/// unretried and the record keeps its previous URL.
pub async fn attach_image(
    record: &mut QuestionRecord,
    image_bytes: Vec<u8>,
    uploader: &CloudinaryClient,
) -> Result<()> {
    debug!("uploading question image, {} bytes", image_bytes.len());
    let url = uploader.upload(image_bytes).await?;
    record.image_url = Some(url);
    Ok(())
}

/// Detach the question image, if any
pub fn remove_image(record: &mut QuestionRecord) {
    record.image_url = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::option_parser::parse_options;

    #[test]
    fn resizing_an_empty_list_pads_with_blanks() {
        let mut questions = Vec::new();
        resize_questions(&mut questions, 3);
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|q| !q.is_answered));
        assert!(questions.iter().all(|q| q.options.is_empty()));
    }

    #[test]
    fn shrinking_truncates_from_the_end_and_preserves_survivors() {
        let mut questions: Vec<QuestionRecord> = (0..5)
            .map(|i| {
                let mut q = QuestionRecord::blank();
                q.question = format!("question {}", i);
                q
            })
            .collect();

        resize_questions(&mut questions, 2);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "question 0");
        assert_eq!(questions[1].question, "question 1");
    }

    #[test]
    fn growing_again_keeps_existing_records_in_place() {
        let mut questions = vec![{
            let mut q = QuestionRecord::blank();
            q.question = "kept".to_string();
            q
        }];
        resize_questions(&mut questions, 4);
        assert_eq!(questions.len(), 4);
        assert_eq!(questions[0].question, "kept");
        assert!(questions[3].question.is_empty());
    }

    #[test]
    fn correct_answers_filter_to_existing_options() {
        let mut record = QuestionRecord::blank();
        apply_options(&mut record, parse_options("x\ny"));

        set_correct_answers(&mut record, "ABZ");
        assert_eq!(
            record.correct_answers,
            vec![OptionLetter::A, OptionLetter::B]
        );
        assert!(record.is_answered);
    }

    #[test]
    fn correct_answers_input_is_case_insensitive_and_deduplicated() {
        let mut record = QuestionRecord::blank();
        apply_options(&mut record, parse_options("x\ny\nz"));

        set_correct_answers(&mut record, "cab a");
        assert_eq!(
            record.correct_answers,
            vec![OptionLetter::C, OptionLetter::A, OptionLetter::B]
        );
    }

    #[test]
    fn empty_answer_input_clears_the_flag() {
        let mut record = QuestionRecord::blank();
        apply_options(&mut record, parse_options("x\ny"));
        set_correct_answers(&mut record, "A");
        assert!(record.is_answered);

        set_correct_answers(&mut record, "");
        assert!(record.correct_answers.is_empty());
        assert!(!record.is_answered);
    }

    #[test]
    fn reparsing_options_drops_stale_answers() {
        let mut record = QuestionRecord::blank();
        apply_options(&mut record, parse_options("one\ntwo\nthree"));
        set_correct_answers(&mut record, "C");
        assert!(record.is_answered);

        // The operator rewrites the options down to two lines; C is gone.
        apply_options(&mut record, parse_options("one\ntwo"));
        assert!(record.correct_answers.is_empty());
        assert!(!record.is_answered);
    }

    #[test]
    fn remove_image_clears_the_url() {
        let mut record = QuestionRecord::blank();
        record.image_url = Some("https://res.cloudinary.com/demo/x.png".to_string());
        remove_image(&mut record);
        assert_eq!(record.image_url, None);
    }
}
