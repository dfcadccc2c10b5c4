use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Multiple-choice option slot, at most five per question
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
    E,
}

impl OptionLetter {
    /// All slots in display order
    pub const ALL: [OptionLetter; 5] = [
        OptionLetter::A,
        OptionLetter::B,
        OptionLetter::C,
        OptionLetter::D,
        OptionLetter::E,
    ];

    /// Maximum number of options per question
    pub const MAX_OPTIONS: usize = 5;

    /// Slot for a 0-based line index (0 → A … 4 → E)
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Slot for an (already uppercased) letter
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(OptionLetter::A),
            'B' => Some(OptionLetter::B),
            'C' => Some(OptionLetter::C),
            'D' => Some(OptionLetter::D),
            'E' => Some(OptionLetter::E),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            OptionLetter::A => 'A',
            OptionLetter::B => 'B',
            OptionLetter::C => 'C',
            OptionLetter::D => 'D',
            OptionLetter::E => 'E',
        }
    }
}

impl std::fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Worked explanation attached to a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One multiple-choice question of an exam document
///
/// Invariant: every letter in `correct_answers` is a key of `options`, and
/// `is_answered` is true exactly when `correct_answers` is non-empty. Both
/// are restored by [`QuestionRecord::repair_answer_consistency`] after any
/// options change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub options: BTreeMap<OptionLetter, String>,
    #[serde(default)]
    pub correct_answers: Vec<OptionLetter>,
    #[serde(rename = "isAnswered", default)]
    pub is_answered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Explanation>,
}

impl QuestionRecord {
    /// Blank record used to pad a question list up to its target count
    pub fn blank() -> Self {
        Self {
            question: String::new(),
            options: BTreeMap::new(),
            correct_answers: Vec::new(),
            is_answered: false,
            image_url: None,
            explanation: None,
        }
    }

    /// Drop correct-answer letters that no longer name an option, then
    /// recompute the answered flag
    pub fn repair_answer_consistency(&mut self) {
        let mut seen = Vec::with_capacity(self.correct_answers.len());
        self.correct_answers.retain(|letter| {
            let keep = self.options.contains_key(letter) && !seen.contains(letter);
            if keep {
                seen.push(*letter);
            }
            keep
        });
        self.is_answered = !self.correct_answers.is_empty();
    }
}

impl Default for QuestionRecord {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_record_is_unanswered() {
        let record = QuestionRecord::blank();
        assert!(record.question.is_empty());
        assert!(record.options.is_empty());
        assert!(record.correct_answers.is_empty());
        assert!(!record.is_answered);
    }

    #[test]
    fn repair_drops_letters_without_options() {
        let mut record = QuestionRecord::blank();
        record.options.insert(OptionLetter::A, "foo".to_string());
        record.correct_answers = vec![OptionLetter::A, OptionLetter::C];
        record.is_answered = true;

        record.repair_answer_consistency();
        assert_eq!(record.correct_answers, vec![OptionLetter::A]);
        assert!(record.is_answered);

        record.options.clear();
        record.repair_answer_consistency();
        assert!(record.correct_answers.is_empty());
        assert!(!record.is_answered);
    }

    #[test]
    fn options_serialize_in_letter_order() {
        let mut record = QuestionRecord::blank();
        record.options.insert(OptionLetter::C, "third".to_string());
        record.options.insert(OptionLetter::A, "first".to_string());
        record.options.insert(OptionLetter::B, "second".to_string());

        let json = serde_json::to_string(&record).unwrap();
        let a = json.find("\"A\"").unwrap();
        let b = json.find("\"B\"").unwrap();
        let c = json.find("\"C\"").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn answered_flag_uses_contract_key() {
        let record = QuestionRecord::blank();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"isAnswered\":false"));
        assert!(!json.contains("image_url"), "absent image must be omitted");
    }
}
