//! Exam processing context
//!
//! Captures "which exam file is being worked on" for log labelling.

use std::fmt::Display;

/// Exam processing context
#[derive(Debug, Clone)]
pub struct ExamCtx {
    /// Source file name
    pub file_name: String,

    /// Position in the batch (1-based, log display only)
    pub exam_index: usize,
}

impl ExamCtx {
    pub fn new(file_name: String, exam_index: usize) -> Self {
        Self {
            file_name,
            exam_index,
        }
    }
}

impl Display for ExamCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[exam {} #{}]", self.file_name, self.exam_index)
    }
}
