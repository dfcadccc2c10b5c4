//! Orchestration layer
//!
//! Batch scheduling and statistics only; no business decisions live here.
//!
//! - `batch_processor` owns the application lifecycle and walks the input
//!   folder, one exam at a time
//! - `exam_processor` takes a single exam file through the repair pipeline

pub mod batch_processor;
pub mod exam_processor;

pub use batch_processor::App;
pub use exam_processor::{process_exam, ExamStats};
