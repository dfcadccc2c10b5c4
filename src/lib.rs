//! # MEDQUEST Admin
//!
//! Internal tool for building, repairing, and publishing multiple-choice
//! exam documents.
//!
//! ## Architecture
//!
//! The crate is layered strictly; each layer only calls downward:
//!
//! ### ① Clients
//! - `clients/` - thin wrappers over the external collaborators
//! - `CloudinaryClient` - image bytes in, hosted URL out
//! - `DriveClient` / `SheetsClient` - document store and metadata log
//!
//! ### ② Services
//! - `services/` - one capability each, no flow ordering
//! - `id_generator` - deterministic unique ids from metadata
//! - `metadata_normalizer` - taxonomy validation with observable fallbacks
//! - `option_parser` / `question_editor` - the question-list invariants
//! - `exam_assembler` - canonical JSON shape and the import path
//! - `OcrService` - page images to untrusted question drafts
//!
//! ### ③ Workflow
//! - `workflow/` - the editing session over one document
//! - `EditorSession` - all mutable state of an editing interaction
//! - `PublishFlow` - serialize → store → log, in order, no retries
//!
//! ### ④ Orchestration
//! - `orchestrator/batch_processor` - scans a folder, drives the batch
//! - `orchestrator/exam_processor` - repairs and re-exports one file
//!
//! ## Modules

pub mod clients;
pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// re-exports of the common types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::exam::ExamDocument;
pub use models::question::{OptionLetter, QuestionRecord};
pub use orchestrator::App;
pub use services::OcrService;
pub use workflow::{EditorSession, ExamCtx, PublishFlow};
