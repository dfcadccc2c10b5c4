pub mod exam_assembler;
pub mod id_generator;
pub mod metadata_normalizer;
pub mod ocr_service;
pub mod option_parser;
pub mod question_editor;

pub use exam_assembler::ImportReport;
pub use id_generator::generate_unique_id;
pub use metadata_normalizer::{NormalizationWarning, RawMetadata};
pub use ocr_service::OcrService;
pub use option_parser::parse_options;
