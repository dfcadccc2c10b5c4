pub mod json_loader;
pub mod toml_loader;

pub use json_loader::{load_all_exam_files, load_exam_file, LoadedExam};
pub use toml_loader::{
    load_curriculum, load_curriculum_or_default, load_schools, load_schools_or_default,
};
