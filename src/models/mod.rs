pub mod exam;
pub mod loaders;
pub mod metadata;
pub mod question;
pub mod taxonomy;

pub use exam::{ExamContent, ExamDocument};
pub use loaders::{load_all_exam_files, load_exam_file, LoadedExam};
pub use metadata::{ExamMetadata, ExamMonth, ExamYear, UNKNOWN_TOKEN};
pub use question::{Explanation, OptionLetter, QuestionRecord};
pub use taxonomy::{Curriculum, SchoolDirectory, Semester, SubjectYear};
