//! Unique identifier generation
//!
//! The identifier doubles as display label and default export filename, so
//! it must be deterministic and contain no spaces. Underscores already
//! present in source fields are tolerated, not escaped, which makes
//! "New York" / "New_York" collisions a documented edge case.

use phf::phf_map;

use crate::error::TaxonomyError;
use crate::models::metadata::{ExamMetadata, ExamMonth, ExamYear};
use crate::models::taxonomy::{Semester, SubjectYear};

/// Fixed table of semester codes per subject year
static SEMESTER_MAP: phf::Map<&'static str, [&'static str; 2]> = phf_map! {
    "First Year" => ["S1", "S2"],
    "Second Year" => ["S3", "S4"],
    "Third Year" => ["S5", "S6"],
    "Fourth Year" => ["S7", "S8"],
    "Fifth Year" => ["S9", "S10"],
};

/// Semester code for a (subject year, semester) pair
///
/// Fails with [`TaxonomyError::InvalidTaxonomyKey`] when the pair is not in
/// the table; the caller must surface this, never guess a code.
pub fn semester_code(
    subject_year: SubjectYear,
    semester: Semester,
) -> Result<&'static str, TaxonomyError> {
    let codes = SEMESTER_MAP
        .get(subject_year.name())
        .ok_or_else(|| TaxonomyError::InvalidTaxonomyKey {
            subject_year: subject_year.name().to_string(),
            semester: semester.code().to_string(),
        })?;

    codes
        .iter()
        .copied()
        .find(|code| *code == semester.code())
        .ok_or_else(|| TaxonomyError::InvalidTaxonomyKey {
            subject_year: subject_year.name().to_string(),
            semester: semester.code().to_string(),
        })
}

/// Derive the stable unique id from exam metadata fields
///
/// Joins `semester_code, school, topic, year, month, variable` with
/// underscores, substituting `UNK` for unknown year/month, then replaces
/// every space with an underscore.
pub fn generate_unique_id(
    school: &str,
    subject_year: SubjectYear,
    semester: Semester,
    topic: &str,
    exam_year: ExamYear,
    exam_month: ExamMonth,
    exam_variable: u32,
) -> Result<String, TaxonomyError> {
    let code = semester_code(subject_year, semester)?;

    let id = format!(
        "{}_{}_{}_{}_{}_{}",
        code, school, topic, exam_year, exam_month, exam_variable
    )
    .replace(' ', "_");

    Ok(id)
}

/// Recompute the unique id for an already-populated metadata record
pub fn unique_id_for(metadata: &ExamMetadata) -> Result<String, TaxonomyError> {
    generate_unique_id(
        &metadata.school,
        metadata.subject_year,
        metadata.semester,
        &metadata.topic,
        metadata.exam_year,
        metadata.exam_month,
        metadata.exam_variable,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_deterministic_and_space_free() {
        for year in SubjectYear::all() {
            for semester in year.semesters() {
                let first = generate_unique_id(
                    "Sheikh Zayed",
                    year,
                    semester,
                    "Sante Publique",
                    ExamYear::Year(2024),
                    ExamMonth::May,
                    2,
                )
                .unwrap();
                let second = generate_unique_id(
                    "Sheikh Zayed",
                    year,
                    semester,
                    "Sante Publique",
                    ExamYear::Year(2024),
                    ExamMonth::May,
                    2,
                )
                .unwrap();
                assert_eq!(first, second);
                assert!(!first.contains(' '), "id contains a space: {}", first);
            }
        }
    }

    #[test]
    fn id_layout_matches_contract() {
        let id = generate_unique_id(
            "UIR",
            SubjectYear::First,
            Semester::S1,
            "Biochimie",
            ExamYear::Year(2024),
            ExamMonth::May,
            1,
        )
        .unwrap();
        assert_eq!(id, "S1_UIR_Biochimie_2024_May_1");
    }

    #[test]
    fn unknown_year_and_month_become_unk() {
        let id = generate_unique_id(
            "UIR",
            SubjectYear::Third,
            Semester::S6,
            "Radiologie",
            ExamYear::Unknown,
            ExamMonth::Unknown,
            3,
        )
        .unwrap();
        assert_eq!(id, "S6_UIR_Radiologie_UNK_UNK_3");
    }

    #[test]
    fn mismatched_semester_fails_with_invalid_taxonomy_key() {
        let err = generate_unique_id(
            "UIR",
            SubjectYear::First,
            Semester::S9,
            "Pediatrie",
            ExamYear::Year(2024),
            ExamMonth::May,
            1,
        )
        .unwrap_err();
        assert!(matches!(err, TaxonomyError::InvalidTaxonomyKey { .. }));
    }

    #[test]
    fn spaces_in_source_fields_collapse_to_underscores() {
        let id = generate_unique_id(
            "Sheikh Zayed Casablanca",
            SubjectYear::First,
            Semester::S1,
            "Communication et Langue",
            ExamYear::Unknown,
            ExamMonth::January,
            1,
        )
        .unwrap();
        assert_eq!(
            id,
            "S1_Sheikh_Zayed_Casablanca_Communication_et_Langue_UNK_January_1"
        );
    }
}
