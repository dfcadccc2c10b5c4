//! Metadata normalization
//!
//! Every out-of-domain field falls back to the first legal option for that
//! field and emits a warning the caller can surface. Fallbacks never
//! escalate to a hard failure; only the id generator's taxonomy contract can
//! fail, and after normalization the (subject year, semester) pair is valid
//! by construction.

use anyhow::Result;
use serde::Deserialize;

use crate::models::metadata::{ExamMetadata, ExamMonth, ExamYear};
use crate::models::taxonomy::{Curriculum, SchoolDirectory, Semester, SubjectYear};
use crate::services::id_generator;

/// Unvalidated metadata as it arrives from a form or a pasted document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMetadata {
    pub school: Option<String>,
    pub exam_year: Option<ExamYear>,
    pub exam_month: Option<ExamMonth>,
    pub exam_variable: Option<u32>,
    pub subject_year: Option<SubjectYear>,
    pub semester: Option<Semester>,
    pub topic: Option<String>,
}

impl From<&ExamMetadata> for RawMetadata {
    fn from(metadata: &ExamMetadata) -> Self {
        Self {
            school: Some(metadata.school.clone()),
            exam_year: Some(metadata.exam_year),
            exam_month: Some(metadata.exam_month),
            exam_variable: Some(metadata.exam_variable),
            subject_year: Some(metadata.subject_year),
            semester: Some(metadata.semester),
            topic: Some(metadata.topic.clone()),
        }
    }
}

/// One recovered fallback, reported alongside the normalized metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationWarning {
    /// The school is not in the directory
    UnknownSchool { given: String, fallback: String },
    /// The exam year is outside the legal calendar range
    YearOutOfRange { given: u16 },
    /// The semester does not belong to the selected subject year
    SemesterReset {
        subject_year: SubjectYear,
        given: Semester,
        fallback: Semester,
    },
    /// The topic is not taught in the selected semester
    TopicReset {
        semester: Semester,
        given: String,
        fallback: String,
    },
    /// The exam variable was outside its configured bounds
    ExamVariableClamped { given: u32, clamped: u32 },
}

impl std::fmt::Display for NormalizationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizationWarning::UnknownSchool { given, fallback } => {
                write!(f, "school '{}' is not listed, using '{}'", given, fallback)
            }
            NormalizationWarning::YearOutOfRange { given } => {
                write!(f, "exam year {} is out of range, using UNK", given)
            }
            NormalizationWarning::SemesterReset {
                subject_year,
                given,
                fallback,
            } => {
                write!(
                    f,
                    "semester {} is not part of {}, using {}",
                    given, subject_year, fallback
                )
            }
            NormalizationWarning::TopicReset {
                semester,
                given,
                fallback,
            } => {
                write!(
                    f,
                    "topic '{}' is not taught in {}, using '{}'",
                    given, semester, fallback
                )
            }
            NormalizationWarning::ExamVariableClamped { given, clamped } => {
                write!(f, "exam variable {} clamped to {}", given, clamped)
            }
        }
    }
}

/// Normalize raw metadata against the taxonomy and school directory
///
/// Re-selecting the subject year cascades here: a semester that does not
/// belong to the new year resets to the year's first semester, and a topic
/// missing from the resulting semester resets to that semester's first
/// topic. The unique id is recomputed from the normalized fields.
pub fn normalize(
    raw: &RawMetadata,
    curriculum: &Curriculum,
    schools: &SchoolDirectory,
    exam_variable_max: u32,
) -> Result<(ExamMetadata, Vec<NormalizationWarning>)> {
    let mut warnings = Vec::new();

    let fallback_school = schools.first().unwrap_or("").to_string();
    let school = match &raw.school {
        Some(name) if schools.contains(name) => name.clone(),
        Some(name) => {
            warnings.push(NormalizationWarning::UnknownSchool {
                given: name.clone(),
                fallback: fallback_school.clone(),
            });
            fallback_school
        }
        None => fallback_school,
    };

    let exam_year = match raw.exam_year {
        Some(year) if year.is_valid() => year,
        Some(ExamYear::Year(given)) => {
            warnings.push(NormalizationWarning::YearOutOfRange { given });
            ExamYear::Unknown
        }
        Some(ExamYear::Unknown) | None => ExamYear::Unknown,
    };

    let exam_month = raw.exam_month.unwrap_or(ExamMonth::Unknown);

    let subject_year = raw.subject_year.unwrap_or(SubjectYear::First);

    let first_semester = subject_year.semesters()[0];
    let semester = match raw.semester {
        Some(semester) if semester.subject_year() == subject_year => semester,
        Some(given) => {
            warnings.push(NormalizationWarning::SemesterReset {
                subject_year,
                given,
                fallback: first_semester,
            });
            first_semester
        }
        None => first_semester,
    };

    let fallback_topic = curriculum.first_topic(semester).unwrap_or("").to_string();
    let topic = match &raw.topic {
        Some(topic) if curriculum.contains_topic(semester, topic) => topic.clone(),
        Some(topic) if !topic.is_empty() => {
            warnings.push(NormalizationWarning::TopicReset {
                semester,
                given: topic.clone(),
                fallback: fallback_topic.clone(),
            });
            fallback_topic
        }
        _ => fallback_topic,
    };

    let exam_variable = match raw.exam_variable {
        Some(given) => {
            let clamped = given.clamp(1, exam_variable_max);
            if clamped != given {
                warnings.push(NormalizationWarning::ExamVariableClamped { given, clamped });
            }
            clamped
        }
        None => 1,
    };

    let unique_id = id_generator::generate_unique_id(
        &school,
        subject_year,
        semester,
        &topic,
        exam_year,
        exam_month,
        exam_variable,
    )?;

    Ok((
        ExamMetadata {
            unique_id,
            school,
            exam_year,
            exam_month,
            exam_variable,
            subject_year,
            semester,
            topic,
        },
        warnings,
    ))
}
