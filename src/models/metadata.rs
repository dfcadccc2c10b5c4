use serde::{Deserialize, Serialize};

use crate::models::taxonomy::{Semester, SubjectYear};

/// Token written into identifiers and JSON when a year or month is unknown
pub const UNKNOWN_TOKEN: &str = "UNK";

/// Year the exam was held, or unknown
///
/// Serializes as an integer, or the literal `"UNK"` when unknown. Older
/// exports hold either form, so deserialization accepts both strings and
/// integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamYear {
    Unknown,
    Year(u16),
}

impl ExamYear {
    /// Legal calendar range for a known exam year
    pub const MIN: u16 = 1900;
    pub const MAX: u16 = 2100;

    /// Whether the value is in its legal domain
    pub fn is_valid(self) -> bool {
        match self {
            ExamYear::Unknown => true,
            ExamYear::Year(y) => (Self::MIN..=Self::MAX).contains(&y),
        }
    }
}

impl std::fmt::Display for ExamYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExamYear::Unknown => write!(f, "{}", UNKNOWN_TOKEN),
            ExamYear::Year(y) => write!(f, "{}", y),
        }
    }
}

impl Serialize for ExamYear {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            ExamYear::Unknown => serializer.serialize_str(UNKNOWN_TOKEN),
            ExamYear::Year(y) => serializer.serialize_u16(*y),
        }
    }
}

impl<'de> Deserialize<'de> for ExamYear {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Visitor;
        use std::fmt;

        struct YearVisitor;

        impl<'de> Visitor<'de> for YearVisitor {
            type Value = ExamYear;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer year or the string \"UNK\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if value == UNKNOWN_TOKEN || value == "Unknown" {
                    return Ok(ExamYear::Unknown);
                }
                value
                    .parse::<u16>()
                    .map(ExamYear::Year)
                    .map_err(|_| E::custom(format!("invalid exam year: {}", value)))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u16::try_from(value)
                    .map(ExamYear::Year)
                    .map_err(|_| E::custom(format!("invalid exam year: {}", value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u16::try_from(value)
                    .map(ExamYear::Year)
                    .map_err(|_| E::custom(format!("invalid exam year: {}", value)))
            }
        }

        deserializer.deserialize_any(YearVisitor)
    }
}

/// Month the exam was held, or unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamMonth {
    #[serde(rename = "UNK")]
    Unknown,
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl ExamMonth {
    /// Canonical display name
    pub fn name(self) -> &'static str {
        match self {
            ExamMonth::Unknown => UNKNOWN_TOKEN,
            ExamMonth::January => "January",
            ExamMonth::February => "February",
            ExamMonth::March => "March",
            ExamMonth::April => "April",
            ExamMonth::May => "May",
            ExamMonth::June => "June",
            ExamMonth::July => "July",
            ExamMonth::August => "August",
            ExamMonth::September => "September",
            ExamMonth::October => "October",
            ExamMonth::November => "November",
            ExamMonth::December => "December",
        }
    }

    /// Parse from the canonical name (exact match)
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "UNK" | "Unknown" => Some(ExamMonth::Unknown),
            "January" => Some(ExamMonth::January),
            "February" => Some(ExamMonth::February),
            "March" => Some(ExamMonth::March),
            "April" => Some(ExamMonth::April),
            "May" => Some(ExamMonth::May),
            "June" => Some(ExamMonth::June),
            "July" => Some(ExamMonth::July),
            "August" => Some(ExamMonth::August),
            "September" => Some(ExamMonth::September),
            "October" => Some(ExamMonth::October),
            "November" => Some(ExamMonth::November),
            "December" => Some(ExamMonth::December),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExamMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Exam metadata, the identifying half of an exam document
///
/// Field order matters: it is the key order of the persisted JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamMetadata {
    /// Derived identifier, recomputed whenever the other fields change
    pub unique_id: String,
    pub school: String,
    pub exam_year: ExamYear,
    pub exam_month: ExamMonth,
    /// Disambiguates multiple exams whose other fields coincide
    pub exam_variable: u32,
    pub subject_year: SubjectYear,
    pub semester: Semester,
    pub topic: String,
}
