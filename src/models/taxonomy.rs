use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Curriculum year of the subject being examined
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SubjectYear {
    #[serde(rename = "First Year")]
    First,
    #[serde(rename = "Second Year")]
    Second,
    #[serde(rename = "Third Year")]
    Third,
    #[serde(rename = "Fourth Year")]
    Fourth,
    #[serde(rename = "Fifth Year")]
    Fifth,
}

impl SubjectYear {
    /// Canonical display name
    pub fn name(self) -> &'static str {
        match self {
            SubjectYear::First => "First Year",
            SubjectYear::Second => "Second Year",
            SubjectYear::Third => "Third Year",
            SubjectYear::Fourth => "Fourth Year",
            SubjectYear::Fifth => "Fifth Year",
        }
    }

    /// Parse from the canonical name (exact match)
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "First Year" => Some(SubjectYear::First),
            "Second Year" => Some(SubjectYear::Second),
            "Third Year" => Some(SubjectYear::Third),
            "Fourth Year" => Some(SubjectYear::Fourth),
            "Fifth Year" => Some(SubjectYear::Fifth),
            _ => None,
        }
    }

    /// All five years, curriculum order
    pub fn all() -> [SubjectYear; 5] {
        [
            SubjectYear::First,
            SubjectYear::Second,
            SubjectYear::Third,
            SubjectYear::Fourth,
            SubjectYear::Fifth,
        ]
    }

    /// The two semesters belonging to this year
    pub fn semesters(self) -> [Semester; 2] {
        match self {
            SubjectYear::First => [Semester::S1, Semester::S2],
            SubjectYear::Second => [Semester::S3, Semester::S4],
            SubjectYear::Third => [Semester::S5, Semester::S6],
            SubjectYear::Fourth => [Semester::S7, Semester::S8],
            SubjectYear::Fifth => [Semester::S9, Semester::S10],
        }
    }
}

impl std::fmt::Display for SubjectYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Semester slot, two per subject year
///
/// S1/S2 belong to the first year, S3/S4 to the second, and so on up to
/// S9/S10 for the fifth. The code doubles as the stable identifier used in
/// unique ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Semester {
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
    S7,
    S8,
    S9,
    S10,
}

impl Semester {
    /// Stable semester code
    pub fn code(self) -> &'static str {
        match self {
            Semester::S1 => "S1",
            Semester::S2 => "S2",
            Semester::S3 => "S3",
            Semester::S4 => "S4",
            Semester::S5 => "S5",
            Semester::S6 => "S6",
            Semester::S7 => "S7",
            Semester::S8 => "S8",
            Semester::S9 => "S9",
            Semester::S10 => "S10",
        }
    }

    /// Parse from the semester code (exact match)
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "S1" => Some(Semester::S1),
            "S2" => Some(Semester::S2),
            "S3" => Some(Semester::S3),
            "S4" => Some(Semester::S4),
            "S5" => Some(Semester::S5),
            "S6" => Some(Semester::S6),
            "S7" => Some(Semester::S7),
            "S8" => Some(Semester::S8),
            "S9" => Some(Semester::S9),
            "S10" => Some(Semester::S10),
            _ => None,
        }
    }

    /// The subject year this semester belongs to
    pub fn subject_year(self) -> SubjectYear {
        match self {
            Semester::S1 | Semester::S2 => SubjectYear::First,
            Semester::S3 | Semester::S4 => SubjectYear::Second,
            Semester::S5 | Semester::S6 => SubjectYear::Third,
            Semester::S7 | Semester::S8 => SubjectYear::Fourth,
            Semester::S9 | Semester::S10 => SubjectYear::Fifth,
        }
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Curriculum taxonomy: subject year → semester → topic list
///
/// Topics are keyed by semester code; the semester itself determines the
/// subject year, so the two-level lookup of the metadata form collapses to a
/// single map here. Keys stay plain strings so data files keep their `S1`…
/// `S10` table headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Curriculum {
    semesters: BTreeMap<String, Vec<String>>,
}

impl Curriculum {
    pub fn new(semesters: BTreeMap<String, Vec<String>>) -> Self {
        Self { semesters }
    }

    /// Topics taught in the given semester
    pub fn topics_of(&self, semester: Semester) -> &[String] {
        self.semesters
            .get(semester.code())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the topic belongs to the given semester
    pub fn contains_topic(&self, semester: Semester, topic: &str) -> bool {
        self.topics_of(semester).iter().any(|t| t == topic)
    }

    /// First topic of the semester, the normalization fallback
    pub fn first_topic(&self, semester: Semester) -> Option<&str> {
        self.topics_of(semester).first().map(|s| s.as_str())
    }

    /// Built-in five-year curriculum, used when no data file is supplied
    pub fn default_curriculum() -> Self {
        let mut semesters = BTreeMap::new();
        let data: [(Semester, &[&str]); 10] = [
            (
                Semester::S1,
                &[
                    "Anatomie I",
                    "Biologie Genetique",
                    "Biochimie",
                    "Communication et Langue",
                    "Sante Publique",
                    "Methodologie D'apprentissage",
                ][..],
            ),
            (
                Semester::S2,
                &[
                    "Anatomie II",
                    "Biophysique",
                    "Histologie / Embryologie",
                    "Histoire de la Medecine / Psychosoc",
                    "Technique de communication",
                ][..],
            ),
            (
                Semester::S3,
                &["Physiologie I", "Microbiologie", "Immunologie", "Anglais Medical"][..],
            ),
            (
                Semester::S4,
                &[
                    "Physiologie II",
                    "Parasitologie",
                    "Anatomie Pathologique",
                    "Informatique Medicale",
                ][..],
            ),
            (
                Semester::S5,
                &["Semiologie Medicale", "Pharmacologie I", "Radiologie"][..],
            ),
            (
                Semester::S6,
                &["Semiologie Chirurgicale", "Pharmacologie II", "Psychologie Medicale"][..],
            ),
            (
                Semester::S7,
                &[
                    "Pathologie Cardiovasculaire",
                    "Pneumologie",
                    "Gastro-Enterologie",
                ][..],
            ),
            (
                Semester::S8,
                &["Nephrologie", "Endocrinologie", "Neurologie"][..],
            ),
            (
                Semester::S9,
                &["Pediatrie", "Gynecologie Obstetrique", "Chirurgie Generale"][..],
            ),
            (
                Semester::S10,
                &[
                    "Urgences et Reanimation",
                    "Medecine Legale",
                    "Sante Communautaire",
                ][..],
            ),
        ];
        for (semester, topics) in data {
            semesters.insert(
                semester.code().to_string(),
                topics.iter().map(|s| s.to_string()).collect(),
            );
        }
        Self { semesters }
    }
}

/// School directory, split into private and public institutions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolDirectory {
    pub private: Vec<String>,
    pub public: Vec<String>,
}

impl SchoolDirectory {
    /// All schools, private first, declaration order preserved
    pub fn all(&self) -> Vec<&str> {
        self.private
            .iter()
            .chain(self.public.iter())
            .map(|s| s.as_str())
            .collect()
    }

    /// Whether the school is in the directory
    pub fn contains(&self, school: &str) -> bool {
        self.all().iter().any(|s| *s == school)
    }

    /// First listed school, the normalization fallback
    pub fn first(&self) -> Option<&str> {
        self.all().first().copied()
    }

    /// Built-in directory, used when no data file is supplied
    pub fn default_directory() -> Self {
        Self {
            private: ["UIR", "Sheikh Zayed", "UMP6", "Sheikh Khalifa"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            public: [
                "UIR Rabat",
                "Sheikh Zayed Casablanca",
                "UMP6 Tanger",
                "Sheikh Khalifa Oujda",
                "Fes",
                "Marrakech",
                "Agadir",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}
