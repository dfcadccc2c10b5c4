use std::fmt;

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Curriculum taxonomy lookup errors
    Taxonomy(TaxonomyError),
    /// Question import errors
    Import(ImportError),
    /// External collaborator call errors
    Collaborator(CollaboratorError),
    /// File operation errors
    File(FileError),
    /// Configuration errors
    Config(ConfigError),
    /// Anything else (wraps third-party errors)
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Taxonomy(e) => write!(f, "taxonomy error: {}", e),
            AppError::Import(e) => write!(f, "import error: {}", e),
            AppError::Collaborator(e) => write!(f, "collaborator error: {}", e),
            AppError::File(e) => write!(f, "file error: {}", e),
            AppError::Config(e) => write!(f, "config error: {}", e),
            AppError::Other(msg) => write!(f, "error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Taxonomy(e) => Some(e),
            AppError::Import(e) => Some(e),
            AppError::Collaborator(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// Curriculum taxonomy errors
///
/// A subject year / semester combination outside the fixed table is fatal to
/// identifier generation and is surfaced, never guessed around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyError {
    /// The (subject year, semester) pair is not in the semester-code table
    InvalidTaxonomyKey {
        subject_year: String,
        semester: String,
    },
}

impl fmt::Display for TaxonomyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxonomyError::InvalidTaxonomyKey {
                subject_year,
                semester,
            } => {
                write!(
                    f,
                    "invalid taxonomy key: semester '{}' is not defined under subject year '{}'",
                    semester, subject_year
                )
            }
        }
    }
}

impl std::error::Error for TaxonomyError {}

/// Question import errors
#[derive(Debug)]
pub enum ImportError {
    /// The pasted/uploaded payload is not valid JSON
    JsonParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The top-level JSON value is not an array of question objects
    NotAnArray,
    /// An array element is missing `question` or `options`
    MissingRequiredKeys { index: usize },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::JsonParseFailed { source } => {
                write!(f, "JSON parse failed: {}", source)
            }
            ImportError::NotAnArray => {
                write!(f, "expected a JSON array of question objects")
            }
            ImportError::MissingRequiredKeys { index } => {
                write!(
                    f,
                    "element {} is missing the required 'question'/'options' keys",
                    index
                )
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::JsonParseFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// External collaborator call errors
///
/// Calls are single-shot: a failure propagates to the operator verbatim,
/// there is no automatic retry and no partial persistence.
#[derive(Debug)]
pub enum CollaboratorError {
    /// The HTTP request itself failed
    RequestFailed {
        service: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The collaborator answered with an error payload
    BadResponse {
        service: String,
        status: Option<u16>,
        message: Option<String>,
    },
    /// The collaborator answered with an empty or unusable body
    EmptyResponse { service: String },
}

impl fmt::Display for CollaboratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollaboratorError::RequestFailed { service, source } => {
                write!(f, "{} request failed: {}", service, source)
            }
            CollaboratorError::BadResponse {
                service,
                status,
                message,
            } => {
                write!(
                    f,
                    "{} returned an error response: status={:?}, message={:?}",
                    service, status, message
                )
            }
            CollaboratorError::EmptyResponse { service } => {
                write!(f, "{} returned an empty response", service)
            }
        }
    }
}

impl std::error::Error for CollaboratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollaboratorError::RequestFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// File operation errors
#[derive(Debug)]
pub enum FileError {
    /// File does not exist
    NotFound { path: String },
    /// Read failed
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Write failed
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML parse failed
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Folder does not exist
    DirectoryNotFound { path: String },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "file not found: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "failed to read {}: {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "failed to write {}: {}", path, source)
            }
            FileError::TomlParseFailed { path, source } => {
                write!(f, "failed to parse TOML {}: {}", path, source)
            }
            FileError::DirectoryNotFound { path } => {
                write!(f, "folder not found: {}", path)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. }
            | FileError::WriteFailed { source, .. }
            | FileError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    /// An environment variable held a value of the wrong type
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// A credential needed for publishing is missing
    MissingCredential { var_name: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarParseFailed {
                var_name,
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "environment variable {} could not be parsed: '{}' is not a {}",
                    var_name, value, expected_type
                )
            }
            ConfigError::MissingCredential { var_name } => {
                write!(f, "missing credential: {}", var_name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== conversions from common error types ==========
// anyhow already blanket-converts anything implementing std::error::Error,
// so only the inbound directions are implemented here.

impl From<TaxonomyError> for AppError {
    fn from(err: TaxonomyError) -> Self {
        AppError::Taxonomy(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Import(ImportError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // TOML errors carry no path of their own
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Collaborator(CollaboratorError::RequestFailed {
            service: "http".to_string(),
            source: Box::new(err),
        })
    }
}

// ========== convenience constructors ==========

impl AppError {
    /// Invalid (subject year, semester) combination
    pub fn invalid_taxonomy_key(
        subject_year: impl Into<String>,
        semester: impl Into<String>,
    ) -> Self {
        AppError::Taxonomy(TaxonomyError::InvalidTaxonomyKey {
            subject_year: subject_year.into(),
            semester: semester.into(),
        })
    }

    /// A collaborator HTTP call failed
    pub fn collaborator_request_failed(
        service: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Collaborator(CollaboratorError::RequestFailed {
            service: service.into(),
            source: Box::new(source),
        })
    }

    /// A collaborator answered with an error payload
    pub fn collaborator_bad_response(
        service: impl Into<String>,
        status: Option<u16>,
        message: Option<String>,
    ) -> Self {
        AppError::Collaborator(CollaboratorError::BadResponse {
            service: service.into(),
            status,
            message,
        })
    }

    /// A file read failed
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result type alias ==========

/// Application result type
pub type AppResult<T> = Result<T, AppError>;
