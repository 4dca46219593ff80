use thiserror::Error;

/// Problems with user-supplied input or with what it adds up to.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("please enter a valid number of semesters (1-12), got {0}")]
    SemesterCount(u32),

    #[error("row {row}: semester {semester} is outside 1..={count}")]
    SemesterOutOfRange { row: usize, semester: u32, count: u32 },

    #[error("credits must be a whole number between 1 and 10, got '{0}'")]
    Credits(String),

    #[error("unknown grade '{0}'")]
    UnknownGrade(String),

    /// Not a single semester had a graded subject with credits.
    #[error("please add at least one subject with grade and credits")]
    NoGradedSubjects,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize history: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not replace stored value: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no history to export")]
    NothingToExport,

    #[error("could not write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not flush CSV: {0}")]
    Io(#[from] std::io::Error),

    #[error("exported text is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
