pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod grades;
pub mod history;
pub mod input;
pub mod models;
pub mod report;
pub mod storage;

pub use aggregate::{compute_cgpa, compute_semester_gpa};
pub use error::{ExportError, StorageError, ValidationError};
pub use export::export_tabular_text;
pub use grades::{classify, Grade, GradeScale, STANDARD_SCALE};
pub use history::{HistoryStore, HISTORY_CAPACITY};
pub use models::{CalculationResult, CgpaSummary, Semester, SemesterGpa, SemesterSummary, Subject};
pub use storage::{FileStorage, MemoryStorage, Storage};
