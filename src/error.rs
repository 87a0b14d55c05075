//! Error taxonomy for registry operations and the state file.
//!
//! Every variant is recoverable: the menu renders it as a message and keeps
//! going. Only the binary's one-shot commands turn them into a process exit.

use std::path::PathBuf;

use thiserror::Error;

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Which kind of record a decode failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Student,
    Course,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Student => f.write_str("student"),
            RecordKind::Course => f.write_str("course"),
        }
    }
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Student with ID {0} already exists.")]
    DuplicateStudent(String),

    #[error("Course with code {0} already exists.")]
    DuplicateCourse(String),

    #[error("Student with ID {0} does not exist.")]
    StudentNotFound(String),

    #[error("Course with code {0} does not exist.")]
    CourseNotFound(String),

    #[error("Student {student_id} is not enrolled in the course with code {course_code}.")]
    NotEnrolled {
        student_id: String,
        course_code: String,
    },

    #[error("no data file at {}", .0.display())]
    MissingFile(PathBuf),

    #[error("invalid age {0:?}: expected a whole number between 0 and 150")]
    InvalidAge(String),

    #[error("malformed data file {}: {reason}", .path.display())]
    MalformedFile { path: PathBuf, reason: String },

    #[error("malformed {kind} record {key:?}: {reason}")]
    MalformedRecord {
        kind: RecordKind,
        key: String,
        reason: String,
    },

    #[error("i/o on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json encode: {0}")]
    Json(#[from] serde_json::Error),
}

impl RegistryError {
    pub(crate) fn malformed(kind: RecordKind, key: &str, reason: impl Into<String>) -> Self {
        RegistryError::MalformedRecord {
            kind,
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RegistryError::Io {
            path: path.into(),
            source,
        }
    }

    /// Lookup/uniqueness/enrollment failures, as opposed to file problems.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            RegistryError::DuplicateStudent(_)
                | RegistryError::DuplicateCourse(_)
                | RegistryError::StudentNotFound(_)
                | RegistryError::CourseNotFound(_)
                | RegistryError::NotEnrolled { .. }
                | RegistryError::InvalidAge(_)
        )
    }
}
