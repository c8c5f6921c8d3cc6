//! Grade input error types.
//!
//! The engine itself never fails: unknown letters and non-numeric scores
//! resolve to defined fallbacks. These errors are raised by the strict
//! parsing paths used when reading term sheets and CLI arguments.

use thiserror::Error;

/// Errors that can occur while interpreting grade input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeError {
    /// The text is not one of the nine canonical letter grades.
    #[error("unknown letter grade: '{0}'")]
    UnknownLetter(String),

    /// The `grade_type` tag is neither `numeric` nor `letter`.
    #[error("unknown grade type: '{0}' (expected 'numeric' or 'letter')")]
    UnknownGradeType(String),

    /// The field required by the selected grade type is absent.
    #[error("grade_type '{grade_type}' requires a '{field}' value")]
    MissingGradeValue {
        grade_type: &'static str,
        field: &'static str,
    },
}
