//! Calculation entry point.
//!
//! Runs the term aggregator over a sheet and, when the sheet carries a prior
//! record, the cumulative combiner. Holds no state: each call stands alone.

use chrono::Utc;

use crate::model::TermSheet;
use crate::report::GradeReport;
use crate::term::aggregate_term;

/// Calculate term (and cumulative, if possible) figures for a sheet.
///
/// This does not validate; callers run [`crate::validation::validate_sheet`]
/// first if they want user-facing messages instead of fallback values.
pub fn calculate(sheet: &TermSheet) -> GradeReport {
    let term = aggregate_term(&sheet.courses);
    let cumulative = sheet.prior.as_ref().map(|prior| prior.combine_with(&term));

    tracing::info!(
        term = %sheet.name,
        courses = term.courses.len(),
        excluded = term.excluded_count(),
        credits = %term.total_credits,
        gpa = %term.gpa,
        cgpa = ?cumulative.as_ref().map(|c| c.cgpa),
        "calculated term"
    );

    GradeReport {
        created_at: Utc::now(),
        term_name: sheet.name.clone(),
        term,
        cumulative,
    }
}
