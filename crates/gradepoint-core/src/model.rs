//! Core data model types for gradepoint.
//!
//! Course records come in, processed courses and totals come out. None of
//! these values carry identity; they live for one calculation.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::GradeError;
use crate::grade::{resolve_letter, score_to_grade, GradeLabel, GradePoint, LetterGrade, ScoreGrade};

/// How a course's grade was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeType {
    Numeric,
    Letter,
}

impl fmt::Display for GradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeType::Numeric => write!(f, "numeric"),
            GradeType::Letter => write!(f, "letter"),
        }
    }
}

impl FromStr for GradeType {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "numeric" | "score" => Ok(GradeType::Numeric),
            "letter" => Ok(GradeType::Letter),
            _ => Err(GradeError::UnknownGradeType(s.to_string())),
        }
    }
}

/// The authoritative grade for a course, selected by `grade_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "grade_type", rename_all = "lowercase")]
pub enum GradeInput {
    /// A non-numeric score is `NaN`, written as `null`.
    Numeric {
        #[serde(with = "nan_as_null")]
        score: f64,
    },
    Letter { letter: String },
}

impl GradeInput {
    pub fn grade_type(&self) -> GradeType {
        match self {
            GradeInput::Numeric { .. } => GradeType::Numeric,
            GradeInput::Letter { .. } => GradeType::Letter,
        }
    }

    /// Resolve through the grade mapper. Never fails.
    pub fn resolve(&self) -> ScoreGrade {
        match self {
            GradeInput::Numeric { score } => score_to_grade(*score),
            GradeInput::Letter { letter } => {
                let letter = resolve_letter(letter);
                ScoreGrade {
                    letter: GradeLabel::Letter(letter),
                    grade_point: letter.grade_point(),
                }
            }
        }
    }
}

mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if score.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(score)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

impl fmt::Display for GradeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeInput::Numeric { score } => write!(f, "{score}"),
            GradeInput::Letter { letter } => write!(f, "{letter}"),
        }
    }
}

/// One course entry for a term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Display name (may be empty).
    #[serde(default)]
    pub name: String,
    /// Credit hours; positive.
    pub credits: Decimal,
    /// The grade as entered.
    pub grade: GradeInput,
    /// Withdrawn or dropped: kept for display, left out of every total.
    #[serde(default)]
    pub excluded: bool,
    /// Repeated course: grade point capped at B+.
    #[serde(default)]
    pub repeated: bool,
}

impl CourseRecord {
    pub fn numeric(name: impl Into<String>, credits: Decimal, score: f64) -> Self {
        Self {
            name: name.into(),
            credits,
            grade: GradeInput::Numeric { score },
            excluded: false,
            repeated: false,
        }
    }

    pub fn letter(name: impl Into<String>, credits: Decimal, letter: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            credits,
            grade: GradeInput::Letter {
                letter: letter.into(),
            },
            excluded: false,
            repeated: false,
        }
    }

    pub fn mark_excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    pub fn mark_repeated(mut self) -> Self {
        self.repeated = true;
        self
    }
}

/// How a processed course counted toward the term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Excluded,
    Capped,
    Included,
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseStatus::Excluded => write!(f, "excluded"),
            CourseStatus::Capped => write!(f, "capped"),
            CourseStatus::Included => write!(f, "included"),
        }
    }
}

/// A course record annotated with what the engine derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedCourse {
    /// The record as supplied.
    pub record: CourseRecord,
    /// Resolved letter; `None` for excluded courses.
    pub resolved_letter: Option<GradeLabel>,
    /// Resolved (possibly capped) grade point; `None` for excluded courses.
    pub grade_point: Option<GradePoint>,
    /// The repeat cap lowered this course's grade point.
    pub was_capped: bool,
    /// `credits × grade_point`, or zero when excluded.
    pub quality_points: Decimal,
    pub status: CourseStatus,
}

impl ProcessedCourse {
    pub fn counts_toward_totals(&self) -> bool {
        self.status != CourseStatus::Excluded
    }
}

/// Aggregate of one term's courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermTotals {
    /// Every course in input order, excluded ones included.
    pub courses: Vec<ProcessedCourse>,
    pub total_credits: Decimal,
    pub total_quality_points: Decimal,
    /// `total_quality_points / total_credits`, or zero with no credits.
    pub gpa: Decimal,
}

impl TermTotals {
    pub fn included_courses(&self) -> impl Iterator<Item = &ProcessedCourse> {
        self.courses.iter().filter(|c| c.counts_toward_totals())
    }

    /// Count of counted courses per letter, best letter first. Letters with
    /// no courses are omitted.
    pub fn letter_distribution(&self) -> Vec<(LetterGrade, usize)> {
        LetterGrade::ALL
            .into_iter()
            .map(|letter| {
                let count = self
                    .included_courses()
                    .filter(|c| {
                        c.resolved_letter.and_then(GradeLabel::letter) == Some(letter)
                    })
                    .count();
                (letter, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    pub fn excluded_count(&self) -> usize {
        self.courses.len() - self.included_courses().count()
    }
}

/// Totals carried over from earlier terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorRecord {
    /// Published cumulative GPA.
    pub gpa: Decimal,
    /// Credits already earned.
    pub credits: Decimal,
    /// Exactly tracked quality points; takes precedence over `gpa × credits`.
    #[serde(default)]
    pub quality_points: Option<Decimal>,
}

/// Where the previous quality points of a cumulative figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorSource {
    /// Supplied directly by the caller.
    Explicit,
    /// Reconstructed as previous GPA × previous credits.
    Derived,
}

/// Prior record merged with the current term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeTotals {
    pub previous_credits: Decimal,
    pub previous_quality_points: Decimal,
    pub prior_source: PriorSource,
    pub new_total_credits: Decimal,
    pub new_total_quality_points: Decimal,
    /// `new_total_quality_points / new_total_credits`, or zero.
    pub cgpa: Decimal,
}

/// A parsed term sheet: the unit of input for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermSheet {
    /// Term label, e.g. "Spring 2025".
    pub name: String,
    #[serde(default)]
    pub courses: Vec<CourseRecord>,
    #[serde(default)]
    pub prior: Option<PriorRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_type_display_and_parse() {
        assert_eq!(GradeType::Numeric.to_string(), "numeric");
        assert_eq!(GradeType::Letter.to_string(), "letter");
        assert_eq!("numeric".parse::<GradeType>().unwrap(), GradeType::Numeric);
        assert_eq!("Letter".parse::<GradeType>().unwrap(), GradeType::Letter);
        assert_eq!("score".parse::<GradeType>().unwrap(), GradeType::Numeric);
        assert!(matches!(
            "pass-fail".parse::<GradeType>(),
            Err(GradeError::UnknownGradeType(_))
        ));
    }

    #[test]
    fn grade_input_resolves() {
        let numeric = GradeInput::Numeric { score: 91.0 };
        assert_eq!(numeric.grade_type(), GradeType::Numeric);
        assert_eq!(
            numeric.resolve().letter,
            GradeLabel::Letter(LetterGrade::AMinus)
        );

        let unknown = GradeInput::Letter {
            letter: "W".into(),
        };
        let resolved = unknown.resolve();
        assert_eq!(resolved.letter, GradeLabel::Letter(LetterGrade::F));
        assert_eq!(resolved.grade_point, GradePoint::ZERO);
    }

    #[test]
    fn course_record_serde_uses_grade_type_tag() {
        let course = CourseRecord::letter("Ethics", Decimal::from(3), "B+").mark_repeated();
        let json = serde_json::to_value(&course).unwrap();
        assert_eq!(json["grade"]["grade_type"], "letter");
        assert_eq!(json["grade"]["letter"], "B+");
        assert_eq!(json["repeated"], true);

        let back: CourseRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, course);
    }

    #[test]
    fn nan_score_round_trips_through_null() {
        let course = CourseRecord::numeric("Lab", Decimal::from(2), f64::NAN);
        let json = serde_json::to_value(&course).unwrap();
        assert!(json["grade"]["score"].is_null());

        let back: CourseRecord = serde_json::from_value(json).unwrap();
        match back.grade {
            GradeInput::Numeric { score } => assert!(score.is_nan()),
            other => panic!("expected a numeric grade, got {other:?}"),
        }

        let plain: CourseRecord = serde_json::from_str(
            r#"{"credits":"3","grade":{"grade_type":"numeric","score":88}}"#,
        )
        .unwrap();
        assert_eq!(plain.grade, GradeInput::Numeric { score: 88.0 });
    }

    #[test]
    fn course_builders() {
        let course = CourseRecord::numeric("Lab", Decimal::new(15, 1), 72.0).mark_excluded();
        assert!(course.excluded);
        assert!(!course.repeated);
        assert_eq!(course.grade.to_string(), "72");
    }
}
