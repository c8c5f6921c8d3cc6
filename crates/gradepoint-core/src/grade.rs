//! Grade mapper: scores and letters to canonical grade points.
//!
//! Grade points are stored as an exact count of thirds so that
//! `credits × grade point` never picks up a rounding error. Three credits of
//! B+ is exactly ten quality points.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::GradeError;

/// The nine canonical letter grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "F")]
    F,
}

impl LetterGrade {
    /// All letters, best first.
    pub const ALL: [LetterGrade; 9] = [
        LetterGrade::A,
        LetterGrade::AMinus,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::BMinus,
        LetterGrade::CPlus,
        LetterGrade::C,
        LetterGrade::CMinus,
        LetterGrade::F,
    ];

    /// Canonical spelling, e.g. `"B+"`.
    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::F => "F",
        }
    }

    /// The exact grade point carried by this letter.
    pub fn grade_point(self) -> GradePoint {
        let thirds = match self {
            LetterGrade::A => 12,
            LetterGrade::AMinus => 11,
            LetterGrade::BPlus => 10,
            LetterGrade::B => 9,
            LetterGrade::BMinus => 8,
            LetterGrade::CPlus => 7,
            LetterGrade::C => 6,
            LetterGrade::CMinus => 5,
            LetterGrade::F => 0,
        };
        GradePoint::from_thirds(thirds)
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterGrade {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        LetterGrade::ALL
            .into_iter()
            .find(|letter| letter.as_str() == trimmed)
            .ok_or_else(|| GradeError::UnknownLetter(s.to_string()))
    }
}

/// An exact grade point, stored as a whole number of thirds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GradePoint {
    thirds: u8,
}

impl GradePoint {
    /// The F grade point.
    pub const ZERO: GradePoint = GradePoint { thirds: 0 };

    /// Ceiling applied to repeated courses (B+ = 10/3).
    pub const REPEAT_CAP: GradePoint = GradePoint { thirds: 10 };

    pub const fn from_thirds(thirds: u8) -> Self {
        Self { thirds }
    }

    /// Numerator over a fixed denominator of 3.
    pub fn thirds(self) -> u8 {
        self.thirds
    }

    /// The grade point as a decimal (10/3 becomes 3.333…).
    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.thirds) / Decimal::from(3)
    }

    /// `credits × grade point`, multiplying before dividing by three.
    ///
    /// The product saturates at the `Decimal` bounds.
    pub fn quality_points(self, credits: Decimal) -> Decimal {
        credits.saturating_mul(Decimal::from(self.thirds)) / Decimal::from(3)
    }
}

impl fmt::Display for GradePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.thirds % 3 == 0 {
            write!(f, "{}", self.thirds / 3)
        } else {
            write!(f, "{}/3", self.thirds)
        }
    }
}

/// A resolved letter, or `Invalid` for a score that is not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum GradeLabel {
    Letter(LetterGrade),
    Invalid,
}

impl GradeLabel {
    pub fn letter(self) -> Option<LetterGrade> {
        match self {
            GradeLabel::Letter(letter) => Some(letter),
            GradeLabel::Invalid => None,
        }
    }
}

impl fmt::Display for GradeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeLabel::Letter(letter) => f.write_str(letter.as_str()),
            GradeLabel::Invalid => f.write_str("Invalid"),
        }
    }
}

impl From<GradeLabel> for String {
    fn from(label: GradeLabel) -> Self {
        label.to_string()
    }
}

impl TryFrom<String> for GradeLabel {
    type Error = GradeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "Invalid" {
            Ok(GradeLabel::Invalid)
        } else {
            value.parse().map(GradeLabel::Letter)
        }
    }
}

/// Result of mapping a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreGrade {
    pub letter: GradeLabel,
    pub grade_point: GradePoint,
}

impl ScoreGrade {
    pub const INVALID: ScoreGrade = ScoreGrade {
        letter: GradeLabel::Invalid,
        grade_point: GradePoint::ZERO,
    };
}

/// Score thresholds: inclusive lower bound and the letter it earns.
///
/// Scanned top-down, first match wins.
pub const SCORE_SCALE: [(u8, LetterGrade); 9] = [
    (95, LetterGrade::A),
    (90, LetterGrade::AMinus),
    (85, LetterGrade::BPlus),
    (80, LetterGrade::B),
    (75, LetterGrade::BMinus),
    (70, LetterGrade::CPlus),
    (65, LetterGrade::C),
    (60, LetterGrade::CMinus),
    (0, LetterGrade::F),
];

/// Display-only thresholds for [`point_to_letter`], in hundredths.
///
/// These are rounded decimals (3.66, 1.67) and do not line up exactly with
/// the thirds used by [`LetterGrade::grade_point`].
const POINT_SCALE: [(i64, LetterGrade); 8] = [
    (400, LetterGrade::A),
    (366, LetterGrade::AMinus),
    (333, LetterGrade::BPlus),
    (300, LetterGrade::B),
    (266, LetterGrade::BMinus),
    (233, LetterGrade::CPlus),
    (200, LetterGrade::C),
    (167, LetterGrade::CMinus),
];

/// Map a numeric score to its letter and grade point.
///
/// Scores are clamped to `[0, 100]`. `NaN` yields [`ScoreGrade::INVALID`].
pub fn score_to_grade(score: f64) -> ScoreGrade {
    if score.is_nan() {
        return ScoreGrade::INVALID;
    }
    let clamped = score.clamp(0.0, 100.0);
    let letter = SCORE_SCALE
        .iter()
        .find(|(lower, _)| clamped >= f64::from(*lower))
        .map(|(_, letter)| *letter)
        .unwrap_or(LetterGrade::F);

    ScoreGrade {
        letter: GradeLabel::Letter(letter),
        grade_point: letter.grade_point(),
    }
}

/// Parse raw score text; anything that is not a number becomes `NaN`.
pub fn score_from_str(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Look up the grade point for a letter. Unknown or empty letters give 0.
pub fn letter_to_grade_point(letter: &str) -> GradePoint {
    letter
        .parse::<LetterGrade>()
        .map(LetterGrade::grade_point)
        .unwrap_or(GradePoint::ZERO)
}

/// Resolve letter text the way the engine does: unknown letters count as F.
pub fn resolve_letter(letter: &str) -> LetterGrade {
    letter.parse().unwrap_or(LetterGrade::F)
}

/// Display inverse: the letter a raw grade-point value would be shown as.
pub fn point_to_letter(point: Decimal) -> LetterGrade {
    POINT_SCALE
        .iter()
        .find(|(hundredths, _)| point >= Decimal::new(*hundredths, 2))
        .map(|(_, letter)| *letter)
        .unwrap_or(LetterGrade::F)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter_of(score: f64) -> LetterGrade {
        score_to_grade(score)
            .letter
            .letter()
            .expect("numeric score should resolve to a letter")
    }

    #[test]
    fn score_boundaries() {
        let cases = [
            (59.0, LetterGrade::F, 60.0, LetterGrade::CMinus),
            (64.0, LetterGrade::CMinus, 65.0, LetterGrade::C),
            (69.0, LetterGrade::C, 70.0, LetterGrade::CPlus),
            (74.0, LetterGrade::CPlus, 75.0, LetterGrade::BMinus),
            (79.0, LetterGrade::BMinus, 80.0, LetterGrade::B),
            (84.0, LetterGrade::B, 85.0, LetterGrade::BPlus),
            (89.0, LetterGrade::BPlus, 90.0, LetterGrade::AMinus),
            (94.0, LetterGrade::AMinus, 95.0, LetterGrade::A),
        ];
        for (below, below_letter, at, at_letter) in cases {
            assert_eq!(letter_of(below), below_letter, "score {below}");
            assert_eq!(letter_of(at), at_letter, "score {at}");
        }
        assert_eq!(letter_of(94.99), LetterGrade::AMinus);
        assert_eq!(letter_of(100.0), LetterGrade::A);
        assert_eq!(letter_of(0.0), LetterGrade::F);
    }

    #[test]
    fn score_is_monotone() {
        let mut previous = GradePoint::ZERO;
        for tenth in 0..=1000 {
            let score = f64::from(tenth) / 10.0;
            let point = score_to_grade(score).grade_point;
            assert!(point >= previous, "grade point dropped at {score}");
            previous = point;
        }
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        assert_eq!(letter_of(-5.0), LetterGrade::F);
        assert_eq!(letter_of(140.0), LetterGrade::A);
        assert_eq!(letter_of(f64::INFINITY), LetterGrade::A);
        assert_eq!(letter_of(f64::NEG_INFINITY), LetterGrade::F);
    }

    #[test]
    fn non_numeric_score_is_invalid() {
        assert_eq!(score_to_grade(f64::NAN), ScoreGrade::INVALID);
        assert_eq!(score_to_grade(score_from_str("eighty")), ScoreGrade::INVALID);
        assert_eq!(score_to_grade(score_from_str("")), ScoreGrade::INVALID);
        assert_eq!(ScoreGrade::INVALID.letter.to_string(), "Invalid");
        assert_eq!(letter_of(score_from_str(" 87.5 ")), LetterGrade::BPlus);
    }

    #[test]
    fn letter_points_are_whole_thirds() {
        let expected = [
            ("A", 12),
            ("A-", 11),
            ("B+", 10),
            ("B", 9),
            ("B-", 8),
            ("C+", 7),
            ("C", 6),
            ("C-", 5),
            ("F", 0),
        ];
        for (letter, thirds) in expected {
            let point = letter_to_grade_point(letter);
            assert_eq!(point.thirds(), thirds, "letter {letter}");
            assert_eq!(
                point.quality_points(Decimal::from(3)),
                Decimal::from(thirds)
            );
        }
    }

    #[test]
    fn unknown_letter_is_zero() {
        assert_eq!(letter_to_grade_point(""), GradePoint::ZERO);
        assert_eq!(letter_to_grade_point("E"), GradePoint::ZERO);
        assert_eq!(letter_to_grade_point("a"), GradePoint::ZERO);
        assert_eq!(letter_to_grade_point(" B+ "), GradePoint::from_thirds(10));
        assert_eq!(resolve_letter("Z"), LetterGrade::F);
        assert!("A+".parse::<LetterGrade>().is_err());
    }

    #[test]
    fn quality_points_are_exact() {
        let b_plus = LetterGrade::BPlus.grade_point();
        assert_eq!(b_plus.quality_points(Decimal::from(3)), Decimal::from(10));
        let a_minus = LetterGrade::AMinus.grade_point();
        assert_eq!(a_minus.quality_points(Decimal::from(3)), Decimal::from(11));
        // 1.5 credits of C+ = 3.5 exactly
        assert_eq!(
            LetterGrade::CPlus.grade_point().quality_points(Decimal::new(15, 1)),
            Decimal::new(35, 1)
        );
    }

    #[test]
    fn point_to_letter_thresholds() {
        assert_eq!(point_to_letter(Decimal::from(4)), LetterGrade::A);
        assert_eq!(point_to_letter(Decimal::new(366, 2)), LetterGrade::AMinus);
        assert_eq!(point_to_letter(Decimal::new(365, 2)), LetterGrade::BPlus);
        assert_eq!(point_to_letter(Decimal::new(300, 2)), LetterGrade::B);
        assert_eq!(point_to_letter(Decimal::new(167, 2)), LetterGrade::CMinus);
        assert_eq!(point_to_letter(Decimal::new(166, 2)), LetterGrade::F);
        assert_eq!(point_to_letter(Decimal::ZERO), LetterGrade::F);
    }

    #[test]
    fn point_to_letter_disagrees_with_exact_thirds_at_c_minus() {
        // 5/3 = 1.666… sits below the rounded 1.67 threshold, so the
        // display inverse shows an exact C- as F. Every other letter
        // survives the round trip.
        for letter in LetterGrade::ALL {
            let back = point_to_letter(letter.grade_point().to_decimal());
            if letter == LetterGrade::CMinus {
                assert_eq!(back, LetterGrade::F);
            } else {
                assert_eq!(back, letter, "round trip of {letter}");
            }
        }
    }

    #[test]
    fn grade_point_display() {
        assert_eq!(GradePoint::from_thirds(12).to_string(), "4");
        assert_eq!(GradePoint::REPEAT_CAP.to_string(), "10/3");
        assert_eq!(GradePoint::ZERO.to_string(), "0");
        assert_eq!(LetterGrade::AMinus.grade_point().to_string(), "11/3");
    }

    #[test]
    fn grade_label_serde() {
        let json = serde_json::to_string(&GradeLabel::Letter(LetterGrade::BMinus)).unwrap();
        assert_eq!(json, "\"B-\"");
        let invalid: GradeLabel = serde_json::from_str("\"Invalid\"").unwrap();
        assert_eq!(invalid, GradeLabel::Invalid);
        assert!(serde_json::from_str::<GradeLabel>("\"Q\"").is_err());
    }
}
