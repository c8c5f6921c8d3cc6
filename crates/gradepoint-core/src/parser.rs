//! TOML term-sheet parser.
//!
//! Loads term sheets from TOML files and directories.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::GradeError;
use crate::model::{CourseRecord, GradeInput, GradeType, PriorRecord, TermSheet};

/// Intermediate TOML structure for parsing term-sheet files.
#[derive(Debug, Deserialize)]
struct TomlTermFile {
    term: TomlTermHeader,
    #[serde(default)]
    prior: Option<TomlPrior>,
    #[serde(default)]
    courses: Vec<TomlCourse>,
}

#[derive(Debug, Deserialize)]
struct TomlTermHeader {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TomlPrior {
    gpa: Decimal,
    credits: Decimal,
    #[serde(default)]
    quality_points: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct TomlCourse {
    #[serde(default)]
    name: String,
    credits: Decimal,
    #[serde(default = "default_grade_type")]
    grade_type: String,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    letter: Option<String>,
    #[serde(default)]
    excluded: bool,
    #[serde(default)]
    repeated: bool,
}

fn default_grade_type() -> String {
    "numeric".to_string()
}

impl TomlCourse {
    fn grade_input(&self) -> Result<GradeInput, GradeError> {
        match self.grade_type.parse::<GradeType>()? {
            GradeType::Numeric => self
                .score
                .map(|score| GradeInput::Numeric { score })
                .ok_or(GradeError::MissingGradeValue {
                    grade_type: "numeric",
                    field: "score",
                }),
            GradeType::Letter => self
                .letter
                .clone()
                .map(|letter| GradeInput::Letter { letter })
                .ok_or(GradeError::MissingGradeValue {
                    grade_type: "letter",
                    field: "letter",
                }),
        }
    }
}

/// Parse a single TOML file into a `TermSheet`.
pub fn parse_term_sheet(path: &Path) -> Result<TermSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read term sheet: {}", path.display()))?;

    parse_term_sheet_str(&content, path)
}

/// Parse a TOML string into a `TermSheet` (useful for testing).
pub fn parse_term_sheet_str(content: &str, source_path: &Path) -> Result<TermSheet> {
    let parsed: TomlTermFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let courses = parsed
        .courses
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let grade = c.grade_input().with_context(|| {
                if c.name.is_empty() {
                    format!("course {} in {}", i + 1, source_path.display())
                } else {
                    format!("course '{}' in {}", c.name, source_path.display())
                }
            })?;
            Ok(CourseRecord {
                name: c.name,
                credits: c.credits,
                grade,
                excluded: c.excluded,
                repeated: c.repeated,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let prior = parsed.prior.map(|p| PriorRecord {
        gpa: p.gpa,
        credits: p.credits,
        quality_points: p.quality_points,
    });

    Ok(TermSheet {
        name: parsed.term.name,
        courses,
        prior,
    })
}

/// Recursively load all `.toml` term sheets from a directory.
pub fn load_term_directory(dir: &Path) -> Result<Vec<TermSheet>> {
    let mut sheets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            sheets.extend(load_term_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_term_sheet(&path) {
                Ok(sheet) => sheets.push(sheet),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sheets)
}
