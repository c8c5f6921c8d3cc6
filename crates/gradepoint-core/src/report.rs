//! Grade report types with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::model::{CumulativeTotals, PriorSource, TermTotals};

/// The result of one calculation, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeReport {
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Term label from the sheet.
    pub term_name: String,
    /// Term aggregate, full precision.
    pub term: TermTotals,
    /// Present when a prior record was supplied.
    #[serde(default)]
    pub cumulative: Option<CumulativeTotals>,
}

/// Round half away from zero and render with exactly `precision` decimals.
pub fn format_decimal(value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", precision as usize, rounded)
}

/// Escape text for a markdown table cell.
fn markdown_cell(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace(['\r', '\n'], " ")
}

impl GradeReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradeReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// CGPA when a prior record was combined, otherwise the term GPA.
    pub fn headline_gpa(&self) -> Decimal {
        self.cumulative
            .as_ref()
            .map(|c| c.cgpa)
            .unwrap_or(self.term.gpa)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self, precision: u32) -> String {
        let fmt = |d: Decimal| format_decimal(d, precision);
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.term_name));
        md.push_str(&format!(
            "**Term GPA:** {} ({} credits, {} quality points)\n\n",
            fmt(self.term.gpa),
            fmt(self.term.total_credits),
            fmt(self.term.total_quality_points)
        ));

        if let Some(c) = &self.cumulative {
            let source = match c.prior_source {
                PriorSource::Explicit => "explicit",
                PriorSource::Derived => "from GPA × credits",
            };
            md.push_str(&format!(
                "**CGPA:** {} ({} credits, {} quality points; prior {} QP {})\n\n",
                fmt(c.cgpa),
                fmt(c.new_total_credits),
                fmt(c.new_total_quality_points),
                fmt(c.previous_quality_points),
                source
            ));
        }

        if !self.term.courses.is_empty() {
            md.push_str("| Course | Credits | Grade | Letter | Points | QP | Status |\n");
            md.push_str("|--------|---------|-------|--------|--------|----|--------|\n");
            for c in &self.term.courses {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} | {} |\n",
                    markdown_cell(&c.record.name),
                    c.record.credits.normalize(),
                    markdown_cell(&c.record.grade.to_string()),
                    c.resolved_letter
                        .map(|l| l.to_string())
                        .unwrap_or_else(|| "-".into()),
                    c.grade_point
                        .map(|p| fmt(p.to_decimal()))
                        .unwrap_or_else(|| "-".into()),
                    fmt(c.quality_points),
                    c.status
                ));
            }
        }

        md
    }
}
