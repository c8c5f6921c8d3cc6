//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use gradepoint_core::grade::LetterGrade;
use gradepoint_core::model::CourseStatus;
use gradepoint_core::report::{format_decimal, GradeReport};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a grade report.
pub fn generate_html(report: &GradeReport, precision: u32) -> String {
    let fmt = |d| format_decimal(d, precision);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>gradepoint report: {}</title>\n",
        html_escape(&report.term_name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>gradepoint report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Term: <strong>{}</strong> | {} courses ({} excluded) | {}</p>\n",
        html_escape(&report.term_name),
        report.term.courses.len(),
        report.term.excluded_count(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str(
        "<thead><tr><th>Scope</th><th>Credits</th><th>Quality Points</th><th>GPA</th></tr></thead>\n",
    );
    html.push_str("<tbody>\n");
    html.push_str(&format!(
        "<tr><td>Term</td><td>{}</td><td>{}</td><td class=\"gpa\">{}</td></tr>\n",
        report.term.total_credits.normalize(),
        fmt(report.term.total_quality_points),
        fmt(report.term.gpa),
    ));
    if let Some(c) = &report.cumulative {
        html.push_str(&format!(
            "<tr><td>Previous</td><td>{}</td><td>{}</td><td>-</td></tr>\n",
            c.previous_credits.normalize(),
            fmt(c.previous_quality_points),
        ));
        html.push_str(&format!(
            "<tr><td>Cumulative</td><td>{}</td><td>{}</td><td class=\"gpa\">{}</td></tr>\n",
            c.new_total_credits.normalize(),
            fmt(c.new_total_quality_points),
            fmt(c.cgpa),
        ));
    }
    html.push_str("</tbody></table>\n");

    let distribution = report.term.letter_distribution();
    if !distribution.is_empty() {
        html.push_str(&generate_bar_chart(&distribution));
    }

    html.push_str("</section>\n");

    // Per-course results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Courses</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"courses\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Course</th><th onclick=\"sortTable(1)\">Credits</th><th onclick=\"sortTable(2)\">Grade</th><th onclick=\"sortTable(3)\">Letter</th><th onclick=\"sortTable(4)\">Points</th><th onclick=\"sortTable(5)\">QP</th><th onclick=\"sortTable(6)\">Status</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for c in &report.term.courses {
        let row_class = match c.status {
            CourseStatus::Excluded => "excluded",
            CourseStatus::Capped => "capped",
            CourseStatus::Included => "included",
        };
        let letter = c
            .resolved_letter
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        let point = c
            .grade_point
            .map(|p| fmt(p.to_decimal()))
            .unwrap_or_else(|| "-".to_string());

        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row_class,
            html_escape(&c.record.name),
            c.record.credits.normalize(),
            html_escape(&c.record.grade.to_string()),
            html_escape(&letter),
            point,
            fmt(c.quality_points),
            c.status
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &GradeReport, path: &Path, precision: u32) -> Result<()> {
    let html = generate_html(report, precision);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(distribution: &[(LetterGrade, usize)]) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 60;

    let max_count = distribution
        .iter()
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(1)
        .max(1);

    let total_height = distribution.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (letter, count)) in distribution.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = count * max_width / max_count;

        let color = match letter {
            LetterGrade::A | LetterGrade::AMinus | LetterGrade::BPlus => "#22c55e",
            LetterGrade::B | LetterGrade::BMinus | LetterGrade::CPlus => "#eab308",
            _ => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(letter.as_str())
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            count
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --capped: #fef9c3; --excluded: #f3f4f6; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --capped: #713f12; --excluded: #1f2937; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.gpa { font-weight: bold; }
.capped { background: var(--capped); }
.excluded { background: var(--excluded); color: #9ca3af; text-decoration: line-through; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('courses');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb, undefined, {numeric: true}) : vb.localeCompare(va, undefined, {numeric: true});
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
