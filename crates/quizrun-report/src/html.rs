//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use quizrun_core::report::{format_points, SummaryReport};
use quizrun_core::statistics::KindStats;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a finished session.
pub fn generate_html(report: &SummaryReport) -> String {
    let title = report.title.as_deref().unwrap_or("Quiz");
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizrun report: {}</title>\n",
        html_escape(title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
    html.push_str(&format!(
        "<p class=\"meta\">{} questions | {} correct | {}</p>\n",
        report.details.len(),
        report.correct_count(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str(&format!(
        "<p class=\"score {}\">{}</p>\n",
        grade_class(report.percentage / 100.0),
        html_escape(&report.headline())
    ));
    html.push_str("</header>\n");

    if !report.per_kind.is_empty() {
        html.push_str("<section class=\"dashboard\">\n");
        html.push_str("<h2>By kind</h2>\n");
        html.push_str("<table class=\"summary\">\n");
        html.push_str("<thead><tr><th>Kind</th><th>Questions</th><th>Correct</th><th>Points</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for k in &report.per_kind {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}/{}</td></tr>\n",
                html_escape(&k.kind),
                k.questions,
                k.correct,
                format_points(k.awarded_points),
                format_points(k.possible_points),
            ));
        }
        html.push_str("</tbody></table>\n");
        html.push_str(&generate_bar_chart(&report.per_kind));
        html.push_str("</section>\n");
    }

    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Questions</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">#</th><th onclick=\"sortTable(1)\">Question</th><th onclick=\"sortTable(2)\">Your answer</th><th onclick=\"sortTable(3)\">Correct answer</th><th onclick=\"sortTable(4)\">Points</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for d in &report.details {
        let row_class = if d.is_correct {
            "pass"
        } else if d.awarded_points > 0.0 {
            "partial"
        } else {
            "fail"
        };

        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}/{}</td></tr>\n",
            row_class,
            d.index + 1,
            html_escape(&d.prompt),
            html_escape(&d.user_answer),
            html_escape(&d.correct_answer),
            format_points(d.awarded_points),
            format_points(d.points),
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &SummaryReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn grade_class(ratio: f64) -> &'static str {
    if ratio >= 0.8 {
        "good"
    } else if ratio >= 0.5 {
        "fair"
    } else {
        "poor"
    }
}

fn generate_bar_chart(per_kind: &[KindStats]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 160;

    let total_height = per_kind.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, stats) in per_kind.iter().enumerate() {
        let ratio = if stats.possible_points > 0.0 {
            (stats.awarded_points / stats.possible_points).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let y = i * (bar_height + padding) + padding;
        let width = (ratio * max_width as f64) as usize;

        let color = match grade_class(ratio) {
            "good" => "#22c55e",
            "fair" => "#eab308",
            _ => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&stats.kind)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            ratio * 100.0
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --partial: #fef9c3; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --partial: #713f12; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.score { font-size: 1.5rem; font-weight: bold; }
.score.good { color: #16a34a; }
.score.fair { color: #ca8a04; }
.score.poor { color: #dc2626; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.partial { background: var(--partial); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
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

#[cfg(test)]
mod tests {
    use super::*;
    use quizrun_core::report::QuestionResult;
    use quizrun_core::statistics::compute_kind_stats;

    fn make_test_report() -> SummaryReport {
        let details = vec![
            QuestionResult {
                index: 0,
                prompt: "Is 1 < 2?".into(),
                kind: "single-choice".into(),
                points: 1.0,
                awarded_points: 1.0,
                user_answer: "Yes".into(),
                correct_answer: "Yes".into(),
                is_correct: true,
                checked: true,
            },
            QuestionResult {
                index: 1,
                prompt: "Pick the primes".into(),
                kind: "multi-choice".into(),
                points: 4.0,
                awarded_points: 2.0,
                user_answer: "2, 4".into(),
                correct_answer: "2, 3".into(),
                is_correct: false,
                checked: false,
            },
        ];

        SummaryReport {
            id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
            title: Some("Maths & Logic".into()),
            total_awarded: 3.0,
            total_possible: 5.0,
            percentage: 60.0,
            per_kind: compute_kind_stats(&details),
            details,
        }
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = generate_html(&report);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Maths &amp; Logic"));
        assert!(html.contains("Your Score: 3/5 (60.00%)"));
        assert!(html.contains("Pick the primes"));
        assert!(html.contains("multi-choice"));
    }

    #[test]
    fn prompts_are_escaped() {
        let html = generate_html(&make_test_report());
        assert!(html.contains("Is 1 &lt; 2?"));
        assert!(!html.contains("Is 1 < 2?"));
    }

    #[test]
    fn partial_credit_rows_are_marked() {
        let html = generate_html(&make_test_report());
        assert!(html.contains("<tr class=\"partial\"><td>2</td>"));
        assert!(html.contains("<tr class=\"pass\"><td>1</td>"));
        assert!(html.contains("class=\"score fair\""));
    }

    #[test]
    fn untitled_report() {
        let mut report = make_test_report();
        report.title = None;
        report.per_kind.clear();
        let html = generate_html(&report);
        assert!(html.contains("<title>quizrun report: Quiz</title>"));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
