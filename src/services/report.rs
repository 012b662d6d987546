// Report Writer
// Plain text and JSON renderings of an AnalysisResult

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::models::{AnalysisResult, Category, ResultSummary, StrategyKind};

const RULE_WIDE: usize = 50;
const RULE_NARROW: usize = 30;

fn section_title(category: Category) -> &'static str {
    match category {
        Category::Action => "🎯 ACTION ITEMS:",
        Category::Decision => "📌 DECISIONS MADE:",
        Category::Question => "❓ OPEN QUESTIONS:",
    }
}

fn empty_message(category: Category) -> &'static str {
    match category {
        Category::Action => "No action items found.",
        Category::Decision => "No decisions found.",
        Category::Question => "No open questions found.",
    }
}

/// Full text report: header, numbered sections and summary block
pub fn render_report(result: &AnalysisResult, generated_at: &DateTime<Local>) -> String {
    let mut out = String::new();
    let wide = "=".repeat(RULE_WIDE);
    let narrow = "-".repeat(RULE_NARROW);

    let _ = writeln!(out, "MEETING NOTES ANALYSIS REPORT");
    let _ = writeln!(out, "{}", wide);
    let _ = writeln!(out, "Generated on: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Analysis Method: {}", result.strategy.method_label());
    out.push('\n');

    for category in [Category::Action, Category::Decision, Category::Question] {
        let _ = writeln!(out, "{}", section_title(category));
        let _ = writeln!(out, "{}", narrow);
        let items = result.get(category);
        if items.is_empty() {
            let _ = writeln!(out, "{}", empty_message(category));
        } else {
            for (i, item) in items.iter().enumerate() {
                let _ = writeln!(out, "{}. {}", i + 1, item);
            }
        }
        out.push('\n');
    }

    let summary = result.summary();
    let _ = writeln!(out, "{}", wide);
    let _ = writeln!(out, "SUMMARY:");
    let _ = writeln!(out, "Total Action Items: {}", summary.total_actions);
    let _ = writeln!(out, "Total Decisions: {}", summary.total_decisions);
    let _ = writeln!(out, "Total Open Questions: {}", summary.total_questions);
    out
}

/// One-line status shown after an analysis
pub fn status_line(result: &AnalysisResult) -> String {
    let summary = result.summary();
    format!(
        "Analysis complete using {} - Found: {} actions, {} decisions, {} questions",
        result.strategy.method_label(),
        summary.total_actions,
        summary.total_decisions,
        summary.total_questions
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    generated_at: String,
    method: &'static str,
    strategy: StrategyKind,
    actions: &'a [String],
    decisions: &'a [String],
    questions: &'a [String],
    summary: ResultSummary,
}

pub fn render_json(result: &AnalysisResult, generated_at: &DateTime<Local>) -> serde_json::Result<String> {
    let report = JsonReport {
        generated_at: generated_at.to_rfc3339(),
        method: result.strategy.method_label(),
        strategy: result.strategy,
        actions: &result.actions,
        decisions: &result.decisions,
        questions: &result.questions,
        summary: result.summary(),
    };
    serde_json::to_string_pretty(&report)
}

pub fn write_report(path: &Path, result: &AnalysisResult, generated_at: &DateTime<Local>) -> std::io::Result<()> {
    fs::write(path, render_report(result, generated_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    fn sample() -> AnalysisResult {
        let mut result = AnalysisResult::empty(StrategyKind::Patterns);
        result.actions = vec!["John will send the report.".to_string(), "TODO: book room".to_string()];
        result.decisions = vec!["We decided to ship on Friday.".to_string()];
        result
    }

    #[test]
    fn test_render_report_layout() {
        let report = render_report(&sample(), &fixed_time());
        let expected = "\
MEETING NOTES ANALYSIS REPORT
==================================================
Generated on: 2024-03-05 14:07:09
Analysis Method: Pattern Matching

🎯 ACTION ITEMS:
------------------------------
1. John will send the report.
2. TODO: book room

📌 DECISIONS MADE:
------------------------------
1. We decided to ship on Friday.

❓ OPEN QUESTIONS:
------------------------------
No open questions found.

==================================================
SUMMARY:
Total Action Items: 2
Total Decisions: 1
Total Open Questions: 0
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_render_report_empty_sections() {
        let report = render_report(&AnalysisResult::empty(StrategyKind::Annotated), &fixed_time());
        assert!(report.contains("Analysis Method: Spacy NLP"));
        assert!(report.contains("No action items found."));
        assert!(report.contains("No decisions found."));
        assert!(report.contains("No open questions found."));
    }

    #[test]
    fn test_status_line() {
        assert_eq!(
            status_line(&sample()),
            "Analysis complete using Pattern Matching - Found: 2 actions, 1 decisions, 0 questions"
        );
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample(), &fixed_time()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["method"], "Pattern Matching");
        assert_eq!(value["strategy"], "patterns");
        assert_eq!(value["summary"]["totalActions"], 2);
        assert_eq!(value["decisions"][0], "We decided to ship on Friday.");
    }

    #[test]
    fn test_write_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        write_report(&path, &sample(), &fixed_time()).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("MEETING NOTES ANALYSIS REPORT\n"));
    }
}
