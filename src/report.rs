//! Comparison report rendering
//!
//! Rendering is a pure formatting step: identical inputs (including the
//! caller-supplied header timestamp) produce byte-identical text. The only
//! timestamp in the document is the one in the header; per-result lines
//! carry none.

use indexmap::IndexMap;

use crate::extract::extract_count;
use crate::types::{ComparisonStat, QueryStatus, TestRun};

/// Document title, shared by the report header and the binaries' banners
pub const REPORT_TITLE: &str = "Agentic Vision Code Execution";

const PREVIEW_CHARS: usize = 200;

/// Render the full Markdown comparison document: a summary table, the
/// per-result detail grouped by (test, mode), and a findings template.
pub fn render_report(
    runs: &[TestRun],
    comparison: &IndexMap<String, ComparisonStat>,
    generated_at: &str,
) -> String {
    let mut report: Vec<String> = Vec::new();
    report.push(format!("# Experiment Results: {REPORT_TITLE}"));
    report.push(format!("\n**Generated**: {generated_at}"));
    report.push("\n## Summary\n".to_string());

    report.push(
        "| Test | Code OFF Accuracy | Code ON Accuracy | Code Blocks Used | Images Annotated |"
            .to_string(),
    );
    report.push(
        "|------|-------------------|------------------|------------------|------------------|"
            .to_string(),
    );
    for (test_name, stats) in comparison {
        report.push(format!(
            "| {} | {} | {} | {} | {} |",
            test_name,
            format_accuracy(stats.code_off_accuracy),
            format_accuracy(stats.code_on_accuracy),
            stats.code_blocks_executed,
            stats.images_annotated
        ));
    }

    report.push("\n## Detailed Results\n".to_string());
    for run in runs {
        report.push(format!("### {} ({})\n", run.test_name, run.mode.label()));

        for result in &run.results {
            let status_icon = match result.status {
                QueryStatus::Success => "✓",
                QueryStatus::Skipped => "⚠",
                QueryStatus::Error => "✗",
            };
            report.push(format!("**{}** {}", result.image, status_icon));

            if let Some(ground_truth) = result.ground_truth {
                let extracted = extract_count(&result.response_text);
                let marker = if extracted == Some(ground_truth) {
                    "✓"
                } else {
                    "✗"
                };
                let extracted = match extracted {
                    Some(value) => value.to_string(),
                    None => "none".to_string(),
                };
                report.push(format!(
                    "  - Ground truth: {ground_truth}, Extracted: {extracted} {marker}"
                ));
            }

            if !result.response_text.is_empty() {
                report.push(format!(
                    "  - Response: {}...",
                    preview(&result.response_text)
                ));
            }

            if !result.code_executed.is_empty() {
                report.push(format!(
                    "  - Code executed: {} blocks",
                    result.code_executed.len()
                ));
            }

            if result.images_generated > 0 {
                report.push(format!(
                    "  - Annotated images generated: {}",
                    result.images_generated
                ));
            }

            report.push(String::new());
        }
    }

    report.push("\n## Key Findings\n".to_string());
    report.push("*To be filled in after reviewing results*\n".to_string());
    report.push("1. **[Most surprising result]**: ...\n".to_string());
    report.push("2. **[Hypothesis confirmed/refuted]**: ...\n".to_string());
    report.push("3. **[Unexpected behavior]**: ...\n".to_string());

    report.join("\n")
}

/// Print the per-test summary block the comparison CLI shows after writing
/// the report.
pub fn print_summary(comparison: &IndexMap<String, ComparisonStat>) {
    for (test_name, stats) in comparison {
        println!("\n{test_name}:");
        if stats.has_ground_truth {
            println!(
                "  Code OFF: {} → Code ON: {}",
                format_accuracy(stats.code_off_accuracy),
                format_accuracy(stats.code_on_accuracy)
            );
        } else {
            println!("  (No ground truth - manual review needed)");
        }
        println!("  Code blocks executed: {}", stats.code_blocks_executed);
        println!("  Annotated images: {}", stats.images_annotated);
    }
}

/// Accuracy as a whole-number percentage, or "N/A" when absent
fn format_accuracy(value: Option<f64>) -> String {
    match value {
        Some(fraction) => format!("{:.0}%", fraction * 100.0),
        None => "N/A".to_string(),
    }
}

/// First 200 characters with newlines collapsed to spaces
fn preview(text: &str) -> String {
    text.chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}
