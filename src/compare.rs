//! Accuracy aggregation across code-on / code-off runs
//!
//! Pairs the two mode runs of every scenario positionally and scores the
//! extracted counts against ground truth, producing one [`ComparisonStat`]
//! per scenario. Scenarios are independent; nothing aggregates across them.

use indexmap::IndexMap;

use crate::extract::extract_count;
use crate::types::{ComparisonStat, Mode, QueryResult, TestRun};
use crate::{Error, Result};

/// Group every run by scenario and compute its comparison statistics,
/// keyed by test name in first-seen order.
///
/// An empty run list is the one fatal condition here: it returns the
/// explicit "nothing to process" error rather than an empty map, so callers
/// can tell "no data" apart from "all zeros".
pub fn analyze_runs(runs: &[TestRun]) -> Result<IndexMap<String, ComparisonStat>> {
    if runs.is_empty() {
        return Err(Error::no_results("no test runs to analyze"));
    }

    #[derive(Default)]
    struct ModePair<'a> {
        code_on: &'a [QueryResult],
        code_off: &'a [QueryResult],
    }

    let mut by_test: IndexMap<&str, ModePair> = IndexMap::new();
    for run in runs {
        let pair = by_test.entry(run.test_name.as_str()).or_default();
        match run.mode {
            Mode::CodeOn => pair.code_on = &run.results,
            Mode::CodeOff => pair.code_off = &run.results,
        }
    }

    let mut comparison = IndexMap::new();
    for (test_name, pair) in &by_test {
        comparison.insert(
            test_name.to_string(),
            compare_modes(test_name, pair.code_on, pair.code_off),
        );
    }
    Ok(comparison)
}

/// Comparison statistics for one scenario.
///
/// Pairing is positional and stops at the shorter sequence. Ground truth is
/// read from the code-on entry of each pair only: the two runs share ground
/// truth by image identity, so a diverging value on the code-off side would
/// be ignored. Every ground-truth-bearing pair counts toward the shared
/// denominator; a mode's numerator increments when its extracted count
/// equals the ground truth exactly.
pub fn compare_modes(
    test_name: &str,
    code_on: &[QueryResult],
    code_off: &[QueryResult],
) -> ComparisonStat {
    let mut on_correct = 0usize;
    let mut off_correct = 0usize;
    let mut total_with_gt = 0usize;

    for (on_result, off_result) in code_on.iter().zip(code_off) {
        let Some(ground_truth) = on_result.ground_truth else {
            continue;
        };
        total_with_gt += 1;

        if extract_count(&on_result.response_text) == Some(ground_truth) {
            on_correct += 1;
        }
        if extract_count(&off_result.response_text) == Some(ground_truth) {
            off_correct += 1;
        }
    }

    let accuracy =
        |correct: usize| (total_with_gt > 0).then(|| correct as f64 / total_with_gt as f64);

    ComparisonStat {
        test_name: test_name.to_string(),
        total_images: code_on.len(),
        code_on_accuracy: accuracy(on_correct),
        code_off_accuracy: accuracy(off_correct),
        code_blocks_executed: code_on.iter().filter(|r| r.used_code()).count(),
        images_annotated: code_on.iter().map(|r| u64::from(r.images_generated)).sum(),
        has_ground_truth: total_with_gt > 0,
    }
}
