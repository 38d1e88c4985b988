//! Persistence of raw experiment results
//!
//! A run serializes its ordered `TestRun` list to one pretty-printed JSON
//! file under `outputs/raw/`; the comparison step reads the newest one back.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::config::ExperimentPaths;
use crate::types::TestRun;
use crate::{Error, Result};

/// Prefix shared by every results file
pub const RESULTS_PREFIX: &str = "experiment_results_";

/// Timestamp string used in results-file names
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Results-file name for a timestamp, e.g. `experiment_results_20260805_142512.json`
pub fn results_file_name(timestamp: &str) -> String {
    format!("{RESULTS_PREFIX}{timestamp}.json")
}

/// Write the run list as pretty JSON under `outputs/raw/`, returning the path
pub fn save_results(
    paths: &ExperimentPaths,
    runs: &[TestRun],
    file_name: &str,
) -> Result<PathBuf> {
    let output_path = paths.raw.join(file_name);
    let serialized = serde_json::to_string_pretty(runs)?;
    fs::write(&output_path, serialized)?;
    Ok(output_path)
}

/// Read a results file back into its run list
pub fn load_results(path: &Path) -> Result<Vec<TestRun>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Find the newest results file by modification time.
///
/// No results files at all is the explicit "nothing to process" condition,
/// not an empty list.
pub fn find_latest_results(paths: &ExperimentPaths) -> Result<PathBuf> {
    let entries = match fs::read_dir(&paths.raw) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::no_results("no results files found in outputs/raw"));
        }
        Err(err) => return Err(err.into()),
    };

    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !name.starts_with(RESULTS_PREFIX) || !name.ends_with(".json") {
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        if newest.as_ref().is_none_or(|(time, _)| modified > *time) {
            newest = Some((modified, entry.path()));
        }
    }

    newest
        .map(|(_, path)| path)
        .ok_or_else(|| Error::no_results("no results files found in outputs/raw"))
}
