//! # Agentic Vision
//!
//! An experiment harness that measures whether giving a multimodal model an
//! auxiliary code-execution tool improves its accuracy on visual counting
//! and reading tasks.
//!
//! ## How an experiment works
//!
//! 1. **Inputs**: a fixed suite of scenarios ([`suite::BUILTIN_SUITE`]):
//!    counting fingers, coins and rebar, reading tables, detecting PPE,
//!    reading blueprints, doing receipt math. Each scenario is a prompt plus
//!    an ordered image list, some with known ground-truth counts.
//! 2. **Runs**: every scenario is queried twice per image, once with the
//!    code-execution tool offered (`code_on`) and once without (`code_off`).
//!    Processing is strictly sequential; one call completes before the next
//!    is issued. Raw responses are persisted as JSON under `outputs/raw/`.
//! 3. **Comparison**: the aggregation step extracts a count from each
//!    free-form response, scores both modes against the shared ground truth,
//!    and renders a Markdown report comparing them.
//!
//! ## Example
//!
//! ```rust,no_run
//! use agentic_vision::{
//!     ClientConfig, ExperimentPaths, Mode, VisionClient, analyze_runs, render_report,
//!     run_single_test, suite,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let paths = ExperimentPaths::new(".");
//!     paths.ensure()?;
//!
//!     let client = VisionClient::new(ClientConfig::from_env()?)?;
//!
//!     let mut runs = Vec::new();
//!     for mode in [Mode::CodeOff, Mode::CodeOn] {
//!         for spec in suite::BUILTIN_SUITE {
//!             runs.push(run_single_test(&client, &paths, spec, mode).await?);
//!         }
//!     }
//!
//!     let comparison = analyze_runs(&runs)?;
//!     let report = render_report(&runs, &comparison, "2026-08-05 14:25");
//!     std::fs::write(paths.outputs.join("comparison.md"), report)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **client**: the one boundary to the vision service, as the
//!   [`VisionInvoker`] contract and its production implementation
//! - **extract**: heuristic count extraction from free-form responses
//! - **compare**: positional pairing of the two mode runs and accuracy scoring
//! - **report**: deterministic Markdown/console rendering of the comparison
//! - **runner**: sequential per-image execution of one scenario and mode
//! - **suite**: the fixed scenario definitions
//! - **storage**: raw-results persistence and newest-file discovery
//! - **download**: best-effort fetching of the stock sample images
//! - **config**: environment resolution and the experiment directory layout
//! - **error**: error types shared across the harness

mod client;
mod compare;
mod config;
mod download;
mod error;
mod extract;
mod report;
mod runner;
mod storage;
mod types;

/// The fixed scenario definitions, public as a module so callers can walk
/// the whole suite or look up a single scenario by id.
pub mod suite;

/// Retry utilities with exponential backoff and jitter, public so callers
/// can tune the policy applied around vision queries and downloads.
pub mod retry;

// --- Vision client ---

pub use client::{VisionClient, VisionInvoker};

// --- Configuration ---

pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, ExperimentPaths, ThinkingLevel,
};

// --- Result aggregation core ---

pub use compare::{analyze_runs, compare_modes};
pub use extract::extract_count;
pub use report::{REPORT_TITLE, print_summary, render_report};

// --- Execution and persistence ---

pub use download::{
    SAMPLE_IMAGES, SampleImage, download_image, download_samples, write_image_checklist,
};
pub use runner::run_single_test;
pub use storage::{
    find_latest_results, load_results, results_file_name, save_results, timestamp_now,
};

// --- Core types ---

pub use error::{Error, Result};
pub use types::{
    ComparisonStat, GeneratedImage, Mode, QueryResult, QueryStatus, TestRun, VisionOutcome,
};
