//! Floor-plan vision checks: tree/door counting on a floor plan and
//! fitting counting on a lighting plan.
//!
//! Good plan images cannot be fetched automatically; save them under
//! `inputs/` first. Each available image runs in both modes back-to-back.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use agentic_vision::suite::TestSpec;
use agentic_vision::{
    ClientConfig, ExperimentPaths, Mode, TestRun, VisionClient, results_file_name,
    run_single_test, save_results, timestamp_now,
};

static FLOOR_PLAN_TESTS: &[TestSpec] = &[
    TestSpec {
        id: 201,
        name: "floor_plan",
        description: "Floor plan with pool, garage, multiple rooms",
        prompt: "Count how many trees are visible in this floor plan. Count how many doors are visible. Give me the exact counts.",
        images: &["floor_plan.jpg"],
        ground_truth: &[],
    },
    TestSpec {
        id: 202,
        name: "fittings",
        description: "Lighting plan with blue=new fittings, red=original",
        prompt: "This is a lighting plan. Count the new/extra fittings (blue squares and rectangles) and the original fittings (red circles). Give me exact counts for each category.",
        images: &["fittings.webp"],
        ground_truth: &[],
    },
];

#[derive(Parser, Debug)]
#[command(
    name = "test-floor-plans",
    about = "Run both modes over locally staged floor-plan images"
)]
struct Args {
    /// Experiment root directory (holds inputs/ and outputs/)
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let paths = ExperimentPaths::new(&args.root);
    paths.ensure().context("creating experiment directories")?;

    println!("{}", "=".repeat(60));
    println!("FLOOR PLAN VISION TESTS");
    println!("{}", "=".repeat(60));

    let mut available = Vec::new();
    for spec in FLOOR_PLAN_TESTS {
        let file_name = spec.images[0];
        if paths.inputs.join(file_name).exists() {
            println!("✓ Found: {file_name}");
            available.push(spec);
        } else {
            println!("✗ Missing: {file_name} - please save to inputs/");
        }
    }

    if available.is_empty() {
        println!("\nNo test images found. Please save images to:");
        for spec in FLOOR_PLAN_TESTS {
            println!("  {}", paths.inputs.join(spec.images[0]).display());
        }
        bail!("no images available");
    }

    let client = VisionClient::new(ClientConfig::from_env()?)?;

    let mut all_runs: Vec<TestRun> = Vec::new();
    for spec in &available {
        println!("\nTest: {} ({})", spec.name, spec.description);

        for mode in [Mode::CodeOff, Mode::CodeOn] {
            let run = run_single_test(&client, &paths, spec, mode).await?;
            all_runs.push(run);
        }
    }

    let file_name = results_file_name(&timestamp_now());
    let output_path = save_results(&paths, &all_runs, &file_name)?;

    println!("\n{}", "=".repeat(60));
    println!("SUMMARY");
    println!("{}", "=".repeat(60));

    for pair in all_runs.chunks(2) {
        let [off_run, on_run] = pair else { continue };
        println!("\n{}:", off_run.test_name);
        println!("  Code OFF: {}...", preview(off_run, 200));
        println!("  Code ON:  {}...", preview(on_run, 200));
        if let Some(on_result) = on_run.results.first() {
            println!(
                "            (code blocks: {}, annotated images: {})",
                on_result.code_blocks_executed(),
                on_result.images_generated
            );
        }
    }

    println!("\nResults saved to: {}", output_path.display());
    println!("Screenshots: {}", paths.screenshots.display());
    println!("\nNext: run compare-results to generate the comparison report");

    Ok(())
}

fn preview(run: &TestRun, limit: usize) -> String {
    run.results
        .first()
        .map(|r| {
            r.response_text
                .chars()
                .take(limit)
                .map(|c| if c == '\n' { ' ' } else { c })
                .collect()
        })
        .unwrap_or_default()
}
