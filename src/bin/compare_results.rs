//! Compare code execution ON vs OFF results and generate the report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use agentic_vision::{
    ExperimentPaths, analyze_runs, find_latest_results, load_results, print_summary,
    render_report,
};

#[derive(Parser, Debug)]
#[command(
    name = "compare-results",
    about = "Generate the code-on vs code-off comparison report"
)]
struct Args {
    /// Experiment root directory (holds inputs/ and outputs/)
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Compare a specific results file instead of the newest one
    #[arg(long)]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Comparing experiment results...\n");

    let paths = ExperimentPaths::new(&args.root);
    let results_path = match args.file {
        Some(path) => path,
        None => find_latest_results(&paths)?,
    };
    println!(
        "Loading: {}",
        results_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| results_path.display().to_string())
    );

    let runs = load_results(&results_path)
        .with_context(|| format!("reading {}", results_path.display()))?;
    let comparison = analyze_runs(&runs)?;

    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
    let report = render_report(&runs, &comparison, &generated_at);

    let report_path = paths.outputs.join("comparison.md");
    std::fs::write(&report_path, report)
        .with_context(|| format!("writing {}", report_path.display()))?;
    println!("\nReport saved to: {}", report_path.display());

    let stats_path = paths.outputs.join("comparison_stats.json");
    std::fs::write(&stats_path, serde_json::to_string_pretty(&comparison)?)
        .with_context(|| format!("writing {}", stats_path.display()))?;
    println!("Stats saved to: {}", stats_path.display());

    println!("\n{}", "=".repeat(50));
    println!("COMPARISON SUMMARY");
    println!("{}", "=".repeat(50));
    print_summary(&comparison);

    Ok(())
}
