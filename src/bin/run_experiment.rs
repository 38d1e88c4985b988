//! Main experiment runner.
//!
//! ```text
//! run-experiment                # Run all tests, both modes
//! run-experiment --test 1      # Run a single scenario
//! run-experiment --baseline    # Code execution OFF only
//! run-experiment --treatment   # Code execution ON only
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use agentic_vision::{
    ClientConfig, ExperimentPaths, Mode, VisionClient, results_file_name, run_single_test,
    save_results, suite, timestamp_now,
};

#[derive(Parser, Debug)]
#[command(name = "run-experiment", about = "Run the agentic vision experiments")]
struct Args {
    /// Run a specific test scenario (1-7)
    #[arg(long)]
    test: Option<u32>,

    /// Run baseline only (code execution OFF)
    #[arg(long)]
    baseline: bool,

    /// Run treatment only (code execution ON)
    #[arg(long, conflicts_with = "baseline")]
    treatment: bool,

    /// Experiment root directory (holds inputs/ and outputs/)
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let paths = ExperimentPaths::new(&args.root);
    paths.ensure().context("creating experiment directories")?;

    let config = ClientConfig::from_env()?;
    let client = VisionClient::new(config)?;

    println!("Testing API connection...");
    match client.test_connection().await {
        Ok(true) => println!("✓ API connection successful\n"),
        Ok(false) => bail!("API connection test returned an unexpected reply"),
        Err(err) => bail!("API connection failed: {err}. Check your GOOGLE_API_KEY"),
    }

    let specs: Vec<&suite::TestSpec> = match args.test {
        Some(id) => {
            let Some(spec) = suite::find_test(id) else {
                bail!("unknown test id: {id}");
            };
            vec![spec]
        }
        None => suite::BUILTIN_SUITE.iter().collect(),
    };

    let modes: &[Mode] = if args.baseline {
        &[Mode::CodeOff]
    } else if args.treatment {
        &[Mode::CodeOn]
    } else {
        &[Mode::CodeOff, Mode::CodeOn]
    };

    let mut all_runs = Vec::new();
    for mode in modes {
        println!("\n{}", "#".repeat(60));
        println!("# Running: {}", mode.as_str().to_uppercase());
        println!("{}", "#".repeat(60));

        for spec in &specs {
            let run = run_single_test(&client, &paths, spec, *mode).await?;
            all_runs.push(run);
        }
    }

    let file_name = results_file_name(&timestamp_now());
    let output_path = save_results(&paths, &all_runs, &file_name)?;

    println!("\n{}", "=".repeat(60));
    println!("EXPERIMENT COMPLETE");
    println!("{}", "=".repeat(60));
    println!("Tests run: {}", specs.len());
    println!(
        "Modes: {:?}",
        modes.iter().map(Mode::as_str).collect::<Vec<_>>()
    );
    println!("Results saved to: {}", output_path.display());
    println!("\nNext: run compare-results to generate the comparison report");

    Ok(())
}
