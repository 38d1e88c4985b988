//! Download the stock sample images for the construction-domain tests.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use agentic_vision::{ExperimentPaths, SAMPLE_IMAGES, download_samples, write_image_checklist};

#[derive(Parser, Debug)]
#[command(
    name = "download-inputs",
    about = "Fetch the downloadable sample images into inputs/"
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

    println!("Downloading sample images for experiment...\n");

    let in_place = download_samples(&paths).await?;
    println!("\nDownloaded {}/{} images", in_place, SAMPLE_IMAGES.len());

    let readme_path = write_image_checklist(&paths)?;
    println!(
        "\nCreated {} with checklist of needed images",
        readme_path.display()
    );

    println!("\n{}", "=".repeat(50));
    println!("NEXT STEPS:");
    println!("{}", "=".repeat(50));
    println!("1. Check inputs/README.md for the list of images needed");
    println!("2. Take photos or find images for the manual items");
    println!("3. Place all images in the inputs/ folder");
    println!("4. Run: run-experiment");

    Ok(())
}
