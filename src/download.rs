//! Sample-image fetching for the construction-domain scenarios
//!
//! Most inputs (hands, coins, receipts) have to be photographed manually;
//! the construction images come from stock-photo direct links. Downloads
//! are best-effort: a failed fetch is reported and the batch continues.

use std::path::Path;
use std::time::Duration;

use crate::Result;
use crate::config::ExperimentPaths;
use crate::retry::{RetryConfig, retry_transient};

/// A stock image the downloader can fetch directly
#[derive(Debug, Clone, Copy)]
pub struct SampleImage {
    pub file_name: &'static str,
    pub url: &'static str,
}

/// Direct stock-photo links (no API key needed)
pub static SAMPLE_IMAGES: &[SampleImage] = &[
    SampleImage {
        file_name: "rebar_grid_1.jpg",
        url: "https://images.unsplash.com/photo-1504307651254-35680f356dfd?w=1200",
    },
    SampleImage {
        file_name: "rebar_grid_2.jpg",
        url: "https://images.unsplash.com/photo-1541888946425-d81bb19240f5?w=1200",
    },
    SampleImage {
        file_name: "construction_ppe_1.jpg",
        url: "https://images.unsplash.com/photo-1504307651254-35680f356dfd?w=1200",
    },
    SampleImage {
        file_name: "construction_ppe_2.jpg",
        url: "https://images.unsplash.com/photo-1581094794329-c8112a89af12?w=1200",
    },
];

/// Images that have to be provided manually, with a hint each
pub static MANUAL_IMAGES: &[&str] = &[
    "fingers_1.jpg - Photo of hand showing 1 finger",
    "fingers_3.jpg - Photo of hand showing 3 fingers",
    "fingers_5.jpg - Photo of hand showing 5 fingers",
    "fingers_7.jpg - Photo of hand showing 7 fingers",
    "fingers_10.jpg - Photo of two hands showing 10 fingers",
    "coins_8.jpg - Photo of 8 coins on a surface",
    "coins_15.jpg - Photo of 15 coins on a surface",
    "coins_23.jpg - Photo of 23 coins on a surface",
    "receipt_1.jpg - Photo of a receipt with known total",
    "receipt_2.jpg - Photo of another receipt with known total",
    "table_financial.png - Screenshot of a financial table",
    "table_materials.jpg - Photo of a construction materials list",
    "blueprint_1.png - Floor plan with measurements",
    "blueprint_2.png - Another floor plan with measurements",
    "rebar_stack.jpg - Photo of stacked rebar with countable pieces",
    "construction_ppe_3.jpg - Photo of worker with various PPE items",
];

/// Fetch one image to `dest`, returning the payload size in bytes
pub async fn download_image(http: &reqwest::Client, url: &str, dest: &Path) -> Result<u64> {
    let response = http.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    std::fs::write(dest, &bytes)?;
    Ok(bytes.len() as u64)
}

/// Download every sample image not already present in `inputs/`.
///
/// Each fetch is retried once on transient failure; a file that still
/// fails is reported and skipped. Returns how many images are in place
/// afterwards.
pub async fn download_samples(paths: &ExperimentPaths) -> Result<usize> {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    let mut in_place = 0;
    for sample in SAMPLE_IMAGES {
        let dest = paths.inputs.join(sample.file_name);

        if dest.exists() {
            println!("  ⚠ {} already exists, skipping", sample.file_name);
            in_place += 1;
            continue;
        }

        println!("  Downloading {}...", sample.file_name);
        let fetched = retry_transient(RetryConfig::default().with_max_attempts(2), || {
            download_image(&http, sample.url, &dest)
        })
        .await;

        match fetched {
            Ok(bytes) => {
                println!(
                    "  ✓ Saved {} ({:.1} KB)",
                    sample.file_name,
                    bytes as f64 / 1024.0
                );
                in_place += 1;
            }
            Err(err) => println!("  ✗ Failed to download {}: {err}", sample.file_name),
        }
    }

    Ok(in_place)
}

/// Write `inputs/README.md` listing the images still needed manually
pub fn write_image_checklist(paths: &ExperimentPaths) -> Result<std::path::PathBuf> {
    let mut readme = String::from("# Input Images Needed\n\n");
    readme.push_str("## Images to provide manually:\n\n");
    for image in MANUAL_IMAGES {
        readme.push_str(&format!("- [ ] `{image}`\n"));
    }
    readme.push_str("\n## Downloaded automatically:\n\n");
    for sample in SAMPLE_IMAGES {
        readme.push_str(&format!("- [x] `{}`\n", sample.file_name));
    }

    let readme_path = paths.inputs.join("README.md");
    std::fs::write(&readme_path, readme)?;
    Ok(readme_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_file_names_are_unique() {
        let mut names: Vec<&str> = SAMPLE_IMAGES.iter().map(|s| s.file_name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SAMPLE_IMAGES.len());
    }

    #[test]
    fn test_checklist_written_to_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ExperimentPaths::new(dir.path());
        paths.ensure().unwrap();

        let readme_path = write_image_checklist(&paths).unwrap();
        assert_eq!(readme_path, paths.inputs.join("README.md"));

        let contents = std::fs::read_to_string(readme_path).unwrap();
        assert!(contents.contains("- [ ] `fingers_1.jpg"));
        assert!(contents.contains("- [x] `rebar_grid_1.jpg`"));
    }
}
