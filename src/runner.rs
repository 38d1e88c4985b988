//! Sequential experiment execution
//!
//! One query completes (or fails) before the next is issued; nothing runs
//! concurrently. Per-image problems (a missing input file, an upstream
//! failure) are recorded in the run and never abort the remaining images.

use crate::Result;
use crate::client::VisionInvoker;
use crate::config::ExperimentPaths;
use crate::suite::TestSpec;
use crate::types::{GeneratedImage, Mode, QueryResult, QueryStatus, TestRun};

/// Run one scenario under one mode, producing its [`TestRun`].
///
/// Results appear in the scenario's image-list order, so two runs of the
/// same scenario pair positionally for comparison. Images the service
/// generated while answering are written under `outputs/screenshots/`.
pub async fn run_single_test(
    invoker: &dyn VisionInvoker,
    paths: &ExperimentPaths,
    spec: &TestSpec,
    mode: Mode,
) -> Result<TestRun> {
    println!("\n{}", "=".repeat(60));
    println!("Test {}: {} (mode={})", spec.id, spec.name, mode);
    println!("{}", "=".repeat(60));

    let mut results = Vec::with_capacity(spec.images.len());

    for (index, image_file) in spec.images.iter().enumerate() {
        let image_path = paths.inputs.join(image_file);

        if !image_path.exists() {
            println!("  ⚠ Skipping {image_file} - file not found");
            results.push(QueryResult::skipped(*image_file, "file not found"));
            continue;
        }

        println!("  Running: {image_file}...");
        let outcome = invoker
            .run_vision_query(&image_path, spec.prompt, mode.enables_code())
            .await;

        let images_generated =
            save_generated_images(paths, spec.name, image_file, mode, &outcome.images_generated)?;

        if outcome.success {
            let text_preview: String = outcome
                .text
                .chars()
                .take(100)
                .map(|c| if c == '\n' { ' ' } else { c })
                .collect();
            println!("    ✓ Response: {text_preview}...");
            if !outcome.code_executed.is_empty() {
                println!("    ✓ Code executed: {} blocks", outcome.code_executed.len());
            }
        } else {
            println!(
                "    ✗ Error: {}",
                outcome.error.as_deref().unwrap_or("Unknown")
            );
        }

        results.push(QueryResult {
            image: image_file.to_string(),
            status: if outcome.success {
                QueryStatus::Success
            } else {
                QueryStatus::Error
            },
            response_text: outcome.text,
            code_executed: outcome.code_executed,
            code_results: outcome.code_results,
            images_generated,
            ground_truth: spec.ground_truth_for(index),
            error: outcome.error,
            reason: None,
        });
    }

    Ok(TestRun {
        test_id: spec.id,
        test_name: spec.name.to_string(),
        mode,
        results,
    })
}

/// Write each generated image under the screenshots directory, returning
/// how many were produced.
fn save_generated_images(
    paths: &ExperimentPaths,
    test_name: &str,
    image_file: &str,
    mode: Mode,
    images: &[GeneratedImage],
) -> Result<u32> {
    for (index, image) in images.iter().enumerate() {
        let file_name = format!("{test_name}_{image_file}_{mode}_{index}.png");
        std::fs::write(paths.screenshots.join(&file_name), &image.data)?;
        println!("    Saved annotated image: {file_name}");
    }
    Ok(images.len() as u32)
}
