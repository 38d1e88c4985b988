//! Vision query client
//!
//! This module is the harness's only boundary to the vision model service.
//! The [`VisionInvoker`] trait is the single callable contract the runner
//! depends on: one image, one prompt, one code-execution flag in; one
//! structured [`VisionOutcome`] out. Production code uses [`VisionClient`];
//! tests substitute a fabricated implementation and never touch the network.
//!
//! Upstream failures never escape the invoker as errors. A query that fails
//! after retries folds into an outcome with `success = false` and the
//! message preserved verbatim, so one bad image cannot abort a batch.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::config::ClientConfig;
use crate::retry::{RetryConfig, retry_transient};
use crate::types::{
    GenerateRequest, GenerateResponse, GeneratedImage, GenerationConfig, ThinkingConfig,
    VisionOutcome, WireContent, WirePart, WireTool,
};
use crate::{Error, Result};

/// The single callable contract for issuing vision queries.
#[async_trait]
pub trait VisionInvoker {
    /// Run one image+prompt query with code execution optionally enabled.
    ///
    /// Failures do not propagate as errors; they are folded into the
    /// returned outcome with the upstream message preserved.
    async fn run_vision_query(
        &self,
        image_path: &Path,
        prompt: &str,
        code_execution: bool,
    ) -> VisionOutcome;
}

/// Client for the `generateContent` vision API.
pub struct VisionClient {
    config: ClientConfig,
    http: reqwest::Client,
    retry: RetryConfig,
}

impl VisionClient {
    /// Create a client with the configured request timeout.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            config,
            http,
            retry: RetryConfig::default(),
        })
    }

    /// Override the retry policy applied around each request.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error (failed to read response body)".to_string());
            return Err(Error::api(format!("API error {status}: {body}")));
        }

        response.json::<GenerateResponse>().await.map_err(Error::Http)
    }

    /// Text-only probe used before a run to fail fast on bad credentials.
    ///
    /// Returns `Ok(true)` when the model echoes the expected confirmation.
    pub async fn test_connection(&self) -> Result<bool> {
        let request = GenerateRequest {
            contents: vec![WireContent::user(vec![WirePart::text(
                "Say 'API connection successful' and nothing else.",
            )])],
            tools: None,
            generation_config: None,
        };

        let response = self.generate(&request).await?;
        let outcome = collect_outcome(response);
        Ok(outcome.text.to_lowercase().contains("successful"))
    }
}

#[async_trait]
impl VisionInvoker for VisionClient {
    async fn run_vision_query(
        &self,
        image_path: &Path,
        prompt: &str,
        code_execution: bool,
    ) -> VisionOutcome {
        let image = match load_image_part(image_path) {
            Ok(part) => part,
            Err(err) => return VisionOutcome::failure(err.to_string()),
        };

        let request = GenerateRequest {
            contents: vec![WireContent::user(vec![image, WirePart::text(prompt)])],
            tools: code_execution.then(|| vec![WireTool::code_execution()]),
            generation_config: Some(GenerationConfig {
                thinking_config: Some(ThinkingConfig {
                    thinking_level: self.config.thinking_level.as_str().to_string(),
                }),
            }),
        };

        match retry_transient(self.retry.clone(), || self.generate(&request)).await {
            Ok(response) => collect_outcome(response),
            Err(err) => VisionOutcome::failure(err.to_string()),
        }
    }
}

/// Read an image file into an inline-data part with its MIME type.
fn load_image_part(image_path: &Path) -> Result<WirePart> {
    let data = std::fs::read(image_path)?;
    Ok(WirePart::inline_data(
        mime_type_for(image_path),
        BASE64.encode(data),
    ))
}

/// MIME type from the file extension, defaulting to JPEG.
fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// Flatten every candidate part of a response into a successful outcome.
fn collect_outcome(response: GenerateResponse) -> VisionOutcome {
    let mut outcome = VisionOutcome {
        success: true,
        ..Default::default()
    };

    for candidate in response.candidates {
        let Some(content) = candidate.content else {
            continue;
        };
        for part in content.parts {
            if let Some(text) = part.text {
                outcome.text.push_str(&text);
            }
            if let Some(code) = part.executable_code {
                outcome.code_executed.push(code.code);
            }
            if let Some(result) = part.code_execution_result {
                if let Some(output) = result.output {
                    outcome.code_results.push(output);
                }
            }
            if let Some(inline) = part.inline_data {
                match BASE64.decode(inline.data.as_bytes()) {
                    Ok(bytes) => outcome.images_generated.push(GeneratedImage {
                        mime_type: inline.mime_type,
                        data: bytes,
                    }),
                    Err(err) => {
                        eprintln!("WARNING: discarding generated image with bad payload: {err}");
                    }
                }
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mime_type_for_extensions() {
        assert_eq!(mime_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("a.JPEG")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("a.png")), "image/png");
        assert_eq!(mime_type_for(Path::new("a.webp")), "image/webp");
        assert_eq!(mime_type_for(Path::new("a.gif")), "image/gif");
        assert_eq!(mime_type_for(Path::new("a.bmp")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("no_extension")), "image/jpeg");
    }

    #[test]
    fn test_collect_outcome_gathers_all_parts() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "I count "},
                        {"executableCode": {"language": "PYTHON", "code": "print(8)"}},
                        {"codeExecutionResult": {"outcome": "OUTCOME_OK", "output": "8\n"}},
                        {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}},
                        {"text": "8 coins."}
                    ]
                }
            }]
        }"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();

        let outcome = collect_outcome(response);
        assert!(outcome.success);
        assert_eq!(outcome.text, "I count 8 coins.");
        assert_eq!(outcome.code_executed, vec!["print(8)".to_string()]);
        assert_eq!(outcome.code_results, vec!["8\n".to_string()]);
        assert_eq!(outcome.images_generated.len(), 1);
        assert_eq!(outcome.images_generated[0].mime_type, "image/png");
        assert_eq!(outcome.images_generated[0].data, b"hello");
    }

    #[test]
    fn test_collect_outcome_empty_response() {
        let response: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        let outcome = collect_outcome(response);
        assert!(outcome.success);
        assert!(outcome.text.is_empty());
        assert!(outcome.images_generated.is_empty());
    }

    #[test]
    fn test_collect_outcome_discards_bad_image_payload() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"mimeType": "image/png", "data": "!!not-base64!!"}}]
                }
            }]
        }"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        let outcome = collect_outcome(response);
        assert!(outcome.images_generated.is_empty());
    }

    #[tokio::test]
    async fn test_missing_image_folds_into_failed_outcome() {
        let client = VisionClient::new(ClientConfig::new("test-key")).unwrap();
        let missing = PathBuf::from("/definitely/not/here.jpg");

        let outcome = client
            .run_vision_query(&missing, "Count the coins.", false)
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.is_some());
        assert!(outcome.text.is_empty());
    }
}
