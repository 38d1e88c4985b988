//! Core types for the experiment harness
//!
//! The first half is the persisted result model: everything a run writes to
//! `outputs/raw/` and the comparison step reads back. Field names are stable
//! across writer and reader. The second half is the `generateContent` wire
//! format the client speaks (camelCase on the wire).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether the auxiliary code-execution tool was enabled for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    CodeOn,
    CodeOff,
}

impl Mode {
    /// Stable identifier used in file names and serialized runs
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::CodeOn => "code_on",
            Mode::CodeOff => "code_off",
        }
    }

    /// Human-readable heading used in the report
    pub fn label(&self) -> &'static str {
        match self {
            Mode::CodeOn => "Code Execution ON",
            Mode::CodeOff => "Code Execution OFF",
        }
    }

    /// True when the code-execution tool should be offered to the model
    pub fn enables_code(&self) -> bool {
        matches!(self, Mode::CodeOn)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome class of a single query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Success,
    Error,
    Skipped,
}

/// One observation of a single (image, mode) pairing.
///
/// Created once per API call and immutable thereafter; serialized to the raw
/// results file and deserialized for aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// File name of the input image
    pub image: String,

    pub status: QueryStatus,

    /// Free-form textual answer (empty on error/skip)
    #[serde(default)]
    pub response_text: String,

    /// Source of every code fragment the service executed while answering
    #[serde(default)]
    pub code_executed: Vec<String>,

    /// Stdout of each executed fragment
    #[serde(default)]
    pub code_results: Vec<String>,

    /// How many auxiliary images (annotations) the service produced
    #[serde(default)]
    pub images_generated: u32,

    /// Known correct count for this image, when the scenario defines one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_truth: Option<i64>,

    /// Upstream error message, preserved verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Why the image was skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl QueryResult {
    /// Result for an image that could not be queried at all
    pub fn skipped(image: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            status: QueryStatus::Skipped,
            response_text: String::new(),
            code_executed: Vec::new(),
            code_results: Vec::new(),
            images_generated: 0,
            ground_truth: None,
            error: None,
            reason: Some(reason.into()),
        }
    }

    /// Number of code fragments the service executed for this query
    pub fn code_blocks_executed(&self) -> usize {
        self.code_executed.len()
    }

    /// True when at least one code fragment ran
    pub fn used_code(&self) -> bool {
        !self.code_executed.is_empty()
    }
}

/// All results for one scenario under one mode, in input-list order.
///
/// Two runs of the same `test_name` under different modes correspond
/// positionally: index `i` refers to the same image in both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRun {
    pub test_id: u32,
    pub test_name: String,
    pub mode: Mode,
    pub results: Vec<QueryResult>,
}

/// Derived per-scenario comparison, computed on demand and never persisted
/// as a primary entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonStat {
    pub test_name: String,

    /// Length of the code-on sequence
    pub total_images: usize,

    /// Fraction correct with code execution, absent without ground truth
    pub code_on_accuracy: Option<f64>,

    /// Fraction correct without code execution, absent without ground truth
    pub code_off_accuracy: Option<f64>,

    /// Code-on results that executed at least one code block
    pub code_blocks_executed: usize,

    /// Total images generated across the code-on run
    pub images_annotated: u64,

    pub has_ground_truth: bool,
}

/// Structured result of one vision query, as the invoker boundary returns it.
///
/// Upstream failures never surface as errors here; they fold into
/// `success = false` with the message preserved in `error`.
#[derive(Debug, Clone, Default)]
pub struct VisionOutcome {
    pub success: bool,
    pub text: String,
    pub code_executed: Vec<String>,
    pub code_results: Vec<String>,
    pub images_generated: Vec<GeneratedImage>,
    pub error: Option<String>,
}

impl VisionOutcome {
    /// Failed outcome carrying the upstream message verbatim
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

/// An auxiliary image the service produced while answering, decoded
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

// ============================================================================
// generateContent wire format
// ============================================================================

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<WireTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One content entry: a role plus its parts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<WirePart>,
}

impl WireContent {
    /// User-role content with the given parts
    pub fn user(parts: Vec<WirePart>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }
}

/// One part of a content entry. Requests carry text and inline data;
/// responses additionally carry executed code and its results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<WireInlineData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable_code: Option<WireExecutableCode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_execution_result: Option<WireCodeExecutionResult>,
}

impl WirePart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Inline binary payload, already base64-encoded
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            inline_data: Some(WireInlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
            ..Default::default()
        }
    }
}

/// Base64-encoded binary payload with its MIME type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireInlineData {
    pub mime_type: String,
    pub data: String,
}

/// A code fragment the service executed while answering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireExecutableCode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub code: String,
}

/// Output of one executed code fragment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireCodeExecutionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Tool declaration; only code execution is ever offered
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_execution: Option<CodeExecutionTool>,
}

impl WireTool {
    /// The code-execution tool declaration (an empty object on the wire)
    pub fn code_execution() -> Self {
        Self {
            code_execution: Some(CodeExecutionTool {}),
        }
    }
}

/// Marker for enabling the service-side code-execution tool
#[derive(Debug, Clone, Default, Serialize)]
pub struct CodeExecutionTool {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub thinking_level: String,
}

/// Response body of `generateContent`
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<WireCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCandidate {
    #[serde(default)]
    pub content: Option<WireContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}
