//! Configuration helpers for the experiment harness

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Default endpoint of the vision model service
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model queried by every experiment
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Reasoning effort requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThinkingLevel {
    Low,
    Medium,
    High,
}

impl ThinkingLevel {
    /// Wire-format string for the generation config
    pub fn as_str(&self) -> &'static str {
        match self {
            ThinkingLevel::Low => "low",
            ThinkingLevel::Medium => "medium",
            ThinkingLevel::High => "high",
        }
    }

    /// Parse a thinking level from a string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(ThinkingLevel::Low),
            "medium" => Some(ThinkingLevel::Medium),
            "high" => Some(ThinkingLevel::High),
            _ => None,
        }
    }
}

/// Settings for the vision query client
///
/// Priority for each endpoint setting:
/// 1. Environment variable (`GOOGLE_API_KEY`, `AGENTIC_VISION_BASE_URL`,
///    `AGENTIC_VISION_MODEL`)
/// 2. Built-in default (no default exists for the API key)
#[derive(Clone)]
pub struct ClientConfig {
    /// API key sent with every request
    pub api_key: String,

    /// Service endpoint, without the model path
    pub base_url: String,

    /// Model name (e.g. "gemini-3-flash-preview")
    pub model: String,

    /// Reasoning effort requested from the model
    pub thinking_level: ThinkingLevel,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("thinking_level", &self.thinking_level)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Create a config with an explicit API key and all defaults
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            thinking_level: ThinkingLevel::Medium,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Resolve a config from the environment.
    ///
    /// `GOOGLE_API_KEY` is required; `AGENTIC_VISION_BASE_URL` and
    /// `AGENTIC_VISION_MODEL` override the built-in defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GOOGLE_API_KEY")
            .map_err(|_| Error::config("GOOGLE_API_KEY is not set"))?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = env::var("AGENTIC_VISION_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = env::var("AGENTIC_VISION_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_thinking_level(mut self, level: ThinkingLevel) -> Self {
        self.thinking_level = level;
        self
    }

    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Directory layout of one experiment root
///
/// ```text
/// <root>/
///   inputs/                test images
///   outputs/
///     raw/                 results JSON files
///     screenshots/         images generated by the model
/// ```
#[derive(Debug, Clone)]
pub struct ExperimentPaths {
    pub inputs: PathBuf,
    pub outputs: PathBuf,
    pub raw: PathBuf,
    pub screenshots: PathBuf,
}

impl ExperimentPaths {
    /// Derive the layout from an experiment root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let outputs = root.join("outputs");
        Self {
            inputs: root.join("inputs"),
            raw: outputs.join("raw"),
            screenshots: outputs.join("screenshots"),
            outputs,
        }
    }

    /// Create every directory in the layout
    pub fn ensure(&self) -> Result<()> {
        std::fs::create_dir_all(&self.inputs)?;
        std::fs::create_dir_all(&self.raw)?;
        std::fs::create_dir_all(&self.screenshots)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thinking_level_from_str() {
        assert_eq!(ThinkingLevel::from_str("low"), Some(ThinkingLevel::Low));
        assert_eq!(ThinkingLevel::from_str("Medium"), Some(ThinkingLevel::Medium));
        assert_eq!(ThinkingLevel::from_str("HIGH"), Some(ThinkingLevel::High));
        assert_eq!(ThinkingLevel::from_str("extreme"), None);
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.thinking_level, ThinkingLevel::Medium);
    }

    #[test]
    fn test_config_builders() {
        let config = ClientConfig::new("test-key")
            .with_base_url("http://localhost:9090/v1beta")
            .with_model("test-model")
            .with_thinking_level(ThinkingLevel::High)
            .with_timeout(30);

        assert_eq!(config.base_url, "http://localhost:9090/v1beta");
        assert_eq!(config.model, "test-model");
        assert_eq!(config.thinking_level, ThinkingLevel::High);
        assert_eq!(config.timeout, 30);
    }

    // Single test for every env-dependent path: process env is global, so
    // splitting these across tests would race under the parallel runner.
    #[test]
    fn test_from_env_resolution() {
        unsafe {
            env::remove_var("GOOGLE_API_KEY");
            env::remove_var("AGENTIC_VISION_BASE_URL");
            env::remove_var("AGENTIC_VISION_MODEL");
        }
        assert!(matches!(ClientConfig::from_env(), Err(Error::Config(_))));

        unsafe {
            env::set_var("GOOGLE_API_KEY", "env-key");
            env::set_var("AGENTIC_VISION_MODEL", "env-model");
        }
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.model, "env-model");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        unsafe {
            env::remove_var("GOOGLE_API_KEY");
            env::remove_var("AGENTIC_VISION_MODEL");
        }
    }

    #[test]
    fn test_config_debug_masks_api_key() {
        let config = ClientConfig::new("very-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_experiment_paths_layout() {
        let paths = ExperimentPaths::new("/tmp/exp");
        assert_eq!(paths.inputs, PathBuf::from("/tmp/exp/inputs"));
        assert_eq!(paths.outputs, PathBuf::from("/tmp/exp/outputs"));
        assert_eq!(paths.raw, PathBuf::from("/tmp/exp/outputs/raw"));
        assert_eq!(
            paths.screenshots,
            PathBuf::from("/tmp/exp/outputs/screenshots")
        );
    }
}
