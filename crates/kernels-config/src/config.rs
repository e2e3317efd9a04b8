//! Model configuration and run-argument records.
//!
//! Both records are owned by the model-loading pipeline. This crate reads
//! `model_type` and `enable_hf_kernels` and may attach `kernels_config`;
//! everything else passes through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::KernelsResult;
use crate::mapping::KernelMapping;

/// Architecture configuration for a loaded model.
///
/// An open record: fields this crate does not know about are carried in
/// `extra`, so a config deserialized here and handed back to the pipeline
/// loses nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Architecture family tag, e.g. "qwen3".
    #[serde(default)]
    pub model_type: String,

    /// Attached kernel substitutions, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernels_config: Option<KernelMapping>,

    /// Pipeline-owned fields passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelConfig {
    /// Create a config for the given model family.
    pub fn new(model_type: impl Into<String>) -> Self {
        Self {
            model_type: model_type.into(),
            ..Default::default()
        }
    }

    /// Convert to JSON for handing back to the pipeline.
    pub fn to_json(&self) -> KernelsResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Create from a pipeline-supplied JSON config.
    pub fn from_json(json: &str) -> KernelsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// User-supplied run configuration consulted at model-load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelArguments {
    /// Opt in to accelerated-kernel substitution.
    #[serde(default)]
    pub enable_hf_kernels: bool,
}

impl ModelArguments {
    /// Create arguments with defaults (kernel substitution off).
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle kernel substitution.
    pub fn with_hf_kernels(mut self, enable: bool) -> Self {
        self.enable_hf_kernels = enable;
        self
    }
}
