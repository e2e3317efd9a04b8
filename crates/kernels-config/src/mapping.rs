//! Kernel substitution tables and the supported-model allow-list.
//!
//! Both the set of eligible model families and the default substitution table
//! are declarative data, kept separate from the gating logic so expanding
//! coverage is a table edit.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{KernelsError, KernelsResult};
use crate::reference::KernelRef;

/// Hardware execution target for a kernel substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// NVIDIA CUDA GPUs
    Cuda,
    /// Neural processing units
    Npu,
}

impl Backend {
    /// Convert to string representation for FFI/JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Cuda => "cuda",
            Backend::Npu => "npu",
        }
    }
}

/// Model families eligible for kernel substitution.
///
/// The substitution runtime handles hardware dispatch on its own; this list
/// only tracks which architectures the table below has been validated against.
pub const SUPPORTED_MODEL_TYPES: &[&str] = &[
    "llama",
    "qwen2",
    "qwen2_vl",
    "qwen2_5_vl",
    "qwen3",
    "qwen3_moe",
];

/// Whether a model family is eligible for kernel substitution.
pub fn is_supported_model_type(model_type: &str) -> bool {
    SUPPORTED_MODEL_TYPES.contains(&model_type)
}

/// Default substitutions attached at model-load time.
const DEFAULT_KERNELS: &[(&str, &[(Backend, &str)])] = &[
    (
        "SiLU",
        &[(Backend::Cuda, "kernels-community/activations:SiLU")],
    ),
    (
        "RMSNorm",
        &[
            (Backend::Cuda, "kernels-community/liger_kernels:LigerRMSNorm"),
            (Backend::Npu, "kernels-ext-npu/rmsnorm:rmsnorm"),
        ],
    ),
];

/// A table of kernel substitutions: logical operation name to a per-backend
/// set of kernel references.
///
/// A mapping is built fresh for each config it is attached to and is not
/// shared afterwards. Every registered op must carry at least one backend
/// entry; [`KernelMapping::insert`] enforces this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KernelMapping {
    entries: BTreeMap<String, BTreeMap<Backend, KernelRef>>,
}

impl KernelMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default table for supported architectures.
    pub fn training_default() -> KernelsResult<Self> {
        let mut mapping = Self::new();
        for (op, backends) in DEFAULT_KERNELS {
            let mut table = BTreeMap::new();
            for (backend, reference) in *backends {
                table.insert(*backend, reference.parse::<KernelRef>()?);
            }
            mapping.insert(*op, table)?;
        }
        Ok(mapping)
    }

    /// Register the backend table for an op, replacing any previous entry.
    ///
    /// Rejects an empty backend table: an op with no implementations would
    /// silently disable the default for that op downstream.
    pub fn insert(
        &mut self,
        op: impl Into<String>,
        backends: BTreeMap<Backend, KernelRef>,
    ) -> KernelsResult<()> {
        let op = op.into();
        if backends.is_empty() {
            return Err(KernelsError::EmptyBackends(op));
        }
        self.entries.insert(op, backends);
        Ok(())
    }

    /// Backend table for an op, if registered.
    pub fn get(&self, op: &str) -> Option<&BTreeMap<Backend, KernelRef>> {
        self.entries.get(op)
    }

    /// Registered operation names, in sorted order.
    pub fn ops(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered ops.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no ops are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_as_str() {
        assert_eq!(Backend::Cuda.as_str(), "cuda");
        assert_eq!(Backend::Npu.as_str(), "npu");
    }

    #[test]
    fn test_supported_model_types() {
        for model_type in SUPPORTED_MODEL_TYPES {
            assert!(is_supported_model_type(model_type));
        }
        assert!(!is_supported_model_type("gpt2"));
        assert!(!is_supported_model_type(""));
    }

    #[test]
    fn test_training_default_contents() {
        let mapping = KernelMapping::training_default().unwrap();
        assert_eq!(mapping.len(), 2);

        let silu = mapping.get("SiLU").unwrap();
        assert_eq!(
            silu.get(&Backend::Cuda).unwrap().to_string(),
            "kernels-community/activations:SiLU"
        );

        let rms_norm = mapping.get("RMSNorm").unwrap();
        assert_eq!(rms_norm.len(), 2);
        assert_eq!(
            rms_norm.get(&Backend::Npu).unwrap().repo_id(),
            "kernels-ext-npu/rmsnorm"
        );
    }

    #[test]
    fn test_insert_rejects_empty_backend_table() {
        let mut mapping = KernelMapping::new();
        let err = mapping.insert("RMSNorm", BTreeMap::new()).unwrap_err();
        assert!(err.to_string().contains("RMSNorm"));
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_insert_replaces_previous_entry() {
        let mut mapping = KernelMapping::new();
        let mut table = BTreeMap::new();
        table.insert(
            Backend::Cuda,
            "ns/activations:SiLU".parse::<KernelRef>().unwrap(),
        );
        mapping.insert("SiLU", table).unwrap();

        let mut replacement = BTreeMap::new();
        replacement.insert(
            Backend::Cuda,
            "other/activations:FastSiLU".parse::<KernelRef>().unwrap(),
        );
        mapping.insert("SiLU", replacement).unwrap();

        assert_eq!(mapping.len(), 1);
        assert_eq!(
            mapping.get("SiLU").unwrap().get(&Backend::Cuda).unwrap().symbol(),
            "FastSiLU"
        );
    }

    #[test]
    fn test_mapping_json_shape() {
        let mapping = KernelMapping::training_default().unwrap();
        let json = serde_json::to_value(&mapping).unwrap();
        assert_eq!(
            json["SiLU"]["cuda"],
            serde_json::json!("kernels-community/activations:SiLU")
        );
        assert_eq!(
            json["RMSNorm"]["npu"],
            serde_json::json!("kernels-ext-npu/rmsnorm:rmsnorm")
        );
    }
}
