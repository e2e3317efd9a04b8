//! Accelerated-kernel substitution configuration for model loading.
//!
//! At model-load time a host framework can swap default implementations of
//! operations like RMSNorm or SiLU for hardware-optimized kernels pulled from
//! hub repositories. This crate owns the configuration half of that: deciding
//! whether a given model is eligible and attaching the substitution table to
//! its config before the model is built. The dispatch runtime that performs
//! the actual swap is an external collaborator.
//!
//! ## Quick Start
//!
//! ```rust
//! use kernels_config::{apply_kernels, ModelArguments, ModelConfig};
//!
//! let mut config = ModelConfig::new("qwen3");
//! let args = ModelArguments::new().with_hf_kernels(true);
//!
//! // Best-effort: attaches the substitution table or logs why it didn't.
//! apply_kernels(&mut config, &args);
//! assert!(config.kernels_config.is_some());
//! ```
//!
//! ## Module Organization
//!
//! - [`apply`] - The applier: gating logic, outcomes, fire-and-forget wrappers
//! - [`config`] - `ModelConfig` / `ModelArguments` records
//! - [`mapping`] - Substitution tables and the supported-model allow-list
//! - [`reference`] - `"repo/name:symbol"` kernel reference parsing
//! - [`version`] - Runtime version gate for the checked appliers
//!
//! Substitution is an optimization, never a correctness requirement: nothing
//! in this crate panics on caller input, and the `apply_*` entry points never
//! return an error at all.

pub mod apply;
pub mod config;
pub mod error;
pub mod mapping;
pub mod reference;
pub mod version;

pub use apply::{
    apply_kernels, apply_kernels_checked, configure_kernels, configure_kernels_checked,
    KernelsStatus, SkipReason,
};
pub use config::{ModelArguments, ModelConfig};
pub use error::{KernelsError, KernelsResult};
pub use mapping::{is_supported_model_type, Backend, KernelMapping, SUPPORTED_MODEL_TYPES};
pub use reference::KernelRef;
pub use version::{
    KernelsRuntime, NoopRuntime, RuntimeVersion, StaticRuntime, MIN_RUNTIME_VERSION,
};
