//! Kernel configuration applier.
//!
//! Decides, for a loaded model config and the user's run arguments, whether to
//! attach the default kernel substitution table before the model is built.
//! Substitution is an optimization, never a correctness requirement, so no
//! path through this module is fatal to model loading: the `configure_*`
//! functions report an explicit outcome, and the `apply_*` wrappers log it and
//! swallow any error.

use std::fmt;

use log::{debug, info, warn};

use crate::config::{ModelArguments, ModelConfig};
use crate::error::KernelsResult;
use crate::mapping::{is_supported_model_type, KernelMapping};
use crate::version::{KernelsRuntime, RuntimeVersion, MIN_RUNTIME_VERSION};

/// Why kernel substitution was not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `enable_hf_kernels` was off.
    KernelsDisabled,

    /// The substitution runtime is missing or predates the minimum.
    RuntimeTooOld {
        /// Installed version, if any runtime was found
        found: Option<RuntimeVersion>,
        /// Minimum version the appliers require
        required: RuntimeVersion,
    },

    /// The model family has no registered substitutions.
    UnsupportedModelType(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::KernelsDisabled => write!(f, "kernel substitution is disabled"),
            SkipReason::RuntimeTooOld {
                found: Some(found),
                required,
            } => write!(
                f,
                "kernels runtime {found} predates the required {required}"
            ),
            SkipReason::RuntimeTooOld {
                found: None,
                required,
            } => write!(f, "no kernels runtime found, {required} or newer is required"),
            SkipReason::UnsupportedModelType(model_type) => write!(
                f,
                "model type '{model_type}' has no registered kernel substitutions"
            ),
        }
    }
}

/// Outcome of a configure call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelsStatus {
    /// The substitution table was attached to the config.
    Applied,
    /// The config was left untouched.
    Skipped(SkipReason),
}

impl KernelsStatus {
    /// Whether the table was attached.
    pub fn is_applied(&self) -> bool {
        matches!(self, KernelsStatus::Applied)
    }
}

/// Attach the default kernel substitution table to `config` if every gate
/// passes.
///
/// Gates, in order, short-circuiting:
/// 1. `model_args.enable_hf_kernels` must be on.
/// 2. `config.model_type` must be a supported model family.
///
/// The config is modified only on `Ok(KernelsStatus::Applied)`; every other
/// return leaves it untouched. Errors come from table construction and are
/// recoverable by treating them as "not applied".
pub fn configure_kernels(
    config: &mut ModelConfig,
    model_args: &ModelArguments,
) -> KernelsResult<KernelsStatus> {
    if !model_args.enable_hf_kernels {
        return Ok(KernelsStatus::Skipped(SkipReason::KernelsDisabled));
    }

    if !is_supported_model_type(&config.model_type) {
        return Ok(KernelsStatus::Skipped(SkipReason::UnsupportedModelType(
            config.model_type.clone(),
        )));
    }

    config.kernels_config = Some(KernelMapping::training_default()?);
    Ok(KernelsStatus::Applied)
}

/// [`configure_kernels`], additionally gated on the substitution runtime
/// being at least [`MIN_RUNTIME_VERSION`].
pub fn configure_kernels_checked(
    config: &mut ModelConfig,
    model_args: &ModelArguments,
    runtime: &dyn KernelsRuntime,
) -> KernelsResult<KernelsStatus> {
    // The disabled gate stays first: a host that opted out gets no version
    // probe and no log line.
    if !model_args.enable_hf_kernels {
        return Ok(KernelsStatus::Skipped(SkipReason::KernelsDisabled));
    }

    if !runtime.supports(&MIN_RUNTIME_VERSION) {
        return Ok(KernelsStatus::Skipped(SkipReason::RuntimeTooOld {
            found: runtime.version(),
            required: MIN_RUNTIME_VERSION,
        }));
    }

    configure_kernels(config, model_args)
}

/// Fire-and-forget applier for the model-loading pipeline.
///
/// Logs the outcome and never fails: on error the config is simply left
/// without kernel substitutions, which is indistinguishable from the feature
/// being disabled.
pub fn apply_kernels(config: &mut ModelConfig, model_args: &ModelArguments) {
    log_outcome(configure_kernels(config, model_args));
}

/// Fire-and-forget applier with the runtime version gate.
pub fn apply_kernels_checked(
    config: &mut ModelConfig,
    model_args: &ModelArguments,
    runtime: &dyn KernelsRuntime,
) {
    log_outcome(configure_kernels_checked(config, model_args, runtime));
}

fn log_outcome(outcome: KernelsResult<KernelsStatus>) {
    match outcome {
        Ok(KernelsStatus::Applied) => {
            info!(target: "kernels_config", "huggingface kernels have been applied to the model config");
        }
        Ok(KernelsStatus::Skipped(SkipReason::KernelsDisabled)) => {}
        Ok(KernelsStatus::Skipped(reason @ SkipReason::UnsupportedModelType(_))) => {
            debug!(target: "kernels_config", "{reason}");
        }
        Ok(KernelsStatus::Skipped(reason @ SkipReason::RuntimeTooOld { .. })) => {
            warn!(target: "kernels_config", "{reason}");
        }
        Err(e) => {
            warn!(target: "kernels_config", "Failed to apply huggingface kernels: {e}");
        }
    }
}
