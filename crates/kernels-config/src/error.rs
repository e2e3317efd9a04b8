//! Unified error types for the kernels-config public API.
//!
//! Everything that can go wrong while building or attaching a kernel
//! substitution table surfaces as a [`KernelsError`]. None of these are fatal
//! to model loading: the fire-and-forget appliers in [`crate::apply`] log them
//! and carry on, and hosts that call the outcome-returning variants decide the
//! log severity themselves.

use thiserror::Error;

/// The canonical error type for kernels-config public API.
#[derive(Error, Debug)]
pub enum KernelsError {
    /// A kernel reference string did not parse.
    #[error("Invalid kernel reference '{reference}': {reason}")]
    InvalidKernelRef {
        /// The offending reference string
        reference: String,
        /// Why it was rejected
        reason: String,
    },

    /// A runtime version string did not parse.
    #[error("Invalid runtime version '{version}': {reason}")]
    InvalidVersion {
        /// The offending version string
        version: String,
        /// Why it was rejected
        reason: String,
    },

    /// An operation was registered without any backend entries.
    #[error("Empty backend table for op '{0}'")]
    EmptyBackends(String),

    /// Serialization/deserialization error (JSON)
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for kernels-config.
pub type KernelsResult<T> = Result<T, KernelsError>;

impl From<serde_json::Error> for KernelsError {
    fn from(e: serde_json::Error) -> Self {
        KernelsError::Serialization(e.to_string())
    }
}

impl KernelsError {
    /// Create an invalid kernel reference error.
    pub fn invalid_ref(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        KernelsError::InvalidKernelRef {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid runtime version error.
    pub fn invalid_version(version: impl Into<String>, reason: impl Into<String>) -> Self {
        KernelsError::InvalidVersion {
            version: version.into(),
            reason: reason.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        KernelsError::Serialization(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_ref_display() {
        let err = KernelsError::invalid_ref("activations", "missing ':' separator");
        assert_eq!(
            err.to_string(),
            "Invalid kernel reference 'activations': missing ':' separator"
        );
    }

    #[test]
    fn test_empty_backends_display() {
        let err = KernelsError::EmptyBackends("RMSNorm".to_string());
        assert_eq!(err.to_string(), "Empty backend table for op 'RMSNorm'");
    }

    #[test]
    fn test_json_error_conversion() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("not json {");
        let err: KernelsError = result.unwrap_err().into();
        assert!(matches!(err, KernelsError::Serialization(_)));
    }
}
