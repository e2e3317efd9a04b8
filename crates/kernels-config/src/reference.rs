//! Kernel reference parsing - turns `"repo/name:symbol"` strings into
//! structured references for registry lookup.
//!
//! Kernel implementations are distributed as hub repositories; a reference
//! names the repository and the symbol to load from it, e.g.
//! `"kernels-community/activations:SiLU"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{KernelsError, KernelsResult};

/// A packaged kernel implementation reference.
///
/// # Examples
///
/// ```
/// use kernels_config::KernelRef;
///
/// let r: KernelRef = "kernels-community/activations:SiLU".parse().unwrap();
/// assert_eq!(r.repo_id(), "kernels-community/activations");
/// assert_eq!(r.symbol(), "SiLU");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KernelRef {
    repo_id: String,
    symbol: String,
}

impl KernelRef {
    /// Create a reference from its parts, validating both.
    pub fn new(repo_id: impl Into<String>, symbol: impl Into<String>) -> KernelsResult<Self> {
        let repo_id = repo_id.into();
        let symbol = symbol.into();

        if repo_id.is_empty() {
            return Err(KernelsError::invalid_ref(
                format!(":{symbol}"),
                "empty repository id",
            ));
        }
        if !repo_id.contains('/') {
            return Err(KernelsError::invalid_ref(
                format!("{repo_id}:{symbol}"),
                "repository id must be '<namespace>/<name>'",
            ));
        }
        if symbol.is_empty() {
            return Err(KernelsError::invalid_ref(
                format!("{repo_id}:"),
                "empty kernel symbol",
            ));
        }

        Ok(Self { repo_id, symbol })
    }

    /// Hub repository id, e.g. `"kernels-community/activations"`.
    pub fn repo_id(&self) -> &str {
        &self.repo_id
    }

    /// Symbol to load from the repository, e.g. `"SiLU"`.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl FromStr for KernelRef {
    type Err = KernelsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Split at the last ':' so repository names containing ':' never
        // swallow the symbol.
        let Some(colon) = s.rfind(':') else {
            return Err(KernelsError::invalid_ref(s, "missing ':' separator"));
        };
        KernelRef::new(&s[..colon], &s[colon + 1..])
    }
}

impl fmt::Display for KernelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repo_id, self.symbol)
    }
}

impl TryFrom<String> for KernelRef {
    type Error = KernelsError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<KernelRef> for String {
    fn from(r: KernelRef) -> Self {
        r.to_string()
    }
}
