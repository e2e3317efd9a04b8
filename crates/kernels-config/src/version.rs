//! Supporting-runtime version gate.
//!
//! The checked appliers only attach kernels when the substitution runtime the
//! host links against is recent enough. The runtime itself stays an external
//! collaborator behind [`KernelsRuntime`]: hosts implement it with whatever
//! version detection they have, and tests swap in a fixed version.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{KernelsError, KernelsResult};

/// Minimum runtime version required by the checked appliers.
pub const MIN_RUNTIME_VERSION: RuntimeVersion = RuntimeVersion {
    major: 5,
    minor: 0,
    patch: 0,
    rc: Some(0),
};

/// A `major.minor.patch` runtime version with an optional release-candidate
/// tag.
///
/// Accepts the dashed forms `"5.0.0-rc0"` / `"5.0.0-rc.0"` as well as the
/// compact `"5.0.0rc0"` some runtimes report. A release candidate orders
/// before the release with the same triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuntimeVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    /// Release-candidate number, if this is a pre-release.
    pub rc: Option<u32>,
}

impl RuntimeVersion {
    /// Create a release version.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            rc: None,
        }
    }

    /// Create a release-candidate version.
    pub fn release_candidate(major: u32, minor: u32, patch: u32, rc: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            rc: Some(rc),
        }
    }
}

impl Ord for RuntimeVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (self.rc, other.rc) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(&b),
            })
    }
}

impl PartialOrd for RuntimeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for RuntimeVersion {
    type Err = KernelsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(KernelsError::invalid_version(s, "empty version string"));
        }

        // Numeric core ends at the first character that is neither a digit
        // nor a '.'; whatever follows is the pre-release tag.
        let tag_start = trimmed
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(trimmed.len());
        let (core, tag) = trimmed.split_at(tag_start);

        let mut parts = core.split('.');
        let mut component = |name: &str| -> KernelsResult<u32> {
            parts
                .next()
                .filter(|p| !p.is_empty())
                .and_then(|p| p.parse().ok())
                .ok_or_else(|| {
                    KernelsError::invalid_version(trimmed, format!("missing or non-numeric {name}"))
                })
        };
        let major = component("major")?;
        let minor = component("minor")?;
        let patch = component("patch")?;
        if parts.next().is_some() {
            return Err(KernelsError::invalid_version(
                trimmed,
                "more than three version components",
            ));
        }

        let rc = if tag.is_empty() {
            None
        } else {
            let number = tag
                .strip_prefix('-')
                .unwrap_or(tag)
                .strip_prefix("rc")
                .map(|n| n.strip_prefix('.').unwrap_or(n))
                .ok_or_else(|| {
                    KernelsError::invalid_version(trimmed, "unrecognized pre-release tag")
                })?;
            let parsed = number.parse().map_err(|_| {
                KernelsError::invalid_version(trimmed, "non-numeric rc component")
            })?;
            Some(parsed)
        };

        Ok(Self {
            major,
            minor,
            patch,
            rc,
        })
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(rc) = self.rc {
            write!(f, "rc{rc}")?;
        }
        Ok(())
    }
}

/// Version predicate for the kernel runtime the host links against.
///
/// Kept abstract so the applier never depends on how a host detects its
/// runtime; the applier only asks "is it at least this version".
pub trait KernelsRuntime: Send + Sync {
    /// Installed runtime version, or `None` when no runtime is present.
    fn version(&self) -> Option<RuntimeVersion>;

    /// Runtime name for logging/debugging.
    fn name(&self) -> &'static str;

    /// Whether the installed runtime satisfies `min`.
    fn supports(&self, min: &RuntimeVersion) -> bool {
        self.version().is_some_and(|v| v >= *min)
    }
}

/// A runtime whose version is known up front.
///
/// Hosts compiled against a specific substitution runtime wrap its reported
/// version in this.
#[derive(Debug, Clone, Copy)]
pub struct StaticRuntime {
    version: RuntimeVersion,
}

impl StaticRuntime {
    /// Wrap a known version.
    pub fn new(version: RuntimeVersion) -> Self {
        Self { version }
    }

    /// Parse a reported version string.
    pub fn parse(version: &str) -> KernelsResult<Self> {
        Ok(Self {
            version: version.parse()?,
        })
    }
}

impl KernelsRuntime for StaticRuntime {
    fn version(&self) -> Option<RuntimeVersion> {
        Some(self.version)
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// No runtime available; every version check fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRuntime;

impl KernelsRuntime for NoopRuntime {
    fn version(&self) -> Option<RuntimeVersion> {
        None
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
