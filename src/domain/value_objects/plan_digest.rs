//! Plan digest value object
//!
//! A SHA-256 fingerprint of a serialized provisioning plan. Two deploy
//! invocations over the same configuration produce the same digest.

use std::fmt;

/// SHA-256 digest with the `sha256:` prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanDigest(String);

impl PlanDigest {
    /// Prefix for SHA-256 digests
    pub const PREFIX: &'static str = "sha256:";

    /// Compute the digest of serialized content
    pub fn from_content(content: &str) -> Self {
        use sha2::{Digest, Sha256};
        let hash = Sha256::digest(content.as_bytes());
        Self(format!("{}{:x}", Self::PREFIX, hash))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex part without prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }

    /// Short form for summaries
    pub fn short(&self) -> &str {
        let hex = self.hex();
        &hex[..hex.len().min(12)]
    }
}

impl fmt::Display for PlanDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PlanDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
