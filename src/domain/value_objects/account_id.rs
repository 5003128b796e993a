//! Cloud account identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

/// A validated 12-digit cloud account id.
///
/// Parsing happens when configuration is built, so a malformed id can never
/// reach delegation role resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Number of digits in an account id
    pub const LEN: usize = 12;

    pub fn parse(value: &str) -> PlanResult<Self> {
        let trimmed = value.trim();
        if trimmed.len() != Self::LEN || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PlanError::InvalidAccountId {
                value: value.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AccountId {
    type Error = PlanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}
