//! Deployment stage descriptor

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::AccountId;
use crate::error::{PlanError, PlanResult};

/// One deployment environment. Position in the registry is pipeline order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDescriptor {
    #[serde(rename = "account")]
    pub account_id: AccountId,
    pub region: String,
    #[serde(rename = "name")]
    pub label: String,
}

impl StageDescriptor {
    pub fn new(account_id: AccountId, region: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            account_id,
            region: region.into(),
            label: label.into(),
        }
    }

    pub fn validate(&self) -> PlanResult<()> {
        if self.label.trim().is_empty() {
            return Err(PlanError::MissingField {
                field: "name".to_string(),
                context: format!("stage in account {}", self.account_id),
            });
        }
        // Labels end up in zone names and construct ids.
        if !is_construct_name(&self.label) {
            return Err(PlanError::InvalidStageLabel {
                label: self.label.clone(),
            });
        }
        if self.region.trim().is_empty() {
            return Err(PlanError::MissingField {
                field: "region".to_string(),
                context: format!("stage '{}'", self.label),
            });
        }
        Ok(())
    }
}

/// Letters, digits and '-' only; what construct ids and DNS labels share.
pub(crate) fn is_construct_name(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// A single DNS label: construct name chars, no leading or trailing '-'.
pub(crate) fn is_dns_label(value: &str) -> bool {
    is_construct_name(value) && !value.starts_with('-') && !value.ends_with('-')
}
