//! Root DNS zone policy

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::AccountId;
use crate::error::{PlanError, PlanResult};

/// The top-level zone every child zone delegates from.
///
/// Shared read-only by all stages of one plan construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainPolicy {
    #[serde(rename = "id")]
    pub root_zone_id: String,
    #[serde(rename = "name")]
    pub root_zone_name: String,
    #[serde(rename = "account")]
    pub root_zone_account_id: AccountId,
    #[serde(rename = "name_servers", default)]
    pub root_zone_name_servers: Vec<String>,
}

impl DomainPolicy {
    /// Delegation must cross an account boundary when the child zone lives
    /// in a different account than the root zone.
    pub fn requires_cross_account(&self, child_account_id: &AccountId) -> bool {
        &self.root_zone_account_id != child_account_id
    }

    pub fn validate(&self) -> PlanResult<()> {
        for (field, value) in [("id", &self.root_zone_id), ("name", &self.root_zone_name)] {
            if value.trim().is_empty() {
                return Err(PlanError::MissingField {
                    field: field.to_string(),
                    context: "[domain.root_zone]".to_string(),
                });
            }
        }
        Ok(())
    }
}
