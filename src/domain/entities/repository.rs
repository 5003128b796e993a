//! Source repository descriptor

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

/// A source-code input to the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDescriptor {
    /// `owner/repository`
    pub source: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Short name; also the additional-input name and package directory
    pub name: String,
}

fn default_branch() -> String {
    "main".to_string()
}

impl RepoDescriptor {
    pub fn new(source: impl Into<String>, branch: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            branch: branch.into(),
            name: name.into(),
        }
    }

    pub fn validate(&self) -> PlanResult<()> {
        let context = format!("repository '{}'", self.name);
        if self.name.trim().is_empty() {
            return Err(PlanError::MissingField {
                field: "name".to_string(),
                context,
            });
        }
        if self.branch.trim().is_empty() {
            return Err(PlanError::MissingField {
                field: "branch".to_string(),
                context,
            });
        }
        match self.source.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok(()),
            _ => Err(PlanError::MissingField {
                field: "source (owner/repository)".to_string(),
                context,
            }),
        }
    }
}
