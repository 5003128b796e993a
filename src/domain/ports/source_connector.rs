//! SourceConnector port - source control connection provider
//!
//! Turns a repository descriptor plus a connection identifier into a build
//! input the pipeline can consume.

use serde::Serialize;

use crate::domain::entities::RepoDescriptor;

use super::ProvisionResult;

/// A usable pipeline build input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInput {
    /// Input name (the repository's short name)
    pub name: String,
    /// `owner/repository`
    pub repository: String,
    pub branch: String,
    pub connection_arn: String,
}

/// Abstract source connection provider
pub trait SourceConnector {
    fn connect(&mut self, repo: &RepoDescriptor, connection_arn: &str)
        -> ProvisionResult<SourceInput>;
}
