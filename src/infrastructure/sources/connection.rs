//! Connection-based source inputs
//!
//! Source inputs backed by a pre-authorized source control connection,
//! identified by its ARN. The connection itself is created out of band.

use crate::domain::entities::RepoDescriptor;
use crate::domain::ports::{ProvisionError, ProvisionResult, SourceConnector, SourceInput};

const CONNECTION_ARN_PREFIX: &str = "arn:";

#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionSourceConnector;

impl SourceConnector for ConnectionSourceConnector {
    fn connect(
        &mut self,
        repo: &RepoDescriptor,
        connection_arn: &str,
    ) -> ProvisionResult<SourceInput> {
        if !connection_arn.starts_with(CONNECTION_ARN_PREFIX) {
            return Err(ProvisionError::Rejected {
                resource: format!("source connection for '{}'", repo.name),
                reason: format!("'{}' is not a connection ARN", connection_arn),
            });
        }

        tracing::debug!(repository = %repo.source, branch = %repo.branch, "connected source input");
        Ok(SourceInput {
            name: repo.name.clone(),
            repository: repo.source.clone(),
            branch: repo.branch.clone(),
            connection_arn: connection_arn.to_string(),
        })
    }
}
