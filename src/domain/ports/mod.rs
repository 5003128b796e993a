//! Domain Ports
//!
//! Interfaces the core uses to reach its external collaborators.

mod provisioner;
mod source_connector;

pub use provisioner::{ProvisionError, ProvisionResult, Provisioner, ResourceHandle};
pub use source_connector::{SourceConnector, SourceInput};
