//! stackplan - deployment topology planner
//!
//! Resolves a static deployment configuration (repositories, stages, a root
//! DNS zone and service descriptors) into a provisioning plan: an acyclic
//! graph of resource declarations plus a delivery pipeline definition.
//! Creating the resources is left to a provider behind the `Provisioner`
//! port.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{synthesize, Synthesis};
pub use config::DeploymentConfig;
pub use domain::entities::ProvisioningPlan;
pub use domain::ports::{Provisioner, ResourceHandle, SourceConnector};
pub use domain::services::{DomainResolver, PipelineGraph};
pub use error::{PlanError, PlanResult};
