//! Domain Layer
//!
//! The core of stackplan - topology resolution without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Descriptors, resource declarations, the provisioning plan
//! - `value_objects/` - Immutable value types (AccountId, Packaging, PlanDigest)
//! - `services/` - Resolver, delegator, topology builder, stage composer, pipeline graph
//! - `ports/` - Interface definitions for the provisioning and source providers
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Everything external goes through the `Provisioner` and `SourceConnector` ports
//! 2. **Fail fast** - Configuration is validated before the first declaration
//! 3. **Explicit inputs** - No ambient globals; every builder receives its configuration

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
