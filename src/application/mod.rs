//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `SynthUseCase` - Validates configuration and builds the pipeline graph
//! - `ValidateUseCase` - Validates configuration without declaring anything

pub mod synth;
pub mod validate;

pub use synth::{synthesize, SynthUseCase, Synthesis};
pub use validate::{StageSummary, ValidateUseCase, ValidationReport};
