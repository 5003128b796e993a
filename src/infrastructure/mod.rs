//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//!
//! ## Structure
//!
//! - `provisioner/` - Provisioner implementations (in-memory plan recorder)
//! - `sources/` - Source connector implementations (connection ARN based)

pub mod provisioner;
pub mod sources;

// Re-export for convenience
pub use provisioner::InMemoryProvisioner;
pub use sources::ConnectionSourceConnector;
