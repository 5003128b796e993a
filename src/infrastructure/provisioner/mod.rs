//! Provisioner implementations

mod memory;

pub use memory::InMemoryProvisioner;
